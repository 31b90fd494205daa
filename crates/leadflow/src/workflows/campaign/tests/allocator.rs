use super::common::*;
use crate::workflows::campaign::allocator::{build_plan, AllocationError, CampaignSettings};
use crate::workflows::leads::domain::{EmailType, LeadId, PriorityTier};
use crate::workflows::leads::segmenter::segment;

fn segments_from_scores(scores: &[u8]) -> crate::workflows::leads::segmenter::LeadSegments {
    let leads: Vec<_> = scores
        .iter()
        .enumerate()
        .map(|(idx, score)| scored_lead(&format!("lead-{idx}"), *score))
        .collect();
    segment(&leads)
}

#[test]
fn default_settings_request_every_classified_lead() {
    let segments = segments_from_scores(&[5, 4, 3, 2]);
    let counts = segments.counts();
    let settings = CampaignSettings::for_all(&counts, true);

    assert_eq!(settings.high_count, 2);
    assert_eq!(settings.medium_count, 1);
    assert_eq!(settings.low_count, 1);

    let plan = build_plan(&segments, &settings).expect("full plan builds");
    assert_eq!(plan.len(), counts.total);
}

#[test]
fn all_zero_counts_are_rejected_before_dispatch() {
    let segments = segments_from_scores(&[5, 3, 1]);
    let settings = CampaignSettings {
        high_count: 0,
        medium_count: 0,
        low_count: 0,
        test_mode: false,
    };

    assert_eq!(
        build_plan(&segments, &settings),
        Err(AllocationError::InvalidSettings)
    );
}

#[test]
fn requesting_more_than_available_is_out_of_range() {
    let segments = segments_from_scores(&[5, 3]);
    let settings = CampaignSettings {
        high_count: 1,
        medium_count: 4,
        low_count: 0,
        test_mode: false,
    };

    assert_eq!(
        build_plan(&segments, &settings),
        Err(AllocationError::OutOfRange {
            tier: PriorityTier::Medium,
            requested: 4,
            available: 1,
        })
    );
}

#[test]
fn absurdly_large_counts_are_rejected_before_any_allocation() {
    let segments = segments_from_scores(&[5, 3, 1]);
    let settings = CampaignSettings {
        high_count: 4_000_000_000_000_000_000,
        medium_count: 0,
        low_count: 0,
        test_mode: true,
    };

    assert_eq!(
        build_plan(&segments, &settings),
        Err(AllocationError::OutOfRange {
            tier: PriorityTier::High,
            requested: 4_000_000_000_000_000_000,
            available: 1,
        })
    );
}

#[test]
fn plan_maps_each_tier_to_its_fixed_email_type() {
    let segments = segments_from_scores(&[5, 3, 1]);
    let settings = CampaignSettings::for_all(&segments.counts(), false);
    let plan = build_plan(&segments, &settings).expect("plan builds");

    let types: Vec<_> = plan
        .entries()
        .iter()
        .map(|entry| entry.email_type)
        .collect();
    assert_eq!(
        types,
        vec![
            EmailType::Personalized,
            EmailType::Promotional,
            EmailType::Basic
        ]
    );
}

#[test]
fn plan_never_duplicates_a_lead() {
    let segments = segments_from_scores(&[5, 5, 4, 3, 3, 2, 1]);
    let settings = CampaignSettings::for_all(&segments.counts(), true);
    let plan = build_plan(&segments, &settings).expect("plan builds");

    let mut ids: Vec<LeadId> = plan
        .entries()
        .iter()
        .map(|entry| entry.lead.id.clone())
        .collect();
    let total = ids.len();
    ids.sort_by(|a, b| a.0.cmp(&b.0));
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn partial_counts_select_within_each_tier_only() {
    let segments = segments_from_scores(&[5, 5, 5, 3, 3, 1]);
    let settings = CampaignSettings {
        high_count: 2,
        medium_count: 0,
        low_count: 1,
        test_mode: true,
    };
    let plan = build_plan(&segments, &settings).expect("plan builds");

    assert_eq!(plan.len(), 3);
    let personalized = plan
        .entries()
        .iter()
        .filter(|entry| entry.email_type == EmailType::Personalized)
        .count();
    let promotional = plan
        .entries()
        .iter()
        .filter(|entry| entry.email_type == EmailType::Promotional)
        .count();
    assert_eq!(personalized, 2);
    assert_eq!(promotional, 0);
}

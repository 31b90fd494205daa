use std::sync::Arc;

use super::common::*;
use crate::workflows::campaign::allocator::{build_plan, CampaignSettings};
use crate::workflows::campaign::dispatcher::{CampaignDispatcher, RunStatus};
use crate::workflows::leads::segmenter::segment;

fn plan_for(scores: &[u8]) -> crate::workflows::campaign::allocator::DispatchPlan {
    let leads: Vec<_> = scores
        .iter()
        .enumerate()
        .map(|(idx, score)| scored_lead(&format!("lead-{idx}"), *score))
        .collect();
    let segments = segment(&leads);
    let settings = CampaignSettings::for_all(&segments.counts(), false);
    build_plan(&segments, &settings).expect("plan builds")
}

#[test]
fn test_mode_never_touches_the_transport() {
    let gateway = Arc::new(RecordingGateway::default());
    let dispatcher = CampaignDispatcher::new(gateway.clone());
    let plan = plan_for(&[5, 4, 3, 2, 1]);

    let result = dispatcher.run(&plan, true);

    assert_eq!(gateway.send_count(), 0);
    assert_eq!(result.successful, plan.len());
    assert_eq!(result.failed, 0);
    assert_eq!(result.details.len(), plan.len());
    assert!(result.test_mode);
    assert_eq!(result.status, RunStatus::Completed);
}

#[test]
fn live_mode_sends_exactly_once_per_entry() {
    let gateway = Arc::new(RecordingGateway::default());
    let dispatcher = CampaignDispatcher::new(gateway.clone());
    let plan = plan_for(&[5, 3, 1]);

    let result = dispatcher.run(&plan, false);

    assert_eq!(gateway.send_count(), 3);
    assert_eq!(result.successful, 3);
    assert_eq!(result.failed, 0);
}

#[test]
fn one_failure_out_of_five_is_isolated() {
    let gateway = Arc::new(RecordingGateway::default());
    // The lead with score 3 sits third in the plan (after the two high ones).
    gateway.fail_sends_to("lead-2@example.com");
    let dispatcher = CampaignDispatcher::new(gateway.clone());
    let plan = plan_for(&[5, 4, 3, 2, 1]);

    let result = dispatcher.run(&plan, false);

    assert_eq!(result.successful, 4);
    assert_eq!(result.failed, 1);
    assert_eq!(result.details.len(), 5);
    assert_eq!(result.status, RunStatus::Completed);
    // Every entry still got its one send attempt.
    assert_eq!(gateway.send_count(), 5);

    let failed: Vec<_> = result
        .details
        .iter()
        .filter(|outcome| !outcome.success)
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].email, "lead-2@example.com");
}

#[test]
fn details_follow_plan_order() {
    let gateway = Arc::new(RecordingGateway::default());
    let dispatcher = CampaignDispatcher::new(gateway.clone());
    let plan = plan_for(&[5, 3, 1]);

    let result = dispatcher.run(&plan, false);

    let plan_emails: Vec<_> = plan
        .entries()
        .iter()
        .map(|entry| entry.lead.email.clone())
        .collect();
    let detail_emails: Vec<_> = result
        .details
        .iter()
        .map(|outcome| outcome.email.clone())
        .collect();
    assert_eq!(plan_emails, detail_emails);
}

#[test]
fn empty_plan_completes_with_no_outcomes() {
    let gateway = Arc::new(RecordingGateway::default());
    let dispatcher = CampaignDispatcher::new(gateway.clone());
    let plan = crate::workflows::campaign::allocator::DispatchPlan::default();

    let result = dispatcher.run(&plan, false);

    assert_eq!(result.successful, 0);
    assert_eq!(result.failed, 0);
    assert!(result.details.is_empty());
    assert_eq!(result.status, RunStatus::Completed);
}

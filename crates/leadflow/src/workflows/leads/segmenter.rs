use serde::Serialize;

use super::classifier::tier_for_score;
use super::domain::{Lead, PriorityTier};

/// Per-tier counts of classified leads. `total` excludes unclassified
/// leads so downstream allocation never requests more than exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl TierCounts {
    pub const fn for_tier(&self, tier: PriorityTier) -> usize {
        match tier {
            PriorityTier::High => self.high,
            PriorityTier::Medium => self.medium,
            PriorityTier::Low => self.low,
        }
    }
}

/// Lead collection partitioned by priority tier.
///
/// Each lead appears in exactly one bucket, or in none when it carries no
/// usable score. Buckets preserve the input ordering, so segmenting the
/// same collection twice yields identical membership.
#[derive(Debug, Clone, Default)]
pub struct LeadSegments {
    pub high: Vec<Lead>,
    pub medium: Vec<Lead>,
    pub low: Vec<Lead>,
}

impl LeadSegments {
    pub fn bucket(&self, tier: PriorityTier) -> &[Lead] {
        match tier {
            PriorityTier::High => &self.high,
            PriorityTier::Medium => &self.medium,
            PriorityTier::Low => &self.low,
        }
    }

    pub fn counts(&self) -> TierCounts {
        let high = self.high.len();
        let medium = self.medium.len();
        let low = self.low.len();
        TierCounts {
            high,
            medium,
            low,
            total: high + medium + low,
        }
    }
}

/// Bucket every lead by tier in a single pass. Never fails: unclassified
/// leads are dropped from all buckets rather than reported as errors.
pub fn segment(leads: &[Lead]) -> LeadSegments {
    let mut segments = LeadSegments::default();
    for lead in leads {
        match tier_for_score(lead.lead_score) {
            Some(PriorityTier::High) => segments.high.push(lead.clone()),
            Some(PriorityTier::Medium) => segments.medium.push(lead.clone()),
            Some(PriorityTier::Low) => segments.low.push(lead.clone()),
            None => {}
        }
    }
    segments
}

use crate::workflows::leads::domain::{EmailType, Lead, PriorityTier};
use crate::workflows::leads::segmenter::{LeadSegments, TierCounts};

/// Requested send counts per tier plus the non-destructive test-mode flag.
///
/// Each count must stay within the tier's available count; `build_plan`
/// rejects settings that exceed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignSettings {
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
    pub test_mode: bool,
}

impl CampaignSettings {
    /// Default settings: send to every classified lead in every tier.
    pub fn for_all(counts: &TierCounts, test_mode: bool) -> Self {
        Self {
            high_count: counts.high,
            medium_count: counts.medium,
            low_count: counts.low,
            test_mode,
        }
    }

    pub const fn requested(&self, tier: PriorityTier) -> usize {
        match tier {
            PriorityTier::High => self.high_count,
            PriorityTier::Medium => self.medium_count,
            PriorityTier::Low => self.low_count,
        }
    }

    pub const fn total_requested(&self) -> usize {
        self.high_count + self.medium_count + self.low_count
    }
}

/// One recipient in a dispatch plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntry {
    pub lead: Lead,
    pub email_type: EmailType,
}

/// Ordered, duplicate-free list of (lead, email type) pairs for one run.
///
/// Entries are a snapshot taken at plan-build time; mutating the store
/// afterwards cannot corrupt an in-flight run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchPlan {
    entries: Vec<PlanEntry>,
}

impl DispatchPlan {
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Allocation failure, raised before any dispatch is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("campaign requests no recipients; select at least one lead")]
    InvalidSettings,
    #[error("requested {requested} {tier} priority lead(s), only {available} available", tier = .tier.label())]
    OutOfRange {
        // i64 so a negative wire-level request reports what was asked for.
        tier: PriorityTier,
        requested: i64,
        available: usize,
    },
}

/// Build a dispatch plan from segmented leads and campaign settings.
///
/// Selection within a tier follows bucket order; the order is not part of
/// the contract, only that no lead is selected twice and no tier exceeds
/// its availability.
pub fn build_plan(
    segments: &LeadSegments,
    settings: &CampaignSettings,
) -> Result<DispatchPlan, AllocationError> {
    if settings.high_count == 0 && settings.medium_count == 0 && settings.low_count == 0 {
        return Err(AllocationError::InvalidSettings);
    }

    // Every tier is validated before a single byte is allocated, so an
    // oversized request can never reach `with_capacity`.
    for tier in PriorityTier::ALL {
        let available = segments.bucket(tier).len();
        let requested = settings.requested(tier);
        if requested > available {
            return Err(AllocationError::OutOfRange {
                tier,
                requested: requested as i64,
                available,
            });
        }
    }

    let mut entries = Vec::with_capacity(settings.total_requested());
    for tier in PriorityTier::ALL {
        let requested = settings.requested(tier);
        entries.extend(
            segments
                .bucket(tier)
                .iter()
                .take(requested)
                .map(|lead| PlanEntry {
                    lead: lead.clone(),
                    email_type: tier.email_type(),
                }),
        );
    }

    Ok(DispatchPlan { entries })
}

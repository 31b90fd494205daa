use super::domain::{
    BusinessClassification, CustomerType, Lead, LocationPriority, PriceRange, PriorityTier,
};

/// Locations treated as high-value markets. Matching is trimmed and
/// case-insensitive; the set itself is fixed business data.
pub const HIGH_VALUE_LOCATIONS: [&str; 5] =
    ["Delhi", "Mumbai", "Bangalore", "Karnatka", "Hyderabad"];

const VIP_BUDGET_THRESHOLD: u64 = 200_000;
const PREMIUM_BUDGET_THRESHOLD: u64 = 100_000;
const MID_RANGE_BUDGET_THRESHOLD: u64 = 50_000;

/// Classification output for a single lead: the priority tier (absent when
/// the lead has no usable score) and the derived business labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: Option<PriorityTier>,
    pub business: BusinessClassification,
}

/// Derive the priority tier from an external score.
///
/// Scores outside 1..=5 are treated the same as a missing score: the lead
/// stays unclassified rather than erroring.
pub fn tier_for_score(score: Option<u8>) -> Option<PriorityTier> {
    match score? {
        4..=5 => Some(PriorityTier::High),
        3 => Some(PriorityTier::Medium),
        1..=2 => Some(PriorityTier::Low),
        _ => None,
    }
}

/// Classify a lead. Pure and deterministic: the tier depends only on
/// `lead_score`, the business labels only on location, budget,
/// specific-property intent, and urgency.
pub fn classify(lead: &Lead) -> Classification {
    Classification {
        tier: tier_for_score(lead.lead_score),
        business: business_classification(lead),
    }
}

pub fn business_classification(lead: &Lead) -> BusinessClassification {
    BusinessClassification {
        location_priority: location_priority(&lead.location),
        price_range: price_range(lead.budget),
        customer_type: if lead.specific_property.is_targeted() {
            CustomerType::Targeted
        } else {
            CustomerType::General
        },
        vip: lead.budget > VIP_BUDGET_THRESHOLD || lead.urgency > 4,
    }
}

fn location_priority(location: &str) -> LocationPriority {
    let trimmed = location.trim();
    if HIGH_VALUE_LOCATIONS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(trimmed))
    {
        LocationPriority::High
    } else {
        LocationPriority::Standard
    }
}

fn price_range(budget: u64) -> PriceRange {
    if budget > PREMIUM_BUDGET_THRESHOLD {
        PriceRange::Premium
    } else if budget > MID_RANGE_BUDGET_THRESHOLD {
        PriceRange::MidRange
    } else {
        PriceRange::Budget
    }
}

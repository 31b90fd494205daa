use chrono::Utc;

use super::domain::{Lead, LeadId, LeadSubmission};

/// Validation failure for a lead submission. Rejected before anything is
/// written to the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("urgency must be between 1 and 5, got {0}")]
    UrgencyOutOfRange(u8),
    #[error("lead score must be between 1 and 5, got {0}")]
    ScoreOutOfRange(u8),
}

/// Validate a submission and produce a store-ready lead.
///
/// The external scorer may not have produced a score yet; that is accepted
/// as-is and the lead simply stays unclassified until one arrives. A score
/// outside 1..=5 is rejected at intake rather than silently stored.
pub fn lead_from_submission(
    submission: LeadSubmission,
    assigned_id: LeadId,
) -> Result<Lead, IntakeError> {
    let LeadSubmission {
        id,
        name,
        email,
        phone,
        budget,
        property_type,
        location,
        urgency,
        specific_property,
        intent_questions,
        sentiment_questions,
        lead_score,
    } = submission;

    require_non_empty("name", &name)?;
    require_non_empty("email", &email)?;
    require_non_empty("phone", &phone)?;

    if !(1..=5).contains(&urgency) {
        return Err(IntakeError::UrgencyOutOfRange(urgency));
    }
    if let Some(score) = lead_score {
        if !(1..=5).contains(&score) {
            return Err(IntakeError::ScoreOutOfRange(score));
        }
    }

    Ok(Lead {
        id: id.unwrap_or(assigned_id),
        name,
        email,
        phone,
        budget,
        property_type,
        location,
        urgency,
        specific_property,
        intent_questions,
        sentiment_questions,
        lead_score,
        created_at: Utc::now(),
    })
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), IntakeError> {
    if value.trim().is_empty() {
        Err(IntakeError::MissingField { field })
    } else {
        Ok(())
    }
}

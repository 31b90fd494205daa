use crate::workflows::leads::domain::{EmailType, Lead};

/// Trait describing the external email preview/send collaborator.
///
/// `send` failures are per-recipient data for the orchestrator, never a
/// reason to abort a run.
pub trait EmailGateway: Send + Sync {
    /// Render the email body that would be sent to this lead.
    fn preview(&self, lead: &Lead, email_type: EmailType) -> Result<String, GatewayError>;
    /// Deliver one email. Attempted exactly once per plan entry.
    fn send(&self, lead: &Lead, email_type: EmailType) -> Result<(), GatewayError>;
}

/// Email gateway failure.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("no template for {0}")]
    TemplateNotFound(String),
    #[error("email transport unavailable: {0}")]
    Transport(String),
}

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::allocator::DispatchPlan;
use super::gateway::EmailGateway;

/// Lifecycle of a campaign run. A run that sees send failures still ends
/// `Completed`; it is never left in `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Idle,
    Running,
    Completed,
}

impl RunStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
        }
    }
}

/// Per-recipient outcome, in plan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipientOutcome {
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub email_type: &'static str,
    pub success: bool,
}

/// Aggregate result of one campaign run. Created fresh per run and never
/// merged across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResult {
    pub status: RunStatus,
    pub test_mode: bool,
    pub successful: usize,
    pub failed: usize,
    pub details: Vec<RecipientOutcome>,
}

/// Executes a dispatch plan against the external email gateway.
pub struct CampaignDispatcher<G> {
    gateway: Arc<G>,
}

impl<G> CampaignDispatcher<G>
where
    G: EmailGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Run the plan to completion.
    ///
    /// In test mode the gateway is never invoked; each entry is recorded as
    /// a simulated send. Otherwise every entry gets exactly one `send`
    /// attempt, and one recipient's failure does not stop the rest.
    pub fn run(&self, plan: &DispatchPlan, test_mode: bool) -> CampaignResult {
        info!(
            entries = plan.len(),
            test_mode,
            status = RunStatus::Running.label(),
            "campaign run started"
        );

        let mut details = Vec::with_capacity(plan.len());
        for entry in plan.entries() {
            let success = if test_mode {
                debug!(
                    lead = %entry.lead.id.0,
                    email_type = entry.email_type.label(),
                    "test mode: would send"
                );
                true
            } else {
                match self.gateway.send(&entry.lead, entry.email_type) {
                    Ok(()) => true,
                    Err(err) => {
                        warn!(lead = %entry.lead.id.0, error = %err, "send failed");
                        false
                    }
                }
            };

            details.push(RecipientOutcome {
                name: entry.lead.name.clone(),
                email: entry.lead.email.clone(),
                email_type: entry.email_type.label(),
                success,
            });
        }

        let successful = details.iter().filter(|outcome| outcome.success).count();
        let failed = details.len() - successful;

        info!(
            successful,
            failed,
            status = RunStatus::Completed.label(),
            "campaign run completed"
        );

        CampaignResult {
            status: RunStatus::Completed,
            test_mode,
            successful,
            failed,
            details,
        }
    }
}

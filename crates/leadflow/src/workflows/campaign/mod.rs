//! Campaign allocation, dispatch, and preview orchestration.
//!
//! A campaign run is one logical operation: segment the current leads,
//! validate the requested per-tier counts, build a dispatch plan, and
//! execute it against the external email gateway. Individual send failures
//! never abort a run; validation failures reject it before any external
//! call.

pub mod allocator;
pub mod dispatcher;
pub mod gateway;
pub mod preview;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use allocator::{build_plan, AllocationError, CampaignSettings, DispatchPlan, PlanEntry};
pub use dispatcher::{CampaignDispatcher, CampaignResult, RecipientOutcome, RunStatus};
pub use gateway::{EmailGateway, GatewayError};
pub use preview::{select_preview, LeadPicker, PreviewSelection, UniformPicker};
pub use router::campaign_router;
pub use service::{
    CampaignRequest, CampaignService, CampaignServiceError, EmailPreview, LeadView,
};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::allocator::{build_plan, AllocationError, CampaignSettings};
use super::dispatcher::{CampaignDispatcher, CampaignResult};
use super::gateway::{EmailGateway, GatewayError};
use super::preview::{select_preview, LeadPicker};
use crate::workflows::leads::classifier::{business_classification, tier_for_score};
use crate::workflows::leads::domain::{
    BusinessClassification, EmailType, Lead, LeadId, LeadSubmission, PriorityTier,
};
use crate::workflows::leads::intake::{lead_from_submission, IntakeError};
use crate::workflows::leads::segmenter::{segment, TierCounts};
use crate::workflows::leads::store::{LeadStore, StoreError};

/// Facade composing the store, segmenter, allocator, dispatcher, and
/// preview picker. Every operation is request/response: leads are listed
/// fresh from the store and re-segmented each time, with no shared state
/// between calls.
pub struct CampaignService<S, G, P> {
    store: Arc<S>,
    gateway: Arc<G>,
    dispatcher: CampaignDispatcher<G>,
    picker: P,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

/// Caller-facing campaign request. Omitted counts default to the full
/// tier count (send to everyone classified in that tier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignRequest {
    pub high_count: Option<i64>,
    pub medium_count: Option<i64>,
    pub low_count: Option<i64>,
    pub test_mode: bool,
}

impl Default for CampaignRequest {
    fn default() -> Self {
        Self {
            high_count: None,
            medium_count: None,
            low_count: None,
            // Non-destructive by default; a real send must be asked for.
            test_mode: true,
        }
    }
}

/// A lead as exposed to callers: the stored record plus its recomputed
/// tier label and business classification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadView {
    #[serde(flatten)]
    pub lead: Lead,
    pub tier: Option<&'static str>,
    pub classification: BusinessClassification,
}

impl LeadView {
    pub fn from_lead(lead: Lead) -> Self {
        let tier = tier_for_score(lead.lead_score).map(PriorityTier::label);
        let classification = business_classification(&lead);
        Self {
            lead,
            tier,
            classification,
        }
    }
}

/// Rendered preview for one representative lead of a tier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailPreview {
    pub lead: Lead,
    pub email_type: EmailType,
    pub content: String,
}

/// Error raised by the campaign service.
#[derive(Debug, thiserror::Error)]
pub enum CampaignServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl<S, G, P> CampaignService<S, G, P>
where
    S: LeadStore + 'static,
    G: EmailGateway + 'static,
    P: LeadPicker,
{
    pub fn new(store: Arc<S>, gateway: Arc<G>, picker: P) -> Self {
        let dispatcher = CampaignDispatcher::new(gateway.clone());
        Self {
            store,
            gateway,
            dispatcher,
            picker,
        }
    }

    /// Validate and persist a new lead, assigning an id when the creator
    /// did not supply one.
    pub fn submit_lead(&self, submission: LeadSubmission) -> Result<LeadView, CampaignServiceError> {
        let lead = lead_from_submission(submission, next_lead_id())?;
        let stored = self.store.create(lead)?;
        info!(lead = %stored.id.0, "lead stored");
        Ok(LeadView::from_lead(stored))
    }

    /// List all leads with their recomputed classification attached.
    pub fn list_leads(&self) -> Result<Vec<LeadView>, CampaignServiceError> {
        let leads = self.store.list()?;
        Ok(leads.into_iter().map(LeadView::from_lead).collect())
    }

    pub fn delete_lead(&self, id: &LeadId) -> Result<(), CampaignServiceError> {
        self.store.delete(id)?;
        Ok(())
    }

    pub fn delete_all_leads(&self) -> Result<usize, CampaignServiceError> {
        Ok(self.store.delete_all()?)
    }

    pub fn delete_test_leads(&self) -> Result<usize, CampaignServiceError> {
        Ok(self.store.delete_test_leads()?)
    }

    /// Current per-tier counts of classified leads.
    pub fn counts(&self) -> Result<TierCounts, CampaignServiceError> {
        let leads = self.store.list()?;
        Ok(segment(&leads).counts())
    }

    /// Execute one campaign run: segment, validate, plan, dispatch.
    ///
    /// All validation happens before the first gateway call; once dispatch
    /// starts, per-recipient failures are carried in the result instead of
    /// aborting the run.
    pub fn run_campaign(
        &self,
        request: CampaignRequest,
    ) -> Result<CampaignResult, CampaignServiceError> {
        let leads = self.store.list()?;
        let segments = segment(&leads);
        let counts = segments.counts();
        let settings = resolve_settings(&request, &counts)?;
        let plan = build_plan(&segments, &settings)?;
        Ok(self.dispatcher.run(&plan, settings.test_mode))
    }

    /// Render a preview for one randomly chosen lead of the tier.
    ///
    /// `Ok(None)` means the tier has no leads; that is a normal empty
    /// result for the caller, not a failure.
    pub fn preview(
        &self,
        tier: PriorityTier,
    ) -> Result<Option<EmailPreview>, CampaignServiceError> {
        let leads = self.store.list()?;
        let segments = segment(&leads);

        let selection = match select_preview(segments.bucket(tier), tier, &self.picker) {
            Some(selection) => selection,
            None => return Ok(None),
        };

        let content = self
            .gateway
            .preview(&selection.lead, selection.email_type)?;
        Ok(Some(EmailPreview {
            lead: selection.lead,
            email_type: selection.email_type,
            content,
        }))
    }
}

fn resolve_settings(
    request: &CampaignRequest,
    counts: &TierCounts,
) -> Result<CampaignSettings, AllocationError> {
    Ok(CampaignSettings {
        high_count: resolve_count(
            PriorityTier::High,
            request.high_count,
            counts.for_tier(PriorityTier::High),
        )?,
        medium_count: resolve_count(
            PriorityTier::Medium,
            request.medium_count,
            counts.for_tier(PriorityTier::Medium),
        )?,
        low_count: resolve_count(
            PriorityTier::Low,
            request.low_count,
            counts.for_tier(PriorityTier::Low),
        )?,
        test_mode: request.test_mode,
    })
}

fn resolve_count(
    tier: PriorityTier,
    requested: Option<i64>,
    available: usize,
) -> Result<usize, AllocationError> {
    match requested {
        None => Ok(available),
        Some(value) if value < 0 => Err(AllocationError::OutOfRange {
            tier,
            requested: value,
            available,
        }),
        Some(value) => Ok(value as usize),
    }
}

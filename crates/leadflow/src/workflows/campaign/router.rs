use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde_json::json;

use super::gateway::EmailGateway;
use super::preview::LeadPicker;
use super::service::{CampaignRequest, CampaignService, CampaignServiceError};
use crate::workflows::leads::domain::{LeadId, LeadSubmission, PriorityTier};
use crate::workflows::leads::store::{LeadStore, StoreError};

/// Router builder exposing HTTP endpoints for lead intake, segmentation
/// counts, campaign dispatch, and previews.
pub fn campaign_router<S, G, P>(service: Arc<CampaignService<S, G, P>>) -> Router
where
    S: LeadStore + 'static,
    G: EmailGateway + 'static,
    P: LeadPicker + 'static,
{
    Router::new()
        .route(
            "/api/v1/leads",
            post(submit_lead_handler::<S, G, P>)
                .get(list_leads_handler::<S, G, P>)
                .delete(delete_all_handler::<S, G, P>),
        )
        .route("/api/v1/leads/test", delete(delete_test_handler::<S, G, P>))
        .route("/api/v1/leads/counts", get(counts_handler::<S, G, P>))
        .route(
            "/api/v1/leads/campaign",
            post(campaign_handler::<S, G, P>),
        )
        .route(
            "/api/v1/leads/campaign/preview/:tier",
            get(preview_handler::<S, G, P>),
        )
        .route(
            "/api/v1/leads/:lead_id",
            delete(delete_lead_handler::<S, G, P>),
        )
        .with_state(service)
}

pub(crate) async fn submit_lead_handler<S, G, P>(
    State(service): State<Arc<CampaignService<S, G, P>>>,
    axum::Json(submission): axum::Json<LeadSubmission>,
) -> Response
where
    S: LeadStore + 'static,
    G: EmailGateway + 'static,
    P: LeadPicker + 'static,
{
    match service.submit_lead(submission) {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(CampaignServiceError::Intake(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(CampaignServiceError::Store(StoreError::Conflict)) => {
            let payload = json!({ "error": "lead already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn list_leads_handler<S, G, P>(
    State(service): State<Arc<CampaignService<S, G, P>>>,
) -> Response
where
    S: LeadStore + 'static,
    G: EmailGateway + 'static,
    P: LeadPicker + 'static,
{
    match service.list_leads() {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_lead_handler<S, G, P>(
    State(service): State<Arc<CampaignService<S, G, P>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    S: LeadStore + 'static,
    G: EmailGateway + 'static,
    P: LeadPicker + 'static,
{
    let id = LeadId(lead_id);
    match service.delete_lead(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(CampaignServiceError::Store(StoreError::NotFound)) => {
            let payload = json!({ "error": "lead not found", "id": id.0 });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn delete_all_handler<S, G, P>(
    State(service): State<Arc<CampaignService<S, G, P>>>,
) -> Response
where
    S: LeadStore + 'static,
    G: EmailGateway + 'static,
    P: LeadPicker + 'static,
{
    match service.delete_all_leads() {
        Ok(deleted) => (StatusCode::OK, axum::Json(json!({ "deleted": deleted }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_test_handler<S, G, P>(
    State(service): State<Arc<CampaignService<S, G, P>>>,
) -> Response
where
    S: LeadStore + 'static,
    G: EmailGateway + 'static,
    P: LeadPicker + 'static,
{
    match service.delete_test_leads() {
        Ok(deleted) => (StatusCode::OK, axum::Json(json!({ "deleted": deleted }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn counts_handler<S, G, P>(
    State(service): State<Arc<CampaignService<S, G, P>>>,
) -> Response
where
    S: LeadStore + 'static,
    G: EmailGateway + 'static,
    P: LeadPicker + 'static,
{
    match service.counts() {
        Ok(counts) => (StatusCode::OK, axum::Json(counts)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn campaign_handler<S, G, P>(
    State(service): State<Arc<CampaignService<S, G, P>>>,
    axum::Json(request): axum::Json<CampaignRequest>,
) -> Response
where
    S: LeadStore + 'static,
    G: EmailGateway + 'static,
    P: LeadPicker + 'static,
{
    match service.run_campaign(request) {
        Ok(result) => (
            StatusCode::OK,
            axum::Json(json!({ "success": true, "campaign": result })),
        )
            .into_response(),
        Err(CampaignServiceError::Allocation(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn preview_handler<S, G, P>(
    State(service): State<Arc<CampaignService<S, G, P>>>,
    Path(tier): Path<String>,
) -> Response
where
    S: LeadStore + 'static,
    G: EmailGateway + 'static,
    P: LeadPicker + 'static,
{
    let tier = match PriorityTier::parse(&tier) {
        Some(tier) => tier,
        None => {
            let payload = json!({ "error": format!("unknown priority tier '{tier}'") });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.preview(tier) {
        Ok(Some(preview)) => (
            StatusCode::OK,
            axum::Json(json!({ "success": true, "preview": preview })),
        )
            .into_response(),
        Ok(None) => {
            let payload = json!({
                "success": false,
                "preview": serde_json::Value::Null,
                "message": format!("no {} priority leads available", tier.label()),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: CampaignServiceError) -> Response {
    let status = match &error {
        CampaignServiceError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::workflows::campaign::gateway::{EmailGateway, GatewayError};
use crate::workflows::campaign::preview::LeadPicker;
use crate::workflows::campaign::service::CampaignService;
use crate::workflows::leads::domain::{
    EmailType, IntentQuestions, Lead, LeadId, LeadSubmission, PropertyType, SentimentQuestions,
    SpecificProperty,
};
use crate::workflows::leads::store::{LeadStore, StoreError};

pub(super) fn scored_lead(id: &str, score: u8) -> Lead {
    let mut lead = unscored_lead(id);
    lead.lead_score = Some(score);
    lead
}

pub(super) fn unscored_lead(id: &str) -> Lead {
    Lead {
        id: LeadId(id.to_string()),
        name: format!("Lead {id}"),
        email: format!("{id}@example.com"),
        phone: "+91-98100-00000".to_string(),
        budget: 75_000,
        property_type: PropertyType::Apartment,
        location: "Pune".to_string(),
        urgency: 3,
        specific_property: SpecificProperty::No,
        intent_questions: IntentQuestions::default(),
        sentiment_questions: SentimentQuestions::default(),
        lead_score: None,
        created_at: Utc::now(),
    }
}

pub(super) fn submission(name: &str, email: &str) -> LeadSubmission {
    LeadSubmission {
        id: None,
        name: name.to_string(),
        email: email.to_string(),
        phone: "+91-98200-22222".to_string(),
        budget: 95_000,
        property_type: PropertyType::Villa,
        location: "Delhi".to_string(),
        urgency: 4,
        specific_property: SpecificProperty::No,
        intent_questions: IntentQuestions::default(),
        sentiment_questions: SentimentQuestions::default(),
        lead_score: Some(3),
    }
}

/// In-memory store preserving insertion order so plans are deterministic.
#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    leads: Arc<Mutex<Vec<Lead>>>,
}

impl MemoryStore {
    pub(super) fn with_leads(leads: Vec<Lead>) -> Self {
        Self {
            leads: Arc::new(Mutex::new(leads)),
        }
    }
}

impl LeadStore for MemoryStore {
    fn list(&self) -> Result<Vec<Lead>, StoreError> {
        Ok(self.leads.lock().expect("store mutex poisoned").clone())
    }

    fn create(&self, lead: Lead) -> Result<Lead, StoreError> {
        let mut guard = self.leads.lock().expect("store mutex poisoned");
        if guard.iter().any(|existing| existing.id == lead.id) {
            return Err(StoreError::Conflict);
        }
        guard.push(lead.clone());
        Ok(lead)
    }

    fn delete(&self, id: &LeadId) -> Result<(), StoreError> {
        let mut guard = self.leads.lock().expect("store mutex poisoned");
        let before = guard.len();
        guard.retain(|lead| &lead.id != id);
        if guard.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        let mut guard = self.leads.lock().expect("store mutex poisoned");
        let deleted = guard.len();
        guard.clear();
        Ok(deleted)
    }

    fn delete_test_leads(&self) -> Result<usize, StoreError> {
        let mut guard = self.leads.lock().expect("store mutex poisoned");
        let before = guard.len();
        guard.retain(|lead| !lead.email.ends_with("@test.example"));
        Ok(before - guard.len())
    }
}

/// Store stub that always reports unavailability.
#[derive(Default, Clone)]
pub(super) struct UnavailableStore;

impl LeadStore for UnavailableStore {
    fn list(&self) -> Result<Vec<Lead>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn create(&self, _lead: Lead) -> Result<Lead, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn delete(&self, _id: &LeadId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn delete_test_leads(&self) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// Gateway double that records every call and can be told to fail sends
/// for specific recipient addresses.
#[derive(Default)]
pub(super) struct RecordingGateway {
    sent: Mutex<Vec<(LeadId, EmailType)>>,
    previewed: Mutex<Vec<(LeadId, EmailType)>>,
    fail_for: Mutex<Vec<String>>,
}

impl RecordingGateway {
    pub(super) fn fail_sends_to(&self, email: &str) {
        self.fail_for
            .lock()
            .expect("gateway mutex poisoned")
            .push(email.to_string());
    }

    pub(super) fn send_count(&self) -> usize {
        self.sent.lock().expect("gateway mutex poisoned").len()
    }

    pub(super) fn sent(&self) -> Vec<(LeadId, EmailType)> {
        self.sent.lock().expect("gateway mutex poisoned").clone()
    }

    pub(super) fn preview_count(&self) -> usize {
        self.previewed.lock().expect("gateway mutex poisoned").len()
    }
}

impl EmailGateway for RecordingGateway {
    fn preview(&self, lead: &Lead, email_type: EmailType) -> Result<String, GatewayError> {
        self.previewed
            .lock()
            .expect("gateway mutex poisoned")
            .push((lead.id.clone(), email_type));
        Ok(format!("<p>{} email for {}</p>", email_type.label(), lead.name))
    }

    fn send(&self, lead: &Lead, email_type: EmailType) -> Result<(), GatewayError> {
        self.sent
            .lock()
            .expect("gateway mutex poisoned")
            .push((lead.id.clone(), email_type));
        let failing = self.fail_for.lock().expect("gateway mutex poisoned");
        if failing.iter().any(|email| email == &lead.email) {
            return Err(GatewayError::Transport(format!(
                "mailbox rejected for {}",
                lead.email
            )));
        }
        Ok(())
    }
}

/// Deterministic picker returning a fixed index (clamped to the bucket).
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedPicker(pub(super) usize);

impl LeadPicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}

pub(super) fn service_with_leads(
    leads: Vec<Lead>,
) -> (
    Arc<CampaignService<MemoryStore, RecordingGateway, FixedPicker>>,
    MemoryStore,
    Arc<RecordingGateway>,
) {
    let store = MemoryStore::with_leads(leads);
    let gateway = Arc::new(RecordingGateway::default());
    let service = Arc::new(CampaignService::new(
        Arc::new(store.clone()),
        gateway.clone(),
        FixedPicker(0),
    ));
    (service, store, gateway)
}

use std::fmt::Write as _;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use leadflow::workflows::campaign::{EmailGateway, GatewayError};
use leadflow::workflows::leads::{
    classify, EmailType, Lead, LeadId, LeadStore, PriceRange, StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory lead store preserving insertion order, so campaign plans and
/// previews see leads in the order they arrived.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadStore {
    leads: Arc<Mutex<Vec<Lead>>>,
}

impl LeadStore for InMemoryLeadStore {
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
        guard.retain(|lead| !is_test_lead(lead));
        Ok(before - guard.len())
    }
}

/// Leads created by smoke checks carry a reserved mailbox host so cleanup
/// can find them without a separate flag column.
pub(crate) fn is_test_lead(lead: &Lead) -> bool {
    lead.email.ends_with("@test.example")
}

/// Gateway that renders the HTML template for each email family in-process.
///
/// Send is a log-only transport: the rendered message is traced rather than
/// handed to an SMTP relay, which keeps local and demo runs self-contained.
#[derive(Default, Clone)]
pub(crate) struct TemplateEmailGateway;

impl EmailGateway for TemplateEmailGateway {
    fn preview(&self, lead: &Lead, email_type: EmailType) -> Result<String, GatewayError> {
        Ok(render_email(lead, email_type))
    }

    fn send(&self, lead: &Lead, email_type: EmailType) -> Result<(), GatewayError> {
        let body = render_email(lead, email_type);
        info!(
            recipient = %lead.email,
            template = email_type.label(),
            bytes = body.len(),
            "email dispatched"
        );
        Ok(())
    }
}

fn render_email(lead: &Lead, email_type: EmailType) -> String {
    match email_type {
        EmailType::Personalized => render_personalized(lead),
        EmailType::Promotional => render_promotional(lead),
        EmailType::Basic => render_basic(lead),
    }
}

fn render_personalized(lead: &Lead) -> String {
    let classification = classify(lead).business;
    let mut html = String::new();
    writeln!(html, "<h1>Hand-picked homes for {}</h1>", escape_html(&lead.name))
        .expect("write heading");
    writeln!(
        html,
        "<p>Our {} specialists in {} have shortlisted properties matching your budget of ₹{}.</p>",
        escape_html(classification.price_range.label()),
        escape_html(&lead.location),
        lead.budget
    )
    .expect("write pitch");
    if classification.vip {
        writeln!(
            html,
            "<p>As a priority client you get first viewing access before public listing.</p>"
        )
        .expect("write vip note");
    }
    writeln!(
        html,
        "<p>Reply to this email or call your dedicated advisor to schedule a visit.</p>"
    )
    .expect("write call to action");
    html
}

fn render_promotional(lead: &Lead) -> String {
    let classification = classify(lead).business;
    let segment_note = match classification.price_range {
        PriceRange::Premium => "our premium collection",
        PriceRange::MidRange => "this season's featured mid-range homes",
        PriceRange::Budget => "great-value starter homes",
    };
    let mut html = String::new();
    writeln!(html, "<h1>New listings in {}</h1>", escape_html(&lead.location))
        .expect("write heading");
    writeln!(
        html,
        "<p>Hello {}, take a look at {} before they go off market.</p>",
        escape_html(&lead.name),
        segment_note
    )
    .expect("write pitch");
    writeln!(html, "<p>Book a free site visit this weekend.</p>").expect("write call to action");
    html
}

fn render_basic(lead: &Lead) -> String {
    let mut html = String::new();
    writeln!(html, "<h1>Property updates</h1>").expect("write heading");
    writeln!(
        html,
        "<p>Hello {}, here is this month's market roundup for {}.</p>",
        escape_html(&lead.name),
        escape_html(&lead.location)
    )
    .expect("write body");
    writeln!(
        html,
        "<p>Update your preferences any time to receive tailored matches.</p>"
    )
    .expect("write footer");
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

/// Property categories offered on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    Villa,
    Townhouse,
    Penthouse,
    Farmhouse,
}

/// Whether the lead is after one specific property or browsing generally.
///
/// Kept as a Yes/No enum rather than a bool to match the wire format the
/// intake form has always produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpecificProperty {
    Yes,
    #[default]
    No,
}

impl SpecificProperty {
    pub const fn is_targeted(self) -> bool {
        matches!(self, SpecificProperty::Yes)
    }
}

/// Optional purchase-intent answers, defaulted when the form section is
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntentQuestions {
    pub timeframe: String,
    pub financing: String,
    pub viewed_properties: String,
}

impl Default for IntentQuestions {
    fn default() -> Self {
        Self {
            timeframe: "3-6 months".to_string(),
            financing: "Not Sure".to_string(),
            viewed_properties: "0-5".to_string(),
        }
    }
}

/// Optional sentiment answers, defaulted when the form section is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SentimentQuestions {
    pub motivation_factor: String,
    pub decision_style: String,
}

impl Default for SentimentQuestions {
    fn default() -> Self {
        Self {
            motivation_factor: "balanced".to_string(),
            decision_style: "balanced".to_string(),
        }
    }
}

/// A stored prospective-buyer record.
///
/// `lead_score` is produced by an external scorer and may be absent; an
/// absent score means the lead is unclassified, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub budget: u64,
    pub property_type: PropertyType,
    pub location: String,
    pub urgency: u8,
    #[serde(default)]
    pub specific_property: SpecificProperty,
    #[serde(default)]
    pub intent_questions: IntentQuestions,
    #[serde(default)]
    pub sentiment_questions: SentimentQuestions,
    #[serde(rename = "lead_score", default, skip_serializing_if = "Option::is_none")]
    pub lead_score: Option<u8>,
    pub created_at: DateTime<Utc>,
}

/// Caller-provided payload for creating a lead, before intake validation
/// assigns an id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    #[serde(default)]
    pub id: Option<LeadId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub budget: u64,
    pub property_type: PropertyType,
    pub location: String,
    pub urgency: u8,
    #[serde(default)]
    pub specific_property: SpecificProperty,
    #[serde(default)]
    pub intent_questions: IntentQuestions,
    #[serde(default)]
    pub sentiment_questions: SentimentQuestions,
    #[serde(rename = "lead_score", default)]
    pub lead_score: Option<u8>,
}

/// Priority tier assigned from the external lead score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

impl PriorityTier {
    pub const ALL: [PriorityTier; 3] = [PriorityTier::High, PriorityTier::Medium, PriorityTier::Low];

    pub const fn label(self) -> &'static str {
        match self {
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Low => "low",
        }
    }

    /// Fixed tier-to-email mapping; defined once and reused by allocation
    /// and preview so the two can never disagree.
    pub const fn email_type(self) -> EmailType {
        match self {
            PriorityTier::High => EmailType::Personalized,
            PriorityTier::Medium => EmailType::Promotional,
            PriorityTier::Low => EmailType::Basic,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(PriorityTier::High),
            "medium" => Some(PriorityTier::Medium),
            "low" => Some(PriorityTier::Low),
            _ => None,
        }
    }
}

/// Email template families served by the external send/preview service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailType {
    Personalized,
    Promotional,
    Basic,
}

impl EmailType {
    pub const fn label(self) -> &'static str {
        match self {
            EmailType::Personalized => "personalized",
            EmailType::Promotional => "promotional",
            EmailType::Basic => "basic",
        }
    }
}

/// Whether the lead's location falls in the fixed high-value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPriority {
    High,
    Standard,
}

/// Budget band used for marketing copy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    Premium,
    MidRange,
    Budget,
}

impl PriceRange {
    pub const fn label(self) -> &'static str {
        match self {
            PriceRange::Premium => "Premium",
            PriceRange::MidRange => "Mid-range",
            PriceRange::Budget => "Budget",
        }
    }
}

/// Targeted when the lead named a specific property, general otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    Targeted,
    General,
}

/// Business-rule labels derived from raw lead attributes.
///
/// Never stored; recomputed from the lead on every read so presentation
/// stays a thin consumer. Independent of `lead_score`, so an unscored
/// lead still classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessClassification {
    pub location_priority: LocationPriority,
    pub price_range: PriceRange,
    pub customer_type: CustomerType,
    pub vip: bool,
}

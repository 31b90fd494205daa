//! Lead records and the pure classification/segmentation rules derived from
//! them.
//!
//! Everything here is side-effect free: leads are read-only snapshots owned
//! by the external store, and classification output is recomputed on every
//! request rather than persisted.

pub mod classifier;
pub mod domain;
pub mod intake;
pub mod segmenter;
pub mod store;

pub use classifier::{classify, Classification};
pub use domain::{
    BusinessClassification, CustomerType, EmailType, IntentQuestions, Lead, LeadId,
    LeadSubmission, LocationPriority, PriceRange, PriorityTier, PropertyType,
    SentimentQuestions, SpecificProperty,
};
pub use intake::IntakeError;
pub use segmenter::{segment, LeadSegments, TierCounts};
pub use store::{LeadStore, StoreError};

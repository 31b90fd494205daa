use super::domain::{Lead, LeadId};

/// Persistence abstraction for lead records.
///
/// The store is an external collaborator: the core holds read-only
/// snapshots of its output and never retries a failed call.
pub trait LeadStore: Send + Sync {
    fn list(&self) -> Result<Vec<Lead>, StoreError>;
    fn create(&self, lead: Lead) -> Result<Lead, StoreError>;
    fn delete(&self, id: &LeadId) -> Result<(), StoreError>;
    /// Remove every lead, returning how many were deleted.
    fn delete_all(&self) -> Result<usize, StoreError>;
    /// Remove leads the store has flagged as test data, returning how many
    /// were deleted.
    fn delete_test_leads(&self) -> Result<usize, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("lead already exists")]
    Conflict,
    #[error("lead not found")]
    NotFound,
    #[error("lead store unavailable: {0}")]
    Unavailable(String),
}

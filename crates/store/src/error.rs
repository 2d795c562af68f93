//! Store error taxonomy.

use uuid::Uuid;

/// Errors raised by recommendation persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing datastore failed.
    #[error("recommendation datastore error: {0}")]
    Datastore(String),

    /// No recommendation with the given id.
    #[error("recommendation {0} not found")]
    NotFound(Uuid),

    /// The status string is not a known lifecycle state.
    #[error("invalid recommendation status: {0} (expected one of active, enrolled, dismissed, completed)")]
    InvalidStatus(String),
}

//! Domain-level error types.

use thiserror::Error;

/// Store-level errors shared by the identity and content repositories.
///
/// Missing records on plain lookups are `Ok(None)`, not errors; `NotFound`
/// is reserved for mutations that name a record which must exist.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store backend failure: {0}")]
    Backend(String),
}

/// Writing-assistance errors.
#[derive(Debug, Error)]
pub enum AssistError {
    /// Rejected before any request left the process.
    #[error("Invalid assistance request: {0}")]
    InvalidRequest(String),

    /// The generation service failed; details are logged, never surfaced.
    #[error("Assistance failed")]
    Upstream,
}

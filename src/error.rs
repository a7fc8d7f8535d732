//! Error types for the Hearth library.
//!
//! All failures are represented by the [`HearthError`] enum. The three
//! domain variants map directly onto who has to act on the failure:
//! [`HearthError::CallerInput`] is the API consumer's problem,
//! [`HearthError::Configuration`] is a deployment defect, and
//! [`HearthError::Backend`] is a search-backend failure surfaced
//! unchanged.

use anyhow;
use thiserror::Error;

/// The main error type for Hearth operations.
#[derive(Error, Debug)]
pub enum HearthError {
    /// Invalid caller input (bad page number, non-positive page size,
    /// unknown filter name). Never retried, never sent to the backend.
    #[error("Caller input error: {0}")]
    CallerInput(String),

    /// A deployment or programming defect (unmapped entity type,
    /// missing profile entry). Fatal to the request.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The search backend failed, timed out, or rejected the query.
    /// Retry policy belongs to the executor layer, not here.
    #[error("Backend error: {0}")]
    Backend(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with HearthError.
pub type Result<T> = std::result::Result<T, HearthError>;

impl HearthError {
    /// Create a new caller input error.
    pub fn caller_input<S: Into<String>>(msg: S) -> Self {
        HearthError::CallerInput(msg.into())
    }

    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        HearthError::Configuration(msg.into())
    }

    /// Create a new backend error.
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        HearthError::Backend(msg.into())
    }

    /// Whether this failure should be reported to the API consumer as a
    /// client-side error rather than a server-side one.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, HearthError::CallerInput(_))
    }
}

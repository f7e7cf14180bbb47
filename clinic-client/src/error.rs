//! Client error types

use sales_engine::ValidationIssue;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error (5xx and anything unmapped)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 2xx response that reports `success: false`
    #[error("Backend error: {0}")]
    Backend(String),

    /// Operation the resource's route table does not offer
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Why a sale did not go through (or only partly did)
#[derive(Debug, Error)]
pub enum SaleError {
    /// Blocked before any network call
    #[error("Sale rejected with {} validation issue(s)", .0.len())]
    Rejected(Vec<ValidationIssue>),

    /// Nothing was created
    #[error("Submission failed: {source}")]
    Failed {
        /// Failing line, when the endpoint is per line
        index: Option<usize>,
        source: ClientError,
    },

    /// Some lines were created before one failed; nothing is rolled back
    #[error("Partially submitted ({} created): {source}", .created.len())]
    Partial {
        created: Vec<i64>,
        index: Option<usize>,
        source: ClientError,
    },
}

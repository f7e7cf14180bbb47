//! Backend response shapes
//!
//! The clinic backend answers in two styles: some routes return the payload
//! as bare JSON, others wrap it as `{ "success": .., "data": .., "error": .. }`.
//! [`Body`] accepts either.

use serde::{Deserialize, Serialize};

/// Wrapped response used by the therapy and sales-order routes
///
/// ```json
/// { "success": true, "data": [ ... ], "message": "..." }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    /// Missing reads as `None` (no `T: Default` bound)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap into the payload, or the backend's error text.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(self
                .message
                .unwrap_or_else(|| "response carried no data".to_string())),
            (false, _) => Err(self
                .error
                .or(self.message)
                .unwrap_or_else(|| "request failed".to_string())),
        }
    }
}

/// Either a wrapped [`Envelope`] or the bare payload
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Body<T> {
    Wrapped(Envelope<T>),
    Bare(T),
}

impl<T> Body<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Body::Wrapped(envelope) => envelope.into_result(),
            Body::Bare(data) => Ok(data),
        }
    }
}

/// Error body returned by failing routes: `{ "error": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Generic acknowledgement: `{ "message": "..." }` / `{ "success": true, "message": ... }`
///
/// Create routes add the new row's `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Ack {
    /// An ack is a failure only when the backend says so explicitly.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true) && self.error.is_none()
    }
}

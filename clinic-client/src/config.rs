//! Client configuration

use sales_engine::{StagingResult, StagingStore};
use std::path::PathBuf;

/// Default backend (Flask dev server)
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the clinic backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Store the operator works at; pre-fills new sale forms
    pub store_id: Option<i64>,

    /// redb file for staged selections; in-memory when unset
    pub staging_path: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            store_id: None,
            staging_path: None,
        }
    }

    /// Load from environment (and `.env` when present)
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `CLINIC_API_URL` | `http://localhost:5000` |
    /// | `CLINIC_API_TOKEN` | none |
    /// | `CLINIC_TIMEOUT_SECS` | 30 |
    /// | `CLINIC_STORE_ID` | none |
    /// | `CLINIC_STAGING_PATH` | none (in-memory) |
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            tracing::warn!(error = %e, "Failed to read .env file");
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: var("CLINIC_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            token: var("CLINIC_API_TOKEN").filter(|t| !t.is_empty()),
            timeout_secs: var("CLINIC_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            store_id: var("CLINIC_STORE_ID").and_then(|v| v.parse().ok()),
            staging_path: var("CLINIC_STAGING_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    pub fn with_store(mut self, store_id: i64) -> Self {
        self.store_id = Some(store_id);
        self
    }

    pub fn with_staging_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.staging_path = Some(path.into());
        self
    }

    /// Open the staged selection store this configuration points at
    pub fn open_staging(&self) -> StagingResult<StagingStore> {
        match &self.staging_path {
            Some(path) => StagingStore::open(path),
            None => StagingStore::open_in_memory(),
        }
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::from_config(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

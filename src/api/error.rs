// ==========================================
// GST Billing Core - API Error Types
// ==========================================

use thiserror::Error;

/// Errors surfaced by the external billing API.
///
/// A failed create is caught per record by the commit loop, counted, and
/// never aborts the rest of the batch.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("billing service rejected the record: {0}")]
    Rejected(String),

    #[error("could not decode the service response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Result alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

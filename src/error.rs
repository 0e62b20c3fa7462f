// error.rs - Error taxonomy for bucket reconnaissance
// Purpose: Scan-fatal errors and per-probe transport failures

use thiserror::Error;

/// Errors that abort a scan before or instead of probing.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid domain: {domain} ({reason})")]
    InvalidDomain { domain: String, reason: String },

    #[error("Failed to initialise scanner: {0}")]
    Client(String),
}

/// Failure of a single probe. Always recovered locally as a `Denied` verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = err.status() {
            TransportError::Status(status.as_u16())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

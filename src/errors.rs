//! Error types for BudgetBuddy
//!
//! Transport and status failures are kept distinct for logging but collapse
//! to a single message when shown to the user.

use thiserror::Error;

/// Message shown for any failed calculation attempt
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to calculate budget allocation. Please try again.";

/// Main error type for the allocation client
#[derive(Error, Debug)]
pub enum AllocatorError {
    /// HTTP client errors (connect, TLS, body decoding)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Allocation service answered with a non-success status
    #[error("Allocation service returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Timeout errors
    #[error("Request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Rejected user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A calculation is already in flight
    #[error("A calculation is already in progress")]
    Busy,
}

/// Result type alias for allocation operations
pub type Result<T> = std::result::Result<T, AllocatorError>;

impl AllocatorError {
    /// Whether this error came from talking to the allocation service
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            AllocatorError::HttpError(_)
                | AllocatorError::HttpStatus { .. }
                | AllocatorError::Timeout { .. }
                | AllocatorError::SerializationError(_)
        )
    }

    /// Text suitable for showing to the user
    pub fn user_message(&self) -> String {
        if self.is_service_failure() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

/// Convert anyhow errors to AllocatorError
impl From<anyhow::Error> for AllocatorError {
    fn from(err: anyhow::Error) -> Self {
        AllocatorError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AllocatorError::HttpStatus {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("bad gateway"));
    }

    #[test]
    fn test_service_failures_share_generic_message() {
        let status = AllocatorError::HttpStatus {
            status: 400,
            body: "{\"error\": \"missing field\"}".to_string(),
        };
        let timeout = AllocatorError::Timeout { duration_ms: 90_000 };

        assert_eq!(status.user_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(timeout.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_local_errors_keep_their_text() {
        let err = AllocatorError::ConfigError("timeout_secs must be greater than 0".to_string());
        assert!(!err.is_service_failure());
        assert!(err.user_message().contains("timeout_secs"));
        assert!(AllocatorError::Busy.user_message().contains("already in progress"));
    }
}

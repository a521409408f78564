//! Error handling for the gateway layer
//!
//! All fallible gateway operations return [`Result`]. Underlying
//! library errors convert automatically via `thiserror`; service-side
//! failures carry the numeric result code reported by the cloud
//! service so callers can map them onto their own outcome taxonomy.

use thiserror::Error;

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur in the gateway layer
///
/// # Automatic Conversions
///
/// - `std::io::Error` → `GatewayError::Io`
/// - `serde_json::Error` → `GatewayError::Json`
/// - `rusqlite::Error` → `GatewayError::Database`
#[derive(Error, Debug)]
pub enum GatewayError {
    /// I/O error (file system, sockets)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The cloud service answered with a failure result code
    #[error("Service error {code}: {message}")]
    Api {
        /// Numeric result code as reported by the service
        code: i32,
        /// Service-provided description
        message: String,
    },

    /// An operation was attempted in a state that does not allow it
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl GatewayError {
    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        GatewayError::InvalidState(msg.into())
    }

    /// Get a user-friendly error message suitable for display in UI
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Io(e) => format!("I/O error: {}.", e),
            GatewayError::Json(e) => format!("Data format error: {}.", e),
            GatewayError::Database(e) => {
                format!("Database error: {}. Transfer history may be affected.", e)
            }
            GatewayError::Api { code, message } => {
                format!("The service reported an error ({}): {}.", code, message)
            }
            GatewayError::InvalidState(msg) => format!("Invalid state: {}.", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = GatewayError::Api {
            code: -2,
            message: "bad arguments".to_string(),
        };
        assert_eq!(error.to_string(), "Service error -2: bad arguments");

        let error = GatewayError::invalid_state("no request in flight");
        assert_eq!(error.to_string(), "Invalid state: no request in flight");
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io::{Error, ErrorKind};

        let io_error = Error::new(ErrorKind::NotFound, "file not found");
        let gateway_error: GatewayError = io_error.into();

        assert!(matches!(gateway_error, GatewayError::Io(_)));
        assert!(gateway_error.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json = r#"{"invalid json"#;
        let json_error = serde_json::from_str::<serde_json::Value>(json).unwrap_err();
        let gateway_error: GatewayError = json_error.into();

        assert!(matches!(gateway_error, GatewayError::Json(_)));
    }

    #[test]
    fn test_user_message() {
        let error = GatewayError::Api {
            code: -18,
            message: "temporarily unavailable".to_string(),
        };
        assert!(error.user_message().contains("-18"));
    }
}

//! Result and error types for the page controller.
//!
//! A missing target element is never an error: the behaviour that needed it is
//! simply not bound. Errors only describe host calls that failed outright.

use thiserror::Error;

/// Result type for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Errors that can occur while wiring or running page behaviours
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A call into the hosting document failed
    #[error("Host call `{operation}` failed: {message}")]
    Host {
        /// Host operation that failed
        operation: &'static str,
        /// Error message reported by the host
        message: String,
    },

    /// No window or document is available
    #[error("No document available")]
    NoDocument,

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl ControllerError {
    /// Creates a host error for the given operation
    #[must_use]
    pub fn host(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Host {
            operation,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_display() {
        let err = ControllerError::host("focus", "element detached");
        assert_eq!(
            err.to_string(),
            "Host call `focus` failed: element detached"
        );
    }

    #[test]
    fn test_no_document_display() {
        assert_eq!(ControllerError::NoDocument.to_string(), "No document available");
    }

    #[test]
    fn test_config_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ControllerError = json_err.into();
        assert!(matches!(err, ControllerError::Config(_)));
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}

//! Error types for cpekit

use thiserror::Error;

/// Result type alias using the cpekit Error
pub type Result<T> = std::result::Result<T, Error>;

/// cpekit error types
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid part code '{part}': must be 'a', 'h', or 'o'")]
    InvalidPartCode { part: String },

    #[error("Missing required field: {field} must be set")]
    MissingField { field: &'static str },

    #[error("Malformed CPE '{input}': {reason}")]
    MalformedInput { input: String, reason: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error was raised by record validation rather than by
    /// the environment (I/O, configuration)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument(_)
                | Error::InvalidPartCode { .. }
                | Error::MissingField { .. }
                | Error::MalformedInput { .. }
        )
    }

    /// Get an error code for logging
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidArgument(_) => "INVALID_ARGUMENT",
            Error::InvalidPartCode { .. } => "INVALID_PART_CODE",
            Error::MissingField { .. } => "MISSING_FIELD",
            Error::MalformedInput { .. } => "MALFORMED_INPUT",
            Error::Configuration(_) => "CONFIG_ERROR",
            Error::Io(_) => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = Error::MissingField { field: "vendor" };
        assert_eq!(err.code(), "MISSING_FIELD");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Missing required field: vendor must be set");

        let err = Error::Configuration(String::from("bad toml"));
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_malformed_message() {
        let err = Error::malformed("nope", "missing prefix");
        assert_eq!(err.code(), "MALFORMED_INPUT");
        assert_eq!(err.to_string(), "Malformed CPE 'nope': missing prefix");
    }
}

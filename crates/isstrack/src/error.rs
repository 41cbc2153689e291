//! Error types for isstrack.
//!
//! Every failure of a run ends up as one variant of [`Error`]. The binary
//! collapses all of them into a single exit path, but the variants keep the
//! log messages precise about which stage failed.

use thiserror::Error;

/// The main error type for isstrack operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Locator Errors ===
    /// The upstream request failed at the transport level.
    #[error("HTTP error when fetching ISS location from {url}: {source}")]
    Fetch {
        /// The endpoint that was queried.
        url: String,
        /// The underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-success status.
    #[error("HTTP error when fetching ISS location from {url}: status {status}")]
    UpstreamStatus {
        /// The endpoint that was queried.
        url: String,
        /// HTTP status code returned.
        status: u16,
    },

    /// The upstream body is not valid JSON.
    #[error("error parsing response: {0}")]
    PayloadDecode(#[source] serde_json::Error),

    /// A required field is absent or has the wrong shape.
    #[error("error parsing response: field '{field}' {problem}")]
    PayloadField {
        /// Path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        problem: String,
    },

    // === Recorder Errors ===
    /// The store credential is not set in the environment.
    #[error("{var} environment variable is not set")]
    MissingCredential {
        /// Name of the environment variable.
        var: String,
    },

    /// Could not reach or authenticate against the store.
    #[error("MongoDB connection failed: {0}")]
    StoreConnect(#[source] mongodb::error::Error),

    /// The insert itself failed.
    #[error("MongoDB write failed: {0}")]
    StoreWrite(#[source] mongodb::error::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Runtime or file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for isstrack operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a payload field error.
    #[must_use]
    pub fn payload_field(field: &'static str, problem: impl Into<String>) -> Self {
        Self::PayloadField {
            field,
            problem: problem.into(),
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Process exit status for this error.
    ///
    /// All failures are terminal for the run and share one status.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Check if this error happened while fetching or parsing the position.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. }
                | Self::UpstreamStatus { .. }
                | Self::PayloadDecode(_)
                | Self::PayloadField { .. }
        )
    }

    /// Check if this error happened on the way to, or inside, the store.
    #[must_use]
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. } | Self::StoreConnect(_) | Self::StoreWrite(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_display() {
        let err = Error::UpstreamStatus {
            url: "http://example.test/iss-now.json".to_string(),
            status: 503,
        };
        let msg = err.to_string();
        assert!(msg.contains("example.test"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn test_payload_field_display() {
        let err = Error::payload_field("iss_position.latitude", "is missing");
        assert_eq!(
            err.to_string(),
            "error parsing response: field 'iss_position.latitude' is missing"
        );
    }

    #[test]
    fn test_missing_credential_display() {
        let err = Error::MissingCredential {
            var: "MONGOPASS".to_string(),
        };
        assert_eq!(err.to_string(), "MONGOPASS environment variable is not set");
    }

    #[test]
    fn test_config_validation_display() {
        let err = Error::config_validation("timeout_secs must be greater than 0");
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_exit_code_is_one() {
        assert_eq!(Error::payload_field("timestamp", "is missing").exit_code(), 1);
        assert_eq!(
            Error::MissingCredential {
                var: "X".to_string()
            }
            .exit_code(),
            1
        );
        assert_eq!(Error::config_validation("bad").exit_code(), 1);
    }

    #[test]
    fn test_classification() {
        let fetch = Error::UpstreamStatus {
            url: String::new(),
            status: 500,
        };
        assert!(fetch.is_fetch_error());
        assert!(!fetch.is_store_error());

        let store = Error::MissingCredential {
            var: "MONGOPASS".to_string(),
        };
        assert!(store.is_store_error());
        assert!(!store.is_fetch_error());

        let config = Error::config_validation("bad");
        assert!(!config.is_fetch_error());
        assert!(!config.is_store_error());
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_payload_decode_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = Error::PayloadDecode(json_err);
        assert!(err.to_string().starts_with("error parsing response"));
        assert!(err.is_fetch_error());
    }
}

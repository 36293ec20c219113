//! Shared Error Types
//!
//! Failure cases that can occur on either side of the API boundary: local
//! validation of outgoing content and (de)serialization of wire payloads.
//! Transport and HTTP failures live in the client layer.
//!
//! All variants are `Send + Sync` and cheap to clone.

use thiserror::Error;

/// Errors raised before or while crossing the wire
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Submitted content is empty after trimming
    #[error("message content is empty")]
    EmptyContent,

    /// Content exceeds the conversation-kind limit
    #[error("message too long: {length} characters (limit {limit})")]
    ContentTooLong {
        /// Maximum accepted length for this conversation kind
        limit: usize,
        /// Observed length of the trimmed content
        length: usize,
    },

    /// JSON serialization or deserialization failure
    #[error("serialization error: {message}")]
    Serialization {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_long_display_names_both_numbers() {
        let error = SharedError::ContentTooLong {
            limit: 1000,
            length: 1500,
        };
        let display = format!("{}", error);
        assert!(display.contains("1500"));
        assert!(display.contains("1000"));
    }

    #[test]
    fn test_from_serde_error() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{ invalid json }");
        let shared: SharedError = result.unwrap_err().into();
        assert!(matches!(shared, SharedError::Serialization { .. }));
    }

    #[test]
    fn test_error_clone_round_trip() {
        let error = SharedError::EmptyContent;
        assert_eq!(error.clone(), error);
    }
}

//! Error types for the cache facade
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache facade and its providers.
///
/// A `get` on a missing or expired key is not an error; providers return
/// `Ok(None)` for that case.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid or missing provider, connection options or backend name
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection establishment failed, or the connection was closed
    #[error("Connection error: {0}")]
    Connection(String),

    /// Backend failure during a specific operation
    #[error("{op} failed for '{key}': {message}")]
    Operation {
        op: &'static str,
        key: String,
        message: String,
    },

    /// Value could not be converted to or from its JSON representation
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CacheError {
    /// Builds an [`CacheError::Operation`] from any displayable backend error.
    pub fn operation(op: &'static str, key: impl Into<String>, err: impl std::fmt::Display) -> Self {
        CacheError::Operation {
            op,
            key: key.into(),
            message: err.to_string(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_error_display() {
        let err = CacheError::operation("GET", "cache-key", "broken pipe");
        assert_eq!(err.to_string(), "GET failed for 'cache-key': broken pipe");
    }

    #[test]
    fn test_serialization_error_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CacheError = json_err.into();
        assert!(matches!(err, CacheError::Serialization(_)));
    }
}

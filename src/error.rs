//! Error types shared across the policy layer and its collaborators.

use thiserror::Error;

/// Unified error type for cache and store operations.
///
/// Absent records are not an error: lookups that find no row return
/// `Ok(None)` and the HTTP layer translates that into an empty 404 body.
#[derive(Error, Debug)]
pub enum Error {
    /// Relational store is unreachable or timed out.
    #[error("entity store unavailable: {0}")]
    StoreUnavailable(String),

    /// Cache backend is unreachable or timed out.
    #[error("cache backend unavailable: {0}")]
    CacheUnavailable(String),

    /// Entity could not be serialized for cache storage.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// Cached payload could not be deserialized.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// Cache envelope is corrupted or carries the wrong magic header.
    #[error("invalid cache entry: {0}")]
    InvalidCacheEntry(String),

    /// Cached payload was written by a different schema version.
    #[error("cache schema version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    /// Invalid configuration supplied at startup.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

/// Convenience Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::StoreUnavailable("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "entity store unavailable: connection refused"
        );

        let err = Error::VersionMismatch {
            expected: 1,
            found: 2,
        };
        assert!(err.to_string().contains("expected 1"));
        assert!(err.to_string().contains("found 2"));
    }
}

//! Core entity trait that all cached entities must implement.

use crate::error::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;
use std::hash::Hash;

/// Trait that all entities stored in cache must implement.
///
/// # Example
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use emp_cache::CacheEntity;
///
/// #[derive(Clone, Serialize, Deserialize)]
/// pub struct Badge {
///     pub id: i32,
///     pub label: String,
/// }
///
/// impl CacheEntity for Badge {
///     type Key = i32;
///
///     fn cache_key(&self) -> Self::Key {
///         self.id
///     }
///
///     fn cache_prefix() -> &'static str {
///         "badge"
///     }
/// }
/// ```
pub trait CacheEntity: Send + Sync + Serialize + DeserializeOwned + Clone {
    /// Type of the entity's primary key (typically an integer or String).
    type Key: Display + Clone + Send + Sync + Eq + Hash + 'static;

    /// Return the entity's primary cache key.
    ///
    /// Called to extract the key from the entity itself.
    fn cache_key(&self) -> Self::Key;

    /// Return the cache prefix for this entity type.
    ///
    /// Used to namespace cache keys. Final key format: `"{prefix}:{key}"`.
    fn cache_prefix() -> &'static str;

    /// Serialize entity for cache storage.
    ///
    /// Uses the crate-wide versioned envelope. This method is NOT
    /// overridable to ensure consistency across all entities.
    ///
    /// See `crate::serialization` for the envelope format.
    fn serialize_for_cache(&self) -> Result<Vec<u8>> {
        crate::serialization::serialize_for_cache(self)
    }

    /// Deserialize entity from cache storage.
    ///
    /// Validates magic header and schema version before deserializing.
    /// This method is NOT overridable to ensure consistency across all
    /// entities.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidCacheEntry`: Bad magic or corrupted envelope
    /// - `Error::VersionMismatch`: Schema version changed
    /// - `Error::DeserializationError`: Corrupted payload
    fn deserialize_from_cache(bytes: &[u8]) -> Result<Self> {
        crate::serialization::deserialize_from_cache(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Serialize, Deserialize)]
    struct TestEntity {
        id: i32,
        value: String,
    }

    impl CacheEntity for TestEntity {
        type Key = i32;

        fn cache_key(&self) -> Self::Key {
            self.id
        }

        fn cache_prefix() -> &'static str {
            "test"
        }
    }

    #[test]
    fn test_serialize_deserialize() {
        let entity = TestEntity {
            id: 17,
            value: "data".to_string(),
        };

        let bytes = entity.serialize_for_cache().unwrap();
        let deserialized = TestEntity::deserialize_from_cache(&bytes).unwrap();

        assert_eq!(entity.id, deserialized.id);
        assert_eq!(entity.value, deserialized.value);
    }

    #[test]
    fn test_cache_key_generation() {
        let entity = TestEntity {
            id: 123,
            value: "test".to_string(),
        };

        assert_eq!(entity.cache_key(), 123);
        assert_eq!(TestEntity::cache_prefix(), "test");
    }
}

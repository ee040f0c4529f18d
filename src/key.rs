//! Cache key construction.
//!
//! Every cache key in the system has the form `"{prefix}:{part}"`. The part
//! is usually the entity's primary id, but secondary lookups reuse the same
//! prefix with a lastName or email segment, so the builder accepts any
//! displayable segment.

use crate::entity::CacheEntity;
use std::fmt::Display;

/// Builds namespaced cache keys for an entity type.
pub struct CacheKeyBuilder;

impl CacheKeyBuilder {
    /// Build a cache key from any displayable segment.
    ///
    /// `CacheKeyBuilder::build::<Employee>(&42)` → `"emp:42"`,
    /// `CacheKeyBuilder::build::<Employee>(&"Zhang")` → `"emp:Zhang"`.
    pub fn build<T: CacheEntity>(part: &impl Display) -> String {
        format!("{}:{}", T::cache_prefix(), part)
    }

    /// Split a cache key back into (prefix, segment).
    ///
    /// The segment may itself contain `:` so only the first separator is
    /// significant.
    pub fn split(cache_key: &str) -> Option<(&str, &str)> {
        cache_key.split_once(':')
    }
}

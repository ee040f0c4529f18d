//! Redis cache backend implementation.

use super::CacheBackend;
use crate::error::{Error, Result};
use deadpool_redis::{Config as PoolConfig, Pool, Runtime};
use redis::AsyncCommands;
use std::time::Duration;

/// Default Redis connection pool size.
/// Override with the REDIS_POOL_SIZE environment variable.
const DEFAULT_POOL_SIZE: usize = 16;

/// Configuration for the Redis backend.
#[derive(Clone, Debug)]
pub struct RedisConfig {
    pub url: String, // e.g., "redis://localhost:6379"
    pub connection_timeout: Duration,
    pub pool_size: usize,
}

impl Default for RedisConfig {
    fn default() -> Self {
        RedisConfig {
            url: "redis://localhost:6379".to_string(),
            connection_timeout: Duration::from_secs(5),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

/// Redis backend with connection pooling and async operations.
///
/// # Example
///
/// ```no_run
/// # use emp_cache::backend::{RedisBackend, RedisConfig, CacheBackend};
/// # use emp_cache::error::Result;
/// # async fn example() -> Result<()> {
/// let config = RedisConfig {
///     url: "redis://localhost:6379".to_string(),
///     ..Default::default()
/// };
///
/// let backend = RedisBackend::new(config)?;
/// backend.set("key", b"value".to_vec(), None).await?;
/// let value = backend.get("key").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RedisBackend {
    pool: Pool,
}

impl RedisBackend {
    /// Create a new Redis backend from configuration.
    ///
    /// # Errors
    /// Returns `Err` if connection pool creation fails
    pub fn new(config: RedisConfig) -> Result<Self> {
        let mut pool_config = PoolConfig::from_url(config.url.clone());
        if let Some(pc) = pool_config.pool.as_mut() {
            pc.max_size = config.pool_size;
        } else {
            pool_config.pool = Some(deadpool_redis::PoolConfig::new(config.pool_size));
        }

        let pool = pool_config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| Error::ConfigError(format!("Failed to create Redis pool: {}", e)))?;

        info!(
            "✓ Redis backend initialized with url: {} (pool size: {})",
            config.url, config.pool_size
        );

        Ok(RedisBackend { pool })
    }

    /// Create from a connection URL directly.
    ///
    /// Pool size is determined by:
    /// 1. `REDIS_POOL_SIZE` environment variable (if set)
    /// 2. `DEFAULT_POOL_SIZE` constant (16)
    ///
    /// # Errors
    /// Returns `Err` if connection pool creation fails
    pub fn from_url(url: String) -> Result<Self> {
        let pool_size = std::env::var("REDIS_POOL_SIZE")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_POOL_SIZE);

        let config = RedisConfig {
            url,
            pool_size,
            ..Default::default()
        };
        Self::new(config)
    }
}

impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| Error::CacheUnavailable(format!("Failed to get Redis connection: {}", e)))?;

        let value: Option<Vec<u8>> = conn.get(key).await.map_err(|e| {
            Error::CacheUnavailable(format!("Redis GET failed for key {}: {}", key, e))
        })?;

        match &value {
            Some(_) => debug!("✓ Redis GET {} -> HIT", key),
            None => debug!("✓ Redis GET {} -> MISS", key),
        }

        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| Error::CacheUnavailable(format!("Failed to get Redis connection: {}", e)))?;

        match ttl {
            Some(d) => {
                let secs = d.as_secs().max(1);
                let _: () = conn.set_ex(key, value, secs).await.map_err(|e| {
                    Error::CacheUnavailable(format!("Redis SETEX failed for key {}: {}", key, e))
                })?;
                debug!("✓ Redis SET {} (TTL: {:?})", key, d);
            }
            None => {
                let _: () = conn.set(key, value).await.map_err(|e| {
                    Error::CacheUnavailable(format!("Redis SET failed for key {}: {}", key, e))
                })?;
                debug!("✓ Redis SET {}", key);
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| Error::CacheUnavailable(format!("Failed to get Redis connection: {}", e)))?;

        let _: () = conn.del(key).await.map_err(|e| {
            Error::CacheUnavailable(format!("Redis DEL failed for key {}: {}", key, e))
        })?;

        debug!("✓ Redis DEL {}", key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| Error::CacheUnavailable(format!("Failed to get Redis connection: {}", e)))?;

        conn.exists(key).await.map_err(|e| {
            Error::CacheUnavailable(format!("Redis EXISTS failed for key {}: {}", key, e))
        })
    }

    async fn health_check(&self) -> Result<bool> {
        match self.pool.get().await {
            Ok(mut conn) => {
                let pong: std::result::Result<String, _> =
                    redis::cmd("PING").query_async(&mut conn).await;
                Ok(pong.is_ok())
            }
            Err(_) => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_config_default() {
        let config = RedisConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn test_redis_config_custom() {
        let config = RedisConfig {
            url: "redis://cache1:6379".to_string(),
            connection_timeout: Duration::from_secs(2),
            pool_size: 32,
        };

        assert_eq!(config.url, "redis://cache1:6379");
        assert_eq!(config.pool_size, 32);
    }
}

//! Server configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Runtime configuration for the service binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Budget for one entity-store call
    pub store_timeout: Duration,
    /// Budget for one cache-backend call
    pub cache_timeout: Duration,
    /// TTL applied to cache writes; zero disables expiry
    pub cache_ttl: Option<Duration>,
    /// Redis connection URL (redis feature only)
    #[cfg(feature = "redis")]
    pub redis_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `STORE_TIMEOUT_MS` - entity-store call budget (default: 5000)
    /// - `CACHE_TIMEOUT_MS` - cache-backend call budget (default: 2000)
    /// - `CACHE_TTL_SECS` - TTL for cache writes, 0 for none (default: 0)
    /// - `REDIS_URL` - Redis URL, redis feature only (default: redis://localhost:6379)
    pub fn from_env() -> Self {
        let ttl_secs: u64 = env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            store_timeout: Duration::from_millis(
                env::var("STORE_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5000),
            ),
            cache_timeout: Duration::from_millis(
                env::var("CACHE_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(2000),
            ),
            cache_ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
            #[cfg(feature = "redis")]
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            store_timeout: Duration::from_millis(5000),
            cache_timeout: Duration::from_millis(2000),
            cache_ttl: None,
            #[cfg(feature = "redis")]
            redis_url: "redis://localhost:6379".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.store_timeout, Duration::from_millis(5000));
        assert_eq!(config.cache_timeout, Duration::from_millis(2000));
        assert_eq!(config.cache_ttl, None);
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("SERVER_PORT");
        env::remove_var("STORE_TIMEOUT_MS");
        env::remove_var("CACHE_TIMEOUT_MS");
        env::remove_var("CACHE_TTL_SECS");

        let config = Config::from_env();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.cache_ttl, None);
    }
}

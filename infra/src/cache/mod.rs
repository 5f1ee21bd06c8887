//! Redis client and OTP code cache.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use ss_shared::config::cache::CacheConfig;

use crate::InfrastructureError;

pub mod otp_cache;
pub use otp_cache::RedisOtpCache;

/// Thin async Redis client used by the OTP cache.
///
/// Wraps a multiplexed connection; clones share the underlying connection.
/// Connecting retries with exponential backoff so the service survives a
/// Redis that comes up slightly after it does.
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
}

impl RedisClient {
    /// Connect to Redis using the cache configuration
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retries(config, 3, 100).await
    }

    /// Connect with a custom retry budget
    pub async fn new_with_retries(
        config: &CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let mut attempts = 0;
        let mut delay = retry_delay_ms;
        let connection = loop {
            attempts += 1;
            match client.get_multiplexed_async_connection().await {
                Ok(connection) => break connection,
                Err(e) if attempts <= max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        };

        info!("Redis client connected");
        Ok(Self { connection })
    }

    /// Set a value with an expiration time in seconds
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(key, value, expiry_seconds)
            .await
            .map_err(InfrastructureError::Cache)
    }

    /// Get a value, or `None` if the key is missing or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let mut conn = self.connection.clone();
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(InfrastructureError::Cache)
    }

    /// Delete a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let deleted: u32 = conn.del(key).await.map_err(InfrastructureError::Cache)?;
        Ok(deleted > 0)
    }

    /// Check whether a key exists
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        conn.exists::<_, bool>(key)
            .await
            .map_err(InfrastructureError::Cache)
    }

    /// Remaining time-to-live in seconds, or `None` if the key is missing
    /// or has no expiry
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let ttl: i64 = conn.ttl(key).await.map_err(InfrastructureError::Cache)?;
        // Redis returns -2 for a missing key, -1 for a key without expiry
        if ttl < 0 {
            Ok(None)
        } else {
            Ok(Some(ttl))
        }
    }

    /// Increment a counter, setting its expiry when the key is first created
    pub async fn increment(
        &self,
        key: &str,
        expiry_seconds: Option<u64>,
    ) -> Result<i64, InfrastructureError> {
        let mut conn = self.connection.clone();
        let value: i64 = conn.incr(key, 1).await.map_err(InfrastructureError::Cache)?;
        if value == 1 {
            if let Some(expiry) = expiry_seconds {
                debug!("Setting expiry {}s on counter '{}'", expiry, key);
                conn.expire::<_, ()>(key, expiry as i64)
                    .await
                    .map_err(InfrastructureError::Cache)?;
            }
        }
        Ok(value)
    }
}

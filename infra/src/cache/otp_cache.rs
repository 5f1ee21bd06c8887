//! Redis-backed OTP code cache.
//!
//! Key patterns:
//! - `otp:code:{email}` - SHA-256 hash of the active verification code
//! - `otp:attempts:{email}` - verification attempt counter
//!
//! Both keys carry the expiry-window TTL, so Redis itself enforces code
//! expiry. Codes are hashed before storage; the plaintext never leaves the
//! issuing request.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use ss_core::services::otp::traits::OtpCacheTrait;
use ss_shared::config::otp::OtpConfig;
use ss_shared::utils::email::mask_email;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Redis implementation of the OTP cache collaborator
#[derive(Clone)]
pub struct RedisOtpCache {
    redis: RedisClient,
    /// TTL applied to code and attempt keys, in seconds
    expiry_seconds: u64,
    /// Maximum verification attempts per issued code
    max_attempts: i64,
}

impl RedisOtpCache {
    /// Create a new cache over an existing Redis client
    pub fn new(redis: RedisClient, config: &OtpConfig) -> Self {
        Self {
            redis,
            expiry_seconds: config.expiry_seconds(),
            max_attempts: config.max_attempts as i64,
        }
    }

    async fn store(&self, email: &str, code: &str) -> Result<(), InfrastructureError> {
        let code_key = Self::code_key(email);
        let attempts_key = Self::attempts_key(email);

        let hashed = Self::hash_code(code);
        self.redis
            .set_with_expiry(&code_key, &hashed, self.expiry_seconds)
            .await?;

        // Fresh code, fresh attempt budget
        let _ = self.redis.delete(&attempts_key).await;

        info!(
            email = %mask_email(email),
            ttl_seconds = self.expiry_seconds,
            "Verification code stored"
        );
        Ok(())
    }

    async fn verify(&self, email: &str, code: &str) -> Result<bool, InfrastructureError> {
        let code_key = Self::code_key(email);
        let attempts_key = Self::attempts_key(email);

        let attempts = self
            .redis
            .increment(&attempts_key, Some(self.expiry_seconds))
            .await?;

        if attempts > self.max_attempts {
            warn!(
                email = %mask_email(email),
                attempts = attempts,
                "Maximum verification attempts exceeded"
            );
            return Ok(false);
        }

        let stored_hash = match self.redis.get(&code_key).await? {
            Some(hash) => hash,
            None => {
                debug!(
                    email = %mask_email(email),
                    "No verification code found (expired or never issued)"
                );
                return Ok(false);
            }
        };

        let is_valid = stored_hash == Self::hash_code(code);
        if is_valid {
            info!(email = %mask_email(email), "Verification code accepted");
            let _ = self.redis.delete(&code_key).await;
            let _ = self.redis.delete(&attempts_key).await;
        } else {
            warn!(
                email = %mask_email(email),
                attempt = attempts,
                max_attempts = self.max_attempts,
                "Verification code rejected"
            );
        }

        Ok(is_valid)
    }

    async fn remaining_attempts(&self, email: &str) -> Result<i64, InfrastructureError> {
        let attempts_key = Self::attempts_key(email);
        let used = match self.redis.get(&attempts_key).await? {
            Some(count) => count.parse::<i64>().unwrap_or(0),
            None => 0,
        };
        Ok((self.max_attempts - used).max(0))
    }

    async fn clear(&self, email: &str) -> Result<(), InfrastructureError> {
        let _ = self.redis.delete(&Self::code_key(email)).await;
        let _ = self.redis.delete(&Self::attempts_key(email)).await;
        debug!(email = %mask_email(email), "Verification data cleared");
        Ok(())
    }

    fn code_key(email: &str) -> String {
        format!("otp:code:{}", email)
    }

    fn attempts_key(email: &str) -> String {
        format!("otp:attempts:{}", email)
    }

    fn hash_code(code: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(code.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl OtpCacheTrait for RedisOtpCache {
    async fn store_code(&self, email: &str, code: &str) -> Result<(), String> {
        self.store(email, code).await.map_err(|e| e.to_string())
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<bool, String> {
        self.verify(email, code).await.map_err(|e| e.to_string())
    }

    async fn get_remaining_attempts(&self, email: &str) -> Result<i64, String> {
        self.remaining_attempts(email)
            .await
            .map_err(|e| e.to_string())
    }

    async fn code_exists(&self, email: &str) -> Result<bool, String> {
        self.redis
            .exists(&Self::code_key(email))
            .await
            .map_err(|e| e.to_string())
    }

    async fn get_code_ttl(&self, email: &str) -> Result<Option<i64>, String> {
        self.redis
            .ttl(&Self::code_key(email))
            .await
            .map_err(|e| e.to_string())
    }

    async fn clear_verification(&self, email: &str) -> Result<(), String> {
        self.clear(email).await.map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formats() {
        assert_eq!(
            RedisOtpCache::code_key("reader@shabdsetu.app"),
            "otp:code:reader@shabdsetu.app"
        );
        assert_eq!(
            RedisOtpCache::attempts_key("reader@shabdsetu.app"),
            "otp:attempts:reader@shabdsetu.app"
        );
    }

    #[test]
    fn test_hash_code_is_stable_and_hex() {
        let a = RedisOtpCache::hash_code("123456");
        let b = RedisOtpCache::hash_code("123456");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, RedisOtpCache::hash_code("123457"));
    }
}

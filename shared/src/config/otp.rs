//! OTP timer and attempt-limit configuration

use serde::{Deserialize, Serialize};

/// Default resend cooldown in minutes
pub const DEFAULT_RESEND_INTERVAL_MINUTES: i64 = 5;

/// Default code expiry window in minutes
pub const DEFAULT_EXPIRY_MINUTES: i64 = 5;

/// Default maximum verification attempts per code
pub const DEFAULT_MAX_ATTEMPTS: i32 = 3;

/// OTP issuance and verification configuration
///
/// The resend interval and expiry window are independent: the resend
/// countdown gates how soon a user may request a new code, while the expiry
/// window bounds how long an issued code stays valid.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minimum wait in minutes before a new code may be requested
    pub resend_interval_minutes: i64,

    /// Minutes after issuance during which a code remains valid
    pub expiry_minutes: i64,

    /// Maximum verification attempts allowed per issued code
    pub max_attempts: i32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            resend_interval_minutes: DEFAULT_RESEND_INTERVAL_MINUTES,
            expiry_minutes: DEFAULT_EXPIRY_MINUTES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    ///
    /// Reads `OTP_RESEND_INTERVAL_MINUTES`, `OTP_EXPIRY_MINUTES` and
    /// `OTP_MAX_ATTEMPTS`, falling back to the defaults on missing or
    /// unparseable values.
    pub fn from_env() -> Self {
        let resend_interval_minutes = std::env::var("OTP_RESEND_INTERVAL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RESEND_INTERVAL_MINUTES);
        let expiry_minutes = std::env::var("OTP_EXPIRY_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_EXPIRY_MINUTES);
        let max_attempts = std::env::var("OTP_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);

        Self {
            resend_interval_minutes,
            expiry_minutes,
            max_attempts,
        }
    }

    /// Resend cooldown expressed in milliseconds (countdown starting value)
    pub fn resend_interval_ms(&self) -> u64 {
        (self.resend_interval_minutes as u64) * 60_000
    }

    /// Expiry window expressed in milliseconds (countdown starting value)
    pub fn expiry_ms(&self) -> u64 {
        (self.expiry_minutes as u64) * 60_000
    }

    /// Expiry window expressed in seconds (cache TTL)
    pub fn expiry_seconds(&self) -> u64 {
        (self.expiry_minutes as u64) * 60
    }

    /// Resend cooldown expressed in seconds
    pub fn resend_interval_seconds(&self) -> i64 {
        self.resend_interval_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_config_default() {
        let config = OtpConfig::default();
        assert_eq!(config.resend_interval_minutes, 5);
        assert_eq!(config.expiry_minutes, 5);
        assert_eq!(config.max_attempts, 3);
    }

    #[test]
    fn test_millisecond_conversions() {
        let config = OtpConfig::default();
        assert_eq!(config.resend_interval_ms(), 300_000);
        assert_eq!(config.expiry_ms(), 300_000);
        assert_eq!(config.expiry_seconds(), 300);
        assert_eq!(config.resend_interval_seconds(), 300);
    }
}

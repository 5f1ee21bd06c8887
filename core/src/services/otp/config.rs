//! Configuration for the OTP service

use crate::domain::entities::otp_code::{DEFAULT_EXPIRY_MINUTES, MAX_ATTEMPTS};
use ss_shared::config::OtpConfig;

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Minutes before an issued code expires
    pub expiry_minutes: i64,

    /// Minimum seconds between issuance requests for the same email
    pub resend_cooldown_seconds: i64,

    /// Maximum verification attempts allowed per code
    pub max_attempts: i32,

    /// Maximum issuance requests per email per hour (0 disables the cap)
    pub max_requests_per_hour: i64,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            expiry_minutes: DEFAULT_EXPIRY_MINUTES,
            resend_cooldown_seconds: DEFAULT_EXPIRY_MINUTES * 60,
            max_attempts: MAX_ATTEMPTS,
            max_requests_per_hour: 10,
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            expiry_minutes: config.expiry_minutes,
            resend_cooldown_seconds: config.resend_interval_seconds(),
            max_attempts: config.max_attempts,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_five_minute_windows() {
        let config = OtpServiceConfig::default();
        assert_eq!(config.expiry_minutes, 5);
        assert_eq!(config.resend_cooldown_seconds, 300);
        assert_eq!(config.max_attempts, 3);
    }

    #[test]
    fn test_from_shared_config() {
        let shared = OtpConfig {
            resend_interval_minutes: 2,
            expiry_minutes: 10,
            max_attempts: 5,
        };
        let config = OtpServiceConfig::from(&shared);
        assert_eq!(config.expiry_minutes, 10);
        assert_eq!(config.resend_cooldown_seconds, 120);
        assert_eq!(config.max_attempts, 5);
    }
}

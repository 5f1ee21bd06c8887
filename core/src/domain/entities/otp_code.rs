//! OTP code entity for email-based verification.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ss_shared::utils::email::normalize_email;

/// Maximum number of verification attempts allowed per code
pub const MAX_ATTEMPTS: i32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiry window for verification codes (5 minutes)
pub const DEFAULT_EXPIRY_MINUTES: i64 = 5;

/// One-time passcode entity tied to an email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCode {
    /// Unique identifier for this issuance
    pub id: Uuid,

    /// Email address the code was sent to (normalized lowercase)
    pub email: String,

    /// The 6-digit verification code
    pub code: String,

    /// Number of verification attempts made
    pub attempts: i32,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used
    pub is_used: bool,
}

impl OtpCode {
    /// Issue a new code for an email address with the default expiry window
    pub fn new(email: &str) -> Self {
        Self::new_with_expiry(email, DEFAULT_EXPIRY_MINUTES)
    }

    /// Issue a new code with a custom expiry window in minutes
    pub fn new_with_expiry(email: &str, expiry_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            code: Self::generate_code(),
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(expiry_minutes),
            is_used: false,
        }
    }

    /// Generate a 6-digit code from the OS CSPRNG
    pub fn generate_code() -> String {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        // Slight modulo bias is negligible at 6 digits
        let code = u32::from_le_bytes(bytes) % 1_000_000;
        format!("{:06}", code)
    }

    /// Check whether the code has passed its expiry window
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// A code is usable if it is unexpired, unused and under the attempt limit
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_used && self.attempts < MAX_ATTEMPTS
    }

    /// Check a submitted code against this issuance
    ///
    /// Increments the attempt counter on a mismatch and marks the code as
    /// used on a match. Expired and already-used codes are rejected before
    /// the comparison.
    pub fn verify(&mut self, input_code: &str) -> Result<(), String> {
        if self.is_expired() {
            return Err("Verification code has expired".to_string());
        }
        if self.is_used {
            return Err("Verification code has already been used".to_string());
        }
        if self.attempts >= MAX_ATTEMPTS {
            return Err("Maximum verification attempts exceeded".to_string());
        }

        self.attempts += 1;

        if self.code == input_code {
            self.is_used = true;
            Ok(())
        } else {
            let remaining = MAX_ATTEMPTS - self.attempts;
            if remaining > 0 {
                Err(format!(
                    "Invalid verification code. {} attempt(s) remaining",
                    remaining
                ))
            } else {
                Err("Invalid verification code. No attempts remaining".to_string())
            }
        }
    }

    /// Remaining verification attempts (0 if exhausted)
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_ATTEMPTS - self.attempts).max(0)
    }

    /// Time left until expiry, or zero if already expired
    pub fn time_until_expiry(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }

    /// Replace the code with a fresh one for a resend, resetting attempts
    pub fn reissue(&mut self, expiry_minutes: i64) {
        self.code = Self::generate_code();
        self.attempts = 0;
        self.is_used = false;
        self.created_at = Utc::now();
        self.expires_at = self.created_at + Duration::minutes(expiry_minutes);
    }
}

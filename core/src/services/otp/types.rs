//! Types for OTP service results

use chrono::{DateTime, Utc};

use crate::domain::entities::OtpCode;

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct IssueOtpResult {
    /// The code entity that was issued
    pub otp_code: OtpCode,
    /// The email provider message id
    pub message_id: String,
    /// When the user may request another code
    pub next_resend_at: DateTime<Utc>,
}

/// Result of verifying a submitted code
#[derive(Debug, Clone)]
pub struct VerifyOtpResult {
    /// Whether the verification succeeded
    pub success: bool,
    /// Remaining attempts, when verification failed
    pub remaining_attempts: Option<i32>,
    /// Failure reason, surfaced verbatim to the client
    pub error_message: Option<String>,
}

impl VerifyOtpResult {
    /// Successful verification
    pub fn verified() -> Self {
        Self {
            success: true,
            remaining_attempts: None,
            error_message: None,
        }
    }

    /// Failed verification with a reason
    pub fn rejected(message: impl Into<String>, remaining_attempts: Option<i32>) -> Self {
        Self {
            success: false,
            remaining_attempts,
            error_message: Some(message.into()),
        }
    }
}

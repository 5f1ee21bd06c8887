use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body for `POST /api/auth/send-otp` and `POST /api/auth/resend-otp`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Identifier of the account awaiting verification
    #[serde(rename = "userId")]
    #[validate(length(min = 1, max = 64))]
    pub user_id: String,

    /// Email address the code is delivered to
    #[validate(email)]
    pub email: String,
}

/// Body for `POST /api/auth/verify-otp`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    /// Identifier of the account awaiting verification
    #[serde(rename = "userId")]
    #[validate(length(min = 1, max = 64))]
    pub user_id: String,

    /// Email address the code was delivered to
    #[validate(email)]
    pub email: String,

    /// 6-digit verification code
    #[validate(length(equal = 6))]
    pub code: String,
}

//! Error type definitions for OTP issuance and verification
//!
//! The messages here are surfaced verbatim to API clients in the
//! `{ success, message }` response shape, so they are written for end users.

use thiserror::Error;

/// OTP issuance and verification errors
#[derive(Error, Debug)]
pub enum OtpError {
    #[error("Invalid email address format")]
    InvalidEmailFormat { email: String },

    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Verification code has expired")]
    VerificationCodeExpired,

    #[error("Maximum verification attempts exceeded. Please request a new code")]
    MaxAttemptsExceeded,

    #[error("Please wait {seconds} seconds before requesting a new code")]
    RateLimitExceeded { seconds: i64 },

    #[error("Too many verification requests. Please try again later")]
    HourlyLimitExceeded,

    #[error("Failed to send verification email. Please try again later")]
    EmailServiceFailure,
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email format")]
    InvalidEmail,
}

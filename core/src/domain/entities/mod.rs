//! Domain entities

pub mod otp_code;
pub mod verification_request;

pub use otp_code::OtpCode;
pub use verification_request::VerificationRequest;

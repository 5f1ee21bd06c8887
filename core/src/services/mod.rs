//! Business services

pub mod otp;

pub use otp::{
    CountdownHandle, CountdownSession, EmailServiceTrait, IssueOtpResult, OtpCacheTrait,
    OtpPhase, OtpService, OtpServiceConfig, OtpTimerState, VerifyOtpResult,
};

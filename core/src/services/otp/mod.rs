//! OTP issuance, verification and countdown tracking
//!
//! The service side issues codes, enforces the resend cooldown and verifies
//! submissions against the cached code. The countdown side is the per-session
//! timer pair (resend cooldown and code expiry) that drives what the client
//! is told about resend availability and expiry.

pub mod config;
pub mod countdown;
pub mod service;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use countdown::{CountdownHandle, CountdownSession, OtpPhase, OtpTimerState};
pub use service::OtpService;
pub use traits::{EmailServiceTrait, OtpCacheTrait};
pub use types::{IssueOtpResult, VerifyOtpResult};

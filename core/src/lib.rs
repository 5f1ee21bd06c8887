//! # ShabdSetu Core
//!
//! Core business logic and domain layer for the ShabdSetu OTP verification
//! service. This crate contains domain entities, the OTP issuance and
//! verification services, the countdown state machine, repository interfaces,
//! and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;

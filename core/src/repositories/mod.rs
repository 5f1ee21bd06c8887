//! Repository interfaces for persisted records

pub mod verification_request;

pub use verification_request::VerificationRequestRepository;

//! Verification request repository interface
//!
//! The backing store is an append-only log: records are inserted on every
//! issuance and queried for rate-limit windows, never updated or deleted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::VerificationRequest;
use crate::errors::DomainError;

pub mod mock;
pub use mock::MockVerificationRequestRepository;

/// Repository for the append-only verification request log
#[async_trait]
pub trait VerificationRequestRepository: Send + Sync {
    /// Append a new request record
    async fn create(&self, request: VerificationRequest) -> Result<VerificationRequest, DomainError>;

    /// Count requests for an email address since the given instant
    ///
    /// Backs rate-limit lookups; the (email, requested_at) index exists for
    /// this query.
    async fn count_since(&self, email: &str, since: DateTime<Utc>) -> Result<i64, DomainError>;

    /// Find the most recent request for an email address, if any
    async fn find_latest(&self, email: &str) -> Result<Option<VerificationRequest>, DomainError>;
}

//! Verification request audit record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ss_shared::utils::email::normalize_email;

/// Append-only record of an OTP issuance request
///
/// One record is written per issuance (initial or resend). `requested_at` is
/// set at creation and never mutated; records are never updated or deleted.
/// The log exists for rate-limit lookups and auditing, not for storing the
/// code itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Unique identifier for the request record
    pub id: Uuid,

    /// Email address the request was made for (normalized lowercase)
    pub email: String,

    /// Timestamp of the issuance request
    pub requested_at: DateTime<Utc>,
}

impl VerificationRequest {
    /// Record a new issuance request for an email address
    pub fn new(email: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            requested_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_normalizes_email() {
        let request = VerificationRequest::new(" Writer@ShabdSetu.App ");
        assert_eq!(request.email, "writer@shabdsetu.app");
    }

    #[test]
    fn test_requests_have_distinct_ids() {
        let a = VerificationRequest::new("reader@shabdsetu.app");
        let b = VerificationRequest::new("reader@shabdsetu.app");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serialization_round_trip() {
        let request = VerificationRequest::new("reader@shabdsetu.app");
        let json = serde_json::to_string(&request).unwrap();
        let decoded: VerificationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, decoded);
    }
}

//! In-memory implementation of VerificationRequestRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::VerificationRequest;
use crate::errors::DomainError;

use super::VerificationRequestRepository;

/// Mock verification request repository backed by a Vec
pub struct MockVerificationRequestRepository {
    requests: Arc<RwLock<Vec<VerificationRequest>>>,
    fail: bool,
}

impl MockVerificationRequestRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            fail: false,
        }
    }

    /// Create a mock repository whose operations all fail
    pub fn failing() -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            fail: true,
        }
    }

    /// Number of records appended so far
    pub async fn len(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Whether no records have been appended
    pub async fn is_empty(&self) -> bool {
        self.requests.read().await.is_empty()
    }
}

impl Default for MockVerificationRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationRequestRepository for MockVerificationRequestRepository {
    async fn create(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationRequest, DomainError> {
        if self.fail {
            return Err(DomainError::Internal {
                message: "Request log unavailable".to_string(),
            });
        }
        self.requests.write().await.push(request.clone());
        Ok(request)
    }

    async fn count_since(&self, email: &str, since: DateTime<Utc>) -> Result<i64, DomainError> {
        if self.fail {
            return Err(DomainError::Internal {
                message: "Request log unavailable".to_string(),
            });
        }
        let requests = self.requests.read().await;
        Ok(requests
            .iter()
            .filter(|r| r.email == email && r.requested_at >= since)
            .count() as i64)
    }

    async fn find_latest(&self, email: &str) -> Result<Option<VerificationRequest>, DomainError> {
        if self.fail {
            return Err(DomainError::Internal {
                message: "Request log unavailable".to_string(),
            });
        }
        let requests = self.requests.read().await;
        Ok(requests
            .iter()
            .filter(|r| r.email == email)
            .max_by_key(|r| r.requested_at)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_create_appends_record() {
        let repo = MockVerificationRequestRepository::new();
        assert!(repo.is_empty().await);

        repo.create(VerificationRequest::new("reader@shabdsetu.app"))
            .await
            .unwrap();
        repo.create(VerificationRequest::new("reader@shabdsetu.app"))
            .await
            .unwrap();

        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_count_since_filters_by_email_and_window() {
        let repo = MockVerificationRequestRepository::new();
        repo.create(VerificationRequest::new("reader@shabdsetu.app"))
            .await
            .unwrap();
        repo.create(VerificationRequest::new("writer@shabdsetu.app"))
            .await
            .unwrap();

        let hour_ago = Utc::now() - Duration::hours(1);
        assert_eq!(
            repo.count_since("reader@shabdsetu.app", hour_ago)
                .await
                .unwrap(),
            1
        );

        let future = Utc::now() + Duration::minutes(1);
        assert_eq!(
            repo.count_since("reader@shabdsetu.app", future)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_find_latest_returns_most_recent() {
        let repo = MockVerificationRequestRepository::new();
        assert!(repo.find_latest("reader@shabdsetu.app").await.unwrap().is_none());

        let first = VerificationRequest::new("reader@shabdsetu.app");
        repo.create(first).await.unwrap();
        let mut second = VerificationRequest::new("reader@shabdsetu.app");
        second.requested_at = Utc::now() + Duration::seconds(5);
        repo.create(second.clone()).await.unwrap();

        let latest = repo.find_latest("reader@shabdsetu.app").await.unwrap();
        assert_eq!(latest.unwrap().id, second.id);
    }

    #[tokio::test]
    async fn test_failing_repository() {
        let repo = MockVerificationRequestRepository::failing();
        let result = repo
            .create(VerificationRequest::new("reader@shabdsetu.app"))
            .await;
        assert!(result.is_err());
    }
}

//! MySQL implementation of the verification request log.
//!
//! The `verification_requests` table is append-only: one row per issuance,
//! never updated or deleted. An `(email, requested_at)` index backs the
//! rate-limit window query.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ss_core::domain::entities::VerificationRequest;
use ss_core::errors::DomainError;
use ss_core::repositories::VerificationRequestRepository;

/// MySQL implementation of `VerificationRequestRepository`
pub struct MySqlVerificationRequestRepository {
    pool: MySqlPool,
}

impl MySqlVerificationRequestRepository {
    /// Create a new repository over a connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: &sqlx::mysql::MySqlRow) -> Result<VerificationRequest, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(VerificationRequest {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid request UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            requested_at: row
                .try_get::<DateTime<Utc>, _>("requested_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get requested_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl VerificationRequestRepository for MySqlVerificationRequestRepository {
    async fn create(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationRequest, DomainError> {
        let query = r#"
            INSERT INTO verification_requests (id, email, requested_at)
            VALUES (?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(request.id.to_string())
            .bind(&request.email)
            .bind(request.requested_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to record verification request: {}", e),
            })?;

        Ok(request)
    }

    async fn count_since(&self, email: &str, since: DateTime<Utc>) -> Result<i64, DomainError> {
        let query = r#"
            SELECT COUNT(*) as request_count
            FROM verification_requests
            WHERE email = ? AND requested_at >= ?
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to count verification requests: {}", e),
            })?;

        row.try_get("request_count")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get request count: {}", e),
            })
    }

    async fn find_latest(&self, email: &str) -> Result<Option<VerificationRequest>, DomainError> {
        let query = r#"
            SELECT id, email, requested_at
            FROM verification_requests
            WHERE email = ?
            ORDER BY requested_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find latest verification request: {}", e),
            })?;

        row.as_ref().map(Self::row_to_request).transpose()
    }
}

//! Infrastructure layer for the ShabdSetu OTP service.
//!
//! Concrete implementations behind the core service traits:
//! - **database**: MySQL persistence for the verification request log (SQLx)
//! - **cache**: Redis storage for active codes and attempt counters
//! - **email**: verification email delivery (mock and HTTP providers)

pub mod cache;
pub mod database;
pub mod email;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),
}

//! Traits for email delivery and code cache integration

use async_trait::async_trait;

/// Trait for the email delivery collaborator
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a verification code to an email address, returning a provider
    /// message id
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String>;
}

/// Trait for the code cache collaborator
#[async_trait]
pub trait OtpCacheTrait: Send + Sync {
    /// Store a verification code with expiration, resetting attempts
    async fn store_code(&self, email: &str, code: &str) -> Result<(), String>;
    /// Verify a code and track attempts
    async fn verify_code(&self, email: &str, code: &str) -> Result<bool, String>;
    /// Get remaining verification attempts
    async fn get_remaining_attempts(&self, email: &str) -> Result<i64, String>;
    /// Check whether an unexpired code exists for an email address
    async fn code_exists(&self, email: &str) -> Result<bool, String>;
    /// Get time-to-live for a stored code in seconds
    async fn get_code_ttl(&self, email: &str) -> Result<Option<i64>, String>;
    /// Clear all verification data for an email address
    async fn clear_verification(&self, email: &str) -> Result<(), String>;
}

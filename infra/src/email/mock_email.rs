//! Mock email provider for development and testing.
//!
//! Echoes verification emails to the console instead of sending them, so
//! the full issuance flow can be exercised without provider credentials.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use ss_shared::utils::email::{is_valid_email, mask_email};

use crate::email::{verification_email_body, EmailProvider, VERIFICATION_SUBJECT};
use crate::InfrastructureError;

/// Mock email provider
#[derive(Clone)]
pub struct MockEmailService {
    /// Number of emails sent, for assertions in tests
    message_count: Arc<AtomicU64>,
    /// Whether to simulate delivery failures
    simulate_failure: bool,
    /// Whether to echo messages to the console
    console_output: bool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
            console_output: true,
        }
    }

    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Total number of emails sent through this instance
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailProvider for MockEmailService {
    async fn send_verification_email(
        &self,
        to: &str,
        code: &str,
    ) -> Result<String, InfrastructureError> {
        if !is_valid_email(to) {
            return Err(InfrastructureError::Email(format!(
                "Invalid email address: {}",
                mask_email(to)
            )));
        }

        if self.simulate_failure {
            warn!(
                email = %mask_email(to),
                "Mock email provider simulating failure"
            );
            return Err(InfrastructureError::Email(
                "Simulated email delivery failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK EMAIL PROVIDER - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", to);
            println!("Subject: {}", VERIFICATION_SUBJECT);
            println!("Message ID: {}", message_id);
            println!("{}", verification_email_body(code));
            println!("{}\n", "=".repeat(60));
        }

        info!(
            provider = "mock",
            email = %mask_email(to),
            message_id = %message_id,
            "Verification email sent (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_send_returns_message_id_and_counts() {
        let provider = MockEmailService::with_options(false, false);

        let id = provider
            .send_verification_email("reader@shabdsetu.app", "123456")
            .await
            .unwrap();

        assert!(id.starts_with("mock_"));
        assert_eq!(provider.message_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_rejects_invalid_address() {
        let provider = MockEmailService::with_options(false, false);

        let result = provider
            .send_verification_email("not-an-email", "123456")
            .await;

        assert!(matches!(result, Err(InfrastructureError::Email(_))));
        assert_eq!(provider.message_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_simulated_failure() {
        let provider = MockEmailService::with_options(false, true);

        let result = provider
            .send_verification_email("reader@shabdsetu.app", "123456")
            .await;

        assert!(matches!(result, Err(InfrastructureError::Email(_))));
    }
}

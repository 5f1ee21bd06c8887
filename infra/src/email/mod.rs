//! Verification email delivery.
//!
//! Two providers exist behind the [`EmailProvider`] trait: a mock that logs
//! to the console for development, and an HTTP client for a transactional
//! email API. [`EmailService`] wraps the selected provider and adapts it to
//! the core service trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use ss_core::services::otp::traits::EmailServiceTrait;
use ss_shared::config::email::EmailConfig;

use crate::InfrastructureError;

pub mod http_provider;
pub mod mock_email;

pub use http_provider::HttpEmailService;
pub use mock_email::MockEmailService;

/// Subject line used on all verification emails
pub const VERIFICATION_SUBJECT: &str = "Your ShabdSetu verification code";

/// Render the plain-text body for a verification email
pub fn verification_email_body(code: &str) -> String {
    format!(
        "Your ShabdSetu verification code is: {}\n\n\
         This code expires in a few minutes. If you did not request it,\n\
         you can safely ignore this email.",
        code
    )
}

/// Provider-side email delivery interface
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Deliver a verification code, returning a provider message id
    async fn send_verification_email(
        &self,
        to: &str,
        code: &str,
    ) -> Result<String, InfrastructureError>;

    /// Human-readable provider name for logs
    fn provider_name(&self) -> &str;
}

/// Email service handle passed to the core OTP service
///
/// Holds the configured provider and adapts infrastructure errors to the
/// string errors the core trait expects.
#[derive(Clone)]
pub struct EmailService {
    provider: Arc<dyn EmailProvider>,
}

impl EmailService {
    /// Wrap an explicit provider
    pub fn new(provider: Arc<dyn EmailProvider>) -> Self {
        Self { provider }
    }

    /// Build the provider selected by the email configuration
    pub fn from_config(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let provider: Arc<dyn EmailProvider> = if config.is_mock() {
            Arc::new(MockEmailService::new())
        } else {
            Arc::new(HttpEmailService::from_config(config)?)
        };

        info!(provider = provider.provider_name(), "Email service configured");
        Ok(Self { provider })
    }
}

#[async_trait]
impl EmailServiceTrait for EmailService {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String> {
        self.provider
            .send_verification_email(email, code)
            .await
            .map_err(|e| e.to_string())
    }
}

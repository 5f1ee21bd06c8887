//! HTTP transactional email provider.
//!
//! Posts verification emails to a JSON email API using bearer
//! authentication. Works with providers exposing a single send endpoint
//! (Resend-style); the endpoint and key come from the email configuration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use ss_shared::config::email::EmailConfig;
use ss_shared::utils::email::mask_email;

use crate::email::{verification_email_body, EmailProvider, VERIFICATION_SUBJECT};
use crate::InfrastructureError;

/// Timeout for provider API requests
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: String,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

/// HTTP email provider client
pub struct HttpEmailService {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from_address: String,
}

impl HttpEmailService {
    /// Build a client from the email configuration
    pub fn from_config(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_url.is_empty() {
            return Err(InfrastructureError::Config(
                "EMAIL_API_URL must be set for the http email provider".to_string(),
            ));
        }
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "EMAIL_API_KEY must be set for the http email provider".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl EmailProvider for HttpEmailService {
    async fn send_verification_email(
        &self,
        to: &str,
        code: &str,
    ) -> Result<String, InfrastructureError> {
        let payload = SendEmailRequest {
            from: &self.from_address,
            to,
            subject: VERIFICATION_SUBJECT,
            text: verification_email_body(code),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                email = %mask_email(to),
                status = %status,
                "Email provider rejected the send request"
            );
            return Err(InfrastructureError::Email(format!(
                "Provider returned {}: {}",
                status, body
            )));
        }

        // Providers that do not echo an id still get a traceable one
        let message_id = response
            .json::<SendEmailResponse>()
            .await
            .ok()
            .and_then(|r| r.id)
            .unwrap_or_else(|| format!("http_{}", Uuid::new_v4()));

        info!(
            provider = "http",
            email = %mask_email(to),
            message_id = %message_id,
            "Verification email dispatched"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_url_and_key() {
        let mut config = EmailConfig {
            provider: "http".to_string(),
            api_url: String::new(),
            api_key: "key".to_string(),
            from_address: "no-reply@shabdsetu.app".to_string(),
        };
        assert!(matches!(
            HttpEmailService::from_config(&config),
            Err(InfrastructureError::Config(_))
        ));

        config.api_url = "https://api.example.com/emails".to_string();
        config.api_key = String::new();
        assert!(matches!(
            HttpEmailService::from_config(&config),
            Err(InfrastructureError::Config(_))
        ));

        config.api_key = "key".to_string();
        assert!(HttpEmailService::from_config(&config).is_ok());
    }
}

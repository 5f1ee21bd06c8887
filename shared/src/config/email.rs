//! Email delivery provider configuration

use serde::{Deserialize, Serialize};

/// Email service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Email provider ("mock" or "http")
    pub provider: String,

    /// HTTP API endpoint for the transactional email provider
    pub api_url: String,

    /// API key for the provider
    pub api_key: String,

    /// From address used on verification emails
    pub from_address: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_url: String::new(),
            api_key: String::new(),
            from_address: String::from("no-reply@shabdsetu.app"),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            api_url: std::env::var("EMAIL_API_URL").unwrap_or_default(),
            api_key: std::env::var("EMAIL_API_KEY").unwrap_or_default(),
            from_address: std::env::var("EMAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "no-reply@shabdsetu.app".to_string()),
        }
    }

    /// Check whether the mock provider is selected
    pub fn is_mock(&self) -> bool {
        self.provider.eq_ignore_ascii_case("mock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_config_default_is_mock() {
        let config = EmailConfig::default();
        assert!(config.is_mock());
        assert_eq!(config.from_address, "no-reply@shabdsetu.app");
    }
}

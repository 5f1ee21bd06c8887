//! API response types

use serde::{Deserialize, Serialize};

/// Standard API response wrapper
///
/// Every OTP endpoint replies with this flat shape; `message` carries either
/// the success confirmation or the server-supplied failure reason, passed
/// through verbatim to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Whether the request was successful
    pub success: bool,

    /// Human-readable outcome message
    pub message: String,
}

impl ApiResponse {
    /// Create a successful response
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

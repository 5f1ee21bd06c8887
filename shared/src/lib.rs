//! Shared utilities and common types for the ShabdSetu OTP service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response structures
//! - Utility functions (email normalization, masking, etc.)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, EmailConfig, Environment, OtpConfig, ServerConfig,
};
pub use types::ApiResponse;
pub use utils::email;

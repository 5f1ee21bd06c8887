//! Mapping from domain errors to HTTP responses.
//!
//! Every error becomes the flat `{ success: false, message }` body. Domain
//! error messages are written for end users and pass through verbatim;
//! internal errors are replaced with a generic message so storage details
//! never reach the client.

use actix_web::HttpResponse;

use ss_core::errors::{DomainError, OtpError};
use ss_shared::types::response::ApiResponse;

/// Convert a domain error into the appropriate HTTP response
///
/// Status mapping: 400 invalid input or wrong/expired code, 429 cooldown or
/// attempt limit, 503 email delivery failure, 500 storage or internal
/// failure.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Otp(otp_error) => {
            let message = otp_error.to_string();
            match otp_error {
                OtpError::InvalidEmailFormat { .. }
                | OtpError::InvalidVerificationCode
                | OtpError::VerificationCodeExpired => {
                    log::warn!("Verification rejected: {}", message);
                    HttpResponse::BadRequest().json(ApiResponse::error(message))
                }
                OtpError::RateLimitExceeded { .. }
                | OtpError::HourlyLimitExceeded
                | OtpError::MaxAttemptsExceeded => {
                    log::warn!("Request throttled: {}", message);
                    HttpResponse::TooManyRequests().json(ApiResponse::error(message))
                }
                OtpError::EmailServiceFailure => {
                    log::error!("Email delivery failure: {}", message);
                    HttpResponse::ServiceUnavailable().json(ApiResponse::error(message))
                }
            }
        }
        DomainError::ValidationErr(validation_error) => {
            log::warn!("Validation error: {}", validation_error);
            HttpResponse::BadRequest().json(ApiResponse::error(validation_error.to_string()))
        }
        DomainError::Validation { message } => {
            log::warn!("Validation error: {}", message);
            HttpResponse::BadRequest().json(ApiResponse::error(message))
        }
        DomainError::NotFound { resource } => {
            log::warn!("Resource not found: {}", resource);
            HttpResponse::NotFound().json(ApiResponse::error(format!("Not found: {}", resource)))
        }
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            HttpResponse::InternalServerError()
                .json(ApiResponse::error("An internal error occurred"))
        }
    }
}

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::VerifyOtpRequest;
use crate::handlers::error::handle_domain_error;

use ss_core::repositories::VerificationRequestRepository;
use ss_core::services::otp::traits::{EmailServiceTrait, OtpCacheTrait};
use ss_shared::types::response::ApiResponse;
use ss_shared::utils::email::mask_email;

use super::AppState;

/// Handler for POST /api/auth/verify-otp
///
/// Submits a code for verification. The server holds the authoritative
/// accept/reject decision regardless of any client-side countdown state.
///
/// # Request Body
///
/// ```json
/// {
///     "userId": "user-123",
///     "email": "reader@shabdsetu.app",
///     "code": "123456"
/// }
/// ```
///
/// # Responses
/// - 200: `{ "success": true, "message": "Email verified successfully" }`
/// - 400: wrong, expired or malformed code
/// - 429: verification attempts exhausted
pub async fn verify_otp<E, C, R>(
    state: web::Data<AppState<E, C, R>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    E: EmailServiceTrait + 'static,
    C: OtpCacheTrait + 'static,
    R: VerificationRequestRepository + 'static,
{
    if let Err(errors) = request.validate() {
        log::warn!(
            "Invalid verify-otp request for user {}: {}",
            request.user_id,
            errors
        );
        return HttpResponse::BadRequest().json(ApiResponse::error("Invalid request data"));
    }

    log::info!(
        "Processing verify-otp request for user {} ({})",
        request.user_id,
        mask_email(&request.email)
    );

    match state
        .otp_service
        .verify_otp(&request.email, &request.code)
        .await
    {
        Ok(result) => {
            if result.success {
                HttpResponse::Ok().json(ApiResponse::success("Email verified successfully"))
            } else {
                let message = result
                    .error_message
                    .unwrap_or_else(|| "Invalid verification code".to_string());
                // Exhausted attempts are throttling, not bad input
                if result.remaining_attempts == Some(0) {
                    HttpResponse::TooManyRequests().json(ApiResponse::error(message))
                } else {
                    HttpResponse::BadRequest().json(ApiResponse::error(message))
                }
            }
        }
        Err(error) => handle_domain_error(error),
    }
}

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::SendOtpRequest;
use crate::handlers::error::handle_domain_error;

use ss_core::repositories::VerificationRequestRepository;
use ss_core::services::otp::traits::{EmailServiceTrait, OtpCacheTrait};
use ss_shared::types::response::ApiResponse;
use ss_shared::utils::email::mask_email;

use super::AppState;

/// Handler for POST /api/auth/send-otp
///
/// Issues the initial verification code for a freshly registered account.
///
/// # Request Body
///
/// ```json
/// {
///     "userId": "user-123",
///     "email": "reader@shabdsetu.app"
/// }
/// ```
///
/// # Responses
/// - 200: `{ "success": true, "message": "Verification code sent to your email" }`
/// - 400: invalid email or request data
/// - 429: cooldown active or hourly cap reached
/// - 503: email delivery failure
pub async fn send_otp<E, C, R>(
    state: web::Data<AppState<E, C, R>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    E: EmailServiceTrait + 'static,
    C: OtpCacheTrait + 'static,
    R: VerificationRequestRepository + 'static,
{
    if let Err(errors) = request.validate() {
        log::warn!(
            "Invalid send-otp request for user {}: {}",
            request.user_id,
            errors
        );
        return HttpResponse::BadRequest().json(ApiResponse::error("Invalid request data"));
    }

    log::info!(
        "Processing send-otp request for user {} ({})",
        request.user_id,
        mask_email(&request.email)
    );

    match state.otp_service.issue_otp(&request.email).await {
        Ok(_) => HttpResponse::Ok().json(ApiResponse::success(
            "Verification code sent to your email",
        )),
        Err(error) => handle_domain_error(error),
    }
}

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::SendOtpRequest;
use crate::handlers::error::handle_domain_error;

use ss_core::repositories::VerificationRequestRepository;
use ss_core::services::otp::traits::{EmailServiceTrait, OtpCacheTrait};
use ss_shared::types::response::ApiResponse;
use ss_shared::utils::email::mask_email;

use super::AppState;

/// Handler for POST /api/auth/resend-otp
///
/// Reissues a verification code once the resend cooldown has elapsed. The
/// previous code is invalidated; only the newest code verifies. Requests
/// inside the cooldown window get a 429 with the remaining wait.
///
/// # Request Body
///
/// ```json
/// {
///     "userId": "user-123",
///     "email": "reader@shabdsetu.app"
/// }
/// ```
pub async fn resend_otp<E, C, R>(
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
            "Invalid resend-otp request for user {}: {}",
            request.user_id,
            errors
        );
        return HttpResponse::BadRequest().json(ApiResponse::error("Invalid request data"));
    }

    log::info!(
        "Processing resend-otp request for user {} ({})",
        request.user_id,
        mask_email(&request.email)
    );

    match state.otp_service.issue_otp(&request.email).await {
        Ok(_) => HttpResponse::Ok().json(ApiResponse::success(
            "A new verification code has been sent to your email",
        )),
        Err(error) => handle_domain_error(error),
    }
}

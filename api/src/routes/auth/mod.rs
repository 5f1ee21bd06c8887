//! Email verification route handlers
//!
//! - `POST /api/auth/send-otp` - initial code issuance at signup
//! - `POST /api/auth/resend-otp` - reissue after the cooldown elapses
//! - `POST /api/auth/verify-otp` - submit a code for verification

use actix_web::web;
use std::sync::Arc;

use ss_core::repositories::VerificationRequestRepository;
use ss_core::services::otp::traits::{EmailServiceTrait, OtpCacheTrait};
use ss_core::services::otp::OtpService;

pub mod resend_otp;
pub mod send_otp;
pub mod verify_otp;

/// Application state holding the shared OTP service
pub struct AppState<E, C, R>
where
    E: EmailServiceTrait,
    C: OtpCacheTrait,
    R: VerificationRequestRepository,
{
    pub otp_service: Arc<OtpService<E, C, R>>,
}

/// Register the verification endpoints under `/auth`
pub fn configure<E, C, R>(cfg: &mut web::ServiceConfig)
where
    E: EmailServiceTrait + 'static,
    C: OtpCacheTrait + 'static,
    R: VerificationRequestRepository + 'static,
{
    cfg.service(
        web::scope("/auth")
            .route("/send-otp", web::post().to(send_otp::send_otp::<E, C, R>))
            .route("/resend-otp", web::post().to(resend_otp::resend_otp::<E, C, R>))
            .route("/verify-otp", web::post().to(verify_otp::verify_otp::<E, C, R>)),
    );
}

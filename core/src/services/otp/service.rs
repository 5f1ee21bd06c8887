//! OTP issuance and verification service

use chrono::{Duration, Utc};
use std::sync::Arc;

use constant_time_eq::constant_time_eq;

use crate::domain::entities::otp_code::{OtpCode, CODE_LENGTH};
use crate::domain::entities::VerificationRequest;
use crate::errors::{DomainError, DomainResult, OtpError, ValidationError};
use crate::repositories::VerificationRequestRepository;

use ss_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use super::config::OtpServiceConfig;
use super::traits::{EmailServiceTrait, OtpCacheTrait};
use super::types::{IssueOtpResult, VerifyOtpResult};

/// Service handling OTP issuance and verification for email addresses
pub struct OtpService<E, C, R>
where
    E: EmailServiceTrait,
    C: OtpCacheTrait,
    R: VerificationRequestRepository,
{
    /// Email delivery collaborator
    email_service: Arc<E>,
    /// Code cache collaborator
    cache_service: Arc<C>,
    /// Append-only issuance request log
    request_repository: Arc<R>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<E, C, R> OtpService<E, C, R>
where
    E: EmailServiceTrait,
    C: OtpCacheTrait,
    R: VerificationRequestRepository,
{
    /// Create a new OTP service
    pub fn new(
        email_service: Arc<E>,
        cache_service: Arc<C>,
        request_repository: Arc<R>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            email_service,
            cache_service,
            request_repository,
            config,
        }
    }

    /// Issue a verification code to an email address
    ///
    /// This method:
    /// 1. Normalizes and validates the email address
    /// 2. Enforces the resend cooldown and the hourly request cap
    /// 3. Invalidates any previous code so only the newest one is valid
    /// 4. Appends a VerificationRequest record to the issuance log
    /// 5. Stores the new code in the cache with the expiry-window TTL
    /// 6. Dispatches the code via the email collaborator
    ///
    /// Resend is this same operation invoked again; the cooldown gate is what
    /// separates a legal resend from a throttled one. A downstream send
    /// failure is reported as a failure with no automatic retry.
    pub async fn issue_otp(&self, email: &str) -> DomainResult<IssueOtpResult> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidEmail));
        }
        let masked = mask_email(&email);

        self.check_resend_cooldown(&email, &masked).await?;
        self.check_hourly_limit(&email, &masked).await?;

        // Only the newest code may verify
        self.invalidate_previous_codes(&email).await?;

        let otp_code = OtpCode::new_with_expiry(&email, self.config.expiry_minutes);

        tracing::info!(
            email = %masked,
            event = "otp_generated",
            session_id = %otp_code.id,
            "Generated new verification code"
        );

        // Append-only audit record; written before dispatch so throttling
        // sees failed sends too
        self.request_repository
            .create(VerificationRequest::new(&email))
            .await?;

        self.cache_service
            .store_code(&email, &otp_code.code)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %masked,
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store verification code in cache"
                );
                DomainError::Internal {
                    message: format!("Failed to store verification code: {}", e),
                }
            })?;

        let message_id = self
            .email_service
            .send_verification_code(&email, &otp_code.code)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %masked,
                    error = %e,
                    event = "otp_dispatch_failed",
                    "Failed to send verification email"
                );
                DomainError::Otp(OtpError::EmailServiceFailure)
            })?;

        let next_resend_at = Utc::now() + Duration::seconds(self.config.resend_cooldown_seconds);

        tracing::info!(
            email = %masked,
            message_id = %message_id,
            event = "otp_sent",
            "Verification code dispatched"
        );

        Ok(IssueOtpResult {
            otp_code,
            message_id,
            next_resend_at,
        })
    }

    /// Verify a submitted code for an email address
    ///
    /// The submission is always attempted regardless of any client-side timer
    /// state; this endpoint holds the authoritative accept/reject decision.
    /// Wrong, expired, used and over-limit codes are all rejected; the caller
    /// only sees the message string.
    pub async fn verify_otp(&self, email: &str, code: &str) -> DomainResult<VerifyOtpResult> {
        let email = normalize_email(email);
        let masked = mask_email(&email);

        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            tracing::warn!(
                email = %masked,
                event = "invalid_code_format",
                code_length = code.len(),
                "Invalid verification code format provided"
            );
            return Ok(VerifyOtpResult::rejected(
                "Invalid verification code format",
                None,
            ));
        }

        match self.cache_service.verify_code(&email, code).await {
            Ok(true) => {
                tracing::info!(
                    email = %masked,
                    event = "otp_verified",
                    "Verification code accepted"
                );

                // Prevent replay of the accepted code
                let _ = self.cache_service.clear_verification(&email).await;

                Ok(VerifyOtpResult::verified())
            }
            Ok(false) => {
                let remaining = self
                    .cache_service
                    .get_remaining_attempts(&email)
                    .await
                    .unwrap_or(0) as i32;

                tracing::warn!(
                    email = %masked,
                    event = "otp_verification_failed",
                    remaining_attempts = remaining,
                    "Verification code rejected"
                );

                let message = if remaining > 0 {
                    format!("Invalid verification code. {} attempts remaining", remaining)
                } else {
                    "Maximum verification attempts exceeded. Please request a new code"
                        .to_string()
                };

                Ok(VerifyOtpResult::rejected(message, Some(remaining)))
            }
            Err(e) => {
                tracing::error!(
                    email = %masked,
                    error = %e,
                    event = "otp_verification_error",
                    "System error during code verification"
                );
                Err(DomainError::Internal {
                    message: format!("Failed to verify code: {}", e),
                })
            }
        }
    }

    /// Check whether an unexpired code exists for an email address
    pub async fn code_exists(&self, email: &str) -> DomainResult<bool> {
        let email = normalize_email(email);
        self.cache_service
            .code_exists(&email)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check code existence: {}", e),
            })
    }

    /// Clear verification data for an email address
    pub async fn clear_verification(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        self.cache_service
            .clear_verification(&email)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to clear verification: {}", e),
            })
    }

    /// Compare two codes in constant time
    pub fn codes_match(stored_code: &str, provided_code: &str) -> bool {
        stored_code.len() == provided_code.len()
            && constant_time_eq(stored_code.as_bytes(), provided_code.as_bytes())
    }

    /// Reject an issuance while a previous code is inside the cooldown window
    ///
    /// A cache failure here surfaces as an error rather than waving the
    /// request through with the gate disarmed.
    async fn check_resend_cooldown(&self, email: &str, masked: &str) -> DomainResult<()> {
        let exists = self.cache_service.code_exists(email).await.map_err(|e| {
            tracing::error!(
                email = %masked,
                error = %e,
                event = "cooldown_check_failed",
                "Failed to check for an existing verification code"
            );
            DomainError::Internal {
                message: format!("Failed to check resend cooldown: {}", e),
            }
        })?;
        if !exists {
            return Ok(());
        }

        let ttl = self.cache_service.get_code_ttl(email).await.map_err(|e| {
            tracing::error!(
                email = %masked,
                error = %e,
                event = "cooldown_check_failed",
                "Failed to read verification code TTL"
            );
            DomainError::Internal {
                message: format!("Failed to check resend cooldown: {}", e),
            }
        })?;

        if let Some(ttl) = ttl {
            let expiry_seconds = self.config.expiry_minutes * 60;
            let cooldown_remaining =
                ttl - (expiry_seconds - self.config.resend_cooldown_seconds);
            if cooldown_remaining > 0 {
                tracing::warn!(
                    email = %masked,
                    cooldown_remaining = cooldown_remaining,
                    event = "resend_throttled",
                    "Issuance request inside cooldown window"
                );
                return Err(DomainError::Otp(OtpError::RateLimitExceeded {
                    seconds: cooldown_remaining,
                }));
            }
        }
        Ok(())
    }

    /// Reject an issuance over the hourly request cap
    async fn check_hourly_limit(&self, email: &str, masked: &str) -> DomainResult<()> {
        if self.config.max_requests_per_hour <= 0 {
            return Ok(());
        }
        let hour_ago = Utc::now() - Duration::hours(1);
        let recent = self.request_repository.count_since(email, hour_ago).await?;
        if recent >= self.config.max_requests_per_hour {
            tracing::warn!(
                email = %masked,
                recent_requests = recent,
                event = "hourly_limit_exceeded",
                "Issuance request over hourly cap"
            );
            return Err(DomainError::Otp(OtpError::HourlyLimitExceeded));
        }
        Ok(())
    }

    /// Invalidate all previous codes for an email address
    async fn invalidate_previous_codes(&self, email: &str) -> DomainResult<()> {
        self.cache_service
            .clear_verification(email)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to invalidate previous codes: {}", e),
            })
    }
}

//! OTP service behaviour tests

use std::sync::Arc;

use chrono::Utc;

use crate::errors::{DomainError, OtpError};
use crate::repositories::verification_request::MockVerificationRequestRepository;
use crate::services::otp::config::OtpServiceConfig;
use crate::services::otp::service::OtpService;
use crate::services::otp::traits::OtpCacheTrait;

use super::mocks::{MockEmailService, MockOtpCache};

type TestService =
    OtpService<MockEmailService, MockOtpCache, MockVerificationRequestRepository>;

fn build_service(
    email_fails: bool,
    cache_fails: bool,
    config: OtpServiceConfig,
) -> (
    TestService,
    Arc<MockEmailService>,
    Arc<MockOtpCache>,
    Arc<MockVerificationRequestRepository>,
) {
    let email = Arc::new(MockEmailService::new(email_fails));
    let cache = Arc::new(MockOtpCache::new(cache_fails));
    let repo = Arc::new(MockVerificationRequestRepository::new());
    let service = OtpService::new(
        Arc::clone(&email),
        Arc::clone(&cache),
        Arc::clone(&repo),
        config,
    );
    (service, email, cache, repo)
}

#[tokio::test]
async fn test_issue_otp_success() {
    let (service, email, cache, repo) =
        build_service(false, false, OtpServiceConfig::default());

    let before = Utc::now();
    let result = service.issue_otp("reader@shabdsetu.app").await.unwrap();

    assert_eq!(result.otp_code.email, "reader@shabdsetu.app");
    assert_eq!(result.otp_code.code.len(), 6);
    assert!(result.message_id.starts_with("mock-msg-"));

    // Cooldown clock starts at issuance
    let cooldown = result.next_resend_at.signed_duration_since(before);
    assert!(cooldown.num_seconds() >= 299 && cooldown.num_seconds() <= 301);

    // Code stored, email dispatched, audit record appended
    assert!(cache.code_exists("reader@shabdsetu.app").await.unwrap());
    assert_eq!(email.send_count("reader@shabdsetu.app"), 1);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_issue_otp_rejects_invalid_email_before_side_effects() {
    let (service, email, _cache, repo) =
        build_service(false, false, OtpServiceConfig::default());

    let result = service.issue_otp("not-an-email").await;

    assert!(matches!(result, Err(DomainError::ValidationErr(_))));
    assert_eq!(email.send_count("not-an-email"), 0);
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_issue_otp_normalizes_email() {
    let (service, email, _cache, _repo) =
        build_service(false, false, OtpServiceConfig::default());

    let result = service.issue_otp("  Reader@ShabdSetu.App ").await.unwrap();

    assert_eq!(result.otp_code.email, "reader@shabdsetu.app");
    assert_eq!(email.send_count("reader@shabdsetu.app"), 1);
}

#[tokio::test]
async fn test_issue_otp_enforces_resend_cooldown() {
    let (service, email, _cache, _repo) =
        build_service(false, false, OtpServiceConfig::default());

    service.issue_otp("reader@shabdsetu.app").await.unwrap();

    // Second request arrives with the full cooldown still on the clock
    let result = service.issue_otp("reader@shabdsetu.app").await;
    match result {
        Err(DomainError::Otp(OtpError::RateLimitExceeded { seconds })) => {
            assert!(seconds > 0);
        }
        other => panic!("Expected RateLimitExceeded, got {:?}", other.err()),
    }
    assert_eq!(email.send_count("reader@shabdsetu.app"), 1);
}

#[tokio::test]
async fn test_issue_otp_allows_resend_after_cooldown() {
    let (service, email, cache, repo) =
        build_service(false, false, OtpServiceConfig::default());

    service.issue_otp("reader@shabdsetu.app").await.unwrap();

    // TTL run down to the end of the cooldown window
    cache.set_ttl(0);

    service.issue_otp("reader@shabdsetu.app").await.unwrap();

    assert_eq!(email.send_count("reader@shabdsetu.app"), 2);
    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn test_resend_invalidates_previous_code() {
    let (service, email, cache, _repo) =
        build_service(false, false, OtpServiceConfig::default());

    let first = service.issue_otp("reader@shabdsetu.app").await.unwrap();
    cache.set_ttl(0);
    let second = service.issue_otp("reader@shabdsetu.app").await.unwrap();

    // Only the newest code is in the cache; the superseded one is rejected
    assert_eq!(
        email.last_sent_code("reader@shabdsetu.app").as_deref(),
        Some(second.otp_code.code.as_str())
    );
    if first.otp_code.code != second.otp_code.code {
        let stale = service
            .verify_otp("reader@shabdsetu.app", &first.otp_code.code)
            .await
            .unwrap();
        assert!(!stale.success);
    }

    let result = service
        .verify_otp("reader@shabdsetu.app", &second.otp_code.code)
        .await
        .unwrap();
    assert!(result.success);
}

#[tokio::test]
async fn test_issue_otp_enforces_hourly_cap() {
    let config = OtpServiceConfig {
        max_requests_per_hour: 2,
        ..Default::default()
    };
    let (service, email, cache, _repo) = build_service(false, false, config);

    service.issue_otp("reader@shabdsetu.app").await.unwrap();
    cache.set_ttl(0);
    service.issue_otp("reader@shabdsetu.app").await.unwrap();
    cache.set_ttl(0);

    let result = service.issue_otp("reader@shabdsetu.app").await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::HourlyLimitExceeded))
    ));
    assert_eq!(email.send_count("reader@shabdsetu.app"), 2);
}

#[tokio::test]
async fn test_issue_otp_reports_email_failure() {
    let (service, _email, _cache, _repo) =
        build_service(true, false, OtpServiceConfig::default());

    let result = service.issue_otp("reader@shabdsetu.app").await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::EmailServiceFailure))
    ));
}

#[tokio::test]
async fn test_issue_otp_reports_cache_failure() {
    let (service, _email, _cache, _repo) =
        build_service(false, true, OtpServiceConfig::default());

    let result = service.issue_otp("reader@shabdsetu.app").await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_issue_otp_cache_failure_does_not_bypass_cooldown_gate() {
    let (service, email, _cache, repo) =
        build_service(false, true, OtpServiceConfig::default());

    // The cooldown check cannot run, so issuance must fail before any
    // side effect instead of proceeding ungated
    let result = service.issue_otp("reader@shabdsetu.app").await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert_eq!(email.send_count("reader@shabdsetu.app"), 0);
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_verify_otp_accepts_correct_code() {
    let (service, email, cache, _repo) =
        build_service(false, false, OtpServiceConfig::default());

    service.issue_otp("reader@shabdsetu.app").await.unwrap();
    let code = email
        .last_sent_code("reader@shabdsetu.app")
        .expect("code sent");

    let result = service
        .verify_otp("reader@shabdsetu.app", &code)
        .await
        .unwrap();

    assert!(result.success);
    assert!(result.error_message.is_none());

    // Accepted codes cannot be replayed
    assert!(!cache.code_exists("reader@shabdsetu.app").await.unwrap());
}

#[tokio::test]
async fn test_verify_otp_rejects_wrong_code() {
    let (service, email, _cache, _repo) =
        build_service(false, false, OtpServiceConfig::default());

    service.issue_otp("reader@shabdsetu.app").await.unwrap();
    let code = email
        .last_sent_code("reader@shabdsetu.app")
        .expect("code sent");
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let result = service
        .verify_otp("reader@shabdsetu.app", wrong)
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.remaining_attempts, Some(2));
    assert!(result
        .error_message
        .unwrap()
        .contains("2 attempts remaining"));
}

#[tokio::test]
async fn test_verify_otp_rejects_bad_format_without_cache_access() {
    let (service, _email, _cache, _repo) =
        build_service(false, true, OtpServiceConfig::default());

    // Cache would fail, but format rejection happens first
    let result = service.verify_otp("reader@shabdsetu.app", "12ab56").await.unwrap();
    assert!(!result.success);
    assert_eq!(
        result.error_message.as_deref(),
        Some("Invalid verification code format")
    );

    let result = service.verify_otp("reader@shabdsetu.app", "12345").await.unwrap();
    assert!(!result.success);
}

#[tokio::test]
async fn test_verify_otp_exhausts_attempts() {
    let (service, email, _cache, _repo) =
        build_service(false, false, OtpServiceConfig::default());

    service.issue_otp("reader@shabdsetu.app").await.unwrap();
    let code = email
        .last_sent_code("reader@shabdsetu.app")
        .expect("code sent");
    let wrong = if code == "000000" { "000001" } else { "000000" };

    for _ in 0..3 {
        let result = service
            .verify_otp("reader@shabdsetu.app", wrong)
            .await
            .unwrap();
        assert!(!result.success);
    }

    // Even the correct code is rejected once attempts are exhausted
    let result = service
        .verify_otp("reader@shabdsetu.app", &code)
        .await
        .unwrap();
    assert!(!result.success);
    assert_eq!(result.remaining_attempts, Some(0));
    assert!(result
        .error_message
        .unwrap()
        .contains("Maximum verification attempts exceeded"));
}

#[tokio::test]
async fn test_verify_otp_normalizes_email() {
    let (service, email, _cache, _repo) =
        build_service(false, false, OtpServiceConfig::default());

    service.issue_otp("reader@shabdsetu.app").await.unwrap();
    let code = email
        .last_sent_code("reader@shabdsetu.app")
        .expect("code sent");

    let result = service
        .verify_otp(" Reader@ShabdSetu.App ", &code)
        .await
        .unwrap();
    assert!(result.success);
}

#[test]
fn test_codes_match_constant_time() {
    assert!(TestService::codes_match("123456", "123456"));
    assert!(!TestService::codes_match("123456", "123457"));
    assert!(!TestService::codes_match("123456", "12345"));
}

//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic email format check; the mailbox provider has the final say
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$").unwrap()
});

/// Normalize an email address (trim whitespace, lowercase)
///
/// Normalization happens once at the service boundary so that cache keys,
/// audit records and rate-limit lookups all agree on the same form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address has a valid format
pub fn is_valid_email(email: &str) -> bool {
    let normalized = normalize_email(email);
    !normalized.is_empty() && normalized.len() <= 254 && EMAIL_REGEX.is_match(&normalized)
}

/// Mask an email address for display and logging (e.g., j****n@example.com)
///
/// Works on characters, not bytes, so a multibyte local part masks cleanly.
pub fn mask_email(email: &str) -> String {
    let normalized = normalize_email(email);
    match normalized.split_once('@') {
        Some((local, domain)) => {
            let mut chars = local.chars();
            match (chars.next(), chars.next_back()) {
                (Some(first), Some(last)) => format!("{}****{}@{}", first, last, domain),
                _ => format!("****@{}", domain),
            }
        }
        None => "****".to_string(),
    }
}

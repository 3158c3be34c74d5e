use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::constants::PHONE_DIGITS;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Keeps only the ASCII digits of a phone number as typed.
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_SHAPE.is_match(email.trim()) {
        return Err(ValidationError::new("invalid_email_format"));
    }
    Ok(())
}

/// Expects an already sanitized phone number.
pub fn validate_phone(digits: &str) -> Result<(), ValidationError> {
    if digits.len() != PHONE_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("invalid_phone_length"));
    }
    Ok(())
}

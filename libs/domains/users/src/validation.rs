//! Field rules shared by the request model and the service layer.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::ValidationError;

/// One `@`, no whitespace, and a dotted domain with non-empty labels
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").unwrap());

pub const INVALID_EMAIL: &str = "Invalid email address";
pub const INVALID_USERNAME: &str = "Username is required";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Any non-empty string, whitespace included
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
}

/// Custom validator for `UserInput::email`
pub(crate) fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !is_valid_email(email) {
        return Err(
            ValidationError::new("invalid_email").with_message(Cow::Borrowed(INVALID_EMAIL)),
        );
    }
    Ok(())
}

/// Custom validator for `UserInput::username`
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !is_valid_username(username) {
        return Err(
            ValidationError::new("invalid_username").with_message(Cow::Borrowed(INVALID_USERNAME)),
        );
    }
    Ok(())
}

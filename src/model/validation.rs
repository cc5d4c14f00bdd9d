use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Longest accepted name or email address, in characters.
pub const MAX_LENGTH: usize = 255;

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validation errors for account fields. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The {0} field is required.")]
    Required(&'static str),
    #[error("The {0} field must not be greater than 255 characters.")]
    TooLong(&'static str),
    #[error("The email field must be a valid email address.")]
    InvalidEmail,
    #[error("The password field must be at least 8 characters.")]
    PasswordTooShort,
    #[error("The password field confirmation does not match.")]
    ConfirmationMismatch,
    #[error("The provided password does not match your current password.")]
    WrongCurrentPassword,
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid hardcoded regex")
});

/// Validates a display name: required, at most [`MAX_LENGTH`] characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    match name.trim() {
        "" => Err(ValidationError::Required("name")),
        s if s.chars().count() > MAX_LENGTH => Err(ValidationError::TooLong("name")),
        _ => Ok(()),
    }
}

/// Validates an email address: required, `local@domain.tld`, at most
/// [`MAX_LENGTH`] characters.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required("email"));
    }
    if email.chars().count() > MAX_LENGTH {
        return Err(ValidationError::TooLong("email"));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Lowercases and trims an email address for storage and comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates a new password and its confirmation. Rules are checked in order
/// (required, length, confirmation) and the first failure is reported.
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Required("password"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirmation {
        return Err(ValidationError::ConfirmationMismatch);
    }
    Ok(())
}

/// Validates that a current password was supplied. Whether it matches is
/// decided against the stored hash.
pub fn validate_current_password(current: &str) -> Result<(), ValidationError> {
    if current.is_empty() {
        Err(ValidationError::Required("current password"))
    } else {
        Ok(())
    }
}

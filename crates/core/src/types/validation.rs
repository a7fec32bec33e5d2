//! Form field validation shared by the account flows.
//!
//! Field names are the camelCase names of the account forms so an error can be
//! shown next to the input it belongs to.

use crate::types::email::Email;
use crate::types::mobile::Mobile;

/// Minimum length of any password a form accepts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A validation failure attached to one form field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Form field the error belongs to.
    pub field: &'static str,
    /// Message shown next to the field.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Require a non-blank value, returning it unchanged.
///
/// # Errors
///
/// Returns `FieldError` with "`{label}` is required" for a blank value.
pub fn required<'a>(
    field: &'static str,
    label: &str,
    value: &'a str,
) -> Result<&'a str, FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(field, format!("{label} is required")));
    }
    Ok(value)
}

/// Validate the `email` field.
///
/// # Errors
///
/// Returns `FieldError` for a blank or malformed address.
pub fn email(value: &str) -> Result<Email, FieldError> {
    required("email", "Email", value)?;
    Email::parse(value).map_err(|_| FieldError::new("email", "Invalid email address"))
}

/// Validate the `mobile` field.
///
/// # Errors
///
/// Returns `FieldError` for a blank value or anything but ten digits.
pub fn mobile(value: &str) -> Result<Mobile, FieldError> {
    required("mobile", "Mobile number", value)?;
    Mobile::parse(value).map_err(|_| {
        FieldError::new(
            "mobile",
            format!("Mobile number must be {} digits", Mobile::DIGITS),
        )
    })
}

/// Validate a password field against the minimum length.
///
/// # Errors
///
/// Returns `FieldError` for a blank or too short password.
pub fn password(field: &'static str, label: &str, value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::new(field, format!("{label} is required")));
    }
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FieldError::new(
            field,
            format!("{label} must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }
    Ok(())
}

/// Validate a confirmation field against the value it confirms.
///
/// # Errors
///
/// Returns `FieldError` for a blank confirmation or a mismatch.
pub fn confirmation(
    field: &'static str,
    label: &str,
    value: &str,
    expected: &str,
) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::new(field, format!("{label} is required")));
    }
    if value != expected {
        return Err(FieldError::new(field, "Passwords must match"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required("firstName", "First Name", "Jane"), Ok("Jane"));
        let err = required("firstName", "First Name", "  ").unwrap_err();
        assert_eq!(err.field, "firstName");
        assert_eq!(err.message, "First Name is required");
    }

    #[test]
    fn test_email_messages() {
        assert!(email("jane@example.com").is_ok());
        assert_eq!(email("").unwrap_err().message, "Email is required");
        assert_eq!(email("jane").unwrap_err().message, "Invalid email address");
        assert!(email("jane@localhost").is_ok());
    }

    #[test]
    fn test_mobile_messages() {
        assert!(mobile("0123456789").is_ok());
        assert_eq!(mobile("").unwrap_err().message, "Mobile number is required");
        assert_eq!(
            mobile("12345").unwrap_err().message,
            "Mobile number must be 10 digits"
        );
    }

    #[test]
    fn test_password_length() {
        assert!(password("password", "Password", "abcdef").is_ok());
        assert_eq!(
            password("password", "Password", "abcde").unwrap_err().message,
            "Password must be at least 6 characters"
        );
        assert_eq!(
            password("newPassword", "New Password", "").unwrap_err().message,
            "New Password is required"
        );
    }

    #[test]
    fn test_confirmation() {
        assert!(confirmation("confirmPassword", "Confirm Password", "abcdef", "abcdef").is_ok());
        let err =
            confirmation("confirmPassword", "Confirm Password", "abcdeg", "abcdef").unwrap_err();
        assert_eq!(err.field, "confirmPassword");
        assert_eq!(err.message, "Passwords must match");
    }
}

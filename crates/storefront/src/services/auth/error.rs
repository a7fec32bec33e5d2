//! Account error types.

use shopfront_core::FieldError;
use thiserror::Error;

use super::cipher::CipherError;
use crate::db::RepositoryError;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A form field failed validation.
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Another registered account already uses the email.
    #[error("email already exists")]
    DuplicateEmail,

    /// No registered account has the email.
    #[error("email does not exist")]
    UnknownEmail,

    /// Password does not match the registered account.
    #[error("incorrect password")]
    InvalidPassword,

    /// Current password given for a password change is wrong.
    #[error("current password is incorrect")]
    IncorrectCurrentPassword,

    /// The operation needs a logged-in user.
    #[error("no user is logged in")]
    NoActiveSession,

    /// Password cipher error.
    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),

    /// Storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<FieldError> for AuthError {
    fn from(err: FieldError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

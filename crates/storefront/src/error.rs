//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for the front end. Storage and internal
//! failures are captured to Sentry before being reported to the user; form
//! and catalog errors are shown inline.

use thiserror::Error;

use crate::catalog::RemoteError;
use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] RemoteError),

    /// Account operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Local storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),

    /// No view for the requested path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The view needs a logged-in user.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    /// Form field the error belongs to, for inline display.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Auth(err) => match err {
                AuthError::Validation { field, .. } => Some(*field),
                AuthError::DuplicateEmail | AuthError::UnknownEmail => Some("email"),
                AuthError::InvalidPassword => Some("password"),
                AuthError::IncorrectCurrentPassword => Some("currentPassword"),
                _ => None,
            },
            _ => None,
        }
    }

    /// Text shown to the user.
    ///
    /// Internal details of storage failures are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(err) => match err {
                AuthError::Validation { message, .. } => message.clone(),
                AuthError::DuplicateEmail => "Email already exists".to_string(),
                AuthError::UnknownEmail => "Email does not exist".to_string(),
                AuthError::InvalidPassword => "Incorrect password".to_string(),
                AuthError::IncorrectCurrentPassword => "Old Password is incorrect".to_string(),
                AuthError::NoActiveSession => "Please sign in to continue".to_string(),
                AuthError::Cipher(_) | AuthError::Repository(_) => {
                    "Your account could not be saved, please try again".to_string()
                }
            },
            Self::Storage(_) => "Your account could not be saved, please try again".to_string(),
            Self::Catalog(err) => err.message.clone(),
            Self::Config(err) => err.to_string(),
            Self::NotFound(_) => "Page not found".to_string(),
            Self::Unauthorized(_) => "Please sign in to continue".to_string(),
        }
    }

    /// Whether the error is an internal failure rather than user input or a
    /// remote response.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Storage(_)
                | Self::Auth(AuthError::Repository(_) | AuthError::Cipher(_))
        )
    }

    /// Log the error, capturing internal failures to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Operation failed"
            );
        } else {
            tracing::warn!(error = %self, field = ?self.field(), "Operation rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from an account email.
///
/// Call this after login or signup to associate errors with the account.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("navigation", "Viewed product page", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

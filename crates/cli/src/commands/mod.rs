//! Subcommand implementations.
//!
//! Each command drives the storefront library and renders the resulting
//! state through [`crate::render`].

pub mod account;
pub mod catalog;
pub mod open;

use std::io;

use shopfront_storefront::catalog::RemoteError;
use shopfront_storefront::error::AppError;
use shopfront_storefront::services::auth::AuthError;
use thiserror::Error;

/// Errors that can end a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    App(#[from] AppError),

    /// Writing the view failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl From<AuthError> for CommandError {
    fn from(err: AuthError) -> Self {
        Self::App(err.into())
    }
}

impl From<RemoteError> for CommandError {
    fn from(err: RemoteError) -> Self {
        Self::App(err.into())
    }
}

impl CommandError {
    /// Message for the terminal, prefixed with the form field when there is one.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::App(err) => match err.field() {
                Some(field) => format!("{field}: {}", err.user_message()),
                None => err.user_message(),
            },
            Self::Output(err) => err.to_string(),
        }
    }

    /// Log the error, capturing internal failures to Sentry.
    pub fn report(&self) {
        match self {
            Self::App(err) => err.report(),
            Self::Output(err) => tracing::error!(error = %err, "Failed to write output"),
        }
    }
}

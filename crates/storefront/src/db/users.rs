//! User repository over the local key-value store.
//!
//! Mirrors the two local-storage entries of the browser build: the list of
//! registered users and the logged-in user.

use shopfront_core::Email;
use tracing::warn;

use super::{KeyValueStore, RepositoryError};
use crate::models::user::UserRecord;

/// Key holding the JSON list of registered users.
pub const USERS_KEY: &str = "users";

/// Key holding the JSON record of the logged-in user.
pub const SESSION_KEY: &str = "loggedInUser";

/// Repository for registered users and the session.
pub struct UserRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All registered users, oldest first.
    ///
    /// An absent or unparseable entry reads as an empty list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the store cannot be read.
    pub fn get_users(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let Some(raw) = self.store.get(USERS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(users) => Ok(users),
            Err(e) => {
                warn!(error = %e, "Stored user list is unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Replace the stored user list wholesale.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if serialization or the write fails.
    pub fn save_users(&self, users: &[UserRecord]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(users)?;
        self.store.set(USERS_KEY, &json)
    }

    /// Find a registered user by exact email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the store cannot be read.
    pub fn get_by_email(&self, email: &Email) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(self
            .get_users()?
            .into_iter()
            .find(|user| &user.email == email))
    }

    /// The logged-in user, if any.
    ///
    /// An unparseable entry reads as logged out.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the store cannot be read.
    pub fn get_session(&self) -> Result<Option<UserRecord>, RepositoryError> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Stored session is unreadable, treating as logged out");
                Ok(None)
            }
        }
    }

    /// Make `user` the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if serialization or the write fails.
    pub fn save_session(&self, user: &UserRecord) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(user)?;
        self.store.set(SESSION_KEY, &json)
    }

    /// Log out.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the write fails.
    pub fn clear_session(&self) -> Result<(), RepositoryError> {
        self.store.remove(SESSION_KEY)
    }
}

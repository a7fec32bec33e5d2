//! User domain types.
//!
//! Records are stored as camelCase JSON, the same layout the browser build
//! kept in local storage.

use serde::{Deserialize, Serialize};
use shopfront_core::{Email, Mobile};

/// A registered account.
///
/// `email` is the key among stored users. `password` is always the cipher
/// envelope, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub mobile: Mobile,
    pub password: String,
}

impl UserRecord {
    /// "First Last", for greetings.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Avatar initials, e.g. "JD".
    #[must_use]
    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

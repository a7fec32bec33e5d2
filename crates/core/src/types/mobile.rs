//! Mobile phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Mobile`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MobileError {
    /// The input string is empty.
    #[error("mobile number cannot be empty")]
    Empty,
    /// The input is not exactly ten ASCII digits.
    #[error("mobile number must be {digits} digits")]
    InvalidFormat {
        /// Required number of digits.
        digits: usize,
    },
}

/// A ten-digit mobile number, stored exactly as entered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Mobile(String);

impl Mobile {
    /// Number of digits a mobile number must have.
    pub const DIGITS: usize = 10;

    /// Parse a `Mobile` from a string.
    ///
    /// # Errors
    ///
    /// Returns `MobileError::Empty` for an empty input and
    /// `MobileError::InvalidFormat` for anything but ten ASCII digits.
    pub fn parse(s: &str) -> Result<Self, MobileError> {
        if s.is_empty() {
            return Err(MobileError::Empty);
        }
        if s.len() != Self::DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MobileError::InvalidFormat {
                digits: Self::DIGITS,
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mobile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Mobile {
    type Err = MobileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

//! Newtype ids for catalog entities.

use core::fmt;
use core::num::ParseIntError;

use serde::{Deserialize, Serialize};

/// Identifier of a product in the remote catalog.
///
/// The catalog numbers products with positive integers; the id is used
/// verbatim as the last path segment of the detail endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Create a new product id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying integer value.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for u64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

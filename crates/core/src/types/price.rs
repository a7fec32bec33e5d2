//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog sends prices as JSON numbers (`9.99`); they are held as
//! [`Decimal`] so display and discount math never drift.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// A catalog price in the store currency (USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The undiscounted price for a product sold at `discount_percentage` off.
    ///
    /// Computed as `price * (1 + discount / 100)`, rounded to cents. An
    /// unrepresentable discount leaves the price unchanged.
    #[must_use]
    pub fn before_discount(&self, discount_percentage: f64) -> Self {
        let Some(discount) = Decimal::from_f64(discount_percentage) else {
            return *self;
        };
        let factor = Decimal::ONE + discount / Decimal::ONE_HUNDRED;
        Self((self.0 * factor).round_dp(2))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

//! Monetary amounts using decimal arithmetic.
//!
//! The gateway exchanges amounts as plain decimal strings with two places
//! (`49900.00`) in Brazilian reais. [`Amount`] keeps the value as a
//! [`Decimal`] and renders it in that format.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Amount`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid amount {value:?}: {reason}")]
pub struct AmountError {
    /// The rejected input.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

/// A fixed-point monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Number of decimal places the gateway expects.
    pub const SCALE: u32 = 2;

    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a decimal value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create an amount from a number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, Self::SCALE))
    }

    /// The underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0.round_dp(Self::SCALE);
        value.rescale(Self::SCALE);
        write!(f, "{value}")
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|e| AmountError {
                value: s.to_owned(),
                reason: e.to_string(),
            })
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] so totals never pick up binary
//! floating-point drift. On the storage wire they are plain JSON numbers,
//! which is how the browser widget has always written them.

use core::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::Quantity;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("price is not a valid decimal: {0}")]
    Invalid(String),
    /// The amount is above [`Price::MAX`].
    #[error("price {0} exceeds the maximum of {max}", max = Price::MAX)]
    TooLarge(Decimal),
    /// The amount has more digits than a stored JSON number keeps.
    #[error("price {0} cannot be stored without losing digits")]
    TooPrecise(Decimal),
}

/// A non-negative unit price.
///
/// Every price survives the trip through the stored JSON number unchanged,
/// and is small enough that a line subtotal at any [`Quantity`] fits in a
/// [`Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price(Decimal);

impl Price {
    /// Number of fraction digits shown for prices.
    pub const DISPLAY_SCALE: u32 = 2;

    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted price: one trillion.
    pub const MAX: Self = Self(Decimal::from_parts(3_567_587_328, 232, 0, false, 0));

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero,
    /// [`PriceError::TooLarge`] above [`Price::MAX`], and
    /// [`PriceError::TooPrecise`] if a JSON number cannot hold it exactly.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        if amount > Self::MAX.0 {
            return Err(PriceError::TooLarge(amount));
        }
        // Stored prices are read back through an f64's shortest decimal form.
        let stored = amount
            .to_f64()
            .and_then(|f| Decimal::from_str(&f.to_string()).ok());
        if stored != Some(amount) {
            return Err(PriceError::TooPrecise(amount));
        }
        Ok(Self(amount.normalize()))
    }

    /// Create a price from an amount in hundredths (e.g. chhertum).
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2).normalize())
    }

    /// Parse a price from its decimal string form (e.g. `"10.50"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal number or is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|e| PriceError::Invalid(format!("{s:?}: {e}")))?;
        Self::new(amount)
    }

    /// The exact amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    ///
    /// Cannot overflow: [`Price::MAX`] times `u32::MAX` is far below
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn times(&self, quantity: Quantity) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity.get()))
    }

    /// Round an amount to the display scale, half away from zero.
    #[must_use]
    pub fn round_for_display(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(Self::DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", Self::round_for_display(self.0))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole amounts are written as integers, matching what a browser's
        // JSON.stringify produces for the same number.
        if self.0.fract().is_zero()
            && let Some(whole) = self.0.to_i64()
        {
            return serializer.serialize_i64(whole);
        }
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(de::Error::custom)
    }
}

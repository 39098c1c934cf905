//! Positive line-item quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Quantities start at one; an entry at zero is removed instead.
    #[error("quantity must be at least 1")]
    Zero,
    /// The value does not fit the quantity range.
    #[error("quantity {0} is out of range")]
    OutOfRange(i64),
}

/// Number of units of one product in the cart. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] for `0`.
    pub fn new(value: u32) -> Result<Self, QuantityError> {
        NonZeroU32::new(value).map(Self).ok_or(QuantityError::Zero)
    }

    /// The raw count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Apply a signed delta.
    ///
    /// Returns `Ok(None)` when the result drops to zero or below, meaning the
    /// entry should leave the cart.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::OutOfRange`] if the result exceeds `u32::MAX`.
    pub fn offset(self, delta: i64) -> Result<Option<Self>, QuantityError> {
        let next = i64::from(self.get()).saturating_add(delta);
        if next <= 0 {
            return Ok(None);
        }
        let next = u32::try_from(next).map_err(|_| QuantityError::OutOfRange(next))?;
        Ok(NonZeroU32::new(next).map(Self))
    }

    /// One more unit.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::OutOfRange`] at `u32::MAX`.
    pub fn increment(self) -> Result<Self, QuantityError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(QuantityError::OutOfRange(i64::from(u32::MAX) + 1))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

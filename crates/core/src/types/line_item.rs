//! One product entry in the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ItemTitle, Price, Quantity};

/// A product line in the cart.
///
/// Field names match the stored slot schema
/// (`title`, `price`, `image`, `quantity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product title, unique within a cart.
    pub title: ItemTitle,
    /// Unit price.
    pub price: Price,
    /// Opaque image reference (usually a URL).
    pub image: String,
    /// Number of units, at least one.
    pub quantity: Quantity,
}

impl LineItem {
    /// A new line holding a single unit.
    #[must_use]
    pub fn new(title: ItemTitle, price: Price, image: impl Into<String>) -> Self {
        Self {
            title,
            price,
            image: image.into(),
            quantity: Quantity::ONE,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.times(self.quantity)
    }
}

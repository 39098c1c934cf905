//! Presentation-free view model.
//!
//! Renderers (HTML templates, the terminal, a test recorder) consume these
//! types instead of reaching into [`Cart`] directly.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::Cart;
use crate::types::{LineItem, Price};

/// How amounts are turned into display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceFormat {
    /// Text placed before the amount (e.g. `Nu.`).
    pub prefix: String,
}

impl PriceFormat {
    /// Default currency prefix (Bhutanese ngultrum).
    pub const DEFAULT_PREFIX: &'static str = "Nu.";

    /// Create a formatter with a custom prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Format an amount with two fraction digits.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        format!("{}{:.2}", self.prefix, Price::round_for_display(amount))
    }
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}

/// One displayed cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    /// Position in the cart, used by the row's edit actions.
    pub index: usize,
    pub title: String,
    pub image: String,
    pub quantity: u32,
    /// Formatted unit price.
    pub price: String,
    /// Formatted unit price times quantity.
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    /// Formatted total price.
    pub total_price: String,
}

impl CartView {
    /// Build the view for `cart`.
    #[must_use]
    pub fn build(cart: &Cart, format: &PriceFormat) -> Self {
        Self {
            items: cart
                .iter()
                .enumerate()
                .map(|(index, item)| CartItemView::build(index, item, format))
                .collect(),
            item_count: cart.total_item_count(),
            total_price: format.format(cart.total_price()),
        }
    }

    /// Whether there are no rows to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self::build(cart, &PriceFormat::default())
    }
}

impl CartItemView {
    fn build(index: usize, item: &LineItem, format: &PriceFormat) -> Self {
        Self {
            index,
            title: item.title.to_string(),
            image: item.image.clone(),
            quantity: item.quantity.get(),
            price: format.format(item.price.amount()),
            line_price: format.format(item.subtotal()),
        }
    }
}

/// Cart-count badge state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    /// No items: the badge is not shown.
    Hidden,
    /// Shown with this many items.
    Count(u32),
}

impl Badge {
    /// Badge for a total item count.
    #[must_use]
    pub const fn from_count(count: u32) -> Self {
        if count == 0 { Self::Hidden } else { Self::Count(count) }
    }

    /// Whether the badge is shown.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Count(_))
    }
}

impl From<&Cart> for Badge {
    fn from(cart: &Cart) -> Self {
        Self::from_count(cart.total_item_count())
    }
}

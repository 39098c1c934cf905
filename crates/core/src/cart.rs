//! The cart: an ordered, title-unique list of line items.
//!
//! All mutations here are pure in-memory operations. Persistence and view
//! refreshes are layered on top by the widget crate's `CartStore`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{CartError, Result};
use crate::types::{ItemTitle, LineItem, Price, Quantity};

/// Two entries of a stored cart share a title.
#[derive(Debug, Clone, Error)]
#[error("duplicate cart entry titled {0:?}")]
pub struct DuplicateTitle(pub ItemTitle);

/// What [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was appended at `index` with quantity one.
    Appended {
        /// Position of the new entry.
        index: usize,
    },
    /// An existing entry at `index` was bumped to `quantity`.
    Merged {
        /// Position of the existing entry.
        index: usize,
        /// Quantity after the increment.
        quantity: Quantity,
    },
}

/// What a quantity change did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// The entry at `index` now holds `quantity` units.
    Updated {
        /// Position of the entry.
        index: usize,
        /// Quantity after the change.
        quantity: Quantity,
    },
    /// The quantity dropped to zero or below and the entry was removed.
    Removed(LineItem),
}

/// Ordered collection of line items representing a pending purchase.
///
/// Insertion order is preserved and no two entries share a title. Both
/// invariants are checked again when a cart is deserialized from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entry at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Position of the entry titled `title`, if any.
    #[must_use]
    pub fn position(&self, title: &ItemTitle) -> Option<usize> {
        self.items.iter().position(|item| &item.title == title)
    }

    /// Add one unit of a product.
    ///
    /// An entry with the same title gets its quantity bumped by one and keeps
    /// the price and image it was first added with. Otherwise a new entry is
    /// appended with quantity one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Quantity`] if the existing quantity is at its
    /// maximum.
    pub fn add(&mut self, title: ItemTitle, price: Price, image: impl Into<String>) -> Result<AddOutcome> {
        if let Some(index) = self.position(&title) {
            let entry = self.entry_mut(index)?;
            entry.quantity = entry.quantity.increment()?;
            return Ok(AddOutcome::Merged {
                index,
                quantity: entry.quantity,
            });
        }

        self.items.push(LineItem::new(title, price, image));
        Ok(AddOutcome::Appended {
            index: self.items.len() - 1,
        })
    }

    /// Add `delta` units to the entry at `index`, removing it if the
    /// quantity drops to zero or below.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidIndex`] if `index` is out of range, or
    /// [`CartError::Quantity`] if the result overflows.
    pub fn change_quantity(&mut self, index: usize, delta: i64) -> Result<QuantityChange> {
        let entry = self.entry_mut(index)?;
        match entry.quantity.offset(delta)? {
            Some(quantity) => {
                entry.quantity = quantity;
                Ok(QuantityChange::Updated { index, quantity })
            }
            None => Ok(QuantityChange::Removed(self.items.remove(index))),
        }
    }

    /// [`Cart::change_quantity`] addressed by title.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no entry has this title.
    pub fn change_quantity_of(&mut self, title: &ItemTitle, delta: i64) -> Result<QuantityChange> {
        let index = self.require_position(title)?;
        self.change_quantity(index, delta)
    }

    /// Remove the entry at `index` regardless of its quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidIndex`] if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Result<LineItem> {
        if index >= self.items.len() {
            return Err(self.invalid_index(index));
        }
        Ok(self.items.remove(index))
    }

    /// [`Cart::remove`] addressed by title.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no entry has this title.
    pub fn remove_titled(&mut self, title: &ItemTitle) -> Result<LineItem> {
        let index = self.require_position(title)?;
        self.remove(index)
    }

    /// Empty the cart, returning what it held.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] if there is nothing to check out.
    pub fn checkout(&mut self) -> Result<Vec<LineItem>> {
        if self.items.is_empty() {
            return Err(CartError::EmptyCart);
        }
        Ok(std::mem::take(&mut self.items))
    }

    /// Sum of quantities across all entries.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, item| acc.saturating_add(item.quantity.get()))
    }

    /// Sum of unit price times quantity across all entries, exact.
    ///
    /// Saturates at [`Decimal::MAX`], which takes millions of entries at
    /// [`Price::MAX`] and full quantity to reach.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.subtotal()))
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut LineItem> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CartError::InvalidIndex { index, len })
    }

    fn require_position(&self, title: &ItemTitle) -> Result<usize> {
        self.position(title)
            .ok_or_else(|| CartError::ItemNotFound(title.clone()))
    }

    fn invalid_index(&self, index: usize) -> CartError {
        CartError::InvalidIndex {
            index,
            len: self.items.len(),
        }
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = DuplicateTitle;

    fn try_from(items: Vec<LineItem>) -> std::result::Result<Self, Self::Error> {
        for (i, item) in items.iter().enumerate() {
            if items.iter().skip(i + 1).any(|other| other.title == item.title) {
                return Err(DuplicateTitle(item.title.clone()));
            }
        }
        Ok(Self { items })
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

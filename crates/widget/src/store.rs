//! Persisted cart store.
//!
//! `CartStore` is the single source of truth for cart contents. Every
//! mutation is a read-modify-write of the storage slot: load the whole cart,
//! change it in memory, write it back. A mutation only returns the new cart
//! once the write succeeded, so callers never see state that is not on disk.

use nucart_core::error::Result;
use nucart_core::{
    AddOutcome, Cart, CartError, CartStorage, ItemTitle, Price, QuantityChange, StorageError,
};
use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument, warn};

use crate::config::DEFAULT_STORAGE_KEY;

/// Cart persisted in one slot of a [`CartStorage`].
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: CartStorage> CartStore<S> {
    /// Store using the default `cart` slot.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Store using a custom slot name.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Slot name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the underlying storage.
    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Consume the store, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read the persisted cart. A missing slot is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the slot cannot be read, or
    /// [`CartError::CorruptState`] if it does not hold a valid cart.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Result<Cart> {
        let Some(raw) = self.storage.get(&self.key)? else {
            debug!("No stored cart, starting empty");
            return Ok(Cart::new());
        };

        let cart: Cart = serde_json::from_str(&raw).map_err(|e| {
            error!(error = %e, "Stored cart is corrupt");
            CartError::CorruptState(e)
        })?;
        debug!(entries = cart.len(), "Cart loaded");
        Ok(cart)
    }

    /// Make sure the slot exists, writing an empty cart if it does not.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or written.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn init(&mut self) -> Result<Cart> {
        if self.storage.get(&self.key)?.is_none() {
            let cart = Cart::new();
            self.persist(&cart)?;
            info!("Initialized empty cart slot");
            return Ok(cart);
        }
        self.load()
    }

    /// Add one unit of a product, merging with an existing entry of the same title.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be loaded or persisted.
    #[instrument(skip(self, image), fields(key = %self.key, %title, %price))]
    pub fn add_item(&mut self, title: ItemTitle, price: Price, image: &str) -> Result<Cart> {
        let (cart, outcome) = self.mutate(|cart| cart.add(title, price, image))?;
        match outcome {
            AddOutcome::Appended { index } => info!(index, "Item added to cart"),
            AddOutcome::Merged { index, quantity } => {
                info!(index, %quantity, "Item quantity incremented");
            }
        }
        Ok(cart)
    }

    /// Add `delta` to the quantity at `index`, dropping the entry at zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidIndex`] if `index` is out of range, or an
    /// error if the cart cannot be loaded or persisted.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn change_quantity(&mut self, index: usize, delta: i64) -> Result<Cart> {
        let (cart, change) = self.mutate(|cart| cart.change_quantity(index, delta))?;
        log_quantity_change(&change);
        Ok(cart)
    }

    /// [`CartStore::change_quantity`] addressed by title.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no entry has this title, or an
    /// error if the cart cannot be loaded or persisted.
    #[instrument(skip(self), fields(key = %self.key, %title))]
    pub fn change_quantity_of(&mut self, title: &ItemTitle, delta: i64) -> Result<Cart> {
        let (cart, change) = self.mutate(|cart| cart.change_quantity_of(title, delta))?;
        log_quantity_change(&change);
        Ok(cart)
    }

    /// Remove the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidIndex`] if `index` is out of range, or an
    /// error if the cart cannot be loaded or persisted.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn remove_item(&mut self, index: usize) -> Result<Cart> {
        let (cart, removed) = self.mutate(|cart| cart.remove(index))?;
        info!(title = %removed.title, "Item removed from cart");
        Ok(cart)
    }

    /// Remove the entry titled `title`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no entry has this title, or an
    /// error if the cart cannot be loaded or persisted.
    #[instrument(skip(self), fields(key = %self.key, %title))]
    pub fn remove_item_titled(&mut self, title: &ItemTitle) -> Result<Cart> {
        let (cart, _) = self.mutate(|cart| cart.remove_titled(title))?;
        info!("Item removed from cart");
        Ok(cart)
    }

    /// Clear the cart. No order record is kept.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] if there is nothing to check out, or
    /// an error if the cart cannot be loaded or persisted.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn checkout(&mut self) -> Result<Cart> {
        let (cart, purchased) = self.mutate(Cart::checkout)?;
        let units: u64 = purchased
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum();
        info!(entries = purchased.len(), units, "Checked out");
        Ok(cart)
    }

    /// Sum of quantities across all entries.
    #[must_use]
    pub fn total_item_count(cart: &Cart) -> u32 {
        cart.total_item_count()
    }

    /// Sum of unit price times quantity across all entries.
    #[must_use]
    pub fn total_price(cart: &Cart) -> Decimal {
        cart.total_price()
    }

    /// Load, apply `op`, persist. Nothing is written when `op` fails.
    fn mutate<T>(&mut self, op: impl FnOnce(&mut Cart) -> Result<T>) -> Result<(Cart, T)> {
        let mut cart = self.load()?;
        let output = op(&mut cart).inspect_err(|e| {
            if e.is_expected() {
                debug!(error = %e, "Cart operation declined");
            } else {
                warn!(error = %e, "Cart operation rejected");
            }
        })?;
        self.persist(&cart)?;
        Ok((cart, output))
    }

    fn persist(&mut self, cart: &Cart) -> Result<()> {
        let raw = serde_json::to_string(cart).map_err(StorageError::from)?;
        self.storage.set(&self.key, &raw).map_err(|e| {
            error!(error = %e, "Failed to persist cart");
            CartError::Storage(e)
        })?;
        debug!(bytes = raw.len(), "Cart persisted");
        Ok(())
    }
}

fn log_quantity_change(change: &QuantityChange) {
    match change {
        QuantityChange::Updated { index, quantity } => {
            info!(index, %quantity, "Item quantity changed");
        }
        QuantityChange::Removed(item) => {
            info!(title = %item.title, "Item quantity reached zero, removed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn title(s: &str) -> ItemTitle {
        ItemTitle::parse(s).unwrap()
    }

    fn price(s: &str) -> Price {
        Price::parse(s).unwrap()
    }

    #[test]
    fn test_load_without_slot_is_empty() {
        let store = CartStore::new(MemoryStorage::new());
        assert!(store.load().unwrap().is_empty());
        assert!(store.storage().get("cart").unwrap().is_none());
    }

    #[test]
    fn test_init_writes_empty_array_once() {
        let mut store = CartStore::new(MemoryStorage::new());
        store.init().unwrap();
        assert_eq!(store.storage().get("cart").unwrap().as_deref(), Some("[]"));

        store.add_item(title("Mug"), price("10"), "img1").unwrap();
        let cart = store.init().unwrap();
        assert_eq!(cart.total_item_count(), 1);
    }

    #[test]
    fn test_add_item_persists() {
        let mut store = CartStore::new(MemoryStorage::new());
        let returned = store.add_item(title("Mug"), price("10"), "img1").unwrap();
        assert_eq!(returned, store.load().unwrap());
        assert_eq!(
            store.storage().get("cart").unwrap().as_deref(),
            Some(r#"[{"title":"Mug","price":10,"image":"img1","quantity":1}]"#)
        );
    }

    #[test]
    fn test_returned_cart_matches_reloaded_cart() {
        let mut store = CartStore::new(MemoryStorage::new());
        for (name, amount) in [("A", "0.123456789012345"), ("B", "2.005"), ("C", "1000000000000")] {
            let returned = store.add_item(title(name), price(amount), "").unwrap();
            assert_eq!(returned, store.load().unwrap(), "{name} at {amount}");
        }
        let cart = store.change_quantity(1, 9).unwrap();
        assert_eq!(cart, store.load().unwrap());
        assert_eq!(
            CartStore::<MemoryStorage>::total_price(&cart),
            Decimal::from_str_exact("1000000000020.173456789012345").unwrap()
        );
    }

    #[test]
    fn test_prices_that_would_not_reload_are_refused() {
        assert!(Price::parse("79228162514264337593543950335").is_err());
        assert!(Price::parse("10000000000000000000000000000").is_err());
        assert!(Price::parse("0.12345678901234567890").is_err());

        let store = CartStore::new(MemoryStorage::new());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_change_quantity_and_remove() {
        let mut store = CartStore::new(MemoryStorage::new());
        store.add_item(title("Mug"), price("10"), "img1").unwrap();
        store.add_item(title("Tea"), price("5"), "img2").unwrap();

        let cart = store.change_quantity(1, 2).unwrap();
        assert_eq!(CartStore::<MemoryStorage>::total_item_count(&cart), 4);
        assert_eq!(CartStore::<MemoryStorage>::total_price(&cart), Decimal::from(25));

        let cart = store.remove_item(0).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(store.load().unwrap(), cart);
    }

    #[test]
    fn test_invalid_index_leaves_storage_untouched() {
        let mut store = CartStore::new(MemoryStorage::new());
        store.add_item(title("Mug"), price("10"), "img1").unwrap();
        let before = store.storage().get("cart").unwrap();

        assert!(matches!(
            store.change_quantity(5, -1),
            Err(CartError::InvalidIndex { index: 5, len: 1 })
        ));
        assert!(matches!(
            store.remove_item(1),
            Err(CartError::InvalidIndex { index: 1, len: 1 })
        ));
        assert_eq!(store.storage().get("cart").unwrap(), before);
    }

    #[test]
    fn test_title_addressed_operations() {
        let mut store = CartStore::new(MemoryStorage::new());
        store.add_item(title("Mug"), price("10"), "img1").unwrap();
        store.add_item(title("Tea"), price("5"), "img2").unwrap();

        let cart = store.change_quantity_of(&title("Mug"), -1).unwrap();
        assert_eq!(cart.len(), 1);

        let cart = store.remove_item_titled(&title("Tea")).unwrap();
        assert!(cart.is_empty());

        assert!(matches!(
            store.remove_item_titled(&title("Tea")),
            Err(CartError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_checkout_twice() {
        let mut store = CartStore::new(MemoryStorage::new());
        store.add_item(title("Mug"), price("10"), "img1").unwrap();

        let cart = store.checkout().unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(store.storage().get("cart").unwrap().as_deref(), Some("[]"));

        assert!(matches!(store.checkout(), Err(CartError::EmptyCart)));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_custom_key() {
        let mut store = CartStore::with_key(MemoryStorage::new(), "basket");
        store.add_item(title("Mug"), price("10"), "img1").unwrap();
        assert!(store.storage().get("cart").unwrap().is_none());
        assert!(store.storage().get("basket").unwrap().is_some());
    }

    #[test]
    fn test_corrupt_slot() {
        let mut storage = MemoryStorage::new();
        storage.set("cart", "{oops").unwrap();
        let store = CartStore::new(storage);
        assert!(matches!(store.load(), Err(CartError::CorruptState(_))));
    }

    #[test]
    fn test_zero_quantity_slot_is_corrupt() {
        let mut storage = MemoryStorage::new();
        storage
            .set("cart", r#"[{"title":"Mug","price":10,"image":"a","quantity":0}]"#)
            .unwrap();
        let store = CartStore::new(storage);
        assert!(matches!(store.load(), Err(CartError::CorruptState(_))));
    }

    #[test]
    fn test_quota_failure_is_reported_and_state_kept() {
        let mut store = CartStore::new(MemoryStorage::with_quota(80));
        store.add_item(title("Mug"), price("10"), "img1").unwrap();

        let err = store
            .add_item(title("Very Long Product Title"), price("1"), "https://cdn.example/img.png")
            .unwrap_err();
        assert!(matches!(
            err,
            CartError::Storage(StorageError::QuotaExceeded { .. })
        ));

        let cart = store.load().unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).unwrap().title.as_str(), "Mug");
    }

    #[test]
    fn test_disabled_storage() {
        let mut store = CartStore::new(MemoryStorage::new());
        store.storage_mut().set_disabled(true);
        assert!(matches!(
            store.load(),
            Err(CartError::Storage(StorageError::Unavailable))
        ));
        assert!(matches!(
            store.add_item(title("Mug"), price("10"), "img1"),
            Err(CartError::Storage(StorageError::Unavailable))
        ));
    }
}

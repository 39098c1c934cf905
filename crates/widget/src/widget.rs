//! Cart widget controller.
//!
//! `CartWidget` plays the part of the browser event handlers: each method is
//! one user gesture (page load, "Add to Cart", opening the cart, the -, + and
//! Remove buttons, checkout). It runs the store operation and then brings the
//! badge, modal and notifications up to date.

use nucart_core::error::Result;
use nucart_core::{Badge, Cart, CartError, CartStorage, CartView, ItemTitle, Price, PriceFormat};
use tracing::{error, instrument, warn};

use crate::store::CartStore;
use crate::views::{BadgeView, CartModalView, Notifier};

/// User-visible message texts.
pub mod messages {
    use nucart_core::ItemTitle;

    /// Shown when the cart is opened or checked out while empty.
    pub const EMPTY_CART: &str = "Your cart is empty!";

    /// Shown when removing the last entry from an open cart.
    pub const NOW_EMPTY: &str = "Your cart is now empty!";

    /// Shown after a successful checkout.
    pub const CHECKOUT_COMPLETE: &str = "Finished checking out! Thank you for your purchase.";

    /// Confirmation after adding a product.
    #[must_use]
    pub fn added(title: &ItemTitle) -> String {
        format!("{title} added to cart!")
    }

    /// Shown when an operation fails.
    #[must_use]
    pub fn failed(error: &impl std::fmt::Display) -> String {
        format!("Could not update your cart: {error}")
    }
}

/// Store plus its three view collaborators.
#[derive(Debug)]
pub struct CartWidget<S, B, M, N> {
    store: CartStore<S>,
    badge: B,
    modal: M,
    notifier: N,
    price_format: PriceFormat,
}

impl<S, B, M, N> CartWidget<S, B, M, N>
where
    S: CartStorage,
    B: BadgeView,
    M: CartModalView,
    N: Notifier,
{
    /// Wire a store to its views.
    pub fn new(store: CartStore<S>, badge: B, modal: M, notifier: N) -> Self {
        Self {
            store,
            badge,
            modal,
            notifier,
            price_format: PriceFormat::default(),
        }
    }

    /// Use `format` for prices shown in the modal.
    #[must_use]
    pub fn with_price_format(mut self, format: PriceFormat) -> Self {
        self.price_format = format;
        self
    }

    /// The underlying store.
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// The badge view.
    pub const fn badge(&self) -> &B {
        &self.badge
    }

    /// The modal view.
    pub const fn modal(&self) -> &M {
        &self.modal
    }

    /// The notifier.
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Build the view model for `cart` with this widget's price format.
    #[must_use]
    pub fn view(&self, cart: &Cart) -> CartView {
        CartView::build(cart, &self.price_format)
    }

    /// Page load: create the slot if needed and show the badge.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or written.
    #[instrument(skip(self))]
    pub fn on_page_load(&mut self) -> Result<Cart> {
        let cart = self.report(|store| store.init())?;
        self.refresh_badge(&cart);
        Ok(cart)
    }

    /// "Add to Cart" pressed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be loaded or persisted.
    #[instrument(skip(self, image), fields(%title))]
    pub fn add_to_cart(&mut self, title: ItemTitle, price: Price, image: &str) -> Result<Cart> {
        let message = messages::added(&title);
        let cart = self.report(|store| store.add_item(title, price, image))?;
        self.refresh_badge(&cart);
        self.notifier.notify(&message);
        Ok(cart)
    }

    /// Cart icon pressed: open the modal, or say the cart is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] if there is nothing to show, or an
    /// error if the cart cannot be loaded.
    #[instrument(skip(self))]
    pub fn show_item_list(&mut self) -> Result<CartView> {
        let cart = self.report(|store| store.load())?;
        self.open_modal(&cart)
    }

    /// "-" or "+" pressed on the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidIndex`] for a stale row, or an error if the
    /// cart cannot be loaded or persisted.
    #[instrument(skip(self))]
    pub fn change_quantity(&mut self, index: usize, delta: i64) -> Result<Cart> {
        let cart = self.report(|store| store.change_quantity(index, delta))?;
        self.after_quantity_change(&cart);
        Ok(cart)
    }

    /// [`CartWidget::change_quantity`] addressed by title.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the product is not in the cart,
    /// or an error if the cart cannot be loaded or persisted.
    #[instrument(skip(self), fields(%title))]
    pub fn change_quantity_of(&mut self, title: &ItemTitle, delta: i64) -> Result<Cart> {
        let cart = self.report(|store| store.change_quantity_of(title, delta))?;
        self.after_quantity_change(&cart);
        Ok(cart)
    }

    /// "Remove" pressed on the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidIndex`] for a stale row, or an error if the
    /// cart cannot be loaded or persisted.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, index: usize) -> Result<Cart> {
        let cart = self.report(|store| store.remove_item(index))?;
        self.after_removal(&cart);
        Ok(cart)
    }

    /// [`CartWidget::remove_item`] addressed by title.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the product is not in the cart,
    /// or an error if the cart cannot be loaded or persisted.
    #[instrument(skip(self), fields(%title))]
    pub fn remove_item_titled(&mut self, title: &ItemTitle) -> Result<Cart> {
        let cart = self.report(|store| store.remove_item_titled(title))?;
        self.after_removal(&cart);
        Ok(cart)
    }

    /// "Proceed to Checkout" pressed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] if there is nothing to check out, or
    /// an error if the cart cannot be loaded or persisted.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<Cart> {
        let cart = self.report(|store| store.checkout())?;
        self.notifier.notify(messages::CHECKOUT_COMPLETE);
        self.refresh_badge(&cart);
        self.modal.close();
        Ok(cart)
    }

    fn open_modal(&mut self, cart: &Cart) -> Result<CartView> {
        if cart.is_empty() {
            self.notifier.notify(messages::EMPTY_CART);
            return Err(CartError::EmptyCart);
        }
        let view = self.view(cart);
        self.modal.render(&view);
        Ok(view)
    }

    fn after_quantity_change(&mut self, cart: &Cart) {
        self.refresh_badge(cart);
        if self.modal.is_open() {
            self.modal.close();
            // An empty cart is reported to the user by `open_modal` itself.
            let _ = self.open_modal(cart);
        }
    }

    fn after_removal(&mut self, cart: &Cart) {
        self.refresh_badge(cart);
        if !self.modal.is_open() {
            return;
        }
        if cart.is_empty() {
            self.modal.close();
            self.notifier.notify(messages::NOW_EMPTY);
        } else {
            let view = self.view(cart);
            self.modal.render(&view);
        }
    }

    fn refresh_badge(&mut self, cart: &Cart) {
        self.badge.refresh(Badge::from(cart));
    }

    /// Run a store operation, turning failures into notifications.
    fn report<T>(&mut self, op: impl FnOnce(&mut CartStore<S>) -> Result<T>) -> Result<T> {
        op(&mut self.store).inspect_err(|e| match e {
            CartError::EmptyCart => self.notifier.notify(messages::EMPTY_CART),
            CartError::Storage(_) | CartError::CorruptState(_) => {
                error!(error = %e, "Cart storage failure");
                self.notifier.notify(&messages::failed(e));
            }
            _ => {
                warn!(error = %e, "Cart edit rejected");
                self.notifier.notify(&messages::failed(e));
            }
        })
    }
}

//! View collaborators driven by the widget.
//!
//! These traits define what the widget expects from a presentation layer.
//! They take view-model types only, never a [`Cart`](nucart_core::Cart).
//!
//! # Implementations
//!
//! - [`NoopViews`] - for embedders that only want the store behaviour
//! - `HtmlViews` in [`crate::render`] - collects rendered HTML fragments
//! - The CLI's terminal views

use nucart_core::{Badge, CartView};

/// Cart-count indicator.
pub trait BadgeView {
    /// Show `badge`, hiding the indicator for [`Badge::Hidden`].
    fn refresh(&mut self, badge: Badge);
}

/// Modal listing the cart contents.
pub trait CartModalView {
    /// Show the modal with `cart`, replacing any previous contents.
    fn render(&mut self, cart: &CartView);

    /// Remove the modal. Closing a closed modal does nothing.
    fn close(&mut self);

    /// Whether the modal is currently shown.
    fn is_open(&self) -> bool;
}

/// Transient user-visible messages.
pub trait Notifier {
    /// Show `message`.
    fn notify(&mut self, message: &str);
}

/// Views that discard everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopViews;

impl BadgeView for NoopViews {
    fn refresh(&mut self, _badge: Badge) {}
}

impl CartModalView for NoopViews {
    fn render(&mut self, _cart: &CartView) {}

    fn close(&mut self) {}

    fn is_open(&self) -> bool {
        false
    }
}

impl Notifier for NoopViews {
    fn notify(&mut self, _message: &str) {}
}

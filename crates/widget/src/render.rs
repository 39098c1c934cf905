//! HTML fragment rendering with Askama.
//!
//! Produces the three fragments the browser widget builds: the count badge,
//! the cart modal and the toast. Row actions carry `data-action` and
//! `data-index` attributes so any front end can route clicks back to
//! [`CartWidget`](crate::CartWidget) methods. Styling is left to the page.

use askama::Template;
use nucart_core::{Badge, CartView};
use tracing::error;

use crate::views::{BadgeView, CartModalView, Notifier};

/// Cart count badge fragment.
#[derive(Template)]
#[template(path = "badge.html")]
pub struct BadgeTemplate {
    pub visible: bool,
    pub count: u32,
}

impl From<Badge> for BadgeTemplate {
    fn from(badge: Badge) -> Self {
        match badge {
            Badge::Hidden => Self {
                visible: false,
                count: 0,
            },
            Badge::Count(count) => Self {
                visible: true,
                count,
            },
        }
    }
}

/// Cart modal fragment.
#[derive(Template)]
#[template(path = "cart_modal.html")]
pub struct CartModalTemplate<'a> {
    pub cart: &'a CartView,
}

/// Toast message fragment.
#[derive(Template)]
#[template(path = "toast.html")]
pub struct ToastTemplate<'a> {
    pub message: &'a str,
}

/// Render the badge. Hidden badges render to an empty string.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_badge(badge: Badge) -> askama::Result<String> {
    BadgeTemplate::from(badge).render()
}

/// Render the cart modal.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_modal(cart: &CartView) -> askama::Result<String> {
    CartModalTemplate { cart }.render()
}

/// Render a toast.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_toast(message: &str) -> askama::Result<String> {
    ToastTemplate { message }.render()
}

/// Views that keep the latest rendered HTML of each fragment.
#[derive(Debug, Clone, Default)]
pub struct HtmlViews {
    badge: String,
    modal: Option<String>,
    toasts: Vec<String>,
}

impl HtmlViews {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the modal marked open, its markup owned by the page.
    #[must_use]
    pub fn with_modal_open(mut self, open: bool) -> Self {
        self.modal = open.then(String::new);
        self
    }

    /// Current badge markup; empty when hidden.
    #[must_use]
    pub fn badge_html(&self) -> &str {
        &self.badge
    }

    /// Current modal markup, if the modal is open.
    #[must_use]
    pub fn modal_html(&self) -> Option<&str> {
        self.modal.as_deref()
    }

    /// Toasts shown so far, oldest first.
    #[must_use]
    pub fn toasts(&self) -> &[String] {
        &self.toasts
    }

    /// Take the pending toasts.
    pub fn drain_toasts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.toasts)
    }
}

impl BadgeView for HtmlViews {
    fn refresh(&mut self, badge: Badge) {
        match render_badge(badge) {
            Ok(html) => self.badge = html,
            Err(e) => error!(error = %e, "Failed to render badge"),
        }
    }
}

impl CartModalView for HtmlViews {
    fn render(&mut self, cart: &CartView) {
        match render_modal(cart) {
            Ok(html) => self.modal = Some(html),
            Err(e) => error!(error = %e, "Failed to render cart modal"),
        }
    }

    fn close(&mut self) {
        self.modal = None;
    }

    fn is_open(&self) -> bool {
        self.modal.is_some()
    }
}

impl Notifier for HtmlViews {
    fn notify(&mut self, message: &str) {
        match render_toast(message) {
            Ok(html) => self.toasts.push(html),
            Err(e) => error!(error = %e, "Failed to render toast"),
        }
    }
}

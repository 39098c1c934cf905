//! Integration tests for Nu Cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nucart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Store operations against file and memory storage
//! - `cart_widget` - Gesture flows and what the user sees after each one
//!
//! This library holds the shared fixtures: [`Recorder`] captures every view
//! update in order, and the helpers below build titles, prices and widgets.

use std::cell::RefCell;
use std::rc::Rc;

use nucart_core::{Badge, CartView, ItemTitle, Price};
use nucart_widget::{BadgeView, CartModalView, CartStore, CartWidget, MemoryStorage, Notifier};

/// One update observed by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Badge(Badge),
    ModalRendered(CartView),
    ModalClosed,
    Notified(String),
}

#[derive(Debug, Default)]
struct Recording {
    events: Vec<ViewEvent>,
    modal_open: bool,
}

/// Views sharing one event log.
///
/// Clones record into the same log, so a single recorder can be handed to a
/// widget as badge, modal and notifier at once.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    inner: Rc<RefCell<Recording>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the modal as shown, as if the user had opened the cart earlier.
    pub fn open_modal(&self) {
        self.inner.borrow_mut().modal_open = true;
    }

    /// Whether the modal is currently shown.
    #[must_use]
    pub fn modal_open(&self) -> bool {
        self.inner.borrow().modal_open
    }

    /// Take the events recorded so far.
    #[must_use]
    pub fn take(&self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.inner.borrow_mut().events)
    }

    /// Notification texts recorded so far, without consuming them.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.inner
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Notified(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// The most recent badge shown, if any.
    #[must_use]
    pub fn last_badge(&self) -> Option<Badge> {
        self.inner
            .borrow()
            .events
            .iter()
            .rev()
            .find_map(|event| match event {
                ViewEvent::Badge(badge) => Some(*badge),
                _ => None,
            })
    }

    fn push(&self, event: ViewEvent) {
        self.inner.borrow_mut().events.push(event);
    }
}

impl BadgeView for Recorder {
    fn refresh(&mut self, badge: Badge) {
        self.push(ViewEvent::Badge(badge));
    }
}

impl CartModalView for Recorder {
    fn render(&mut self, cart: &CartView) {
        self.inner.borrow_mut().modal_open = true;
        self.push(ViewEvent::ModalRendered(cart.clone()));
    }

    fn close(&mut self) {
        self.inner.borrow_mut().modal_open = false;
        self.push(ViewEvent::ModalClosed);
    }

    fn is_open(&self) -> bool {
        self.modal_open()
    }
}

impl Notifier for Recorder {
    fn notify(&mut self, message: &str) {
        self.push(ViewEvent::Notified(message.to_string()));
    }
}

/// Widget whose three views all record into `recorder`.
pub type RecordedWidget<S> = CartWidget<S, Recorder, Recorder, Recorder>;

/// Build a widget over `store` wired to `recorder`.
#[must_use]
pub fn recorded_widget<S: nucart_core::CartStorage>(
    store: CartStore<S>,
    recorder: &Recorder,
) -> RecordedWidget<S> {
    CartWidget::new(store, recorder.clone(), recorder.clone(), recorder.clone())
}

/// Widget over fresh in-memory storage.
#[must_use]
pub fn memory_widget(recorder: &Recorder) -> RecordedWidget<MemoryStorage> {
    recorded_widget(CartStore::new(MemoryStorage::new()), recorder)
}

/// Title fixture.
///
/// # Panics
///
/// Panics if `s` is blank.
#[must_use]
#[allow(clippy::expect_used)]
pub fn title(s: &str) -> ItemTitle {
    ItemTitle::parse(s).expect("fixture title must not be blank")
}

/// Price fixture.
///
/// # Panics
///
/// Panics if `s` is not a non-negative decimal.
#[must_use]
#[allow(clippy::expect_used)]
pub fn price(s: &str) -> Price {
    Price::parse(s).expect("fixture price must be valid")
}

/// Parse stored JSON for comparisons.
///
/// # Panics
///
/// Panics if `raw` is not JSON.
#[must_use]
#[allow(clippy::expect_used)]
pub fn json(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).expect("stored value must be JSON")
}

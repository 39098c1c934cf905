//! Integration tests for widget gesture flows.
//!
//! Each test drives the widget the way a shopper would and checks what the
//! badge, modal and notifications show after every step.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use nucart_core::{Badge, CartError, CartStorage, CartView, PriceFormat};
use nucart_integration_tests::{
    RecordedWidget, Recorder, ViewEvent, memory_widget, price, recorded_widget, title,
};
use nucart_widget::{CartStore, CartWidget, FileStorage, HtmlViews, MemoryStorage, messages};

// ============================================================================
// Browsing
// ============================================================================

#[test]
fn test_page_load_hides_badge_for_new_visitor() {
    let recorder = Recorder::new();
    let mut widget = memory_widget(&recorder);

    let cart = widget.on_page_load().unwrap();
    assert!(cart.is_empty());
    assert_eq!(recorder.take(), [ViewEvent::Badge(Badge::Hidden)]);
    assert_eq!(
        widget.store().storage().get("cart").unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn test_add_updates_badge_and_confirms() {
    let recorder = Recorder::new();
    let mut widget = memory_widget(&recorder);

    widget.add_to_cart(title("Mug"), price("10"), "img1").unwrap();
    widget.add_to_cart(title("Mug"), price("10"), "img1").unwrap();

    assert_eq!(
        recorder.take(),
        [
            ViewEvent::Badge(Badge::Count(1)),
            ViewEvent::Notified("Mug added to cart!".to_string()),
            ViewEvent::Badge(Badge::Count(2)),
            ViewEvent::Notified("Mug added to cart!".to_string()),
        ]
    );
}

#[test]
fn test_opening_empty_cart_says_so() {
    let recorder = Recorder::new();
    let mut widget = memory_widget(&recorder);

    let err = widget.show_item_list().unwrap_err();
    assert!(matches!(err, CartError::EmptyCart));
    assert_eq!(
        recorder.take(),
        [ViewEvent::Notified(messages::EMPTY_CART.to_string())]
    );
    assert!(!recorder.modal_open());
}

#[test]
fn test_opening_cart_renders_rows_and_totals() {
    let recorder = Recorder::new();
    let mut widget = memory_widget(&recorder);
    widget.add_to_cart(title("Mug"), price("10"), "img1").unwrap();
    widget.add_to_cart(title("Tea"), price("2.5"), "img2").unwrap();
    widget.add_to_cart(title("Tea"), price("2.5"), "img2").unwrap();
    let _ = recorder.take();

    let view = widget.show_item_list().unwrap();
    assert_eq!(view.item_count, 3);
    assert_eq!(view.total_price, "Nu.15.00");
    assert_eq!(view.items[1].title, "Tea");
    assert_eq!(view.items[1].line_price, "Nu.5.00");
    assert_eq!(recorder.take(), [ViewEvent::ModalRendered(view)]);
    assert!(recorder.modal_open());
}

#[test]
fn test_custom_price_prefix() {
    let recorder = Recorder::new();
    let mut widget = memory_widget(&recorder).with_price_format(PriceFormat::new("$"));
    widget.add_to_cart(title("Mug"), price("3.5"), "").unwrap();

    let view = widget.show_item_list().unwrap();
    assert_eq!(view.total_price, "$3.50");
}

// ============================================================================
// Editing from the open modal
// ============================================================================

fn open_cart_with(items: &[(&str, &str)]) -> (Recorder, RecordedWidget<MemoryStorage>) {
    let recorder = Recorder::new();
    let mut widget = memory_widget(&recorder);
    for (name, amount) in items {
        widget.add_to_cart(title(name), price(amount), "").unwrap();
    }
    widget.show_item_list().unwrap();
    let _ = recorder.take();
    (recorder, widget)
}

#[test]
fn test_plus_reopens_modal_with_new_totals() {
    let (recorder, mut widget) = open_cart_with(&[("Mug", "10")]);

    widget.change_quantity(0, 1).unwrap();

    let events = recorder.take();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], ViewEvent::Badge(Badge::Count(2)));
    assert_eq!(events[1], ViewEvent::ModalClosed);
    let ViewEvent::ModalRendered(view) = &events[2] else {
        panic!("expected modal render, got {:?}", events[2]);
    };
    assert_eq!(view.item_count, 2);
    assert_eq!(view.total_price, "Nu.20.00");
}

#[test]
fn test_minus_on_last_unit_closes_modal() {
    let (recorder, mut widget) = open_cart_with(&[("Mug", "10")]);

    let cart = widget.change_quantity(0, -1).unwrap();
    assert!(cart.is_empty());
    assert_eq!(
        recorder.take(),
        [
            ViewEvent::Badge(Badge::Hidden),
            ViewEvent::ModalClosed,
            ViewEvent::Notified(messages::EMPTY_CART.to_string()),
        ]
    );
    assert!(!recorder.modal_open());
}

#[test]
fn test_remove_rerenders_remaining_rows() {
    let (recorder, mut widget) = open_cart_with(&[("Mug", "10"), ("Tea", "5")]);

    widget.remove_item(0).unwrap();

    let events = recorder.take();
    assert_eq!(events[0], ViewEvent::Badge(Badge::Count(1)));
    let ViewEvent::ModalRendered(view) = &events[1] else {
        panic!("expected modal render, got {:?}", events[1]);
    };
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].index, 0);
    assert_eq!(view.items[0].title, "Tea");
    assert!(recorder.modal_open());
}

#[test]
fn test_removing_last_entry_says_cart_is_now_empty() {
    let (recorder, mut widget) = open_cart_with(&[("Mug", "10")]);

    widget.remove_item_titled(&title("Mug")).unwrap();
    assert_eq!(
        recorder.take(),
        [
            ViewEvent::Badge(Badge::Hidden),
            ViewEvent::ModalClosed,
            ViewEvent::Notified(messages::NOW_EMPTY.to_string()),
        ]
    );
}

#[test]
fn test_remove_with_modal_closed_only_touches_badge() {
    let recorder = Recorder::new();
    let mut widget = memory_widget(&recorder);
    widget.add_to_cart(title("Mug"), price("10"), "").unwrap();
    let _ = recorder.take();

    widget.remove_item(0).unwrap();
    assert_eq!(recorder.take(), [ViewEvent::Badge(Badge::Hidden)]);
}

#[test]
fn test_stale_row_is_reported() {
    let (recorder, mut widget) = open_cart_with(&[("Mug", "10")]);

    let err = widget.remove_item(3).unwrap_err();
    assert!(matches!(err, CartError::InvalidIndex { index: 3, len: 1 }));
    assert_eq!(
        recorder.take(),
        [ViewEvent::Notified(messages::failed(&err))]
    );
    assert!(recorder.modal_open());
    assert_eq!(widget.store().load().unwrap().len(), 1);
}

// ============================================================================
// Checkout
// ============================================================================

#[test]
fn test_checkout_thanks_and_clears() {
    let (recorder, mut widget) = open_cart_with(&[("Mug", "10"), ("Tea", "5")]);

    let cart = widget.checkout().unwrap();
    assert!(cart.is_empty());
    assert_eq!(
        recorder.take(),
        [
            ViewEvent::Notified(messages::CHECKOUT_COMPLETE.to_string()),
            ViewEvent::Badge(Badge::Hidden),
            ViewEvent::ModalClosed,
        ]
    );
    assert!(widget.store().load().unwrap().is_empty());
}

#[test]
fn test_second_checkout_reports_empty_cart() {
    let (recorder, mut widget) = open_cart_with(&[("Mug", "10")]);
    widget.checkout().unwrap();
    let _ = recorder.take();

    let err = widget.checkout().unwrap_err();
    assert!(matches!(err, CartError::EmptyCart));
    assert_eq!(
        recorder.take(),
        [ViewEvent::Notified(messages::EMPTY_CART.to_string())]
    );
}

// ============================================================================
// Storage failures and persistence
// ============================================================================

#[test]
fn test_disabled_storage_is_reported_to_shopper() {
    let mut storage = MemoryStorage::new();
    storage.set_disabled(true);
    let recorder = Recorder::new();
    let mut widget = recorded_widget(CartStore::new(storage), &recorder);

    let err = widget.add_to_cart(title("Mug"), price("10"), "").unwrap_err();
    assert!(matches!(err, CartError::Storage(_)));

    let messages = recorder.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Could not update your cart:"));
    assert!(recorder.last_badge().is_none());
}

#[test]
fn test_session_continues_across_widgets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let first = Recorder::new();
    let mut widget = recorded_widget(CartStore::new(FileStorage::new(&path)), &first);
    widget.on_page_load().unwrap();
    widget.add_to_cart(title("Mug"), price("10"), "img1").unwrap();
    widget.add_to_cart(title("Tea"), price("5"), "img2").unwrap();
    drop(widget);

    let second = Recorder::new();
    let mut widget = recorded_widget(CartStore::new(FileStorage::new(&path)), &second);
    widget.on_page_load().unwrap();
    assert_eq!(second.last_badge(), Some(Badge::Count(2)));

    second.open_modal();
    widget.change_quantity_of(&title("Tea"), 2).unwrap();
    assert_eq!(second.last_badge(), Some(Badge::Count(4)));
    assert!(second.modal_open());
}

#[test]
fn test_html_views_follow_the_flow() {
    let mut widget = CartWidget::new(
        CartStore::new(MemoryStorage::new()),
        HtmlViews::new(),
        HtmlViews::new(),
        HtmlViews::new(),
    );
    widget.add_to_cart(title("Mug"), price("10"), "/img/mug.png").unwrap();
    let view: CartView = widget.show_item_list().unwrap();

    assert_eq!(view.item_count, 1);
    assert!(widget.badge().badge_html().contains(">1</span>"));
    assert!(widget.modal().modal_html().unwrap().contains("Nu.10.00"));
    assert_eq!(widget.notifier().toasts().len(), 1);

    widget.checkout().unwrap();
    assert!(widget.modal().modal_html().is_none());
    assert!(widget.badge().badge_html().trim().is_empty());
}

//! Cart commands.
//!
//! Each command is one widget gesture run against the file-backed slot
//! named in the configuration.

use std::io::{self, Write};

use nucart_core::error::Result;
use nucart_core::{CartStorage, ItemTitle, Price};
use nucart_widget::{
    BadgeView, CartModalView, CartStore, CartWidget, FileStorage, HtmlViews, Notifier,
    WidgetConfig,
};
use tracing::{info, warn};

use crate::terminal::TerminalViews;

/// Row addressed by an edit command.
#[derive(Debug, Clone)]
pub enum Target {
    Index(usize),
    Title(ItemTitle),
}

/// One widget gesture.
#[derive(Debug, Clone)]
pub enum Action {
    Init,
    Add {
        title: ItemTitle,
        price: Price,
        image: String,
    },
    List,
    Change {
        target: Target,
        delta: i64,
    },
    Remove {
        target: Target,
    },
    Checkout,
}

impl Action {
    /// Whether the gesture is made from inside the open cart modal.
    const fn starts_in_modal(&self) -> bool {
        matches!(
            self,
            Self::Change { .. } | Self::Remove { .. } | Self::Checkout
        )
    }
}

/// Run `action` against the configured storage.
///
/// An empty cart is reported to the user and is not treated as a failure.
///
/// # Errors
///
/// Returns an error for invalid rows and storage failures.
pub fn run(config: &WidgetConfig, action: &Action, html: bool) -> Result<()> {
    let storage = FileStorage::new(&config.storage_path);
    info!(path = %storage.path().display(), key = %config.storage_key, "Using cart storage");
    let store = CartStore::with_key(storage, &config.storage_key);

    let result = if html {
        let mut widget = CartWidget::new(
            store,
            HtmlViews::new(),
            HtmlViews::new().with_modal_open(action.starts_in_modal()),
            HtmlViews::new(),
        )
        .with_price_format(config.price_format.clone());
        let result = dispatch(&mut widget, action);
        print_html(&widget);
        result
    } else {
        let mut widget = CartWidget::new(
            store,
            TerminalViews::stdout(),
            TerminalViews::stdout().with_modal_open(action.starts_in_modal()),
            TerminalViews::stdout(),
        )
        .with_price_format(config.price_format.clone());
        dispatch(&mut widget, action)
    };

    match result {
        Err(e) if e.is_expected() => {
            warn!(error = %e, "Nothing to do");
            Ok(())
        }
        other => other,
    }
}

fn dispatch<S, B, M, N>(widget: &mut CartWidget<S, B, M, N>, action: &Action) -> Result<()>
where
    S: CartStorage,
    B: BadgeView,
    M: CartModalView,
    N: Notifier,
{
    match action {
        Action::Init => widget.on_page_load().map(drop),
        Action::Add {
            title,
            price,
            image,
        } => widget.add_to_cart(title.clone(), *price, image).map(drop),
        Action::List => widget.show_item_list().map(drop),
        Action::Change {
            target: Target::Index(index),
            delta,
        } => widget.change_quantity(*index, *delta).map(drop),
        Action::Change {
            target: Target::Title(title),
            delta,
        } => widget.change_quantity_of(title, *delta).map(drop),
        Action::Remove {
            target: Target::Index(index),
        } => widget.remove_item(*index).map(drop),
        Action::Remove {
            target: Target::Title(title),
        } => widget.remove_item_titled(title).map(drop),
        Action::Checkout => widget.checkout().map(drop),
    }
}

fn print_html<S: CartStorage>(widget: &CartWidget<S, HtmlViews, HtmlViews, HtmlViews>) {
    let mut fragments = vec![widget.badge().badge_html().to_string()];
    if let Some(modal) = widget.modal().modal_html() {
        fragments.push(modal.to_string());
    }
    fragments.extend(widget.notifier().toasts().iter().cloned());

    let mut out = io::stdout().lock();
    for fragment in fragments.iter().filter(|f| !f.trim().is_empty()) {
        if let Err(e) = writeln!(out, "{}", fragment.trim_end()) {
            warn!(error = %e, "Failed to write HTML");
            return;
        }
    }
}

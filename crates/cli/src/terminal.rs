//! Plain-text views for the terminal.

use std::io::{self, Write};

use nucart_core::{Badge, CartView};
use nucart_widget::{BadgeView, CartModalView, Notifier};
use tracing::warn;

/// Views that print to a writer (stdout by default).
#[derive(Debug)]
pub struct TerminalViews<W> {
    out: W,
    modal_open: bool,
}

impl TerminalViews<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalViews<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            modal_open: false,
        }
    }

    /// Start with the modal shown, as when a row button is pressed.
    #[must_use]
    pub fn with_modal_open(mut self, open: bool) -> Self {
        self.modal_open = open;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, lines: &[String]) {
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{line}"))
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write> BadgeView for TerminalViews<W> {
    fn refresh(&mut self, badge: Badge) {
        let line = match badge {
            Badge::Hidden => "Cart: empty".to_string(),
            Badge::Count(count) => format!("Cart: {count}"),
        };
        self.write_lines(&[line]);
    }
}

impl<W: Write> CartModalView for TerminalViews<W> {
    fn render(&mut self, cart: &CartView) {
        let title_width = cart
            .items
            .iter()
            .map(|item| item.title.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = vec!["Your Cart".to_string()];
        lines.extend(cart.items.iter().map(|item| {
            format!(
                "  [{}] {:<title_width$}  {} x {}  {}",
                item.index, item.title, item.price, item.quantity, item.line_price
            )
        }));
        lines.push(format!("Total Items: {}", cart.item_count));
        lines.push(format!("Total Price: {}", cart.total_price));

        self.write_lines(&lines);
        self.modal_open = true;
    }

    fn close(&mut self) {
        self.modal_open = false;
    }

    fn is_open(&self) -> bool {
        self.modal_open
    }
}

impl<W: Write> Notifier for TerminalViews<W> {
    fn notify(&mut self, message: &str) {
        self.write_lines(&[format!(">> {message}")]);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nucart_core::{Cart, ItemTitle, Price};

    use super::*;

    fn output(views: TerminalViews<Vec<u8>>) -> String {
        String::from_utf8(views.into_inner()).unwrap()
    }

    #[test]
    fn test_badge() {
        let mut views = TerminalViews::new(Vec::new());
        views.refresh(Badge::Count(4));
        views.refresh(Badge::Hidden);
        assert_eq!(output(views), "Cart: 4\nCart: empty\n");
    }

    #[test]
    fn test_modal() {
        let mut cart = Cart::new();
        cart.add(ItemTitle::parse("Mug").unwrap(), Price::parse("10").unwrap(), "")
            .unwrap();
        cart.add(ItemTitle::parse("Tea Set").unwrap(), Price::parse("5").unwrap(), "")
            .unwrap();
        cart.change_quantity(1, 2).unwrap();

        let mut views = TerminalViews::new(Vec::new());
        assert!(!views.is_open());
        views.render(&CartView::from(&cart));
        assert!(views.is_open());

        let text = output(views);
        assert!(text.starts_with("Your Cart\n"));
        assert!(text.contains("  [0] Mug      Nu.10.00 x 1  Nu.10.00\n"));
        assert!(text.contains("  [1] Tea Set  Nu.5.00 x 3  Nu.15.00\n"));
        assert!(text.contains("Total Items: 4\n"));
        assert!(text.ends_with("Total Price: Nu.25.00\n"));
    }

    #[test]
    fn test_notify_and_close() {
        let mut views = TerminalViews::new(Vec::new()).with_modal_open(true);
        assert!(views.is_open());
        views.close();
        assert!(!views.is_open());
        views.notify("Your cart is empty!");
        assert_eq!(output(views), ">> Your cart is empty!\n");
    }
}

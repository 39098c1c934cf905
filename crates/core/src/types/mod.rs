//! Core types for Nu Cart.
//!
//! This module provides type-safe wrappers for the values a line item is
//! made of.

pub mod line_item;
pub mod price;
pub mod quantity;
pub mod title;

pub use line_item::LineItem;
pub use price::{Price, PriceError};
pub use quantity::{Quantity, QuantityError};
pub use title::{ItemTitle, TitleError};

//! Nu Cart Core - Cart types and traits.
//!
//! This crate provides the pieces shared by every Nu Cart component:
//! - `widget` - Cart store, storage backends, views and HTML rendering
//! - `cli` - Command-line driver standing in for the browser button wiring
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no file access, no
//! rendering, no logging setup. Storage is reached exclusively through the
//! [`CartStorage`] port so any key-value backend can be plugged in.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for titles, prices and quantities, plus [`LineItem`]
//! - [`cart`] - The ordered, title-unique [`Cart`] and its pure mutations
//! - [`storage`] - The [`CartStorage`] key-value port
//! - [`view`] - Presentation-free view model derived from a [`Cart`]
//! - [`error`] - [`CartError`] taxonomy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod error;
pub mod storage;
pub mod types;
pub mod view;

pub use cart::{AddOutcome, Cart, QuantityChange};
pub use error::CartError;
pub use storage::{CartStorage, StorageError};
pub use types::*;
pub use view::{Badge, CartItemView, CartView, PriceFormat};

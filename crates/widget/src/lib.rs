//! Nu Cart Widget library.
//!
//! The cart behaviour of the storefront widget, without a browser:
//!
//! - [`CartStore`] - persisted cart with add, quantity, remove and checkout
//! - [`CartWidget`] - the event wiring that keeps badge, modal and toasts in step
//! - [`storage`] - [`MemoryStorage`] and [`FileStorage`] backends
//! - [`render`] - Askama HTML fragments for the badge, modal and toast
//! - [`config`] - environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod render;
pub mod storage;
pub mod store;
pub mod views;
pub mod widget;

pub use config::{ConfigError, LogFormat, WidgetConfig};
pub use render::HtmlViews;
pub use storage::{FileStorage, MemoryStorage};
pub use store::CartStore;
pub use views::{BadgeView, CartModalView, NoopViews, Notifier};
pub use widget::{CartWidget, messages};

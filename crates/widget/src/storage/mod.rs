//! Storage backends implementing [`CartStorage`].
//!
//! - [`MemoryStorage`] - in-process map, used by tests and embedders
//! - [`FileStorage`] - JSON file on disk, the CLI's stand-in for `localStorage`

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use nucart_core::{CartStorage, StorageError};

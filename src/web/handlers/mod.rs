//! HTTP handlers.

pub mod file;
pub mod page;

pub use file::*;
pub use page::*;

use crate::file::FileStore;

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Store holding the uploaded files.
    pub store: FileStore,
}

impl AppState {
    /// Create the handler state over an opened store.
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }
}

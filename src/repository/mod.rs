//! Repository layer holding the in-memory book collection

pub mod books;

use std::sync::Arc;
use tokio::sync::RwLock;

pub use books::{BookCollection, BookError, ValidationError};

/// Main repository struct, cheap to clone and shared across handlers
#[derive(Clone, Default)]
pub struct Repository {
    pub books: Arc<RwLock<BookCollection>>,
}

impl Repository {
    /// Create a repository with an empty collection
    pub fn new() -> Self {
        Self::with_collection(BookCollection::new())
    }

    pub fn with_collection(collection: BookCollection) -> Self {
        Self {
            books: Arc::new(RwLock::new(collection)),
        }
    }
}

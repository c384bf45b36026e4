//! Data models for the Bookshelf API

pub mod book;
pub mod response;

// Re-export commonly used types
pub use book::{Book, BookFilter, BookPayload, BookQuery, BookSummary};
pub use response::{MessageResponse, ResponseStatus};

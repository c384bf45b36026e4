//! Book collection and its domain methods on Repository

use chrono::Utc;
use rand::Rng;
use thiserror::Error;

use super::Repository;
use crate::models::book::{Book, BookFilter, BookPayload, BookSummary};

/// Length of generated book ids
pub const BOOK_ID_LENGTH: usize = 16;

const ID_ALPHABET: &[u8] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Generate a random URL-safe book id
pub fn generate_book_id() -> String {
    let mut rng = rand::thread_rng();
    (0..BOOK_ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Field validation failures, checked in declaration order
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name required")]
    NameRequired,

    #[error("readPage exceeds pageCount")]
    ReadPageExceedsPageCount,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("book {0} not found")]
    NotFound(String),

    #[error("book id {0} already in use")]
    IdCollision(String),
}

/// Ordered in-memory set of books. Insertion order is display order.
pub struct BookCollection {
    books: Vec<Book>,
    generate_id: fn() -> String,
}

impl Default for BookCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl BookCollection {
    pub fn new() -> Self {
        Self::with_id_generator(generate_book_id)
    }

    pub fn with_id_generator(generate_id: fn() -> String) -> Self {
        Self {
            books: Vec::new(),
            generate_id,
        }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Add a book and return its generated id
    pub fn create(&mut self, payload: BookPayload) -> Result<String, BookError> {
        let name = validate(&payload)?;

        let id = (self.generate_id)();
        if self.position(&id).is_some() {
            return Err(BookError::IdCollision(id));
        }

        let now = Utc::now();
        self.books.push(Book {
            id: id.clone(),
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished: payload.read_page == payload.page_count,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        });

        Ok(id)
    }

    /// Project the books matching `filter`, in collection order
    pub fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.books
            .iter()
            .filter(|book| filter.matches(book))
            .map(BookSummary::from)
            .collect()
    }

    /// Get a book by id.
    ///
    /// When the stored book has every page read, this also marks it as
    /// finished and no longer being read. The change is kept.
    pub fn get_by_id(&mut self, id: &str) -> Result<Book, BookError> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        if book.page_count == book.read_page {
            book.finished = true;
            book.reading = false;
        }

        Ok(book.clone())
    }

    /// Overwrite every field except id, `inserted_at` and `finished`
    pub fn update_by_id(&mut self, id: &str, payload: BookPayload) -> Result<(), BookError> {
        let index = self
            .position(id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;
        let name = validate(&payload)?;

        let book = &mut self.books[index];
        book.name = name;
        book.year = payload.year;
        book.author = payload.author;
        book.summary = payload.summary;
        book.publisher = payload.publisher;
        book.page_count = payload.page_count;
        book.read_page = payload.read_page;
        book.reading = payload.reading;
        book.updated_at = Utc::now();

        Ok(())
    }

    pub fn delete_by_id(&mut self, id: &str) -> Result<(), BookError> {
        let index = self
            .position(id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;
        self.books.remove(index);
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }
}

/// Check the payload and return the validated name
fn validate(payload: &BookPayload) -> Result<String, ValidationError> {
    let name = match payload.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(ValidationError::NameRequired),
    };

    if payload.read_page > payload.page_count {
        return Err(ValidationError::ReadPageExceedsPageCount);
    }

    Ok(name)
}

impl Repository {
    pub async fn books_create(&self, payload: BookPayload) -> Result<String, BookError> {
        self.books.write().await.create(payload)
    }

    pub async fn books_list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.books.read().await.list(filter)
    }

    /// Takes the write lock since reading may mark the book as finished
    pub async fn books_get_by_id(&self, id: &str) -> Result<Book, BookError> {
        self.books.write().await.get_by_id(id)
    }

    pub async fn books_update_by_id(&self, id: &str, payload: BookPayload) -> Result<(), BookError> {
        self.books.write().await.update_by_id(id, payload)
    }

    pub async fn books_delete_by_id(&self, id: &str) -> Result<(), BookError> {
        self.books.write().await.delete_by_id(id)
    }

    pub async fn books_count(&self) -> usize {
        self.books.read().await.len()
    }
}

//! Book shelf service
//!
//! Turns collection outcomes into client-facing messages. Each operation
//! keeps its own wording so clients can tell failure cases apart.

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, BookPayload, BookSummary},
    repository::{BookError, Repository, ValidationError},
};

pub const MSG_CREATED: &str = "Buku berhasil ditambahkan";
pub const MSG_CREATE_NAME_REQUIRED: &str = "Gagal menambahkan buku. Mohon isi nama buku";
pub const MSG_CREATE_READ_PAGE: &str =
    "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount";
pub const MSG_CREATE_ID_IN_USE: &str = "Gagal menambahkan buku. Id telah digunakan";

pub const MSG_NOT_FOUND: &str = "Buku tidak ditemukan";

pub const MSG_UPDATED: &str = "Buku berhasil diperbarui";
pub const MSG_UPDATE_NOT_FOUND: &str = "Gagal memperbarui buku. Id tidak ditemukan";
pub const MSG_UPDATE_NAME_REQUIRED: &str = "Gagal memperbarui buku. Mohon isi nama buku";
pub const MSG_UPDATE_READ_PAGE: &str =
    "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount";

pub const MSG_DELETED: &str = "Buku berhasil dihapus";
pub const MSG_DELETE_NOT_FOUND: &str = "Buku gagal dihapus. Id tidak ditemukan";

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book, returning its id
    pub async fn create(&self, payload: BookPayload) -> AppResult<String> {
        match self.repository.books_create(payload).await {
            Ok(id) => {
                tracing::info!(book_id = %id, "Book added");
                Ok(id)
            }
            Err(BookError::Validation(ValidationError::NameRequired)) => {
                tracing::warn!("Rejected book without name");
                Err(AppError::Validation(MSG_CREATE_NAME_REQUIRED.to_string()))
            }
            Err(BookError::Validation(ValidationError::ReadPageExceedsPageCount)) => {
                tracing::warn!("Rejected book with readPage above pageCount");
                Err(AppError::Validation(MSG_CREATE_READ_PAGE.to_string()))
            }
            Err(err @ BookError::IdCollision(_)) => {
                tracing::error!("{}", err);
                Err(AppError::Internal(MSG_CREATE_ID_IN_USE.to_string()))
            }
            Err(err @ BookError::NotFound(_)) => Err(AppError::Internal(err.to_string())),
        }
    }

    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        let books = self.repository.books_list(filter).await;
        tracing::debug!(?filter, count = books.len(), "Books listed");
        books
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.repository.books_get_by_id(id).await.map_err(|err| match err {
            BookError::NotFound(_) => {
                tracing::warn!(book_id = %id, "Book not found");
                AppError::NotFound(MSG_NOT_FOUND.to_string())
            }
            other => AppError::Internal(other.to_string()),
        })
    }

    pub async fn update(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        match self.repository.books_update_by_id(id, payload).await {
            Ok(()) => {
                tracing::info!(book_id = %id, "Book updated");
                Ok(())
            }
            Err(BookError::NotFound(_)) => {
                tracing::warn!(book_id = %id, "Cannot update unknown book");
                Err(AppError::NotFound(MSG_UPDATE_NOT_FOUND.to_string()))
            }
            Err(BookError::Validation(ValidationError::NameRequired)) => {
                Err(AppError::Validation(MSG_UPDATE_NAME_REQUIRED.to_string()))
            }
            Err(BookError::Validation(ValidationError::ReadPageExceedsPageCount)) => {
                Err(AppError::Validation(MSG_UPDATE_READ_PAGE.to_string()))
            }
            Err(err @ BookError::IdCollision(_)) => Err(AppError::Internal(err.to_string())),
        }
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        match self.repository.books_delete_by_id(id).await {
            Ok(()) => {
                tracing::info!(book_id = %id, "Book deleted");
                Ok(())
            }
            Err(BookError::NotFound(_)) => {
                tracing::warn!(book_id = %id, "Cannot delete unknown book");
                Err(AppError::NotFound(MSG_DELETE_NOT_FOUND.to_string()))
            }
            Err(other) => Err(AppError::Internal(other.to_string())),
        }
    }
}

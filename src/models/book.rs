//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

/// Book record as stored on the shelf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque 16 character identifier
    pub id: String,
    pub name: String,
    /// Stored as sent, any JSON value
    #[schema(value_type = Option<Object>)]
    pub year: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub author: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub summary: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub publisher: Option<Value>,
    /// Total number of pages
    pub page_count: u32,
    /// Pages read so far, never above `page_count`
    pub read_page: u32,
    /// Whether every page has been read
    pub finished: bool,
    /// Whether the reader declared the book as currently being read
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short book representation for lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    #[schema(value_type = Option<Object>)]
    pub publisher: Option<Value>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Create / update book request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    /// Required, must not be empty
    pub name: Option<String>,
    /// Stored as sent, any JSON value
    #[schema(value_type = Option<Object>)]
    pub year: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub author: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub summary: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub publisher: Option<Value>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub read_page: u32,
    #[serde(default)]
    pub reading: bool,
}

/// Book list query parameters
///
/// Only one criterion is honored per request. When several are given,
/// `name` wins over `finished`, which wins over `reading`.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// `1` for finished books, any other value for unfinished ones
    pub finished: Option<String>,
    /// `1` for books being read, any other value for the others
    pub reading: Option<String>,
}

/// Single list criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    All,
    NameContains(String),
    Finished(bool),
    Reading(bool),
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::All => true,
            BookFilter::NameContains(needle) => book
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            BookFilter::Finished(finished) => book.finished == *finished,
            BookFilter::Reading(reading) => book.reading == *reading,
        }
    }
}

impl From<BookQuery> for BookFilter {
    fn from(query: BookQuery) -> Self {
        if let Some(name) = query.name {
            BookFilter::NameContains(name)
        } else if let Some(finished) = query.finished {
            BookFilter::Finished(flag_value(&finished))
        } else if let Some(reading) = query.reading {
            BookFilter::Reading(flag_value(&reading))
        } else {
            BookFilter::All
        }
    }
}

fn flag_value(raw: &str) -> bool {
    raw == "1"
}

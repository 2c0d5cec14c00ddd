//! Book persistence: the repository contract and its backends.

mod memory;
mod postgres;

pub use memory::InMemoryBookRepository;
pub use postgres::{ensure_books_table, ensure_database_exists, PgBookRepository};

use crate::models::{Book, BookPatch, ColumnKind, FieldValue, BOOK_COLUMNS};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    // The unbalanced quote is what existing clients match on.
    #[error("There is no book with an isbn '{0}")]
    NotFound(String),
    #[error("There is already a book with an isbn '{0}'")]
    Duplicate(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// Exact-match conditions for listing, one per recognised column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub conditions: Vec<(&'static str, FieldValue)>,
}

impl BookFilter {
    /// Build from query-string pairs. Unknown keys, and integer columns whose value
    /// does not parse, are ignored.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let mut conditions = Vec::new();
        for (col, kind) in BOOK_COLUMNS {
            let Some(raw) = params.get(*col) else {
                continue;
            };
            match kind {
                ColumnKind::Text => conditions.push((*col, FieldValue::Text(raw.clone()))),
                ColumnKind::Int => {
                    if let Ok(n) = raw.trim().parse::<i32>() {
                        conditions.push((*col, FieldValue::Int(n)));
                    }
                }
            }
        }
        BookFilter { conditions }
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.conditions
            .iter()
            .all(|(col, val)| book.column(col).as_ref() == Some(val))
    }
}

/// Storage collaborator for books. Implementations own all persisted state.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Books matching `filter`, ordered by title then isbn. Empty result is not an error.
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError>;

    async fn get(&self, isbn: &str) -> Result<Book, StoreError>;

    /// Insert a new book. Fails with `Duplicate` when the isbn is taken.
    async fn create(&self, book: &Book) -> Result<Book, StoreError>;

    /// Merge `patch` into the stored record and return the full result.
    async fn update(&self, isbn: &str, patch: &BookPatch) -> Result<Book, StoreError>;

    async fn delete(&self, isbn: &str) -> Result<(), StoreError>;

    /// Liveness check used by the readiness route.
    async fn ping(&self) -> Result<(), StoreError>;
}

//! Shared application state for all routes.

use crate::error::ConfigError;
use crate::schema::BookSchemas;
use crate::store::BookRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookRepository>,
    pub schemas: Arc<BookSchemas>,
}

impl AppState {
    /// Compile the book schemas and pair them with `books`.
    pub fn new(books: Arc<dyn BookRepository>) -> Result<Self, ConfigError> {
        Ok(AppState {
            books,
            schemas: Arc::new(BookSchemas::load()?),
        })
    }
}

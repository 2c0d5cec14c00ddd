//! Bookstore: a book catalogue REST service with schema-validated writes.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError, ErrorEnvelope, ErrorMessage};
pub use models::{Book, BookPatch};
pub use routes::{app, book_routes, common_routes_with_ready};
pub use schema::BookSchemas;
pub use service::RequestValidator;
pub use state::AppState;
pub use store::{
    ensure_books_table, ensure_database_exists, BookFilter, BookRepository, InMemoryBookRepository, PgBookRepository,
    StoreError,
};

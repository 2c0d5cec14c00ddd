//! Request validation for book writes.

mod validation;
pub use validation::{violations, RequestValidator, ISBN_NOT_ALLOWED};

//! Book handlers: list, read, create, update, delete.
//!
//! Writes are validated before the repository is touched; a rejected body never costs a query.

use crate::error::AppError;
use crate::models::{Book, BookPatch};
use crate::response::{book_created, book_ok, books_ok, message_ok};
use crate::service::RequestValidator;
use crate::state::AppState;
use crate::store::BookFilter;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = query?;
    let filter = BookFilter::from_query(&params);
    let books = state.books.list(&filter).await?;
    Ok(books_ok(books))
}

pub async fn read(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(isbn) = path?;
    let book = state.books.get(&isbn).await?;
    Ok(book_ok(book))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let book: Book = RequestValidator::parse(body, state.schemas.create())?;
    let created = state.books.create(&book).await?;
    tracing::info!(isbn = %created.isbn, "book created");
    Ok(book_created(created))
}

pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(isbn) = path?;
    let Json(body) = body?;
    RequestValidator::reject_identifier(&body)?;
    let patch: BookPatch = RequestValidator::parse(body, state.schemas.update())?;
    let updated = state.books.update(&isbn, &patch).await?;
    tracing::info!(isbn = %updated.isbn, "book updated");
    Ok(book_ok(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(isbn) = path?;
    state.books.delete(&isbn).await?;
    tracing::info!(isbn = %isbn, "book deleted");
    Ok(message_ok("Book deleted"))
}

//! PostgreSQL-backed book repository and table bootstrap.

use super::{BookFilter, BookRepository, StoreError};
use crate::models::{Book, BookPatch};
use crate::sql::{self, QueryBuf, BOOKS_TABLE};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgConnectOptions};
use sqlx::query::QueryAs;
use sqlx::{ConnectOptions, PgPool, Postgres};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        PgBookRepository { pool }
    }

    fn bind<'q>(q: &'q QueryBuf) -> QueryAs<'q, Postgres, Book, PgArguments> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Book>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        query
    }
}

fn map_insert_error(isbn: &str, err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate(isbn.to_string()),
        _ => StoreError::Db(err),
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        let q = sql::select_list(filter);
        let rows = Self::bind(&q).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get(&self, isbn: &str) -> Result<Book, StoreError> {
        let q = sql::select_by_isbn(isbn);
        Self::bind(&q)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(isbn.to_string()))
    }

    async fn create(&self, book: &Book) -> Result<Book, StoreError> {
        let q = sql::insert(book);
        Self::bind(&q)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_insert_error(&book.isbn, e))
    }

    async fn update(&self, isbn: &str, patch: &BookPatch) -> Result<Book, StoreError> {
        let q = sql::update(isbn, patch);
        Self::bind(&q)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(isbn.to_string()))
    }

    async fn delete(&self, isbn: &str) -> Result<(), StoreError> {
        let q = sql::delete(isbn);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_scalar::<_, String>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        query
            .fetch_optional(&self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(isbn.to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create the books table if missing.
pub async fn ensure_books_table(pool: &PgPool) -> Result<(), StoreError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS "{}" (
            isbn TEXT PRIMARY KEY,
            amazon_url TEXT NOT NULL,
            author TEXT NOT NULL,
            language TEXT NOT NULL,
            pages INTEGER NOT NULL,
            publisher TEXT NOT NULL,
            title TEXT NOT NULL,
            year INTEGER NOT NULL
        )
        "#,
        BOOKS_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the target database if it does not exist.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let Some((admin_url, db_name)) = split_db_name(database_url) else {
        return Ok(());
    };
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)?;
    let mut conn = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn split_db_name(url: &str) -> Option<(String, String)> {
    let authority_start = url.find("://")? + 3;
    let path_start = authority_start + url.get(authority_start..)?.find('/')? + 1;
    let db_name = url
        .get(path_start..)
        .unwrap_or("")
        .split('?')
        .next()
        .unwrap_or("")
        .trim();
    let base = url.get(..path_start).unwrap_or(url);
    Some((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

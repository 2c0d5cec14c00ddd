//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the books table.

use crate::models::{Book, BookPatch, FieldValue, BOOK_COLUMNS};
use crate::store::BookFilter;

pub const BOOKS_TABLE: &str = "books";

/// Quote identifier for PostgreSQL (safe: only fixed column names reach here).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: FieldValue) -> u32 {
        self.params.push(v);
        self.params.len() as u32
    }
}

fn column_list() -> String {
    BOOK_COLUMNS
        .iter()
        .map(|(name, _)| quoted(name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT with exact-match filters, ordered by title then isbn.
pub fn select_list(filter: &BookFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut conditions = Vec::new();
    for (col, val) in &filter.conditions {
        let n = q.push_param(val.clone());
        conditions.push(format!("{} = ${}", quoted(col), n));
    }
    q.sql = format!("SELECT {} FROM {}", column_list(), quoted(BOOKS_TABLE));
    if !conditions.is_empty() {
        q.sql.push_str(" WHERE ");
        q.sql.push_str(&conditions.join(" AND "));
    }
    q.sql.push_str(&format!(" ORDER BY {}, {}", quoted("title"), quoted("isbn")));
    q
}

pub fn select_by_isbn(isbn: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(FieldValue::Text(isbn.to_string()));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        column_list(),
        quoted(BOOKS_TABLE),
        quoted("isbn"),
        n
    );
    q
}

/// INSERT every column; RETURNING the stored row.
pub fn insert(book: &Book) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut placeholders = Vec::with_capacity(BOOK_COLUMNS.len());
    for (col, _) in BOOK_COLUMNS {
        if let Some(v) = book.column(col) {
            placeholders.push(format!("${}", q.push_param(v)));
        }
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(BOOKS_TABLE),
        column_list(),
        placeholders.join(", "),
        column_list()
    );
    q
}

/// UPDATE only the columns the patch carries. An empty patch degrades to a plain SELECT.
pub fn update(isbn: &str, patch: &BookPatch) -> QueryBuf {
    let assignments = patch.assignments();
    if assignments.is_empty() {
        return select_by_isbn(isbn);
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(assignments.len());
    for (col, val) in assignments {
        let n = q.push_param(val);
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    let n = q.push_param(FieldValue::Text(isbn.to_string()));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(BOOKS_TABLE),
        sets.join(", "),
        quoted("isbn"),
        n,
        column_list()
    );
    q
}

pub fn delete(isbn: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(FieldValue::Text(isbn.to_string()));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        quoted(BOOKS_TABLE),
        quoted("isbn"),
        n,
        quoted("isbn")
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_without_filter_has_no_where() {
        let q = select_list(&BookFilter::default());
        assert!(!q.sql.contains("WHERE"));
        assert!(q.sql.ends_with("ORDER BY \"title\", \"isbn\""));
        assert!(q.params.is_empty());
    }

    #[test]
    fn list_filters_are_parameterized() {
        let filter = BookFilter {
            conditions: vec![
                ("author", FieldValue::Text("Matthew Lane".into())),
                ("year", FieldValue::Int(2017)),
            ],
        };
        let q = select_list(&filter);
        assert!(q.sql.contains("WHERE \"author\" = $1 AND \"year\" = $2"));
        assert_eq!(
            q.params,
            vec![FieldValue::Text("Matthew Lane".into()), FieldValue::Int(2017)]
        );
    }

    #[test]
    fn update_sets_only_patched_columns() {
        let patch = BookPatch {
            title: Some("Level-Up".into()),
            pages: Some(342),
            ..Default::default()
        };
        let q = update("0691161518", &patch);
        assert!(q
            .sql
            .starts_with("UPDATE \"books\" SET \"pages\" = $1, \"title\" = $2 WHERE \"isbn\" = $3 RETURNING"));
        assert_eq!(q.params.len(), 3);
        assert_eq!(q.params[2], FieldValue::Text("0691161518".into()));
    }

    #[test]
    fn empty_update_is_a_lookup() {
        let q = update("0691161518", &BookPatch::default());
        assert!(q.sql.starts_with("SELECT"));
        assert_eq!(q.params, vec![FieldValue::Text("0691161518".into())]);
    }

    #[test]
    fn insert_binds_every_column() {
        let book = Book {
            isbn: "1".into(),
            amazon_url: "u".into(),
            author: "a".into(),
            language: "l".into(),
            pages: 1,
            publisher: "p".into(),
            title: "t".into(),
            year: 2000,
        };
        let q = insert(&book);
        assert_eq!(q.params.len(), BOOK_COLUMNS.len());
        assert!(q.sql.contains("VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"));
    }
}

//! Book record and its partial-update counterpart.

use serde::{Deserialize, Serialize};

/// A persisted book, keyed by `isbn`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

/// Fields accepted by an update. `isbn` is addressed through the path and never part of a patch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amazon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self == &BookPatch::default()
    }

    /// Column/value pairs for the fields present, in column order.
    pub fn assignments(&self) -> Vec<(&'static str, FieldValue)> {
        let mut out = Vec::new();
        if let Some(v) = &self.amazon_url {
            out.push(("amazon_url", FieldValue::Text(v.clone())));
        }
        if let Some(v) = &self.author {
            out.push(("author", FieldValue::Text(v.clone())));
        }
        if let Some(v) = &self.language {
            out.push(("language", FieldValue::Text(v.clone())));
        }
        if let Some(v) = self.pages {
            out.push(("pages", FieldValue::Int(v)));
        }
        if let Some(v) = &self.publisher {
            out.push(("publisher", FieldValue::Text(v.clone())));
        }
        if let Some(v) = &self.title {
            out.push(("title", FieldValue::Text(v.clone())));
        }
        if let Some(v) = self.year {
            out.push(("year", FieldValue::Int(v)));
        }
        out
    }

    /// Overwrite the fields of `book` that this patch carries.
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(v) = &self.amazon_url {
            book.amazon_url = v.clone();
        }
        if let Some(v) = &self.author {
            book.author = v.clone();
        }
        if let Some(v) = &self.language {
            book.language = v.clone();
        }
        if let Some(v) = self.pages {
            book.pages = v;
        }
        if let Some(v) = &self.publisher {
            book.publisher = v.clone();
        }
        if let Some(v) = &self.title {
            book.title = v.clone();
        }
        if let Some(v) = self.year {
            book.year = v;
        }
    }
}

/// A single column value, as bound into SQL or compared in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Int(i32),
}

/// Column kinds, used to coerce query-string filter values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Int,
}

/// Every column of the books table in declaration order.
pub const BOOK_COLUMNS: &[(&str, ColumnKind)] = &[
    ("isbn", ColumnKind::Text),
    ("amazon_url", ColumnKind::Text),
    ("author", ColumnKind::Text),
    ("language", ColumnKind::Text),
    ("pages", ColumnKind::Int),
    ("publisher", ColumnKind::Text),
    ("title", ColumnKind::Text),
    ("year", ColumnKind::Int),
];

impl Book {
    /// Value of a column by name. `None` for unknown columns.
    pub fn column(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "isbn" => FieldValue::Text(self.isbn.clone()),
            "amazon_url" => FieldValue::Text(self.amazon_url.clone()),
            "author" => FieldValue::Text(self.author.clone()),
            "language" => FieldValue::Text(self.language.clone()),
            "pages" => FieldValue::Int(self.pages),
            "publisher" => FieldValue::Text(self.publisher.clone()),
            "title" => FieldValue::Text(self.title.clone()),
            "year" => FieldValue::Int(self.year),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            isbn: "0691161518".into(),
            amazon_url: "http://a.co/eobPtX2".into(),
            author: "Matthew Lane".into(),
            language: "english".into(),
            pages: 264,
            publisher: "Princeton University Press".into(),
            title: "Power-Up".into(),
            year: 2017,
        }
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut b = book();
        let patch = BookPatch {
            author: Some("Gabriel Ramirez".into()),
            pages: Some(342),
            ..Default::default()
        };
        patch.apply_to(&mut b);
        assert_eq!(b.author, "Gabriel Ramirez");
        assert_eq!(b.pages, 342);
        assert_eq!(b.title, "Power-Up");
        assert_eq!(b.isbn, "0691161518");
    }

    #[test]
    fn assignments_follow_column_order() {
        let patch = BookPatch {
            year: Some(2023),
            amazon_url: Some("http://google.com".into()),
            ..Default::default()
        };
        let cols: Vec<_> = patch.assignments().into_iter().map(|(c, _)| c).collect();
        assert_eq!(cols, vec!["amazon_url", "year"]);
        assert!(BookPatch::default().is_empty());
    }

    #[test]
    fn patch_ignores_unknown_keys() {
        let patch: BookPatch = serde_json::from_value(serde_json::json!({
            "title": "Level-Up",
            "extra": true
        }))
        .unwrap();
        assert_eq!(patch.title.as_deref(), Some("Level-Up"));
        assert_eq!(patch.assignments().len(), 1);
    }
}

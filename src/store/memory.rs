//! In-process book repository. Used when no database is configured and as a test double.

use super::{BookFilter, BookRepository, StoreError};
use crate::models::{Book, BookPatch};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct InMemoryBookRepository {
    books: RwLock<BTreeMap<String, Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let map = books.into_iter().map(|b| (b.isbn.clone(), b)).collect();
        InMemoryBookRepository {
            books: RwLock::new(map),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        read(&self.books).len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Poisoning is ignored: every write leaves the map consistent before it can panic.
fn read(lock: &RwLock<BTreeMap<String, Book>>) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, Book>> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write(lock: &RwLock<BTreeMap<String, Book>>) -> std::sync::RwLockWriteGuard<'_, BTreeMap<String, Book>> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        let mut out: Vec<Book> = read(&self.books)
            .values()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.isbn.cmp(&b.isbn)));
        Ok(out)
    }

    async fn get(&self, isbn: &str) -> Result<Book, StoreError> {
        read(&self.books)
            .get(isbn)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(isbn.to_string()))
    }

    async fn create(&self, book: &Book) -> Result<Book, StoreError> {
        let mut books = write(&self.books);
        if books.contains_key(&book.isbn) {
            return Err(StoreError::Duplicate(book.isbn.clone()));
        }
        books.insert(book.isbn.clone(), book.clone());
        Ok(book.clone())
    }

    async fn update(&self, isbn: &str, patch: &BookPatch) -> Result<Book, StoreError> {
        let mut books = write(&self.books);
        let stored = books
            .get_mut(isbn)
            .ok_or_else(|| StoreError::NotFound(isbn.to_string()))?;
        patch.apply_to(stored);
        Ok(stored.clone())
    }

    async fn delete(&self, isbn: &str) -> Result<(), StoreError> {
        write(&self.books)
            .remove(isbn)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(isbn.to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

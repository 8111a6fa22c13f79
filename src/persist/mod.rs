//! Store abstraction and SQLite implementation.

pub mod sqlite;

use thiserror::Error;

use crate::book::{BookDraft, BookRecord};
use crate::types::BookId;

/// Errors raised by a [`BookStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the given identifier.
    #[error("no book with id {0}")]
    Missing(BookId),
    /// Underlying SQLite failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Any other store failure.
    #[error("{0}")]
    Message(String),
}

/// Result alias for store calls.
pub type StoreResult<T> = Result<T, StoreError>;

/// Single-record book persistence.
///
/// Calls are synchronous and atomic at single-record granularity. `insert`
/// assigns the identifier; `update` and `delete_by_id` fail with
/// [`StoreError::Missing`] when the identifier is absent.
pub trait BookStore: Send {
    /// Returns every record in store order.
    fn find_all(&self) -> StoreResult<Vec<BookRecord>>;
    /// Looks up one record by identifier.
    fn find_by_id(&self, id: BookId) -> StoreResult<Option<BookRecord>>;
    /// Looks up at most one record by exact ISBN.
    fn find_by_isbn(&self, isbn: &str) -> StoreResult<Option<BookRecord>>;
    /// Returns all records with an exactly matching author.
    fn find_by_author(&self, author: &str) -> StoreResult<Vec<BookRecord>>;
    /// Returns all records whose title contains `term`, case-insensitively.
    fn find_by_title(&self, term: &str) -> StoreResult<Vec<BookRecord>>;
    /// Persists a new record, assigning its identifier.
    fn insert(&mut self, draft: &BookDraft) -> StoreResult<BookRecord>;
    /// Overwrites an existing record in place.
    fn update(&mut self, record: &BookRecord) -> StoreResult<BookRecord>;
    /// Removes a record by identifier.
    fn delete_by_id(&mut self, id: BookId) -> StoreResult<()>;
}

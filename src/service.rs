//! Catalog orchestration: validation, search dispatch, and undoable writes.

use tracing::instrument;

use crate::book::{BookDraft, BookRecord, BookUpdate};
use crate::error::CatalogError;
use crate::op::CatalogOp;
use crate::oplog::OperationLog;
use crate::persist::{BookStore, StoreError};
use crate::search::{self, SearchKind};
use crate::types::BookId;
use crate::validate::{self, RuleSet};

/// Public catalog API over an injected store and an owned operation log.
///
/// Reads pass straight through to the store or search dispatcher. Creates
/// and deletes run as reversible operations through the log; updates write
/// to the store directly and are not undoable.
pub struct CatalogService {
    store: Box<dyn BookStore>,
    log: OperationLog,
}

impl CatalogService {
    /// Creates a service over `store` with a fresh, empty operation log.
    pub fn new(store: Box<dyn BookStore>) -> Self {
        Self {
            store,
            log: OperationLog::new(),
        }
    }

    /// Returns every book in store order.
    pub fn all_books(&self) -> Result<Vec<BookRecord>, CatalogError> {
        Ok(self.store.find_all()?)
    }

    /// Looks up one book by identifier.
    pub fn book_by_id(&self, id: BookId) -> Result<Option<BookRecord>, CatalogError> {
        Ok(self.store.find_by_id(id)?)
    }

    /// Looks up at most one book by exact ISBN.
    pub fn book_by_isbn(&self, isbn: &str) -> Result<Option<BookRecord>, CatalogError> {
        Ok(self.search("isbn", isbn)?.into_iter().next())
    }

    /// Returns all books with an exactly matching author.
    pub fn books_by_author(&self, author: &str) -> Result<Vec<BookRecord>, CatalogError> {
        self.search("author", author)
    }

    /// Returns all books whose title contains `title`, case-insensitively.
    pub fn books_by_title(&self, title: &str) -> Result<Vec<BookRecord>, CatalogError> {
        self.search("title", title)
    }

    /// Dispatches a lookup by search-type name.
    pub fn search(&self, search_type: &str, term: &str) -> Result<Vec<BookRecord>, CatalogError> {
        let kind = SearchKind::parse(search_type)?;
        search::dispatch(kind, term, self.store.as_ref())
    }

    /// Validates `draft` and persists it as an undoable save operation.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn create(&mut self, draft: BookDraft) -> Result<BookRecord, CatalogError> {
        draft.require_fields()?;
        validate::validate(RuleSet::parse("standard")?, &draft)?;

        let fallback = draft.clone();
        let saved_id = self
            .log
            .record(CatalogOp::save(draft), self.store.as_mut())?
            .ok_or_else(|| CatalogError::Store(StoreError::Message(
                "save operation yielded no identifier".to_string(),
            )))?;

        // Re-read what was persisted; fall back to the in-memory record if
        // the re-read misses. Not expected in normal operation.
        match self.store.find_by_id(saved_id)? {
            Some(rec) => Ok(rec),
            None => Ok(fallback.into_record(saved_id)),
        }
    }

    /// Builds a draft from individual fields, then [`create`](Self::create)s it.
    pub fn create_from_fields(
        &mut self,
        title: &str,
        author: &str,
        isbn: &str,
        publication_year: Option<i32>,
        price: Option<f64>,
    ) -> Result<BookRecord, CatalogError> {
        let draft = BookDraft::builder()
            .title(title)
            .author(author)
            .isbn(isbn)
            .publication_year(publication_year)
            .price(price)
            .build()?;
        self.create(draft)
    }

    /// Overwrites every mutable field of the book with identifier `id`.
    ///
    /// Bypasses the operation log entirely: updates are not undoable. That
    /// is an intentional scope limit of the undo feature.
    #[instrument(skip(self, update))]
    pub fn update(&mut self, id: BookId, update: BookUpdate) -> Result<BookRecord, CatalogError> {
        let mut book = self
            .store
            .find_by_id(id)?
            .ok_or(CatalogError::NotFound(id))?;

        // The update rule set intentionally checks nothing; the call is kept
        // so the rule-set lookup path stays uniform with creation.
        validate::validate(RuleSet::parse("update")?, &update.as_draft())?;

        update.apply_to(&mut book);
        Ok(self.store.update(&book)?)
    }

    /// Deletes the book with identifier `id` as an undoable operation.
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: BookId) -> Result<(), CatalogError> {
        self.log.record(CatalogOp::delete(id), self.store.as_mut())?;
        Ok(())
    }

    /// Undoes the most recent undoable operation; no-op on an empty history.
    #[instrument(skip(self))]
    pub fn undo_last(&mut self) -> Result<(), CatalogError> {
        self.log.undo_last(self.store.as_mut())
    }

    /// Returns operation descriptions, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.log.history()
    }

    /// Discards the operation history without compensating anything.
    pub fn clear_history(&mut self) {
        self.log.clear();
    }
}

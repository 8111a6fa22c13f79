//! In-memory [`BookStore`] with secondary indices.

use hashbrown::HashMap;

use crate::book::{BookDraft, BookRecord};
use crate::persist::{BookStore, StoreError, StoreResult};
use crate::types::BookId;

/// Hash-indexed in-memory store. Used by tests and `--db`-less runs.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    records: HashMap<BookId, BookRecord>,
    order: Vec<BookId>,
    by_isbn: HashMap<String, Vec<BookId>>,
    by_author: HashMap<String, Vec<BookId>>,
    next_id: BookId,
}

impl MemoryBookStore {
    /// Creates an empty store; the first insert receives id 1.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no records are stored.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert_indices(&mut self, rec: &BookRecord) {
        self.by_isbn.entry(rec.isbn.clone()).or_default().push(rec.id);
        self.by_author
            .entry(rec.author.clone())
            .or_default()
            .push(rec.id);
    }

    fn remove_indices(&mut self, rec: &BookRecord) {
        if let Some(ids) = self.by_isbn.get_mut(&rec.isbn) {
            Self::remove_from_vec_index(ids, rec.id);
        }
        if let Some(ids) = self.by_author.get_mut(&rec.author) {
            Self::remove_from_vec_index(ids, rec.id);
        }
    }

    fn remove_from_vec_index(v: &mut Vec<BookId>, id: BookId) {
        if let Some(pos) = v.iter().position(|x| *x == id) {
            v.remove(pos);
        }
    }
}

impl BookStore for MemoryBookStore {
    fn find_all(&self) -> StoreResult<Vec<BookRecord>> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect())
    }

    fn find_by_id(&self, id: BookId) -> StoreResult<Option<BookRecord>> {
        Ok(self.records.get(&id).cloned())
    }

    fn find_by_isbn(&self, isbn: &str) -> StoreResult<Option<BookRecord>> {
        Ok(self
            .by_isbn
            .get(isbn)
            .and_then(|ids| ids.first())
            .and_then(|id| self.records.get(id))
            .cloned())
    }

    fn find_by_author(&self, author: &str) -> StoreResult<Vec<BookRecord>> {
        Ok(self
            .by_author
            .get(author)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.records.get(id))
            .cloned()
            .collect())
    }

    fn find_by_title(&self, term: &str) -> StoreResult<Vec<BookRecord>> {
        let needle = term.to_lowercase();
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.records.get(id))
            .filter(|rec| rec.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn insert(&mut self, draft: &BookDraft) -> StoreResult<BookRecord> {
        let id = self.next_id;
        self.next_id += 1;

        let rec = draft.clone().into_record(id);
        self.insert_indices(&rec);
        self.order.push(id);
        self.records.insert(id, rec.clone());
        Ok(rec)
    }

    fn update(&mut self, record: &BookRecord) -> StoreResult<BookRecord> {
        let old = self
            .records
            .get(&record.id)
            .cloned()
            .ok_or(StoreError::Missing(record.id))?;

        self.remove_indices(&old);
        self.insert_indices(record);
        self.records.insert(record.id, record.clone());
        Ok(record.clone())
    }

    fn delete_by_id(&mut self, id: BookId) -> StoreResult<()> {
        let rec = self.records.remove(&id).ok_or(StoreError::Missing(id))?;
        self.remove_indices(&rec);
        Self::remove_from_vec_index(&mut self.order, id);
        Ok(())
    }
}

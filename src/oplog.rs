//! Strict-LIFO log of executed reversible operations.

use crate::error::CatalogError;
use crate::op::CatalogOp;
use crate::persist::BookStore;
use crate::types::BookId;

/// Ordered record of executed operations supporting single-step undo.
///
/// Insertion order is execution order and only the most recent entry may be
/// undone. The log exclusively owns its operations, lives for the process,
/// grows without bound unless cleared, and is not persisted across restarts.
#[derive(Debug, Default)]
pub struct OperationLog {
    entries: Vec<CatalogOp>,
}

impl OperationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes `op` against `store` and appends it on success.
    ///
    /// A failed execution propagates its error and never enters the log.
    /// Returns the identifier captured by a save operation.
    pub fn record(
        &mut self,
        mut op: CatalogOp,
        store: &mut dyn BookStore,
    ) -> Result<Option<BookId>, CatalogError> {
        let saved_id = op.execute(store)?;
        self.entries.push(op);
        Ok(saved_id)
    }

    /// Undoes the most recently recorded operation.
    ///
    /// An empty log is a defined no-op, not an error. The entry is removed
    /// before its compensation runs; if the compensation fails, the error
    /// propagates but the entry stays removed. That store/log inconsistency
    /// matches the reference behavior and has no recovery path here.
    pub fn undo_last(&mut self, store: &mut dyn BookStore) -> Result<(), CatalogError> {
        let Some(mut op) = self.entries.pop() else {
            return Ok(());
        };
        op.undo(store)
    }

    /// Returns operation descriptions, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.entries.iter().map(CatalogOp::description).collect()
    }

    /// Discards every entry without compensating any of them.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of recorded operations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Reversible catalog operations: a mutating action plus its compensation.

use crate::book::{BookDraft, BookRecord};
use crate::error::CatalogError;
use crate::persist::BookStore;
use crate::types::BookId;

/// A single mutating action with matching compensation logic.
///
/// Closed set: the catalog only ever records saves and deletes. Each
/// operation is constructed with its pre-execution data, executed exactly
/// once, and optionally undone exactly once; the compensation uses only the
/// state captured during execution.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogOp {
    /// Persist a new record; captures the store-assigned identifier.
    Save {
        /// Pending record fields.
        draft: BookDraft,
        /// Identifier assigned by the store, set on successful execution.
        saved_id: Option<BookId>,
    },
    /// Delete an existing record; captures a pre-deletion snapshot.
    Delete {
        /// Target identifier.
        id: BookId,
        /// Record that existed before deletion, set on successful execution.
        snapshot: Option<BookRecord>,
    },
}

impl CatalogOp {
    /// Constructs a save operation for `draft`.
    pub fn save(draft: BookDraft) -> Self {
        Self::Save {
            draft,
            saved_id: None,
        }
    }

    /// Constructs a delete operation targeting `id`.
    pub fn delete(id: BookId) -> Self {
        Self::Delete { id, snapshot: None }
    }

    /// Applies the operation against `store`.
    ///
    /// Returns the identifier a save captured, `None` for deletes. On store
    /// failure the operation's captured state is left unchanged, so a failed
    /// execution is never partially applied.
    pub fn execute(&mut self, store: &mut dyn BookStore) -> Result<Option<BookId>, CatalogError> {
        match self {
            Self::Save { draft, saved_id } => {
                let rec = store.insert(draft)?;
                tracing::info!(id = rec.id, title = %rec.title, "book saved");
                *saved_id = Some(rec.id);
                Ok(Some(rec.id))
            }
            Self::Delete { id, snapshot } => {
                let rec = store
                    .find_by_id(*id)?
                    .ok_or(CatalogError::NotFound(*id))?;
                store.delete_by_id(*id)?;
                tracing::info!(id = *id, "book deleted");
                *snapshot = Some(rec);
                Ok(None)
            }
        }
    }

    /// Compensates a previously executed operation.
    ///
    /// A no-op when the operation never executed successfully or was already
    /// undone. Undoing a delete re-inserts a new record built from the
    /// snapshot's fields; the restored record receives a fresh identifier
    /// rather than reusing the original one.
    pub fn undo(&mut self, store: &mut dyn BookStore) -> Result<(), CatalogError> {
        match self {
            Self::Save { saved_id, .. } => {
                if let Some(id) = *saved_id {
                    store.delete_by_id(id)?;
                    tracing::info!(id, "save undone");
                    *saved_id = None;
                }
                Ok(())
            }
            Self::Delete { id, snapshot } => {
                if let Some(rec) = snapshot.take() {
                    let restored = store.insert(&BookDraft::from(rec))?;
                    tracing::info!(
                        deleted_id = *id,
                        restored_id = restored.id,
                        "delete undone, record restored under new id"
                    );
                }
                Ok(())
            }
        }
    }

    /// Human-readable summary for history display. Never parsed.
    pub fn description(&self) -> String {
        match self {
            Self::Save { draft, .. } => format!("Save book: {}", draft.title),
            Self::Delete { id, .. } => format!("Delete book with ID: {id}"),
        }
    }
}

//! Runtime event stream payloads.

use crate::types::BookId;

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// A new book was created.
    Created {
        /// Created book id.
        id: BookId,
    },
    /// An existing book was updated in place.
    Updated {
        /// Updated book id.
        id: BookId,
    },
    /// A book was deleted.
    Deleted {
        /// Deleted book id.
        id: BookId,
    },
    /// One undo step was applied.
    UndoApplied,
    /// The operation history was discarded.
    HistoryCleared,
}

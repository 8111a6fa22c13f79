//! Crate-level error taxonomy.

use thiserror::Error;

use crate::persist::StoreError;
use crate::types::BookId;
use crate::validate::ValidationError;

/// Errors surfaced by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A field-level rule was violated; maps to a client fault.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A rule-set name did not match any known rule set.
    #[error("unknown rule set: {0}")]
    UnknownRuleSet(String),
    /// A search-type name did not match any known search kind.
    #[error("unknown search type: {0}")]
    UnknownSearchType(String),
    /// The referenced identifier is absent from the store.
    #[error("book not found with id: {0}")]
    NotFound(BookId),
    /// The backing store call failed.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for CatalogError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Missing(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

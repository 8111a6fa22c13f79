//! Shared primitive identifiers.

/// Store-assigned book identifier (SQLite rowid domain).
pub type BookId = i64;

//! Search-kind lookup and execution against the store.

use crate::book::BookRecord;
use crate::error::CatalogError;
use crate::persist::BookStore;

/// A built-in lookup algorithm, selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Case-insensitive substring match on titles.
    Title,
    /// Exact match on the author field.
    Author,
    /// Exact match on the ISBN field; at most one result.
    Isbn,
}

impl SearchKind {
    /// Looks up a search kind by name, case-insensitively.
    pub fn parse(name: &str) -> Result<Self, CatalogError> {
        match name.to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "isbn" => Ok(Self::Isbn),
            _ => Err(CatalogError::UnknownSearchType(name.to_string())),
        }
    }
}

/// Runs the selected lookup against `store`.
///
/// The dispatcher is a lookup table only; each arm delegates straight to a
/// store query and carries no decision logic of its own.
pub fn dispatch(
    kind: SearchKind,
    term: &str,
    store: &dyn BookStore,
) -> Result<Vec<BookRecord>, CatalogError> {
    let results = match kind {
        SearchKind::Title => store.find_by_title(term)?,
        SearchKind::Author => store.find_by_author(term)?,
        SearchKind::Isbn => store.find_by_isbn(term)?.into_iter().collect(),
    };
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_lookup_is_case_insensitive() {
        for name in ["title", "Title", "TITLE"] {
            assert_eq!(SearchKind::parse(name).unwrap(), SearchKind::Title);
        }
        assert_eq!(SearchKind::parse("Author").unwrap(), SearchKind::Author);
        assert_eq!(SearchKind::parse("ISBN").unwrap(), SearchKind::Isbn);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(matches!(
            SearchKind::parse("publisher"),
            Err(CatalogError::UnknownSearchType(name)) if name == "publisher"
        ));
    }
}

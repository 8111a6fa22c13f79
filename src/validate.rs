//! Named rule sets applied to book fields before persistence.

use thiserror::Error;

use crate::book::BookDraft;
use crate::error::CatalogError;

/// A single violated field rule. One distinct variant per rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field was missing from the submitted fields.
    #[error("{0} is required")]
    Required(&'static str),
    /// Title was empty after trimming.
    #[error("book title cannot be empty")]
    EmptyTitle,
    /// Author was empty after trimming.
    #[error("book author cannot be empty")]
    EmptyAuthor,
    /// ISBN was empty after trimming.
    #[error("book ISBN cannot be empty")]
    EmptyIsbn,
    /// ISBN was not 10 or 13 digits once hyphens are stripped.
    #[error("invalid ISBN format: {0}")]
    BadIsbn(String),
    /// Publication year fell outside the accepted range.
    #[error("publication year must be between 1000 and 2030, got {0}")]
    YearOutOfRange(i32),
    /// Price was negative.
    #[error("book price cannot be negative, got {0}")]
    NegativePrice(f64),
}

/// Named, fixed set of field-level checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    /// Creation-time checks over every field.
    Standard,
    /// Update-time rule set. Checks nothing; see [`validate`].
    Update,
}

impl RuleSet {
    /// Looks up a rule set by name, case-insensitively.
    pub fn parse(name: &str) -> Result<Self, CatalogError> {
        match name.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "update" => Ok(Self::Update),
            _ => Err(CatalogError::UnknownRuleSet(name.to_string())),
        }
    }
}

/// Checks `draft` against the given rule set.
///
/// `Standard` applies its rules in a fixed order and stops at the first
/// violation: title, author, ISBN presence, ISBN format, year, price.
///
/// `Update` accepts anything. The reference behavior ships an update
/// validator with no checks at all; that asymmetry is kept as-is rather
/// than mirroring the standard rules.
pub fn validate(rules: RuleSet, draft: &BookDraft) -> Result<(), ValidationError> {
    match rules {
        RuleSet::Standard => validate_standard(draft),
        RuleSet::Update => Ok(()),
    }
}

fn validate_standard(draft: &BookDraft) -> Result<(), ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if draft.author.trim().is_empty() {
        return Err(ValidationError::EmptyAuthor);
    }
    let isbn = draft.isbn.trim();
    if isbn.is_empty() {
        return Err(ValidationError::EmptyIsbn);
    }
    if !isbn_digit_length_ok(isbn) {
        return Err(ValidationError::BadIsbn(draft.isbn.clone()));
    }
    if let Some(year) = draft.publication_year {
        if !(1000..=2030).contains(&year) {
            return Err(ValidationError::YearOutOfRange(year));
        }
    }
    if let Some(price) = draft.price {
        if price < 0.0 {
            return Err(ValidationError::NegativePrice(price));
        }
    }
    Ok(())
}

fn isbn_digit_length_ok(isbn: &str) -> bool {
    let len = isbn.chars().filter(|c| *c != '-').count();
    len == 10 || len == 13
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, author: &str, isbn: &str) -> BookDraft {
        BookDraft {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            publication_year: None,
            price: None,
        }
    }

    #[test]
    fn standard_accepts_valid_draft() {
        let mut d = draft("Dune", "Frank Herbert", "978-0-441-17271-9");
        d.publication_year = Some(1965);
        d.price = Some(9.99);
        assert_eq!(validate(RuleSet::Standard, &d), Ok(()));
    }

    #[test]
    fn empty_title_reported_before_other_violations() {
        // Both title and ISBN are bad; the title rule runs first.
        let d = draft("  ", "Frank Herbert", "123");
        assert_eq!(validate(RuleSet::Standard, &d), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn each_rule_has_a_distinct_reason() {
        let base = draft("T", "A", "1234567890");

        let d = draft("T", " ", "1234567890");
        assert_eq!(validate(RuleSet::Standard, &d), Err(ValidationError::EmptyAuthor));

        let d = draft("T", "A", "");
        assert_eq!(validate(RuleSet::Standard, &d), Err(ValidationError::EmptyIsbn));

        let d = draft("T", "A", "12345");
        assert_eq!(
            validate(RuleSet::Standard, &d),
            Err(ValidationError::BadIsbn("12345".to_string()))
        );

        let mut d = base.clone();
        d.publication_year = Some(999);
        assert_eq!(
            validate(RuleSet::Standard, &d),
            Err(ValidationError::YearOutOfRange(999))
        );

        let mut d = base.clone();
        d.publication_year = Some(2031);
        assert_eq!(
            validate(RuleSet::Standard, &d),
            Err(ValidationError::YearOutOfRange(2031))
        );

        let mut d = base;
        d.price = Some(-0.01);
        assert_eq!(
            validate(RuleSet::Standard, &d),
            Err(ValidationError::NegativePrice(-0.01))
        );
    }

    #[test]
    fn hyphenated_isbn_lengths_accepted() {
        let d = draft("T", "A", "0-306-40615-2");
        assert_eq!(validate(RuleSet::Standard, &d), Ok(()));
        let d = draft("T", "A", "9780441172719");
        assert_eq!(validate(RuleSet::Standard, &d), Ok(()));
    }

    #[test]
    fn update_rule_set_checks_nothing() {
        let d = draft("", "", "");
        assert_eq!(validate(RuleSet::Update, &d), Ok(()));
    }

    #[test]
    fn rule_set_lookup_is_case_insensitive() {
        assert_eq!(RuleSet::parse("Standard").unwrap(), RuleSet::Standard);
        assert_eq!(RuleSet::parse("STANDARD").unwrap(), RuleSet::Standard);
        assert_eq!(RuleSet::parse("update").unwrap(), RuleSet::Update);
        assert!(matches!(
            RuleSet::parse("strict"),
            Err(CatalogError::UnknownRuleSet(name)) if name == "strict"
        ));
    }
}

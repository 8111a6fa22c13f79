//! Book domain record, draft, builder, and update payload.

use serde::{Deserialize, Serialize};

use crate::types::BookId;
use crate::validate::ValidationError;

/// Fully materialized, persisted book record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    /// Stable store-assigned identifier.
    pub id: BookId,
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// ISBN, 10 or 13 digits, possibly hyphenated.
    pub isbn: String,
    /// Publication year when known.
    pub publication_year: Option<i32>,
    /// Price when known.
    pub price: Option<f64>,
}

/// Insert payload used to create a new [`BookRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// ISBN, 10 or 13 digits, possibly hyphenated.
    pub isbn: String,
    /// Publication year when known.
    pub publication_year: Option<i32>,
    /// Price when known.
    pub price: Option<f64>,
}

impl BookDraft {
    /// Starts a field-by-field builder.
    pub fn builder() -> BookDraftBuilder {
        BookDraftBuilder::default()
    }

    /// Checks that title, author, and ISBN are present after trimming.
    ///
    /// This is the field-presence gate that runs before the standard rule
    /// set; the rule set reports its own, distinct reasons.
    pub fn require_fields(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Required("title"));
        }
        if self.author.trim().is_empty() {
            return Err(ValidationError::Required("author"));
        }
        if self.isbn.trim().is_empty() {
            return Err(ValidationError::Required("isbn"));
        }
        Ok(())
    }

    /// Materializes the draft into a record under a store-assigned id.
    pub fn into_record(self, id: BookId) -> BookRecord {
        BookRecord {
            id,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            publication_year: self.publication_year,
            price: self.price,
        }
    }
}

impl From<BookRecord> for BookDraft {
    fn from(record: BookRecord) -> Self {
        Self {
            title: record.title,
            author: record.author,
            isbn: record.isbn,
            publication_year: record.publication_year,
            price: record.price,
        }
    }
}

/// Stepwise constructor for [`BookDraft`].
#[derive(Debug, Clone, Default)]
pub struct BookDraftBuilder {
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
    publication_year: Option<i32>,
    price: Option<f64>,
}

impl BookDraftBuilder {
    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the ISBN.
    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Sets the publication year.
    pub fn publication_year(mut self, year: Option<i32>) -> Self {
        self.publication_year = year;
        self
    }

    /// Sets the price.
    pub fn price(mut self, price: Option<f64>) -> Self {
        self.price = price;
        self
    }

    /// Finishes the draft, checking that required fields were supplied.
    pub fn build(self) -> Result<BookDraft, ValidationError> {
        let draft = BookDraft {
            title: self.title.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            isbn: self.isbn.unwrap_or_default(),
            publication_year: self.publication_year,
            price: self.price,
        };
        draft.require_fields()?;
        Ok(draft)
    }
}

/// Full-overwrite payload for updating an existing record.
///
/// Applying it replaces every mutable field, including clearing
/// `publication_year` and `price` when the payload omits them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdate {
    /// Replacement title.
    pub title: String,
    /// Replacement author.
    pub author: String,
    /// Replacement ISBN.
    pub isbn: String,
    /// Replacement publication year, absent to clear.
    #[serde(default)]
    pub publication_year: Option<i32>,
    /// Replacement price, absent to clear.
    #[serde(default)]
    pub price: Option<f64>,
}

impl BookUpdate {
    /// Overwrites every mutable field of `record` in place.
    pub fn apply_to(&self, record: &mut BookRecord) {
        record.title = self.title.clone();
        record.author = self.author.clone();
        record.isbn = self.isbn.clone();
        record.publication_year = self.publication_year;
        record.price = self.price;
    }

    /// Views the payload as a draft for rule-set checks.
    pub fn as_draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            publication_year: self.publication_year,
            price: self.price,
        }
    }
}

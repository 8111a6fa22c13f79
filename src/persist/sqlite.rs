//! SQLite-backed [`BookStore`].

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::book::{BookDraft, BookRecord};
use crate::persist::{BookStore, StoreError, StoreResult};
use crate::types::BookId;

const SELECT_COLUMNS: &str = "id, title, author, isbn, publication_year, price";

/// SQLite implementation of [`BookStore`].
pub struct SqliteBookStore {
    conn: Connection,
}

impl SqliteBookStore {
    /// Opens or creates a SQLite-backed store at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory SQLite store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }

    fn query_many(&self, sql: &str, param: Option<&str>) -> StoreResult<Vec<BookRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = match param {
            Some(p) => stmt.query_map(params![p], row_to_book)?,
            None => stmt.query_map([], row_to_book)?,
        };

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

impl BookStore for SqliteBookStore {
    fn find_all(&self) -> StoreResult<Vec<BookRecord>> {
        self.query_many(
            &format!("SELECT {SELECT_COLUMNS} FROM books ORDER BY id ASC"),
            None,
        )
    }

    fn find_by_id(&self, id: BookId) -> StoreResult<Option<BookRecord>> {
        let rec = self
            .conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM books WHERE id = ?1"),
                params![id],
                row_to_book,
            )
            .optional()?;
        Ok(rec)
    }

    fn find_by_isbn(&self, isbn: &str) -> StoreResult<Option<BookRecord>> {
        let rec = self
            .conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM books WHERE isbn = ?1 ORDER BY id ASC LIMIT 1"),
                params![isbn],
                row_to_book,
            )
            .optional()?;
        Ok(rec)
    }

    fn find_by_author(&self, author: &str) -> StoreResult<Vec<BookRecord>> {
        self.query_many(
            &format!("SELECT {SELECT_COLUMNS} FROM books WHERE author = ?1 ORDER BY id ASC"),
            Some(author),
        )
    }

    fn find_by_title(&self, term: &str) -> StoreResult<Vec<BookRecord>> {
        // instr() instead of LIKE: substring terms containing % or _ must
        // match literally.
        self.query_many(
            &format!(
                "SELECT {SELECT_COLUMNS} FROM books \
                 WHERE instr(lower(title), lower(?1)) > 0 ORDER BY id ASC"
            ),
            Some(term),
        )
    }

    fn insert(&mut self, draft: &BookDraft) -> StoreResult<BookRecord> {
        self.conn.execute(
            "INSERT INTO books (title, author, isbn, publication_year, price) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draft.title,
                draft.author,
                draft.isbn,
                draft.publication_year,
                draft.price,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(draft.clone().into_record(id))
    }

    fn update(&mut self, record: &BookRecord) -> StoreResult<BookRecord> {
        let changed = self.conn.execute(
            "UPDATE books SET title = ?2, author = ?3, isbn = ?4, \
             publication_year = ?5, price = ?6 WHERE id = ?1",
            params![
                record.id,
                record.title,
                record.author,
                record.isbn,
                record.publication_year,
                record.price,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::Missing(record.id));
        }
        Ok(record.clone())
    }

    fn delete_by_id(&mut self, id: BookId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::Missing(id));
        }
        Ok(())
    }
}

fn row_to_book(row: &Row<'_>) -> rusqlite::Result<BookRecord> {
    Ok(BookRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        isbn: row.get(3)?,
        publication_year: row.get(4)?,
        price: row.get(5)?,
    })
}

//! Book catalog backend with a strict-LIFO undo log over a pluggable store.
//!
//! Creates and deletes run as reversible operations through an operation
//! log; searches dispatch by kind name; writes are gated by named
//! validation rule sets. A single-writer runtime serializes all catalog
//! calls behind a cloneable handle, and an axum router exposes the HTTP
//! surface.
//!
//! # Examples
//!
//! In-memory usage with [`service::CatalogService`]:
//! ```
//! use catalogd::{book::BookDraft, core::MemoryBookStore, service::CatalogService};
//!
//! let mut catalog = CatalogService::new(Box::new(MemoryBookStore::new()));
//! let book = catalog
//!     .create(BookDraft {
//!         title: "Dune".to_string(),
//!         author: "Frank Herbert".to_string(),
//!         isbn: "978-0-441-17271-9".to_string(),
//!         publication_year: Some(1965),
//!         price: Some(9.99),
//!     })
//!     .expect("create");
//! assert_eq!(book.id, 1);
//!
//! catalog.undo_last().expect("undo");
//! assert!(catalog.all_books().expect("all").is_empty());
//! ```
//!
//! Runtime usage with the SQLite store:
//! ```no_run
//! use catalogd::{
//!     persist::sqlite::SqliteBookStore,
//!     runtime::handle::{spawn_catalog, RuntimeConfig},
//!     service::CatalogService,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = SqliteBookStore::open("catalog.db").expect("open sqlite");
//! let service = CatalogService::new(Box::new(store));
//! let handle = spawn_catalog(service, RuntimeConfig::default());
//! let book = handle
//!     .create("Dune", "Frank Herbert", "9780441172719", Some(1965), None)
//!     .await
//!     .expect("create");
//! assert!(book.id > 0);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Book domain records, drafts, and update payloads.
pub mod book;
/// In-memory store implementation.
pub mod core;
/// Crate error taxonomy.
pub mod error;
/// HTTP router, handlers, and error mapping.
pub mod http;
/// Reversible operation model.
pub mod op;
/// Strict-LIFO operation log.
pub mod oplog;
/// Store abstraction and SQLite implementation.
pub mod persist;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Search-kind lookup and dispatch.
pub mod search;
/// Catalog service orchestration.
pub mod service;
/// Shared primitive types.
pub mod types;
/// Named validation rule sets.
pub mod validate;

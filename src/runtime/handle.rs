//! Single-writer runtime loop and cloneable handle.
//!
//! Every public catalog operation runs to completion inside one task that
//! owns the [`CatalogService`], so "execute + log append" and "pop + undo"
//! are each atomic per call even under concurrent HTTP requests.

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::book::{BookRecord, BookUpdate};
use crate::error::CatalogError;
use crate::service::CatalogService;
use crate::types::BookId;

use super::events::CatalogEvent;

/// Errors surfaced through the runtime handle.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The catalog call itself failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The runtime loop is gone.
    #[error("catalog runtime channel closed")]
    ChannelClosed,
}

/// Queue sizing for the runtime loop.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Bound of the inbound command queue.
    pub command_queue_bound: usize,
    /// Capacity of the broadcast event channel.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

/// Cloneable handle to the single-writer catalog loop.
pub struct CatalogHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<CatalogEvent>,
}

impl Clone for CatalogHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    GetAll {
        resp: oneshot::Sender<Result<Vec<BookRecord>, CatalogError>>,
    },
    GetById {
        id: BookId,
        resp: oneshot::Sender<Result<Option<BookRecord>, CatalogError>>,
    },
    GetByIsbn {
        isbn: String,
        resp: oneshot::Sender<Result<Option<BookRecord>, CatalogError>>,
    },
    Search {
        search_type: String,
        term: String,
        resp: oneshot::Sender<Result<Vec<BookRecord>, CatalogError>>,
    },
    Create {
        title: String,
        author: String,
        isbn: String,
        publication_year: Option<i32>,
        price: Option<f64>,
        resp: oneshot::Sender<Result<BookRecord, CatalogError>>,
    },
    Update {
        id: BookId,
        update: BookUpdate,
        resp: oneshot::Sender<Result<BookRecord, CatalogError>>,
    },
    Delete {
        id: BookId,
        resp: oneshot::Sender<Result<(), CatalogError>>,
    },
    Undo {
        resp: oneshot::Sender<Result<(), CatalogError>>,
    },
    History {
        resp: oneshot::Sender<Vec<String>>,
    },
    ClearHistory {
        resp: oneshot::Sender<()>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Spawns the runtime loop around `service` and returns its handle.
pub fn spawn_catalog(service: CatalogService, config: RuntimeConfig) -> CatalogHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<CatalogEvent>(config.event_capacity);

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut service = service;
        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut service, &events_tx_loop) {
                break;
            }
        }
    });

    CatalogHandle { cmd_tx, events_tx }
}

fn handle_command(
    cmd: Command,
    service: &mut CatalogService,
    events_tx: &broadcast::Sender<CatalogEvent>,
) -> bool {
    match cmd {
        Command::GetAll { resp } => {
            let _ = resp.send(service.all_books());
        }
        Command::GetById { id, resp } => {
            let _ = resp.send(service.book_by_id(id));
        }
        Command::GetByIsbn { isbn, resp } => {
            let _ = resp.send(service.book_by_isbn(&isbn));
        }
        Command::Search {
            search_type,
            term,
            resp,
        } => {
            let _ = resp.send(service.search(&search_type, &term));
        }
        Command::Create {
            title,
            author,
            isbn,
            publication_year,
            price,
            resp,
        } => {
            let res = service.create_from_fields(&title, &author, &isbn, publication_year, price);
            if let Ok(rec) = &res {
                let _ = events_tx.send(CatalogEvent::Created { id: rec.id });
            }
            let _ = resp.send(res);
        }
        Command::Update { id, update, resp } => {
            let res = service.update(id, update);
            if res.is_ok() {
                let _ = events_tx.send(CatalogEvent::Updated { id });
            }
            let _ = resp.send(res);
        }
        Command::Delete { id, resp } => {
            let res = service.delete(id);
            if res.is_ok() {
                let _ = events_tx.send(CatalogEvent::Deleted { id });
            }
            let _ = resp.send(res);
        }
        Command::Undo { resp } => {
            let res = service.undo_last();
            if res.is_ok() {
                let _ = events_tx.send(CatalogEvent::UndoApplied);
            }
            let _ = resp.send(res);
        }
        Command::History { resp } => {
            let _ = resp.send(service.history());
        }
        Command::ClearHistory { resp } => {
            service.clear_history();
            let _ = events_tx.send(CatalogEvent::HistoryCleared);
            let _ = resp.send(());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}

impl CatalogHandle {
    /// Subscribes to the runtime event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events_tx.subscribe()
    }

    /// Returns every book in store order.
    pub async fn all_books(&self) -> Result<Vec<BookRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::GetAll { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        Ok(rx.await.map_err(|_| RuntimeError::ChannelClosed)??)
    }

    /// Looks up one book by identifier.
    pub async fn book_by_id(&self, id: BookId) -> Result<Option<BookRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::GetById { id, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        Ok(rx.await.map_err(|_| RuntimeError::ChannelClosed)??)
    }

    /// Looks up at most one book by exact ISBN.
    pub async fn book_by_isbn(
        &self,
        isbn: impl Into<String>,
    ) -> Result<Option<BookRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::GetByIsbn {
                isbn: isbn.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        Ok(rx.await.map_err(|_| RuntimeError::ChannelClosed)??)
    }

    /// Dispatches a lookup by search-type name.
    pub async fn search(
        &self,
        search_type: impl Into<String>,
        term: impl Into<String>,
    ) -> Result<Vec<BookRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Search {
                search_type: search_type.into(),
                term: term.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        Ok(rx.await.map_err(|_| RuntimeError::ChannelClosed)??)
    }

    /// Creates a book from individual fields.
    pub async fn create(
        &self,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        publication_year: Option<i32>,
        price: Option<f64>,
    ) -> Result<BookRecord, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Create {
                title: title.into(),
                author: author.into(),
                isbn: isbn.into(),
                publication_year,
                price,
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        Ok(rx.await.map_err(|_| RuntimeError::ChannelClosed)??)
    }

    /// Overwrites an existing book. Not undoable.
    pub async fn update(&self, id: BookId, update: BookUpdate) -> Result<BookRecord, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Update {
                id,
                update,
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        Ok(rx.await.map_err(|_| RuntimeError::ChannelClosed)??)
    }

    /// Deletes a book as an undoable operation.
    pub async fn delete(&self, id: BookId) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Delete { id, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        Ok(rx.await.map_err(|_| RuntimeError::ChannelClosed)??)
    }

    /// Undoes the most recent undoable operation.
    pub async fn undo_last(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Undo { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        Ok(rx.await.map_err(|_| RuntimeError::ChannelClosed)??)
    }

    /// Returns operation descriptions, oldest first.
    pub async fn history(&self) -> Result<Vec<String>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::History { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Discards the operation history.
    pub async fn clear_history(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ClearHistory { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Stops the runtime loop.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

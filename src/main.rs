//! `catalogd` binary entrypoint.
//!
//! Parses command-line flags, initializes logging, picks a store backend,
//! and serves the catalog HTTP API.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalogd::core::MemoryBookStore;
use catalogd::persist::BookStore;
use catalogd::persist::sqlite::SqliteBookStore;
use catalogd::runtime::handle::{RuntimeConfig, spawn_catalog};
use catalogd::service::CatalogService;

/// Book catalog HTTP service.
#[derive(Debug, Parser)]
#[command(name = "catalogd", version, about)]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: SocketAddr,

    /// SQLite database path. Omit to run with a non-persistent in-memory store.
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store: Box<dyn BookStore> = match &args.db {
        Some(path) => {
            tracing::info!(path = %path.display(), "using sqlite store");
            Box::new(SqliteBookStore::open(path)?)
        }
        None => {
            tracing::warn!("no --db given; records will not survive restarts");
            Box::new(MemoryBookStore::new())
        }
    };

    let service = CatalogService::new(store);
    let handle = spawn_catalog(service, RuntimeConfig::default());
    let app = catalogd::http::router(handle);

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    tracing::info!(listen = %args.listen, "catalogd listening");
    axum::serve(listener, app).await?;
    Ok(())
}

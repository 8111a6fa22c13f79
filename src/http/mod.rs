//! HTTP surface: router, handlers, and error mapping.

pub mod error;
pub mod routes;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::runtime::handle::CatalogHandle;

/// Builds the catalog router over a runtime handle.
pub fn router(handle: CatalogHandle) -> Router {
    routes::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(handle)
}

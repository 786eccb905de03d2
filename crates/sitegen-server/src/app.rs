//! Router construction.

use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create a router serving `root` verbatim.
///
/// Directory requests resolve to their `index.html`; anything missing is a
/// 404.
pub(crate) fn create_router(root: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
}

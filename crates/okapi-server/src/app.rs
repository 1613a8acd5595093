use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use okapi_index::Indexer;

use crate::handlers::{
    handle_document, handle_index_reserved, handle_not_found, handle_query, handle_statistics,
    AppState,
};

/// Build the full router over a shared, already-built [`Indexer`].
pub fn build_router(indexer: Arc<Indexer>) -> Router {
    let state: AppState = indexer;

    Router::new()
        .route("/query", post(handle_query))
        .route("/document/{docid}", get(handle_document))
        .route("/statistics", get(handle_statistics))
        .route("/index", post(handle_index_reserved))
        .fallback(handle_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use okapi_core::{tokenise, DocId};
use okapi_index::Indexer;
use okapi_query::query;

use crate::error::AppError;

pub type AppState = Arc<Indexer>;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResultEntry {
    pub docid: DocId,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub results: Vec<QueryResultEntry>,
}

/// `POST /query` — tokenise the request body's `query` string and return
/// BM25-ranked results, sorted descending by score. A missing or malformed
/// `query` field is caught here as a `JsonRejection` rather than left to
/// axum's default handling, so the 400 still carries a JSON
/// `{"error": "..."}` body instead of axum's plain-text rejection message.
pub async fn handle_query(
    State(indexer): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let terms = tokenise(&body.query);
    let avg = indexer.avg_doc_length_f64();
    let scored = query(&terms, indexer.documents(), avg);

    let results = scored
        .into_iter()
        .map(|s| QueryResultEntry {
            docid: s.docid,
            score: s.score,
        })
        .collect();

    Ok(Json(QueryResponse { results }))
}

/// `GET /document/{docid}` — the document's JSON serialisation, or 404.
pub async fn handle_document(
    State(indexer): State<AppState>,
    Path(docid_text): Path<String>,
) -> Result<Json<okapi_core::Document>, AppError> {
    let docid: u64 = docid_text
        .parse()
        .map_err(|_| AppError::NotFound(format!("invalid document id '{docid_text}'")))?;

    let doc = indexer.get_document(DocId(docid))?;
    Ok(Json(doc.clone()))
}

#[derive(Debug, Serialize)]
pub struct Statistics {
    #[serde(rename = "Document_count")]
    pub document_count: usize,
    #[serde(rename = "Total_term_count")]
    pub total_term_count: u64,
    #[serde(rename = "Average_document_length")]
    pub average_document_length: u64,
}

/// `GET /statistics` — corpus-wide counters.
pub async fn handle_statistics(State(indexer): State<AppState>) -> Json<Statistics> {
    Json(Statistics {
        document_count: indexer.document_count(),
        total_term_count: indexer.total_term_count(),
        average_document_length: indexer.avg_doc_length(),
    })
}

/// `POST /index` — reserved for future on-demand (re)indexing.
pub async fn handle_index_reserved() -> impl IntoResponse {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({ "error": "not implemented" })),
    )
}

/// Fallback for any unmatched route.
pub async fn handle_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 Not Found")
}

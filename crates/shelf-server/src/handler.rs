use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use shelf_store::{CatalogStore, StoreResult};
use shelf_types::{BookId, CatalogEntry};

use crate::error::ApiError;
use crate::router::AppState;

/// Health check response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
        }
    }
}

/// Health check handler. Never touches the store.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

pub async fn list_books_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    let books = with_store(state.store, |store| store.list_all()).await?;
    Ok(Json(books))
}

/// Fetch one book. A segment that is not a base-10 integer, including one
/// that does not percent-decode to UTF-8, is an invalid id.
pub async fn get_book_handler(
    State(state): State<AppState>,
    raw: Result<Path<String>, PathRejection>,
) -> Result<Json<CatalogEntry>, ApiError> {
    let Path(raw) = raw.map_err(|_| ApiError::InvalidId)?;
    let id: BookId = raw.parse().map_err(|_| ApiError::InvalidId)?;
    with_store(state.store, move |store| store.get_by_id(id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `/api/books/` with nothing after the slash: an empty id.
pub async fn empty_id_handler() -> ApiError {
    ApiError::InvalidId
}

/// Catch-all for unmatched paths.
pub async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Run a store call on the blocking pool; SQLite calls are synchronous.
async fn with_store<T, F>(store: Arc<dyn CatalogStore>, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn CatalogStore) -> StoreResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

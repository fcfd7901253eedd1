use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use shelf_store::CatalogStore;
use tower_http::trace::TraceLayer;

use crate::handler;

/// HTTP endpoint paths served by every worker.
pub mod endpoints {
    pub const HEALTH: &str = "/api/health";
    pub const BOOKS: &str = "/api/books";
    pub const BOOK: &str = "/api/books/:id";
    pub const BOOK_EMPTY_ID: &str = "/api/books/";
}

/// Shared handler state: the worker's single catalog handle.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

/// Build the axum router with all catalog endpoints.
pub fn build_router(store: Arc<dyn CatalogStore>) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(endpoints::BOOKS, get(handler::list_books_handler))
        .route(endpoints::BOOK, get(handler::get_book_handler))
        .route(endpoints::BOOK_EMPTY_ID, get(handler::empty_id_handler))
        .fallback(handler::not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(store))
}

/// Application routes configuration
use crate::handlers::{health, previous_page, upcoming_page, AppState};
use axum::{routing::get, Router};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Dashboard pages
        .route("/", get(upcoming_page))
        .route("/previous", get(previous_page))
        .with_state(state)
}

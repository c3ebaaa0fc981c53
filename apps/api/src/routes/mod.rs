pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::candidates::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/upload", post(handlers::handle_upload))
        .route("/uploads/:filename", get(handlers::handle_get_upload))
        .route("/api/v1/candidates/:id", get(handlers::handle_get_candidate))
        .with_state(state)
}

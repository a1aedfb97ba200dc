pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;
use crate::ui::handlers as ui;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Single-page form
        .route("/", get(ui::handle_index).post(ui::handle_submit))
        // JSON API
        .route("/api/v1/evaluate", post(handlers::handle_evaluate))
        .with_state(state)
}

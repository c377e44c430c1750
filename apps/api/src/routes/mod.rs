pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers::handle_evaluate;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index_handler))
        .route("/health", get(health::health_handler))
        .route("/evaluate", post(handle_evaluate))
        .with_state(state)
}

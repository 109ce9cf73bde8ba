pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/ideas", post(handlers::handle_generate_ideas))
        .route("/api/v1/env-check", get(handlers::handle_env_check))
        .with_state(state)
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Recommendation API
        .route(
            "/api/v1/recommendations",
            post(handlers::handle_recommend),
        )
        // Career registry
        .route("/api/v1/careers", get(handlers::handle_list_careers))
        .route("/api/v1/careers/:title", get(handlers::handle_get_career))
        .route(
            "/api/v1/careers/:title/score",
            post(handlers::handle_score_career),
        )
        .route(
            "/api/v1/careers/reload",
            post(handlers::handle_reload_registry),
        )
        .with_state(state)
}

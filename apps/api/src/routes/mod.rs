pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::societal::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/societal/recommend",
            post(handlers::handle_recommend),
        )
        .route(
            "/api/v1/societal/recommend/responses",
            post(handlers::handle_recommend_responses),
        )
        .route(
            "/api/v1/societal/analyses/:id",
            get(handlers::handle_get_analysis),
        )
        .with_state(state)
}

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Creates all API routes with state
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/config",
            get(handlers::get_config).post(handlers::update_config),
        )
        .route("/config/reload", post(handlers::reload_config))
        .route("/server", get(handlers::get_server_status))
        .with_state(state)
}

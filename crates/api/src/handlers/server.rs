use crate::{dto::ServerStatusResponse, state::AppState};
use axum::{extract::State, Json};
use tracing::instrument;

#[instrument(skip(state), name = "api_get_server_status")]
pub async fn get_server_status(State(state): State<AppState>) -> Json<ServerStatusResponse> {
    Json(ServerStatusResponse::from(state.listener.status().await))
}

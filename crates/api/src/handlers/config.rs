use crate::{dto::RulesDto, errors::ApiError, state::AppState};
use axum::{extract::State, Json};
use ruledns_domain::RuleSet;
use tracing::{debug, info, instrument, warn};

pub const UPDATE_CONFIRMATION: &str = "Config Applied and DNS Restarted";

#[instrument(skip(state), name = "api_get_config")]
pub async fn get_config(State(state): State<AppState>) -> Json<RulesDto> {
    let rules = state.get_rules.execute().await;
    Json(RulesDto::from(rules.as_ref()))
}

#[instrument(skip(state, request), name = "api_update_config")]
pub async fn update_config(
    State(state): State<AppState>,
    Json(request): Json<RulesDto>,
) -> Result<&'static str, ApiError> {
    debug!(port = request.port, upstream = %request.upstream, "Updating configuration");

    let rules = RuleSet::try_from(request).map_err(|e| {
        warn!(error = %e, "Rejected configuration update");
        e
    })?;

    let applied = state.update_rules.execute(rules).await?;
    info!(port = applied.port, upstream = %applied.upstream, "Configuration updated");

    Ok(UPDATE_CONFIRMATION)
}

#[instrument(skip(state), name = "api_reload_config")]
pub async fn reload_config(State(state): State<AppState>) -> Result<Json<RulesDto>, ApiError> {
    let applied = state.reload_rules.execute().await?;
    info!(port = applied.port, "Configuration reloaded from disk");
    Ok(Json(RulesDto::from(applied.as_ref())))
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ruledns_domain::DomainError;
use serde_json::json;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = if self.0.is_validation() {
            (StatusCode::BAD_REQUEST, self.0.to_string())
        } else {
            match &self.0 {
                DomainError::IoError(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("failed to persist configuration: {}", self.0),
                ),
                DomainError::RulesLoadFailed(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("failed to load configuration: {}", self.0),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                ),
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

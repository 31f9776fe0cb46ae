use super::models::HealthCheck;
use super::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use tracing::debug;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .with_state(state.clone())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (
            status = OK,
            description = "Service health check",
            body = HealthCheck,
            content_type = "application/json"
        )
    )
)]
pub async fn health_check(State(app_state): State<AppState>) -> (StatusCode, Json<HealthCheck>) {
    let now = chrono::Utc::now();
    debug!(
        timestamp = %now.format("%Y-%m-%d %H:%M:%S"),
        endpoint = "health",
        deployment = %app_state.config.deployment,
        models = app_state.registry.model_names().len(),
        "Health check"
    );
    (
        StatusCode::OK,
        Json(HealthCheck {
            status: "ok".to_string(),
            message: "API is running".to_string(),
        }),
    )
}

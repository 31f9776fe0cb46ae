use super::utils::{RecommendError, parse_recommend_body};
use crate::common::state::AppState;
use crate::crops::{CropInput, ErrorResponse, ModelsResponse, RecommendResponse};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::info;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(get_models))
        .routes(routes!(recommend_crops))
        .with_state(state.clone())
}

#[utoipa::path(
    get,
    path = "/models",
    responses(
        (status = 200, description = "Registered model names", body = ModelsResponse)
    ),
    summary = "List available models",
    description = "Names accepted in the `model` field of a recommend request"
)]
pub async fn get_models(State(app_state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: app_state.registry.model_names(),
    })
}

#[utoipa::path(
    post,
    path = "/recommend",
    request_body(
        content = CropInput,
        description = "Soil and climate measurements, plus an optional `model` name"
    ),
    responses(
        (status = 200, description = "Ranked crop recommendations", body = RecommendResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse)
    ),
    summary = "Recommend crops",
    description = "Ranks crops for the given measurements. If the selected model fails, \
                   rule-based recommendations are returned under the requested model name"
)]
pub async fn recommend_crops(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            return RecommendError::MalformedBody(rejection.body_text()).into_response();
        }
    };

    let (input, model) = match parse_recommend_body(&body) {
        Ok(parsed) => parsed,
        Err(e) => {
            info!(error = %e, "Rejected recommend request");
            return e.into_response();
        }
    };
    let model_name = model.unwrap_or_else(|| app_state.config.default_model.clone());

    let recommendations = app_state.registry.recommend(&input, &model_name);
    info!(
        model = %model_name,
        top = recommendations.first().map(|r| r.crop_name.as_str()).unwrap_or(""),
        "Served recommendations"
    );
    (
        StatusCode::OK,
        Json(RecommendResponse {
            recommendations,
            model_used: Some(model_name),
            error: None,
            message: None,
        }),
    )
        .into_response()
}

pub mod recommend;

use crate::common::state::AppState;
use crate::config::Config;
use crate::scoring::ModelRegistry;
use axum::Router;
use http::{Method, header};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

pub fn build_router(config: &Config, registry: ModelRegistry) -> Router {
    #[derive(OpenApi)]
    #[openapi(info(
        title = "Cropwise API",
        description = "Crop recommendations from soil and climate measurements"
    ))]
    struct ApiDoc;

    if registry.is_empty() {
        info!("No classifiers registered, recommendations come from knowledge rules");
    }
    let app_state = AppState::new(config.clone(), registry);

    let api_routes = OpenApiRouter::new()
        .merge(crate::common::views::router(&app_state))
        .merge(recommend::views::router(&app_state));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", api_routes)
        .split_for_parts();

    router
        .merge(Scalar::with_url("/api/docs", api))
        .layer(cors_layer())
}

/// Any origin may call the API from a browser form.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub mod api;
pub mod config;
pub mod models;
pub mod services;

use crate::config::ServerConfig;
use crate::services::grid_tool::GridTool;
use crate::services::storage::GridStore;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::grids::upload_src,
        api::handlers::grids::upload_trg,
        api::handlers::grids::src_grid_stats,
        api::handlers::grids::sln_transfer,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "grids", description = "Grid upload and transfer endpoints"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<GridStore>,
    pub tool: Arc<dyn GridTool>,
    pub config: ServerConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/uploadSrc", post(api::handlers::grids::upload_src))
        .route("/uploadTrg", post(api::handlers::grids::upload_trg))
        .route("/srcGrdStats", get(api::handlers::grids::src_grid_stats))
        .route("/slnTransfer", get(api::handlers::grids::sln_transfer))
        .fallback_service(ServeDir::new(&state.config.public_dir))
        .layer(DefaultBodyLimit::max(state.config.max_upload_size))
        .with_state(state)
}

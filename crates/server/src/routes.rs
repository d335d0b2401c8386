use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod categories;
pub mod uploads;

/// Upper bound for one uploaded image.
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Category routes plus health and docs; stateless layers applied by the caller.
pub fn api_router(state: AppState) -> Router {
    let categories = Router::new()
        .route("/service-categories", post(categories::create).get(categories::list))
        .route("/service-categories/roots", get(categories::roots))
        .route("/service-categories/tree", get(categories::tree))
        .route("/service-categories/statistics", get(categories::statistics))
        .route(
            "/service-categories/images",
            post(uploads::upload_image).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES)),
        )
        .route(
            "/service-categories/:id",
            get(categories::get).patch(categories::update).delete(categories::delete),
        )
        .route("/service-categories/:id/with-children", get(categories::with_children))
        .route("/service-categories/:id/services", get(categories::services))
        .route(
            "/service-categories/:id/move",
            post(categories::move_category).patch(categories::move_by_query),
        );

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(categories)
        .with_state(state)
}

/// Build the full application router: API, uploaded files, CORS and tracing.
pub fn build_router(state: AppState, cors: CorsLayer, uploads: &configs::UploadConfig) -> Router {
    api_router(state)
        .nest_service(&uploads.public_prefix, ServeDir::new(&uploads.dir))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::constants::ASSETS_ROUTE;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let config = &state.config;
    let video_limit = config.max_video_upload_bytes();
    let thumbnail_limit = config.max_thumbnail_upload_bytes();

    tracing::info!(
        max_video_mb = video_limit / 1024 / 1024,
        max_thumbnail_mb = thumbnail_limit / 1024 / 1024,
        assets_root = %config.assets_root().display(),
        "Upload limits configured"
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    // RequestBodyLimitLayer is the only cap. Stacking axum's own limit on top nests the
    // length error so the multipart extractor can no longer report it as 413.
    let api_routes = Router::new()
        .route(
            "/api/video_upload/{video_id}",
            post(handlers::video_upload::upload_video)
                .layer::<_, std::convert::Infallible>(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(video_limit)),
        )
        .route(
            "/api/thumbnail_upload/{video_id}",
            post(handlers::thumbnail_upload::upload_thumbnail)
                .layer::<_, std::convert::Infallible>(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(thumbnail_limit)),
        )
        .with_state(state.clone());

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/openapi.json",
            get(|| async {
                use utoipa::OpenApi;
                Json(crate::api_doc::ApiDoc::openapi())
            }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .merge(api_routes)
        .nest_service(ASSETS_ROUTE, ServeDir::new(state.config.assets_root()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

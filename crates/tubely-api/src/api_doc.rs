//! OpenAPI documentation, served as JSON at `/api/openapi.json` and browsable at `/docs`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::Components;
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use tubely_core::models;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::new);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tubely API",
        version = "0.1.0",
        description = "Video upload service. Uploaded MP4s are remuxed for progressive playback, classified by orientation and published behind a CDN."
    ),
    paths(
        handlers::video_upload::upload_video,
        handlers::thumbnail_upload::upload_thumbnail,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::VideoResponse,
            models::OrientationClass,
            handlers::health::HealthResponse,
            error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "videos", description = "Video and thumbnail uploads"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_upload_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/video_upload/{video_id}"));
        assert!(doc
            .paths
            .paths
            .contains_key("/api/thumbnail_upload/{video_id}"));
        assert!(doc
            .components
            .unwrap()
            .security_schemes
            .contains_key("bearer_auth"));
    }

    #[test]
    fn test_upload_routes_document_failure_statuses() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/video_upload/{video_id}",
            "/api/thumbnail_upload/{video_id}",
        ] {
            let operation = doc.paths.paths[path].post.as_ref().unwrap();
            for status in ["400", "401", "403", "404", "413", "500"] {
                assert!(
                    operation.responses.responses.contains_key(status),
                    "{} is missing a {} response",
                    path,
                    status
                );
            }
        }
    }
}

use crate::auth;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use tubely_core::VideoResponse;

#[utoipa::path(
    post,
    path = "/api/video_upload/{video_id}",
    tag = "videos",
    params(
        ("video_id" = String, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form field 'video' holding an MP4 file"),
    responses(
        (status = 200, description = "Video processed and published", body = VideoResponse),
        (status = 400, description = "Invalid ID, missing field or wrong media type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 500, description = "Processing, storage or database failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, headers, multipart), fields(video_id = %video_id, user_id = tracing::field::Empty))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = auth::parse_video_id(&video_id)?;
    let user_id = auth::authenticate(&headers, state.config.jwt_secret())?;
    tracing::Span::current().record("user_id", tracing::field::display(user_id));

    let video = auth::authorize_video_owner(state.videos.as_ref(), video_id, user_id).await?;

    let mut multipart = multipart?;
    let video = state.video_uploads.upload(video, &mut multipart).await?;

    Ok(Json(VideoResponse::from(video)))
}

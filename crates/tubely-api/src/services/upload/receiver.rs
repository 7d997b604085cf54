//! Multipart field extraction and scratch staging

use crate::error::multipart_error;
use axum::extract::multipart::Field;
use axum::extract::Multipart;
use bytes::Bytes;
use std::path::Path;
use tempfile::TempPath;
use tokio::io::{AsyncWriteExt, BufWriter};
use tubely_core::constants::{THUMBNAIL_CONTENT_TYPES, THUMBNAIL_FIELD, VIDEO_FIELD, VIDEO_MP4};
use tubely_core::AppError;

/// Normalize MIME type by stripping parameters (e.g. "video/mp4; codecs=avc1" -> "video/mp4").
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Validate a declared content type against an allowlist and return its normalized form.
pub fn validate_content_type(
    content_type: Option<&str>,
    allowed: &[&str],
) -> Result<String, AppError> {
    let normalized = content_type.map(normalize_content_type).unwrap_or_default();
    if !allowed.contains(&normalized.as_str()) {
        return Err(AppError::InvalidInput(format!(
            "Invalid file type. Allowed types: {}",
            allowed.join(", ")
        )));
    }
    Ok(normalized)
}

/// Stream `field` into a fresh scratch file under `scratch_dir`.
///
/// The returned `TempPath` removes the file when dropped; on error the partial file
/// is removed before returning.
pub async fn stage_field(
    mut field: Field<'_>,
    scratch_dir: &Path,
) -> Result<(TempPath, u64), AppError> {
    let scratch = tempfile::Builder::new()
        .prefix("tubely-upload")
        .suffix(".mp4")
        .tempfile_in(scratch_dir)
        .map_err(|e| AppError::Internal(format!("Couldn't create scratch file: {}", e)))?;
    let (file, path) = scratch.into_parts();

    let mut writer = BufWriter::new(tokio::fs::File::from_std(file));
    let mut size: u64 = 0;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        writer.write_all(&chunk).await?;
        size += chunk.len() as u64;
    }
    writer.flush().await?;

    Ok((path, size))
}

/// Find the `video` field, check it is an MP4 and stage it to scratch.
///
/// The content type is checked before any file is created.
pub async fn receive_video(
    multipart: &mut Multipart,
    scratch_dir: &Path,
) -> Result<(TempPath, u64), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        validate_content_type(field.content_type(), &[VIDEO_MP4])?;
        return stage_field(field, scratch_dir).await;
    }

    Err(AppError::InvalidInput(format!(
        "Missing form field '{}'",
        VIDEO_FIELD
    )))
}

/// Find the `thumbnail` field and read it whole. Returns the bytes and the file
/// extension implied by the content type.
pub async fn receive_thumbnail(multipart: &mut Multipart) -> Result<(Bytes, String), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }

        let content_type = validate_content_type(field.content_type(), THUMBNAIL_CONTENT_TYPES)?;
        let extension = content_type
            .split_once('/')
            .map(|(_, subtype)| subtype.to_string())
            .unwrap_or(content_type);

        let data = field.bytes().await.map_err(multipart_error)?;
        return Ok((data, extension));
    }

    Err(AppError::InvalidInput(format!(
        "Missing form field '{}'",
        THUMBNAIL_FIELD
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_content_type() {
        assert_eq!(normalize_content_type("video/mp4"), "video/mp4");
        assert_eq!(
            normalize_content_type("Video/MP4; codecs=\"avc1\""),
            "video/mp4"
        );
        assert_eq!(normalize_content_type(" image/png "), "image/png");
    }

    #[test]
    fn test_validate_content_type() {
        assert_eq!(
            validate_content_type(Some("video/mp4"), &[VIDEO_MP4]).unwrap(),
            "video/mp4"
        );
        for rejected in [Some("video/quicktime"), Some("video/mp4x"), Some(""), None] {
            let err = validate_content_type(rejected, &[VIDEO_MP4]).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }
        assert_eq!(
            validate_content_type(Some("image/jpeg"), THUMBNAIL_CONTENT_TYPES).unwrap(),
            "image/jpeg"
        );
        assert!(validate_content_type(Some("image/gif"), THUMBNAIL_CONTENT_TYPES).is_err());
    }
}

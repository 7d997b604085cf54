use super::receiver;
use axum::extract::Multipart;
use bytes::Bytes;
use std::sync::Arc;
use tubely_core::{AppError, Video};
use tubely_db::VideoRepository;
use tubely_storage::{AssetStorage, TokenGenerator};

/// Stores thumbnails in the local asset directory and links them from the record.
pub struct ThumbnailUploadService {
    assets: Arc<dyn AssetStorage>,
    tokens: Arc<dyn TokenGenerator>,
    videos: Arc<dyn VideoRepository>,
}

impl ThumbnailUploadService {
    pub fn new(
        assets: Arc<dyn AssetStorage>,
        tokens: Arc<dyn TokenGenerator>,
        videos: Arc<dyn VideoRepository>,
    ) -> Self {
        Self {
            assets,
            tokens,
            videos,
        }
    }

    /// Read the `thumbnail` field and attach it to an already authorized `video`.
    pub async fn upload(&self, video: Video, multipart: &mut Multipart) -> Result<Video, AppError> {
        let (data, extension) = receiver::receive_thumbnail(multipart).await?;
        self.store(video, data, &extension).await
    }

    /// Save `data` as `<token>.<extension>` and point `thumbnail_url` at it. The asset
    /// is removed again if the record cannot be updated.
    pub async fn store(
        &self,
        mut video: Video,
        data: Bytes,
        extension: &str,
    ) -> Result<Video, AppError> {
        let file_name = format!("{}.{}", self.tokens.generate(), extension);
        let size = data.len();
        let url = self.assets.save(&file_name, data).await?;

        video.thumbnail_url = Some(url);
        if let Err(e) = self.videos.update_video(&video).await {
            if let Err(cleanup) = self.assets.delete(&file_name).await {
                tracing::warn!(
                    error = %cleanup,
                    file_name = %file_name,
                    "Failed to remove orphaned thumbnail"
                );
            }
            return Err(e);
        }

        tracing::info!(
            video_id = %video.id,
            file_name = %file_name,
            size_bytes = size,
            "Thumbnail stored"
        );

        Ok(video)
    }
}

use async_trait::async_trait;
use tubely_core::{AppError, Video};
use uuid::Uuid;

/// Read and overwrite access to video records.
///
/// `update_video` replaces every column of the stored row with the given record.
/// There is no version check: two concurrent uploads against the same video both
/// succeed and the later write wins, including for the locator it did not touch.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    async fn update_video(&self, video: &Video) -> Result<(), AppError>;
}

//! Repository doubles for tests

use crate::memory::InMemoryVideoRepository;
use crate::repository::VideoRepository;
use async_trait::async_trait;
use tubely_core::{AppError, Video};
use uuid::Uuid;

/// Reads from an in-memory map; every write fails.
#[derive(Default)]
pub struct ReadOnlyVideoRepository {
    inner: InMemoryVideoRepository,
}

impl ReadOnlyVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, video: Video) {
        self.inner.insert(video).await;
    }
}

#[async_trait]
impl VideoRepository for ReadOnlyVideoRepository {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        self.inner.get_video(id).await
    }

    async fn update_video(&self, _video: &Video) -> Result<(), AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }
}

//! Application state shared by all handlers.

use crate::services::upload::{ThumbnailUploadService, VideoUploadService};
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;

pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoRepository>,
    pub video_uploads: VideoUploadService,
    pub thumbnail_uploads: ThumbnailUploadService,
}

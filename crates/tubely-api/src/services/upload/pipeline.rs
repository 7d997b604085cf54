//! Video upload pipeline
//!
//! Received -> Staged -> Remuxed -> Probed -> Classified -> Published -> Persisted.
//! Every stage is terminal on failure. The `UploadSession` owns all scratch files,
//! so returning from any stage (or dropping the future) leaves none behind.

use super::receiver;
use super::session::{PipelineStage, UploadSession};
use axum::extract::Multipart;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempPath;
use tubely_core::constants::VIDEO_MP4;
use tubely_core::{AppError, OrientationClass, Video};
use tubely_db::VideoRepository;
use tubely_processing::{faststart_output_path, MediaToolkit};
use tubely_storage::{ObjectKey, ObjectStorage, TokenGenerator};

pub struct VideoUploadService {
    toolkit: Arc<dyn MediaToolkit>,
    storage: Arc<dyn ObjectStorage>,
    tokens: Arc<dyn TokenGenerator>,
    videos: Arc<dyn VideoRepository>,
    scratch_dir: PathBuf,
}

impl VideoUploadService {
    pub fn new(
        toolkit: Arc<dyn MediaToolkit>,
        storage: Arc<dyn ObjectStorage>,
        tokens: Arc<dyn TokenGenerator>,
        videos: Arc<dyn VideoRepository>,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            toolkit,
            storage,
            tokens,
            videos,
            scratch_dir,
        }
    }

    /// Run the whole pipeline for an already authorized `video`.
    pub async fn upload(&self, video: Video, multipart: &mut Multipart) -> Result<Video, AppError> {
        let mut session = UploadSession::new(video.id);

        let result = async {
            let start = Instant::now();
            let (raw, size) = receiver::receive_video(multipart, &self.scratch_dir).await?;
            tracing::info!(
                video_id = %video.id,
                size_bytes = size,
                duration_ms = start.elapsed().as_millis(),
                "Upload staged"
            );
            session.stage_raw(raw);
            self.process(&mut session, video).await
        }
        .await;

        if let Err(ref e) = result {
            session.fail(e);
        }
        result
    }

    /// Remux, probe, classify, publish and persist a staged upload.
    pub async fn process(
        &self,
        session: &mut UploadSession,
        mut video: Video,
    ) -> Result<Video, AppError> {
        let raw = session.raw_path()?.to_path_buf();

        let output = faststart_output_path(&raw);
        session.register_processed(TempPath::from_path(&output));
        self.toolkit.remux_faststart(&raw, &output).await?;
        session.advance(PipelineStage::Remuxed);

        let probe = self.toolkit.probe(&output).await?;
        session.advance(PipelineStage::Probed);

        let orientation = OrientationClass::from_aspect_ratio(&probe.display_aspect_ratio);
        tracing::info!(
            video_id = %video.id,
            width = probe.coded_width,
            height = probe.coded_height,
            aspect_ratio = %probe.display_aspect_ratio,
            orientation = %orientation,
            "Video classified"
        );
        session.advance(PipelineStage::Classified);

        let key = ObjectKey::new(orientation, &self.tokens.generate());
        let url = self
            .storage
            .put_file(&key, session.processed_path()?, VIDEO_MP4)
            .await?;
        session.advance(PipelineStage::Published);

        video.video_url = Some(url);
        self.videos.update_video(&video).await?;
        session.advance(PipelineStage::Persisted);

        tracing::info!(
            video_id = %video.id,
            key = %key,
            "Video published"
        );

        Ok(video)
    }
}

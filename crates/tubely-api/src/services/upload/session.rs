use std::fmt;
use std::path::Path;
use tempfile::TempPath;
use tubely_core::AppError;
use uuid::Uuid;

/// Position of an upload in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Staged,
    Remuxed,
    Probed,
    Classified,
    Published,
    Persisted,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Received => "received",
            PipelineStage::Staged => "staged",
            PipelineStage::Remuxed => "remuxed",
            PipelineStage::Probed => "probed",
            PipelineStage::Classified => "classified",
            PipelineStage::Published => "published",
            PipelineStage::Persisted => "persisted",
            PipelineStage::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request-scoped state of one video upload.
///
/// Owns the scratch copy of the upload and its remuxed derivative. Both are
/// `TempPath`s, so dropping the session unlinks them whatever stage it reached.
pub struct UploadSession {
    video_id: Uuid,
    stage: PipelineStage,
    raw: Option<TempPath>,
    processed: Option<TempPath>,
}

impl UploadSession {
    pub fn new(video_id: Uuid) -> Self {
        Self {
            video_id,
            stage: PipelineStage::Received,
            raw: None,
            processed: None,
        }
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn advance(&mut self, stage: PipelineStage) {
        tracing::debug!(video_id = %self.video_id, from = %self.stage, to = %stage, "Upload stage");
        self.stage = stage;
    }

    /// Take ownership of the staged upload.
    pub fn stage_raw(&mut self, path: TempPath) {
        self.raw = Some(path);
        self.advance(PipelineStage::Staged);
    }

    /// Take ownership of the remux output path before anything is written to it.
    pub fn register_processed(&mut self, path: TempPath) {
        self.processed = Some(path);
    }

    pub fn raw_path(&self) -> Result<&Path, AppError> {
        self.raw
            .as_deref()
            .ok_or_else(|| AppError::Internal("Upload has not been staged".to_string()))
    }

    pub fn processed_path(&self) -> Result<&Path, AppError> {
        self.processed
            .as_deref()
            .ok_or_else(|| AppError::Internal("Upload has not been remuxed".to_string()))
    }

    /// Record a failure at the current stage.
    pub fn fail(&mut self, error: &AppError) {
        tracing::warn!(
            video_id = %self.video_id,
            stage = %self.stage,
            error = %error,
            "Video upload failed"
        );
        self.stage = PipelineStage::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_removes_scratch_files() {
        let dir = tempfile::tempdir().unwrap();
        let raw = tempfile::Builder::new()
            .prefix("tubely-upload")
            .suffix(".mp4")
            .tempfile_in(dir.path())
            .unwrap()
            .into_temp_path();
        let processed_path = dir.path().join("out.processing");
        std::fs::write(&processed_path, b"partial").unwrap();

        let mut session = UploadSession::new(Uuid::new_v4());
        session.stage_raw(raw);
        session.register_processed(TempPath::from_path(&processed_path));
        assert_eq!(session.stage(), PipelineStage::Staged);
        assert!(session.raw_path().unwrap().exists());

        drop(session);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unregistered_output_path_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = UploadSession::new(Uuid::new_v4());
        // Registered but never written, e.g. when the remux tool fails to spawn.
        session.register_processed(TempPath::from_path(dir.path().join("never-written")));
        drop(session);
    }

    #[test]
    fn test_fail_marks_stage() {
        let mut session = UploadSession::new(Uuid::new_v4());
        session.advance(PipelineStage::Remuxed);
        session.fail(&AppError::Processing("no streams found".to_string()));
        assert_eq!(session.stage(), PipelineStage::Failed);
        assert!(session.raw_path().is_err());
    }
}

use crate::error::ProcessingResult;
use crate::probe::StreamProbeResult;
use async_trait::async_trait;
use std::path::Path;

/// External media toolkit used by the upload pipeline.
#[async_trait]
pub trait MediaToolkit: Send + Sync {
    /// Copy every stream of `input` into a new MP4 at `output` with the index moved to
    /// the front. No re-encoding. `output` is overwritten if present.
    ///
    /// On failure `output` may hold partial data; the caller owns its removal.
    async fn remux_faststart(&self, input: &Path, output: &Path) -> ProcessingResult<()>;

    /// Descriptor of the first stream in `path`. Fails with
    /// `ProcessingError::NoStreams` when the container has none.
    async fn probe(&self, path: &Path) -> ProcessingResult<StreamProbeResult>;
}

//! Scripted toolkit for tests
//!
//! `FakeToolkit` never spawns a process. Remuxing copies the input byte for byte and
//! probing returns whatever descriptor the test configured.

use crate::error::{ProcessingError, ProcessingResult};
use crate::probe::StreamProbeResult;
use crate::traits::MediaToolkit;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum ProbeScript {
    Stream(StreamProbeResult),
    NoStreams,
}

pub struct FakeToolkit {
    probe: ProbeScript,
    fail_remux: bool,
    remuxed: Mutex<Vec<PathBuf>>,
    probed: Mutex<Vec<PathBuf>>,
}

impl FakeToolkit {
    fn with_probe(probe: ProbeScript) -> Self {
        Self {
            probe,
            fail_remux: false,
            remuxed: Mutex::new(Vec::new()),
            probed: Mutex::new(Vec::new()),
        }
    }

    /// Toolkit whose probe reports a single stream with the given geometry.
    pub fn with_stream(coded_width: u32, coded_height: u32, aspect_ratio: &str) -> Self {
        Self::with_probe(ProbeScript::Stream(StreamProbeResult {
            coded_width,
            coded_height,
            display_aspect_ratio: aspect_ratio.to_string(),
        }))
    }

    pub fn landscape() -> Self {
        Self::with_stream(1920, 1080, "16:9")
    }

    pub fn portrait() -> Self {
        Self::with_stream(1080, 1920, "9:16")
    }

    /// Toolkit whose probe finds a container with zero streams.
    pub fn no_streams() -> Self {
        Self::with_probe(ProbeScript::NoStreams)
    }

    /// Remux writes a partial output and then fails.
    pub fn failing_remux(mut self) -> Self {
        self.fail_remux = true;
        self
    }

    /// Output paths passed to `remux_faststart`, in call order.
    pub fn remuxed_outputs(&self) -> Vec<PathBuf> {
        self.remuxed.lock().unwrap().clone()
    }

    /// Paths passed to `probe`, in call order.
    pub fn probed_paths(&self) -> Vec<PathBuf> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaToolkit for FakeToolkit {
    async fn remux_faststart(&self, input: &Path, output: &Path) -> ProcessingResult<()> {
        self.remuxed.lock().unwrap().push(output.to_path_buf());

        if self.fail_remux {
            tokio::fs::write(output, b"partial").await.map_err(|source| {
                ProcessingError::Spawn {
                    tool: "ffmpeg",
                    source,
                }
            })?;
            return Err(ProcessingError::ToolFailed {
                tool: "ffmpeg",
                status: "exit status: 1".to_string(),
                stderr: "moov atom not found".to_string(),
            });
        }

        tokio::fs::copy(input, output)
            .await
            .map_err(|source| ProcessingError::Spawn {
                tool: "ffmpeg",
                source,
            })?;
        Ok(())
    }

    async fn probe(&self, path: &Path) -> ProcessingResult<StreamProbeResult> {
        self.probed.lock().unwrap().push(path.to_path_buf());

        match &self.probe {
            ProbeScript::Stream(result) => Ok(result.clone()),
            ProbeScript::NoStreams => Err(ProcessingError::NoStreams),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_remux_copies_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        let output = dir.path().join("in.mp4.processing");
        tokio::fs::write(&input, b"video bytes").await.unwrap();

        let toolkit = FakeToolkit::landscape();
        toolkit.remux_faststart(&input, &output).await.unwrap();

        assert_eq!(tokio::fs::read(&output).await.unwrap(), b"video bytes");
        assert_eq!(toolkit.remuxed_outputs(), vec![output]);
    }

    #[tokio::test]
    async fn test_fake_probe_scripts() {
        let path = Path::new("/tmp/whatever.mp4");
        let result = FakeToolkit::portrait().probe(path).await.unwrap();
        assert_eq!(result.display_aspect_ratio, "9:16");

        let err = FakeToolkit::no_streams().probe(path).await.unwrap_err();
        assert!(matches!(err, ProcessingError::NoStreams));
    }
}

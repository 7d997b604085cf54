//! ffmpeg/ffprobe backed toolkit

use crate::error::{ProcessingError, ProcessingResult};
use crate::probe::{parse_probe_output, StreamProbeResult};
use crate::traits::MediaToolkit;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Media paths are passed to the tools as separate arguments, never through a shell,
/// so only paths the OS cannot represent are rejected.
fn validate_media_path(path: &Path) -> ProcessingResult<()> {
    if path.as_os_str().is_empty() {
        return Err(ProcessingError::InvalidPath("empty path".to_string()));
    }

    if path.to_string_lossy().contains('\0') {
        return Err(ProcessingError::InvalidPath(format!(
            "contains NUL byte: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Configured tool binaries must be a plain command name or path.
fn validate_executable(path: &str) -> ProcessingResult<()> {
    if path.is_empty() || path.contains("..") {
        return Err(ProcessingError::InvalidPath(format!(
            "unsafe executable path: {}",
            path
        )));
    }

    if !path
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '/' | '-' | '_' | '.' | '\\'))
    {
        return Err(ProcessingError::InvalidPath(format!(
            "unsafe executable path: {}",
            path
        )));
    }
    Ok(())
}

/// Path of the remux output for `input`: the input path with `.processing` appended.
pub fn faststart_output_path(input: &Path) -> PathBuf {
    let mut name: OsString = input.as_os_str().to_owned();
    name.push(".processing");
    PathBuf::from(name)
}

pub(crate) fn remux_args(input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        input.as_os_str().to_owned(),
        "-c".into(),
        "copy".into(),
        "-movflags".into(),
        "faststart".into(),
        "-f".into(),
        "mp4".into(),
        output.as_os_str().to_owned(),
    ]
}

pub(crate) fn probe_args(path: &Path) -> Vec<OsString> {
    vec![
        "-v".into(),
        "error".into(),
        "-print_format".into(),
        "json".into(),
        "-show_streams".into(),
        path.as_os_str().to_owned(),
    ]
}

pub struct FfmpegToolkit {
    ffmpeg_path: String,
    ffprobe_path: String,
}

impl FfmpegToolkit {
    pub fn new(ffmpeg_path: String, ffprobe_path: String) -> ProcessingResult<Self> {
        validate_executable(&ffmpeg_path)?;
        validate_executable(&ffprobe_path)?;

        Ok(Self {
            ffmpeg_path,
            ffprobe_path,
        })
    }

    async fn run(
        &self,
        tool: &'static str,
        program: &str,
        args: Vec<OsString>,
    ) -> ProcessingResult<Vec<u8>> {
        let output = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProcessingError::Spawn { tool, source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ProcessingError::ToolFailed {
                tool,
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl MediaToolkit for FfmpegToolkit {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "remux_faststart"
    ))]
    async fn remux_faststart(&self, input: &Path, output: &Path) -> ProcessingResult<()> {
        let start = std::time::Instant::now();
        validate_media_path(input)?;
        validate_media_path(output)?;

        self.run("ffmpeg", &self.ffmpeg_path, remux_args(input, output))
            .await?;

        tracing::debug!(
            duration_ms = start.elapsed().as_millis(),
            "Faststart remux completed"
        );
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> ProcessingResult<StreamProbeResult> {
        let start = std::time::Instant::now();
        validate_media_path(path)?;

        let stdout = self
            .run("ffprobe", &self.ffprobe_path, probe_args(path))
            .await?;
        let result = parse_probe_output(&stdout)?;

        tracing::debug!(
            duration_ms = start.elapsed().as_millis(),
            width = result.coded_width,
            height = result.coded_height,
            aspect_ratio = %result.display_aspect_ratio,
            "Video probe completed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_output_path_appends_suffix() {
        let out = faststart_output_path(Path::new("/tmp/tubely-upload42.mp4"));
        assert_eq!(out, PathBuf::from("/tmp/tubely-upload42.mp4.processing"));
    }

    #[test]
    fn test_remux_args_copy_streams_and_move_index() {
        let args = strings(remux_args(Path::new("/tmp/in.mp4"), Path::new("/tmp/out")));
        assert_eq!(
            args,
            [
                "-y",
                "-i",
                "/tmp/in.mp4",
                "-c",
                "copy",
                "-movflags",
                "faststart",
                "-f",
                "mp4",
                "/tmp/out"
            ]
        );
    }

    #[test]
    fn test_probe_args_request_json_streams() {
        let args = strings(probe_args(Path::new("/tmp/in.mp4")));
        assert_eq!(
            args,
            [
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "/tmp/in.mp4"
            ]
        );
    }

    #[test]
    fn test_media_paths_are_not_shell_filtered() {
        for path in [
            "/tmp/tubely-upload.mp4",
            "/srv/uploads (2024)/tubely-uploadAbC.mp4",
            "./data/../scratch/tubely-upload.mp4",
            "/srv/a&b/$HOME;x.mp4",
        ] {
            assert!(validate_media_path(Path::new(path)).is_ok(), "{}", path);
        }
        assert!(validate_media_path(Path::new("")).is_err());
        assert!(validate_media_path(Path::new("/tmp/a\0b.mp4")).is_err());
    }

    #[tokio::test]
    async fn test_scratch_dir_with_parentheses_reaches_the_tool() {
        let toolkit = FfmpegToolkit::new(
            "/nonexistent/tubely-ffmpeg".into(),
            "/nonexistent/tubely-ffprobe".into(),
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("uploads (2024)");
        std::fs::create_dir_all(&scratch).unwrap();
        let input = scratch.join("tubely-uploadAbC.mp4");
        std::fs::write(&input, b"ftyp").unwrap();

        let err = toolkit
            .remux_faststart(&input, &faststart_output_path(&input))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessingError::Spawn { tool: "ffmpeg", .. }));

        let err = toolkit.probe(&input).await.unwrap_err();
        assert!(matches!(err, ProcessingError::Spawn { tool: "ffprobe", .. }));
    }

    #[test]
    fn test_toolkit_rejects_unsafe_executables() {
        assert!(FfmpegToolkit::new("ffmpeg".into(), "ffprobe".into()).is_ok());
        assert!(FfmpegToolkit::new("/usr/bin/ffmpeg".into(), "/usr/bin/ffprobe".into()).is_ok());
        assert!(FfmpegToolkit::new("ffmpeg $(id)".into(), "ffprobe".into()).is_err());
        assert!(FfmpegToolkit::new("ffmpeg".into(), "ff probe".into()).is_err());
        assert!(FfmpegToolkit::new("../bin/ffmpeg".into(), "ffprobe".into()).is_err());
        assert!(FfmpegToolkit::new(String::new(), "ffprobe".into()).is_err());
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let toolkit = FfmpegToolkit::new(
            "/nonexistent/tubely-ffmpeg".into(),
            "/nonexistent/tubely-ffprobe".into(),
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = toolkit.probe(&dir.path().join("in.mp4")).await.unwrap_err();
        assert!(matches!(err, ProcessingError::Spawn { tool: "ffprobe", .. }));
    }
}

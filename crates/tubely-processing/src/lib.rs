//! Tubely Processing Library
//!
//! Wraps the external media toolkit: remuxing an MP4 so its index sits at the front
//! of the file, and probing the remuxed file for its first stream descriptor.
//!
//! Both operations run `ffmpeg`/`ffprobe` as child processes. Everything above this
//! crate talks to the `MediaToolkit` trait so tests can swap in scripted fakes.

pub mod error;
pub mod ffmpeg;
pub mod probe;
pub mod traits;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use error::{ProcessingError, ProcessingResult};
pub use ffmpeg::{faststart_output_path, FfmpegToolkit};
pub use probe::{parse_probe_output, StreamProbeResult};
pub use traits::MediaToolkit;

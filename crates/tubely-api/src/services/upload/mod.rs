//! Upload services
//!
//! `VideoUploadService` runs the staged video pipeline and `ThumbnailUploadService`
//! the single-step thumbnail path. Both expect the caller to have passed the
//! ownership gate already.

pub mod pipeline;
pub mod receiver;
pub mod session;
pub mod thumbnail;

pub use pipeline::VideoUploadService;
pub use session::{PipelineStage, UploadSession};
pub use thumbnail::ThumbnailUploadService;

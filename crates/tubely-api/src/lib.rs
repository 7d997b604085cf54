//! Tubely API Library
//!
//! HTTP handlers, the upload pipeline services and application setup.

mod api_doc;
mod handlers;

pub mod auth;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{PipelineStage, ThumbnailUploadService, UploadSession, VideoUploadService};
pub use state::AppState;

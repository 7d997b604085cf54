//! Data models for the application

mod orientation;
mod video;

pub use orientation::*;
pub use video::*;

//! Tubely Storage Library
//!
//! Two destinations exist for uploaded media:
//!
//! - **Videos** go to an object store (S3 or compatible) under
//!   `{orientation}/{token}.mp4` and are served through a CDN distribution.
//! - **Thumbnails** go to a local asset directory served by the API under `/assets`.
//!
//! Keys and tokens are generated in the `keys` module so every backend agrees on the
//! layout.

pub mod factory;
pub mod keys;
pub mod local;
pub mod s3;
pub mod traits;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

// Re-export commonly used types
pub use factory::{create_asset_storage, create_object_storage};
pub use keys::{ObjectKey, RandomTokenGenerator, TokenGenerator};
pub use local::LocalAssetStorage;
pub use s3::S3Storage;
pub use traits::{AssetStorage, ObjectStorage, StorageError, StorageResult};

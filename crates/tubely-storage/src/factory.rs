use crate::{AssetStorage, LocalAssetStorage, ObjectStorage, S3Storage, StorageResult};
use std::sync::Arc;
use tubely_core::Config;

/// Create the video object storage from configuration
pub fn create_object_storage(config: &Config) -> StorageResult<Arc<dyn ObjectStorage>> {
    let storage = S3Storage::new(
        config.s3_bucket().to_string(),
        config.s3_region().to_string(),
        config.s3_endpoint().map(String::from),
        config.s3_cf_distribution().to_string(),
    )?;

    tracing::info!(
        bucket = %config.s3_bucket(),
        region = %config.s3_region(),
        endpoint = ?config.s3_endpoint(),
        "Object storage configured"
    );

    Ok(Arc::new(storage))
}

/// Create the local asset storage from configuration
pub async fn create_asset_storage(config: &Config) -> StorageResult<Arc<dyn AssetStorage>> {
    let storage =
        LocalAssetStorage::new(config.assets_root().clone(), config.assets_base_url()).await?;
    Ok(Arc::new(storage))
}

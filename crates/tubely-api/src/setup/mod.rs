//! Application setup: repositories, storage, toolkit, routes.

pub mod routes;
pub mod server;

use crate::services::upload::{ThumbnailUploadService, VideoUploadService};
use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::{Config, MetadataStoreKind};
use tubely_db::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};
use tubely_processing::FfmpegToolkit;
use tubely_storage::{create_asset_storage, create_object_storage, RandomTokenGenerator};

/// Build the video repository selected by `METADATA_STORE`.
pub async fn setup_repository(config: &Config) -> Result<Arc<dyn VideoRepository>> {
    match config.metadata_store() {
        MetadataStoreKind::Postgres => {
            let url = config
                .database_url()
                .context("DATABASE_URL must be set when METADATA_STORE is postgres")?;
            let pool = tubely_db::connect(url)
                .await
                .context("Failed to connect to database")?;
            tubely_db::run_migrations(&pool).await?;
            tracing::info!("Using Postgres metadata store");
            Ok(Arc::new(PgVideoRepository::new(pool)))
        }
        MetadataStoreKind::Memory => {
            tracing::warn!("Using in-memory metadata store; records are lost on restart");
            Ok(Arc::new(InMemoryVideoRepository::new()))
        }
    }
}

/// Initialize the application state and router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::error::hide_error_details(config.is_production());

    tokio::fs::create_dir_all(config.scratch_dir())
        .await
        .with_context(|| {
            format!(
                "Failed to create scratch directory {}",
                config.scratch_dir().display()
            )
        })?;

    let videos = setup_repository(&config).await?;
    let object_storage =
        create_object_storage(&config).context("Failed to configure object storage")?;
    let assets = create_asset_storage(&config)
        .await
        .context("Failed to configure asset storage")?;
    let toolkit = FfmpegToolkit::new(
        config.ffmpeg_path().to_string(),
        config.ffprobe_path().to_string(),
    )
    .context("Invalid media toolkit configuration")?;
    let tokens = Arc::new(RandomTokenGenerator);

    let video_uploads = VideoUploadService::new(
        Arc::new(toolkit),
        object_storage,
        tokens.clone(),
        videos.clone(),
        config.scratch_dir().clone(),
    );
    let thumbnail_uploads = ThumbnailUploadService::new(assets, tokens, videos.clone());

    let state = Arc::new(AppState {
        config,
        videos,
        video_uploads,
        thumbnail_uploads,
    });

    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}

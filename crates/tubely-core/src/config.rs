//! Configuration loaded from the process environment.
//!
//! The configuration is read once at startup and handed to every component as an
//! immutable value; nothing re-reads the environment after `Config::from_env`.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8091;
const DEFAULT_ASSETS_ROOT: &str = "./assets";
const DEFAULT_ASSETS_HOST: &str = "localhost";
const DEFAULT_S3_REGION: &str = "us-east-1";
const MAX_VIDEO_UPLOAD_MB: usize = 1024;
const MAX_THUMBNAIL_UPLOAD_MB: usize = 10;

/// Backend holding video metadata records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataStoreKind {
    Postgres,
    Memory,
}

impl MetadataStoreKind {
    fn parse(value: &str) -> Result<Self, anyhow::Error> {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(MetadataStoreKind::Postgres),
            "memory" => Ok(MetadataStoreKind::Memory),
            other => Err(anyhow::anyhow!(
                "METADATA_STORE must be 'postgres' or 'memory', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    port: u16,
    environment: String,
    jwt_secret: String,
    metadata_store: MetadataStoreKind,
    database_url: Option<String>,
    assets_root: PathBuf,
    assets_host: String,
    scratch_dir: PathBuf,
    s3_bucket: String,
    s3_region: String,
    s3_endpoint: Option<String>,
    s3_cf_distribution: String,
    ffmpeg_path: String,
    ffprobe_path: String,
    max_video_upload_bytes: usize,
    max_thumbnail_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let jwt_secret =
            var("JWT_SECRET").ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set"))?;
        let s3_bucket =
            var("S3_BUCKET").ok_or_else(|| anyhow::anyhow!("S3_BUCKET must be set"))?;
        let s3_cf_distribution = var("S3_CF_DISTRIBUTION")
            .ok_or_else(|| anyhow::anyhow!("S3_CF_DISTRIBUTION must be set"))?;

        let metadata_store = match var("METADATA_STORE") {
            Some(value) => MetadataStoreKind::parse(&value)?,
            None => MetadataStoreKind::Postgres,
        };

        let config = Config {
            port: var("PORT")
                .unwrap_or_else(|| DEFAULT_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_PORT),
            environment: var("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string())
                .to_lowercase(),
            jwt_secret,
            metadata_store,
            database_url: var("DATABASE_URL"),
            assets_root: PathBuf::from(
                var("ASSETS_ROOT").unwrap_or_else(|| DEFAULT_ASSETS_ROOT.to_string()),
            ),
            assets_host: var("ASSETS_HOST").unwrap_or_else(|| DEFAULT_ASSETS_HOST.to_string()),
            scratch_dir: var("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            s3_bucket,
            s3_region: var("S3_REGION").unwrap_or_else(|| DEFAULT_S3_REGION.to_string()),
            s3_endpoint: var("S3_ENDPOINT"),
            s3_cf_distribution: s3_cf_distribution
                .trim_start_matches("https://")
                .trim_end_matches('/')
                .to_string(),
            ffmpeg_path: var("FFMPEG_PATH").unwrap_or_else(|| "ffmpeg".to_string()),
            ffprobe_path: var("FFPROBE_PATH").unwrap_or_else(|| "ffprobe".to_string()),
            max_video_upload_bytes: var("MAX_VIDEO_UPLOAD_MB")
                .unwrap_or_else(|| MAX_VIDEO_UPLOAD_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_VIDEO_UPLOAD_MB)
                * 1024
                * 1024,
            max_thumbnail_upload_bytes: var("MAX_THUMBNAIL_UPLOAD_MB")
                .unwrap_or_else(|| MAX_THUMBNAIL_UPLOAD_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_THUMBNAIL_UPLOAD_MB)
                * 1024
                * 1024,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow::anyhow!("JWT_SECRET must not be empty"));
        }

        if self.max_video_upload_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_VIDEO_UPLOAD_MB must be greater than 0"));
        }

        if self.max_thumbnail_upload_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MAX_THUMBNAIL_UPLOAD_MB must be greater than 0"
            ));
        }

        if self.metadata_store == MetadataStoreKind::Postgres {
            match self.database_url.as_deref() {
                Some(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => {}
                Some(_) => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be a valid PostgreSQL connection string"
                    ))
                }
                None => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be set when METADATA_STORE is postgres"
                    ))
                }
            }
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn metadata_store(&self) -> MetadataStoreKind {
        self.metadata_store
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn assets_root(&self) -> &PathBuf {
        &self.assets_root
    }

    pub fn assets_host(&self) -> &str {
        &self.assets_host
    }

    /// Base URL for locally served assets, e.g. `http://localhost:8091/assets`.
    pub fn assets_base_url(&self) -> String {
        format!(
            "http://{}:{}{}",
            self.assets_host,
            self.port,
            crate::constants::ASSETS_ROUTE
        )
    }

    pub fn scratch_dir(&self) -> &PathBuf {
        &self.scratch_dir
    }

    pub fn s3_bucket(&self) -> &str {
        &self.s3_bucket
    }

    pub fn s3_region(&self) -> &str {
        &self.s3_region
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    /// Distribution host used to build public video URLs, without scheme.
    pub fn s3_cf_distribution(&self) -> &str {
        &self.s3_cf_distribution
    }

    pub fn ffmpeg_path(&self) -> &str {
        &self.ffmpeg_path
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.ffprobe_path
    }

    pub fn max_video_upload_bytes(&self) -> usize {
        self.max_video_upload_bytes
    }

    pub fn max_thumbnail_upload_bytes(&self) -> usize {
        self.max_thumbnail_upload_bytes
    }
}

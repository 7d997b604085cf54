//! Test helpers: build AppState and router for integration tests.
//!
//! The app runs with an in-memory metadata store, an in-memory object store and a
//! fake media toolkit, so no Postgres, S3 or ffmpeg is needed.
//! Run with: `cargo test -p tubely-api`.

pub mod auth;
pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStoreExt;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::services::upload::{ThumbnailUploadService, VideoUploadService};
use tubely_api::setup::routes;
use tubely_api::state::AppState;
use tubely_core::{Config, Video};
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_processing::test_helpers::FakeToolkit;
use tubely_storage::test_helpers::SequenceTokenGenerator;
use tubely_storage::{LocalAssetStorage, S3Storage};
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-key-min-32-characters-long-for-testing";
pub const TEST_DISTRIBUTION: &str = "d111111abcdef8.cloudfront.net";

/// Test application: server plus the backends behind it.
pub struct TestApp {
    pub server: TestServer,
    /// The router behind `server`, for requests axum-test can't express (streamed bodies).
    pub router: Router,
    pub config: Config,
    pub store: Arc<InMemory>,
    pub videos: Arc<InMemoryVideoRepository>,
    pub toolkit: Arc<FakeToolkit>,
    pub scratch: TempDir,
    pub assets: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Insert a fresh video record owned by `owner`.
    pub async fn seed_video(&self, owner: Uuid) -> Video {
        let video = Video::new(owner, "boots");
        self.videos.insert(video.clone()).await;
        video
    }

    pub async fn stored_video(&self, id: Uuid) -> Video {
        self.videos
            .get_video(id)
            .await
            .expect("Repository lookup failed")
            .expect("Seeded video should exist")
    }

    pub async fn object_bytes(&self, key: &str) -> Option<Vec<u8>> {
        let result = self.store.get(&ObjectPath::from(key)).await.ok()?;
        result.bytes().await.ok().map(|b| b.to_vec())
    }

    pub fn scratch_files(&self) -> usize {
        std::fs::read_dir(self.scratch.path())
            .expect("Scratch dir should exist")
            .count()
    }

    pub fn asset_files(&self) -> usize {
        std::fs::read_dir(self.assets.path())
            .expect("Assets dir should exist")
            .count()
    }
}

/// Setup a test application whose media toolkit is a landscape fake.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(FakeToolkit::landscape()).await
}

/// Setup a test application around the given fake media toolkit.
pub async fn setup_test_app_with(toolkit: FakeToolkit) -> TestApp {
    let scratch = tempfile::tempdir().expect("Failed to create scratch dir");
    let assets = tempfile::tempdir().expect("Failed to create assets dir");
    let config = create_test_config(&scratch, &assets);

    let store = Arc::new(InMemory::new());
    let videos = Arc::new(InMemoryVideoRepository::new());
    let toolkit = Arc::new(toolkit);
    let tokens = Arc::new(SequenceTokenGenerator::new("tok"));

    let object_storage = Arc::new(S3Storage::with_store(
        store.clone(),
        config.s3_bucket().to_string(),
        config.s3_cf_distribution().to_string(),
    ));
    let asset_storage = Arc::new(
        LocalAssetStorage::new(config.assets_root().clone(), config.assets_base_url())
            .await
            .expect("Failed to create asset storage"),
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        videos: videos.clone(),
        video_uploads: VideoUploadService::new(
            toolkit.clone(),
            object_storage,
            tokens.clone(),
            videos.clone(),
            config.scratch_dir().clone(),
        ),
        thumbnail_uploads: ThumbnailUploadService::new(asset_storage, tokens, videos.clone()),
    });

    let app = routes::setup_routes(state);
    let router = app.clone();
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        router,
        config,
        store,
        videos,
        toolkit,
        scratch,
        assets,
    }
}

fn create_test_config(scratch: &TempDir, assets: &TempDir) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("JWT_SECRET", TEST_JWT_SECRET.to_string()),
        ("S3_BUCKET", "tubely-test".to_string()),
        ("S3_CF_DISTRIBUTION", TEST_DISTRIBUTION.to_string()),
        ("METADATA_STORE", "memory".to_string()),
        ("SCRATCH_DIR", scratch.path().display().to_string()),
        ("ASSETS_ROOT", assets.path().display().to_string()),
        ("MAX_VIDEO_UPLOAD_MB", "1".to_string()),
        ("MAX_THUMBNAIL_UPLOAD_MB", "1".to_string()),
    ]);

    Config::from_lookup(|key| vars.get(key).cloned()).expect("Test config should be valid")
}

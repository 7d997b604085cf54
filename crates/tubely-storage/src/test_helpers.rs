//! Storage doubles for tests

use crate::keys::{ObjectKey, TokenGenerator};
use crate::traits::{ObjectStorage, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Object storage that rejects every upload.
#[derive(Default)]
pub struct FailingObjectStorage {
    attempts: Mutex<Vec<String>>,
}

impl FailingObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys that uploads were attempted for.
    pub fn attempted_keys(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for FailingObjectStorage {
    async fn put_file(
        &self,
        key: &ObjectKey,
        _path: &Path,
        _content_type: &str,
    ) -> StorageResult<String> {
        self.attempts.lock().unwrap().push(key.to_string());
        Err(StorageError::UploadFailed(
            "simulated object store outage".to_string(),
        ))
    }

    fn public_url(&self, key: &ObjectKey) -> String {
        format!("https://unreachable.invalid/{}", key)
    }
}

/// Deterministic tokens: `{prefix}-0`, `{prefix}-1`, ...
pub struct SequenceTokenGenerator {
    prefix: String,
    next: AtomicUsize,
}

impl SequenceTokenGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicUsize::new(0),
        }
    }
}

impl TokenGenerator for SequenceTokenGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, n)
    }
}

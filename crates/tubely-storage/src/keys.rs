//! Object keys and the random tokens behind them.
//!
//! Key format: `{orientation}/{token}.mp4`, where the token is 32 random bytes encoded
//! as URL-safe base64 without padding (43 characters).

use base64::Engine;
use rand::Rng;
use std::fmt;
use tubely_core::constants::TOKEN_BYTES;
use tubely_core::OrientationClass;

/// Source of the random part of object keys and asset names.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Tokens from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
    }
}

/// Location of a published video inside the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn new(orientation: OrientationClass, token: &str) -> Self {
        ObjectKey(format!("{}/{}.mp4", orientation, token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

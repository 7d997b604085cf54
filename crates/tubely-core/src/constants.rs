//! Shared constants

/// The only media type accepted on the video upload path.
pub const VIDEO_MP4: &str = "video/mp4";

/// Media types accepted on the thumbnail upload path.
pub const THUMBNAIL_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Multipart field carrying the video payload.
pub const VIDEO_FIELD: &str = "video";

/// Multipart field carrying the thumbnail payload.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Issuer stamped into (and required on) access tokens.
pub const JWT_ISSUER: &str = "tubely-access";

/// Route prefix under which local assets are served.
pub const ASSETS_ROUTE: &str = "/assets";

/// Number of random bytes behind every object key and asset token.
pub const TOKEN_BYTES: usize = 32;

//! Test fixtures: small MP4 and image blobs plus multipart forms.

use axum_test::multipart::{MultipartForm, Part};

/// Bytes that start like an MP4 (`ftyp` box). The fake toolkit never parses them.
pub fn create_minimal_mp4() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&24u32.to_be_bytes());
    data.extend_from_slice(b"ftypisom");
    data.extend_from_slice(&0x200u32.to_be_bytes());
    data.extend_from_slice(b"isomiso2");
    data.extend_from_slice(&8u32.to_be_bytes());
    data.extend_from_slice(b"mdat");
    data
}

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

pub fn video_form(data: Vec<u8>, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(data).file_name("boots.mp4").mime_type(mime_type);
    MultipartForm::new().add_part("video", part)
}

pub fn thumbnail_form(data: Vec<u8>, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(data).file_name("boots.png").mime_type(mime_type);
    MultipartForm::new().add_part("thumbnail", part)
}

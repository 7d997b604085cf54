//! FfmpegToolkit against the real binaries.
//!
//! Run with: `cargo test -p tubely-processing --test ffmpeg_toolkit_test -- --ignored`
//! Requires `ffmpeg` and `ffprobe` on PATH.

use std::path::Path;
use tubely_processing::{faststart_output_path, FfmpegToolkit, MediaToolkit};

/// Offset and size of every top-level box in an MP4 file.
fn top_level_boxes(data: &[u8]) -> Vec<(String, usize, u64)> {
    let mut boxes = Vec::new();
    let mut offset = 0usize;

    while offset + 8 <= data.len() {
        let size32 = u32::from_be_bytes(data[offset..offset + 4].try_into().unwrap()) as u64;
        let kind = String::from_utf8_lossy(&data[offset + 4..offset + 8]).into_owned();
        let size = match size32 {
            0 => (data.len() - offset) as u64,
            1 => u64::from_be_bytes(data[offset + 8..offset + 16].try_into().unwrap()),
            n => n,
        };
        boxes.push((kind, offset, size));
        if size < 8 {
            break;
        }
        offset += size as usize;
    }

    boxes
}

fn find_box(boxes: &[(String, usize, u64)], kind: &str) -> (usize, u64) {
    boxes
        .iter()
        .find(|(k, _, _)| k == kind)
        .map(|(_, offset, size)| (*offset, *size))
        .unwrap_or_else(|| panic!("no {} box in {:?}", kind, boxes))
}

/// Encode a one second 1280x720 clip. The mp4 muxer's default layout writes the
/// index after the media data.
fn generate_clip(path: &Path) {
    let status = std::process::Command::new("ffmpeg")
        .args(["-y", "-v", "error", "-f", "lavfi", "-i"])
        .arg("testsrc=duration=1:size=1280x720:rate=25")
        .args(["-c:v", "mpeg4", "-f", "mp4"])
        .arg(path)
        .status()
        .expect("ffmpeg should be installed");
    assert!(status.success(), "ffmpeg failed to generate the test clip");
}

#[tokio::test]
#[ignore = "requires ffmpeg and ffprobe on PATH"]
async fn test_remux_moves_index_before_media_data() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tubely-upload-clip.mp4");
    generate_clip(&input);

    let before = top_level_boxes(&std::fs::read(&input).unwrap());
    let (moov_before, _) = find_box(&before, "moov");
    let (mdat_before, mdat_size_before) = find_box(&before, "mdat");
    assert!(moov_before > mdat_before, "clip should start without faststart");

    let toolkit = FfmpegToolkit::new("ffmpeg".into(), "ffprobe".into()).unwrap();
    let output = faststart_output_path(&input);
    toolkit.remux_faststart(&input, &output).await.unwrap();

    let after = top_level_boxes(&std::fs::read(&output).unwrap());
    let (moov_after, _) = find_box(&after, "moov");
    let (mdat_after, mdat_size_after) = find_box(&after, "mdat");
    assert!(moov_after < mdat_after, "index should precede media data");
    // Stream copy leaves the sample data untouched
    assert_eq!(mdat_size_after, mdat_size_before);

    let stream = toolkit.probe(&output).await.unwrap();
    assert_eq!(stream.coded_width, 1280);
    assert_eq!(stream.coded_height, 720);
    assert_eq!(stream.display_aspect_ratio, "16:9");
}

#[tokio::test]
#[ignore = "requires ffmpeg and ffprobe on PATH"]
async fn test_remux_of_garbage_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tubely-upload-garbage.mp4");
    std::fs::write(&input, b"definitely not an mp4").unwrap();

    let toolkit = FfmpegToolkit::new("ffmpeg".into(), "ffprobe".into()).unwrap();
    let err = toolkit
        .remux_faststart(&input, &faststart_output_path(&input))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        tubely_processing::ProcessingError::ToolFailed { tool: "ffmpeg", .. }
    ));
}

//! ffprobe output parsing

use crate::error::{ProcessingError, ProcessingResult};
use serde::{Deserialize, Serialize};

/// First stream descriptor reported by ffprobe.
///
/// Values are taken verbatim. Audio-only streams carry no dimensions and an empty
/// aspect ratio, which classifies as "other".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamProbeResult {
    #[serde(default)]
    pub coded_width: u32,
    #[serde(default)]
    pub coded_height: u32,
    #[serde(default)]
    pub display_aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<StreamProbeResult>,
}

/// Parse `ffprobe -print_format json -show_streams` output.
pub fn parse_probe_output(stdout: &[u8]) -> ProcessingResult<StreamProbeResult> {
    let output: ProbeOutput = serde_json::from_slice(stdout)
        .map_err(|e| ProcessingError::InvalidProbeOutput(e.to_string()))?;

    output
        .streams
        .into_iter()
        .next()
        .ok_or(ProcessingError::NoStreams)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANDSCAPE: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "codec_type": "video",
                "width": 1920,
                "height": 1080,
                "coded_width": 1920,
                "coded_height": 1080,
                "display_aspect_ratio": "16:9",
                "r_frame_rate": "30/1"
            },
            {
                "index": 1,
                "codec_name": "aac",
                "codec_type": "audio"
            }
        ]
    }"#;

    #[test]
    fn test_first_stream_is_returned() {
        let result = parse_probe_output(LANDSCAPE.as_bytes()).unwrap();
        assert_eq!(result.coded_width, 1920);
        assert_eq!(result.coded_height, 1080);
        assert_eq!(result.display_aspect_ratio, "16:9");
    }

    #[test]
    fn test_only_first_stream_is_considered() {
        let json = r#"{"streams": [
            {"codec_type": "audio"},
            {"coded_width": 1080, "coded_height": 1920, "display_aspect_ratio": "9:16"}
        ]}"#;
        let result = parse_probe_output(json.as_bytes()).unwrap();
        assert_eq!(result, StreamProbeResult::default());
    }

    #[test]
    fn test_empty_streams_is_no_streams() {
        let err = parse_probe_output(br#"{"streams": []}"#).unwrap_err();
        assert!(matches!(err, ProcessingError::NoStreams));
        assert_eq!(err.to_string(), "no streams found");
    }

    #[test]
    fn test_missing_streams_key_is_no_streams() {
        let err = parse_probe_output(b"{}").unwrap_err();
        assert!(matches!(err, ProcessingError::NoStreams));
    }

    #[test]
    fn test_garbage_is_invalid_output() {
        let err = parse_probe_output(b"not json").unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidProbeOutput(_)));
    }
}

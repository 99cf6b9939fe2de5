//! FFprobe integration for media analysis.
//!
//! Extracts the properties the pipeline needs from a source container:
//! duration, video dimensions, and audio channel layout.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use ffprobe::{FfProbeError, ffprobe};
use serde::Serialize;
use std::path::Path;

/// Struct containing media information.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MediaInfo {
    /// Duration of the media in seconds
    pub duration: Option<f64>,
    /// Width of the video stream
    pub width: Option<i64>,
    /// Height of the video stream
    pub height: Option<i64>,
    /// Channel count per audio stream
    pub audio_channels: Vec<u32>,
}

impl MediaInfo {
    /// Whether the container carries at least one audio stream.
    pub fn has_audio(&self) -> bool {
        !self.audio_channels.is_empty()
    }
}

/// Gets media information for a given input file.
pub fn get_media_info(input_path: &Path) -> CoreResult<MediaInfo> {
    log::debug!(
        "Running ffprobe (via crate) for media info on: {}",
        input_path.display()
    );
    match ffprobe(input_path) {
        Ok(metadata) => {
            let duration = metadata
                .format
                .duration
                .as_deref()
                .and_then(|d| d.parse::<f64>().ok());

            let audio_channels: Vec<u32> = metadata
                .streams
                .iter()
                .filter(|s| s.codec_type.as_deref() == Some("audio"))
                .filter_map(|s| s.channels)
                .map(|c| {
                    if c < 0 {
                        log::warn!(
                            "Negative channel count ({}) found for {}, treating as 0",
                            c,
                            input_path.display()
                        );
                        0u32
                    } else {
                        c as u32
                    }
                })
                .collect();

            let mut info = MediaInfo {
                duration,
                audio_channels,
                ..Default::default()
            };

            if let Some(video_stream) = metadata
                .streams
                .iter()
                .find(|s| s.codec_type.as_deref() == Some("video"))
            {
                info.width = video_stream.width;
                info.height = video_stream.height;
            }

            Ok(info)
        }
        Err(err) => {
            log::error!(
                "ffprobe failed for media info on {}: {err:?}",
                input_path.display()
            );
            Err(map_ffprobe_error(err, "media info"))
        }
    }
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => CoreError::FfprobeParse(format!(
            "ffprobe {context} output deserialization: {err}"
        )),
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error during {context}: {err:?}")),
    }
}

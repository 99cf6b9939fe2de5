//! Configuration structures and constants for the clipcut-core library.
//!
//! The export codec and overlay style are design constants, not user
//! switches: the pipeline always writes libx264 and always renders the
//! overlay as white text on a black band at the bottom-center of the
//! frame.

use std::path::PathBuf;

// Default constants

/// Video codec used for every export. Chosen for broad player
/// compatibility; not user-configurable.
pub const OUTPUT_VIDEO_CODEC: &str = "libx264";

/// Audio codec used when the source carries audio streams.
pub const OUTPUT_AUDIO_CODEC: &str = "aac";

/// Pixel format for the export. yuv420p decodes everywhere.
pub const OUTPUT_PIXEL_FORMAT: &str = "yuv420p";

/// Default CRF (Constant Rate Factor) for libx264.
/// Range: 0-51, with 0 being lossless.
pub const DEFAULT_CRF: u8 = 20;

/// Default libx264 encoder preset.
pub const DEFAULT_X264_PRESET: &str = "medium";

/// Overlay font size in points. Matches the fixed overlay style.
pub const OVERLAY_FONT_SIZE: u32 = 24;

/// Overlay text color.
pub const OVERLAY_FONT_COLOR: &str = "white";

/// Overlay background band color.
pub const OVERLAY_BOX_COLOR: &str = "black";

/// Horizontal padding of the overlay background band, in pixels.
pub const OVERLAY_BOX_BORDER: u32 = 8;

/// Main configuration for a pipeline invocation.
///
/// Created by the consumer (e.g. clipcut-cli) and passed to
/// [`crate::pipeline::transform`]. Only `output_path` is required; the
/// encoding fields default to the constants above.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Where the exported file is written.
    pub output_path: PathBuf,
    /// libx264 CRF quality value (0-51).
    pub crf: u8,
    /// libx264 preset name.
    pub preset: String,
}

impl CoreConfig {
    /// Creates a config with default encoding settings.
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            output_path,
            crf: DEFAULT_CRF,
            preset: DEFAULT_X264_PRESET.to_string(),
        }
    }

    /// Validates the configuration before a pipeline run.
    pub fn validate(&self) -> crate::error::CoreResult<()> {
        if self.crf > 51 {
            return Err(crate::error::CoreError::OperationFailed(format!(
                "CRF {} is out of range (0-51)",
                self.crf
            )));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(crate::error::CoreError::OperationFailed(
                "Output path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

//! Interactions with external CLI tools (ffmpeg, ffprobe, yt-dlp).
//!
//! This module encapsulates everything that shells out: command
//! construction via ffmpeg-sidecar, media probing via the ffprobe
//! crate, and presence checks for required tools. The default
//! implementations are the only ones used in production; tests
//! exercise command construction without spawning anything.

use crate::error::{CoreError, CoreResult};

use std::io;
use std::process::{Command, Stdio};

/// Contains ffmpeg argument building and export execution logic
pub mod ffmpeg;

/// Contains ffmpeg command and filter chain builders
pub mod ffmpeg_builder;

/// Contains ffprobe execution and media info extraction
pub mod ffprobe_executor;

// Re-exports for consumers of the crate
pub use ffmpeg::{ExportParams, build_ffmpeg_command, run_ffmpeg_export};
pub use ffmpeg_builder::{FfmpegCommandBuilder, VideoFilterChain};
pub use ffprobe_executor::{MediaInfo, get_media_info};

/// Checks that a required external command is available and executable.
///
/// Runs `<cmd> -version` and discards the output. Returns
/// `DependencyNotFound` when the binary is absent and `CommandStart`
/// when it exists but fails to launch.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

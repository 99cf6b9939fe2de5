//! The clip transformation pipeline.
//!
//! One synchronous, blocking invocation per call: load, trim, speed
//! adjust, overlay, export, in that fixed order. Every stage validates
//! its own preconditions and fails fast; there is no retry policy and
//! no partial success. Concurrency, if wanted, belongs to the caller:
//! invocations share no mutable state.

use crate::config::{CoreConfig, OUTPUT_VIDEO_CODEC};
use crate::error::{CoreError, CoreResult};
use crate::external::{self, ExportParams, MediaInfo};
use crate::params::{EditParameters, OutputFile, SourceMedia};

use std::path::Path;

impl SourceMedia {
    /// Opens and probes a source file (the load stage).
    ///
    /// A missing or empty file is rejected before ffprobe is invoked;
    /// any probe failure is reported as unreadable media.
    pub fn open(path: &Path) -> CoreResult<Self> {
        Ok(Self::open_with_info(path)?.0)
    }

    /// Opens a source and returns the probe result alongside it, for
    /// callers that also need dimensions or channel layout. The file
    /// is probed exactly once.
    pub fn open_with_info(path: &Path) -> CoreResult<(Self, MediaInfo)> {
        let metadata = std::fs::metadata(path).map_err(|e| CoreError::UnreadableMedia {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !metadata.is_file() {
            return Err(CoreError::UnreadableMedia {
                path: path.to_path_buf(),
                reason: "not a regular file".to_string(),
            });
        }
        if metadata.len() == 0 {
            return Err(CoreError::UnreadableMedia {
                path: path.to_path_buf(),
                reason: "file is empty".to_string(),
            });
        }

        let info = external::get_media_info(path).map_err(|e| CoreError::UnreadableMedia {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let duration = info.duration.ok_or_else(|| CoreError::UnreadableMedia {
            path: path.to_path_buf(),
            reason: "container reports no duration".to_string(),
        })?;

        let source = Self {
            path: path.to_path_buf(),
            duration,
            has_audio: info.has_audio(),
        };
        Ok((source, info))
    }
}

/// Transforms a source file into an edited output file.
///
/// Deterministic stage order: load, trim, speed adjust, overlay,
/// export. Trim bounds are checked against the probed duration before
/// any decoding work starts, and the speed/overlay stages are realized
/// inside the single export invocation. On success the returned
/// [`OutputFile`] is owned by the caller; on failure no output file
/// exists.
pub fn transform(
    source_path: &Path,
    params: &EditParameters,
    config: &CoreConfig,
) -> CoreResult<OutputFile> {
    config.validate()?;

    // Load.
    let source = SourceMedia::open(source_path)?;
    log::info!(
        "Loaded source {} (duration {})",
        source.path.display(),
        crate::utils::format_duration(source.duration)
    );

    // Trim and speed preconditions, checked before ffmpeg is spawned.
    params.validate(source.duration)?;

    // Export needs the ffmpeg binary; probing only needed ffprobe.
    external::check_dependency("ffmpeg")?;

    let export = ExportParams {
        input_path: source.path.clone(),
        output_path: config.output_path.clone(),
        start_time: params.start_time,
        trim_duration: params.trim_duration(),
        speed_factor: params.speed_factor,
        overlay_text: params.overlay_text.clone(),
        has_audio: source.has_audio,
        crf: config.crf,
        preset: config.preset.clone(),
    };

    external::run_ffmpeg_export(&export)?;

    log::info!(
        "Wrote {} (expected duration {})",
        config.output_path.display(),
        crate::utils::format_duration(params.expected_output_duration())
    );

    Ok(OutputFile {
        path: config.output_path.clone(),
        codec: OUTPUT_VIDEO_CODEC.to_string(),
    })
}

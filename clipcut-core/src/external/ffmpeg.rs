//! FFmpeg command building and execution for clip export.
//!
//! This module assembles the single ffmpeg invocation that realizes the
//! trim, speed-adjust, overlay, and export stages, then runs it and
//! watches its event stream. Stage order is fixed: the trim is applied
//! as input options (`-ss` and `-t` both before `-i`), so time bounds
//! are interpreted on the original timeline even when the filter chain
//! retimes the output; `setpts` precedes `drawtext` in the filter
//! chain, so the overlay spans the final playback duration.

use crate::config::{
    OUTPUT_AUDIO_CODEC, OUTPUT_PIXEL_FORMAT, OUTPUT_VIDEO_CODEC, OVERLAY_BOX_BORDER,
    OVERLAY_BOX_COLOR, OVERLAY_FONT_COLOR, OVERLAY_FONT_SIZE,
};
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};

use ffmpeg_sidecar::command::FfmpegCommand;
use log::{debug, warn};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Parameters for one export run. Derived from a validated
/// `EditParameters` plus the probed source properties; the pipeline
/// builds this once per invocation.
#[derive(Debug, Clone)]
pub struct ExportParams {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Trim start on the original timeline, seconds.
    pub start_time: f64,
    /// Trim length on the original timeline, seconds.
    pub trim_duration: f64,
    /// Playback speed multiplier (already validated > 0).
    pub speed_factor: f64,
    /// Overlay text; empty means no overlay.
    pub overlay_text: String,
    /// Whether the source carries audio streams.
    pub has_audio: bool,
    pub crf: u8,
    pub preset: String,
}

impl ExportParams {
    /// Playable duration of the output, used for progress reporting.
    pub fn expected_duration(&self) -> f64 {
        self.trim_duration / self.speed_factor
    }
}

/// Formats a float for use inside a filter or argument string,
/// trimming trailing zeros (2.0 -> "2", 1.50 -> "1.5").
fn format_filter_value(value: f64) -> String {
    let formatted = format!("{value:.6}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Escapes text for use as a drawtext `text=` value.
///
/// One level of filtergraph escaping: backslash-prefix the characters
/// the graph parser or drawtext would otherwise interpret. `%` is
/// escaped to suppress drawtext's expansion syntax.
fn escape_overlay_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '\'' | ':' | ',' | ';' | '[' | ']' | '=' | '%') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Builds the drawtext filter for the fixed overlay style: white text
/// on a black band, bottom-center, shown for the whole clip.
fn drawtext_filter(text: &str) -> String {
    format!(
        "drawtext=text={}:fontsize={}:fontcolor={}:box=1:boxcolor={}:boxborderw={}:x=(w-text_w)/2:y=h-text_h-{}",
        escape_overlay_text(text),
        OVERLAY_FONT_SIZE,
        OVERLAY_FONT_COLOR,
        OVERLAY_BOX_COLOR,
        OVERLAY_BOX_BORDER,
        OVERLAY_BOX_BORDER * 2,
    )
}

/// Decomposes a speed factor into atempo stages.
///
/// atempo accepts 0.5-2.0 per instance (the portable range), so factors
/// outside it are realized as a chain whose product equals the factor.
fn atempo_stages(speed_factor: f64) -> Vec<f64> {
    let mut stages = Vec::new();
    let mut remaining = speed_factor;

    while remaining > 2.0 {
        stages.push(2.0);
        remaining /= 2.0;
    }
    while remaining < 0.5 {
        stages.push(0.5);
        remaining /= 0.5;
    }
    stages.push(remaining);
    stages
}

/// Builds the audio filter string for a speed change. Pitch is not
/// corrected under speed changes; atempo shifts tempo only, and that
/// limitation is intentional.
fn atempo_chain(speed_factor: f64) -> String {
    atempo_stages(speed_factor)
        .into_iter()
        .map(|s| format!("atempo={}", format_filter_value(s)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Builds the complete ffmpeg export command.
///
/// Argument order realizes the stage order: seek/trim on the input,
/// then the video filter chain (speed before overlay), then the fixed
/// libx264 output configuration.
pub fn build_ffmpeg_command(params: &ExportParams) -> CoreResult<FfmpegCommand> {
    let mut cmd = crate::external::FfmpegCommandBuilder::new().build();

    // Trim. Both options must precede -i: as input options they bound
    // the source timeline, where an output-side -t would cap the output
    // timeline and read the wrong range once setpts retimes it.
    cmd.args(["-ss", &format_filter_value(params.start_time)]);
    cmd.args(["-t", &format_filter_value(params.trim_duration)]);
    cmd.input(params.input_path.to_string_lossy().as_ref());

    let mut filter_chain = crate::external::VideoFilterChain::new();
    if params.speed_factor != 1.0 {
        filter_chain = filter_chain.add_filter(format!(
            "setpts=PTS/{}",
            format_filter_value(params.speed_factor)
        ));
    }
    if !params.overlay_text.trim().is_empty() {
        filter_chain = filter_chain.add_filter(drawtext_filter(params.overlay_text.trim()));
    }

    if let Some(ref filters) = filter_chain.build() {
        cmd.args(["-vf", filters]);
        debug!("Applying video filters: {filters}");
    } else {
        debug!("No video filters applied.");
    }

    cmd.args(["-c:v", OUTPUT_VIDEO_CODEC]);
    cmd.args(["-pix_fmt", OUTPUT_PIXEL_FORMAT]);
    cmd.args(["-crf", &params.crf.to_string()]);
    cmd.args(["-preset", &params.preset]);

    if params.has_audio {
        if params.speed_factor != 1.0 {
            let audio_filters = atempo_chain(params.speed_factor);
            cmd.args(["-af", &audio_filters]);
            debug!("Applying audio filters: {audio_filters}");
        }
        cmd.args(["-c:a", OUTPUT_AUDIO_CODEC]);
    } else {
        cmd.arg("-an");
    }

    cmd.args(["-movflags", "+faststart"]);

    cmd.output(params.output_path.to_string_lossy().as_ref());

    Ok(cmd)
}

/// Executes the export. Blocks until ffmpeg exits.
///
/// On a non-zero exit the collected stderr becomes the error text and
/// any partially-written output file is removed, so an output file
/// either exists fully written or not at all.
pub fn run_ffmpeg_export(params: &ExportParams) -> CoreResult<()> {
    let filename = crate::utils::get_filename_safe(&params.input_path);

    log::info!(
        "Starting export: {} -> {}",
        params.input_path.display(),
        params.output_path.display()
    );
    debug!("Export parameters: {params:?}");

    let mut cmd = build_ffmpeg_command(params)?;
    debug!("FFmpeg command: {cmd:?}");

    // A process that never started has no exit status to report.
    let mut child = cmd
        .spawn()
        .map_err(|e| command_start_error("ffmpeg", std::io::Error::other(e.to_string())))?;

    let total_duration = params.expected_duration();
    let mut stderr_buffer = String::new();

    for event in child.iter().map_err(|e| {
        command_failed_error(
            "ffmpeg",
            std::process::ExitStatus::default(),
            format!("Failed to get event iterator: {e}"),
        )
    })? {
        match event {
            ffmpeg_sidecar::event::FfmpegEvent::Log(_level, message) => {
                stderr_buffer.push_str(&message);
                stderr_buffer.push('\n');
            }
            ffmpeg_sidecar::event::FfmpegEvent::Error(error) => {
                stderr_buffer.push_str(&format!("ERROR: {error}\n"));
            }
            ffmpeg_sidecar::event::FfmpegEvent::Progress(progress) => {
                let elapsed_secs = crate::utils::parse_ffmpeg_time(&progress.time)
                    .unwrap_or_else(|| progress.time.parse::<f64>().unwrap_or(0.0));
                if total_duration > 0.0 {
                    let percent = (elapsed_secs / total_duration * 100.0).min(100.0);
                    debug!("Export progress: {percent:.1}% (elapsed: {elapsed_secs:.1}s)");
                }
            }
            _ => {}
        }
    }

    let status = child.wait().map_err(|e| {
        command_failed_error(
            "ffmpeg",
            std::process::ExitStatus::default(),
            format!("Failed to wait for FFmpeg process: {e}"),
        )
    })?;

    if status.success() {
        log::info!("Export finished successfully for {filename}");
        Ok(())
    } else {
        cleanup_partial_output(&params.output_path);

        let error_message = format!(
            "FFmpeg process exited with non-zero status ({:?}). Stderr output:\n{}",
            status.code(),
            stderr_buffer.trim()
        );
        log::error!("FFmpeg error for {filename}: {error_message}");

        Err(CoreError::Encoding(error_message))
    }
}

/// Removes a partially-written output file after a failed export.
fn cleanup_partial_output(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {
            warn!(
                "Removed partial output created during failed export: {}",
                path.display()
            );
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            warn!(
                "Failed to remove partial output at {}: {}",
                path.display(),
                err
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_CRF, DEFAULT_X264_PRESET};

    fn create_test_params() -> ExportParams {
        ExportParams {
            input_path: PathBuf::from("/test/input.mp4"),
            output_path: PathBuf::from("/test/output.mp4"),
            start_time: 2.0,
            trim_duration: 4.0,
            speed_factor: 1.0,
            overlay_text: String::new(),
            has_audio: true,
            crf: DEFAULT_CRF,
            preset: DEFAULT_X264_PRESET.to_string(),
        }
    }

    fn command_string(params: &ExportParams) -> String {
        let cmd = build_ffmpeg_command(params).unwrap();
        format!("{cmd:?}")
    }

    #[test]
    fn test_format_filter_value_trims_zeros() {
        assert_eq!(format_filter_value(2.0), "2");
        assert_eq!(format_filter_value(1.5), "1.5");
        assert_eq!(format_filter_value(0.25), "0.25");
        assert_eq!(format_filter_value(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_trim_uses_input_options() {
        let cmd_string = command_string(&create_test_params());
        // Both -ss and -t must precede -i so the bounds are read on the
        // original timeline.
        let ss_pos = cmd_string.find("\"-ss\"").expect("missing -ss");
        let t_pos = cmd_string.find("\"-t\"").expect("missing -t");
        let i_pos = cmd_string.find("\"-i\"").expect("missing -i");
        assert!(ss_pos < i_pos, "expected -ss before -i: {cmd_string}");
        assert!(t_pos < i_pos, "expected -t before -i: {cmd_string}");
        assert!(
            cmd_string.contains("\"-t\" \"4\""),
            "missing trim duration: {cmd_string}"
        );
    }

    #[test]
    fn test_trim_bounds_unaffected_by_speed_factor() {
        // A 2x speed change halves the output, not the source range:
        // the trim options still bound [2, 6) on the input side.
        let mut params = create_test_params();
        params.speed_factor = 2.0;
        let cmd_string = command_string(&params);
        let t_pos = cmd_string.find("\"-t\"").expect("missing -t");
        let i_pos = cmd_string.find("\"-i\"").expect("missing -i");
        assert!(t_pos < i_pos, "expected -t before -i: {cmd_string}");
        assert!(cmd_string.contains("\"-ss\" \"2\""), "{cmd_string}");
        assert!(cmd_string.contains("\"-t\" \"4\""), "{cmd_string}");
        assert_eq!(params.expected_duration(), 2.0);

        // Slowing down must not truncate the range either.
        params.speed_factor = 0.5;
        let cmd_string = command_string(&params);
        let t_pos = cmd_string.find("\"-t\"").expect("missing -t");
        let i_pos = cmd_string.find("\"-i\"").expect("missing -i");
        assert!(t_pos < i_pos, "expected -t before -i: {cmd_string}");
        assert!(cmd_string.contains("\"-t\" \"4\""), "{cmd_string}");
        assert_eq!(params.expected_duration(), 8.0);
    }

    #[test]
    fn test_unit_speed_adds_no_filters() {
        let cmd_string = command_string(&create_test_params());
        assert!(!cmd_string.contains("setpts"), "{cmd_string}");
        assert!(!cmd_string.contains("atempo"), "{cmd_string}");
        assert!(!cmd_string.contains("drawtext"), "{cmd_string}");
    }

    #[test]
    fn test_speed_up_filters() {
        let mut params = create_test_params();
        params.speed_factor = 2.0;
        let cmd_string = command_string(&params);
        assert!(cmd_string.contains("setpts=PTS/2"), "{cmd_string}");
        assert!(cmd_string.contains("atempo=2"), "{cmd_string}");
    }

    #[test]
    fn test_slow_down_filters() {
        let mut params = create_test_params();
        params.speed_factor = 0.5;
        let cmd_string = command_string(&params);
        assert!(cmd_string.contains("setpts=PTS/0.5"), "{cmd_string}");
        assert!(cmd_string.contains("atempo=0.5"), "{cmd_string}");
    }

    #[test]
    fn test_no_audio_source_disables_audio() {
        let mut params = create_test_params();
        params.has_audio = false;
        params.speed_factor = 2.0;
        let cmd_string = command_string(&params);
        assert!(cmd_string.contains("-an"), "{cmd_string}");
        assert!(!cmd_string.contains("atempo"), "{cmd_string}");
        assert!(!cmd_string.contains("aac"), "{cmd_string}");
    }

    #[test]
    fn test_overlay_present_when_text_given() {
        let mut params = create_test_params();
        params.overlay_text = "Hello".to_string();
        let cmd_string = command_string(&params);
        assert!(cmd_string.contains("drawtext=text=Hello"), "{cmd_string}");
        assert!(cmd_string.contains("x=(w-text_w)/2"), "{cmd_string}");
        assert!(cmd_string.contains("fontcolor=white"), "{cmd_string}");
        assert!(cmd_string.contains("boxcolor=black"), "{cmd_string}");
    }

    #[test]
    fn test_overlay_absent_for_blank_text() {
        let mut params = create_test_params();
        params.overlay_text = "   ".to_string();
        let cmd_string = command_string(&params);
        assert!(!cmd_string.contains("drawtext"), "{cmd_string}");
    }

    #[test]
    fn test_overlay_follows_speed_in_filter_chain() {
        let mut params = create_test_params();
        params.speed_factor = 2.0;
        params.overlay_text = "Hello".to_string();
        let cmd_string = command_string(&params);
        let setpts_pos = cmd_string.find("setpts").expect("missing setpts");
        let drawtext_pos = cmd_string.find("drawtext").expect("missing drawtext");
        assert!(
            setpts_pos < drawtext_pos,
            "overlay must be composited after the speed change: {cmd_string}"
        );
    }

    #[test]
    fn test_fixed_output_codec() {
        let cmd_string = command_string(&create_test_params());
        assert!(cmd_string.contains("libx264"), "{cmd_string}");
        assert!(cmd_string.contains("yuv420p"), "{cmd_string}");
        assert!(cmd_string.contains("faststart"), "{cmd_string}");
    }

    #[test]
    fn test_escape_overlay_text() {
        assert_eq!(escape_overlay_text("Hello"), "Hello");
        assert_eq!(escape_overlay_text("a:b"), "a\\:b");
        assert_eq!(escape_overlay_text("it's"), "it\\'s");
        assert_eq!(escape_overlay_text("100%"), "100\\%");
        assert_eq!(escape_overlay_text("a,b;c"), "a\\,b\\;c");
    }

    #[test]
    fn test_atempo_stages_in_range() {
        // Every stage must be within atempo's portable 0.5-2.0 range,
        // and the product must reproduce the factor.
        for factor in [0.1, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0, 10.0] {
            let stages = atempo_stages(factor);
            let product: f64 = stages.iter().product();
            assert!((product - factor).abs() < 1e-9, "factor {factor}");
            for stage in stages {
                assert!((0.5..=2.0).contains(&stage), "factor {factor}, stage {stage}");
            }
        }
    }

    #[test]
    fn test_atempo_chain_strings() {
        assert_eq!(atempo_chain(2.0), "atempo=2");
        assert_eq!(atempo_chain(4.0), "atempo=2,atempo=2");
        assert_eq!(atempo_chain(0.25), "atempo=0.5,atempo=0.5");
        assert_eq!(atempo_chain(3.0), "atempo=2,atempo=1.5");
    }

    #[test]
    fn test_expected_duration() {
        let mut params = create_test_params();
        assert_eq!(params.expected_duration(), 4.0);
        params.speed_factor = 2.0;
        assert_eq!(params.expected_duration(), 2.0);
    }
}

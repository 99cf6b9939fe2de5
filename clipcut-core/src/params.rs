//! Value objects for the clip transformation pipeline.
//!
//! `EditParameters` is built once per submission by the caller and
//! passed by reference; the pipeline never mutates it.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A readable media source with its probed duration.
///
/// Created by [`SourceMedia::open`] when acquisition
/// completes; read-only to the pipeline. The caller owns the underlying
/// file and its cleanup.
#[derive(Debug, Clone)]
pub struct SourceMedia {
    pub path: PathBuf,
    /// Duration in seconds, >= 0.
    pub duration: f64,
    /// Whether the container carries at least one audio stream.
    pub has_audio: bool,
}

/// The edit parameters for one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditParameters {
    /// Trim start in seconds on the original timeline.
    pub start_time: f64,
    /// Trim end in seconds on the original timeline (exclusive).
    pub end_time: f64,
    /// Playback speed multiplier; 1.0 leaves the timeline unchanged.
    pub speed_factor: f64,
    /// Text stamped bottom-center over the clip; empty means no overlay.
    pub overlay_text: String,
}

impl EditParameters {
    pub fn new(start_time: f64, end_time: f64, speed_factor: f64, overlay_text: String) -> Self {
        Self {
            start_time,
            end_time,
            speed_factor,
            overlay_text,
        }
    }

    /// Validates the parameters against the source duration.
    ///
    /// The range check runs before the speed check, mirroring the
    /// pipeline stage order (trim precedes speed adjustment). All
    /// checks happen before any decoding work is started.
    pub fn validate(&self, duration: f64) -> CoreResult<()> {
        if !self.start_time.is_finite() || !self.end_time.is_finite() {
            return Err(CoreError::InvalidRange(format!(
                "Time bounds must be finite (start={}, end={})",
                self.start_time, self.end_time
            )));
        }
        if self.start_time < 0.0 || self.end_time > duration {
            return Err(CoreError::InvalidRange(format!(
                "Time bounds [{:.3}, {:.3}] fall outside the source duration [0, {:.3}]",
                self.start_time, self.end_time, duration
            )));
        }
        if self.start_time >= self.end_time {
            return Err(CoreError::InvalidRange(format!(
                "Start time {:.3} must be less than end time {:.3}",
                self.start_time, self.end_time
            )));
        }
        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 {
            return Err(CoreError::InvalidParameter(format!(
                "Speed factor must be greater than zero (got {})",
                self.speed_factor
            )));
        }
        Ok(())
    }

    /// Duration of the trimmed range on the original timeline.
    pub fn trim_duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Playable duration of the output after speed adjustment.
    pub fn expected_output_duration(&self) -> f64 {
        self.trim_duration() / self.speed_factor
    }

    /// Whether a text overlay will be rendered.
    pub fn has_overlay(&self) -> bool {
        !self.overlay_text.trim().is_empty()
    }
}

/// The exported media artifact. Ownership transfers to the caller,
/// which is responsible for offering it for download and deleting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFile {
    pub path: PathBuf,
    /// Encoder used for the video stream (always libx264).
    pub codec: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(start: f64, end: f64, speed: f64) -> EditParameters {
        EditParameters::new(start, end, speed, String::new())
    }

    #[test]
    fn test_valid_range_accepted() {
        assert!(params(2.0, 6.0, 1.0).validate(10.0).is_ok());
        assert!(params(0.0, 10.0, 1.0).validate(10.0).is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = params(6.0, 2.0, 1.0).validate(10.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange(_)), "got {err:?}");
    }

    #[test]
    fn test_equal_bounds_rejected() {
        let err = params(3.0, 3.0, 1.0).validate(10.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange(_)));
    }

    #[test]
    fn test_bounds_outside_duration_rejected() {
        let err = params(2.0, 11.0, 1.0).validate(10.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange(_)));

        let err = params(-1.0, 5.0, 1.0).validate(10.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange(_)));
    }

    #[test]
    fn test_zero_speed_rejected() {
        let err = params(2.0, 6.0, 0.0).validate(10.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidParameter(_)), "got {err:?}");
    }

    #[test]
    fn test_negative_speed_rejected() {
        let err = params(2.0, 6.0, -1.5).validate(10.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidParameter(_)));
    }

    #[test]
    fn test_range_checked_before_speed() {
        // Both invalid: the range error wins, mirroring stage order.
        let err = params(6.0, 2.0, 0.0).validate(10.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange(_)));
    }

    #[test]
    fn test_expected_output_duration() {
        // Source 10s, trim [2, 6) at 1x -> 4s output.
        assert_eq!(params(2.0, 6.0, 1.0).expected_output_duration(), 4.0);
        // Same trim at 2x -> 2s output.
        assert_eq!(params(2.0, 6.0, 2.0).expected_output_duration(), 2.0);
        // Slow-down stretches the clip.
        assert_eq!(params(2.0, 6.0, 0.5).expected_output_duration(), 8.0);
    }

    #[test]
    fn test_has_overlay() {
        assert!(!params(0.0, 1.0, 1.0).has_overlay());
        let mut p = params(0.0, 1.0, 1.0);
        p.overlay_text = "   ".to_string();
        assert!(!p.has_overlay());
        p.overlay_text = "Hello".to_string();
        assert!(p.has_overlay());
    }
}

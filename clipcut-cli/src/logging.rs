// ============================================================================
// clipcut-cli/src/logging.rs
// ============================================================================
//
// LOGGING UTILITIES: Helper Functions for Logging
//
// The main logging implementation uses the standard `log` crate with
// `env_logger` as the backend, configured in main.rs.
//
// USAGE:
// The application uses env_logger with the RUST_LOG environment variable:
// - RUST_LOG=info (default): Normal operation logs
// - RUST_LOG=debug: Detailed debugging information, including the full
//   ffmpeg command line
// - RUST_LOG=trace: Very verbose debugging information

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// Used to generate unique default output filenames.
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

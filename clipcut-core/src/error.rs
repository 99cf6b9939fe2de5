//! Error types for the clipcut-core library.
//!
//! The pipeline taxonomy (`UnreadableMedia`, `InvalidRange`,
//! `InvalidParameter`, `Encoding`) is deliberately separate from
//! acquisition errors, which live in [`crate::acquire::AcquireError`].
//! No variant is ever retried; every failure propagates to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for clipcut-core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    // ---- Pipeline taxonomy ----
    /// The source file is missing, empty, or cannot be decoded.
    #[error("Unreadable media '{path}': {reason}")]
    UnreadableMedia { path: PathBuf, reason: String },

    /// Trim bounds are invalid relative to each other or the source duration.
    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    /// An edit parameter is outside its domain (e.g. speed factor <= 0).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The export/encode step failed.
    #[error("Encoding failed: {0}")]
    Encoding(String),

    // ---- Ambient variants ----
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, std::io::Error),

    #[error("Command '{cmd}' failed (status {status}): {stderr}")]
    CommandFailed {
        cmd: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to parse ffprobe output: {0}")]
    FfprobeParse(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for clipcut-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Creates a `CommandStart` error for a command that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Creates a `CommandFailed` error from an exit status and captured stderr.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: std::process::ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status: status
            .code()
            .map_or_else(|| "terminated by signal".to_string(), |c| c.to_string()),
        stderr: stderr.into(),
    }
}

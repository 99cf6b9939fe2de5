//! Core library for the clipcut clip transformation pipeline.
//!
//! Given a local source file and a set of edit parameters, this crate
//! trims the clip to a time range, adjusts playback speed, optionally
//! composites a text overlay, and exports the result with libx264.
//! Decoding and encoding are delegated to ffmpeg; probing to ffprobe.
//! Remote sources are turned into local files by the `acquire` module.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use clipcut_core::{CoreConfig, EditParameters, transform};
//! use std::path::{Path, PathBuf};
//!
//! let params = EditParameters::new(2.0, 6.0, 1.0, String::new());
//! let config = CoreConfig::new(PathBuf::from("/tmp/edited.mp4"));
//! let output = transform(Path::new("/tmp/source.mp4"), &params, &config).unwrap();
//! println!("wrote {} ({})", output.path.display(), output.codec);
//! ```

pub mod acquire;
pub mod config;
pub mod error;
pub mod external;
pub mod params;
pub mod pipeline;
pub mod temp_files;
pub mod utils;

// Re-exports for public API
pub use acquire::{AcquireError, MediaFetcher, fetch_to_local_file};
pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use external::{MediaInfo, get_media_info};
pub use params::{EditParameters, OutputFile, SourceMedia};
pub use pipeline::transform;
pub use temp_files::{create_temp_dir, create_temp_file_path};
pub use utils::{format_duration, parse_ffmpeg_time};

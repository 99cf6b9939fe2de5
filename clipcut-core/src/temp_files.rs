//! Temporary file management utilities.
//!
//! Helper functions for creating and managing temporary files and
//! directories. The tempfile crate handles automatic cleanup via the
//! Drop trait, so acquisition scratch space is reclaimed on every exit
//! path, including validation and encoding failures.

use crate::error::CoreResult;
use std::path::{Path, PathBuf};
use tempfile::{Builder as TempFileBuilder, TempDir};

/// Creates a temporary directory with prefix. Auto-cleaned when dropped.
pub fn create_temp_dir(base_dir: &Path, prefix: &str) -> CoreResult<TempDir> {
    std::fs::create_dir_all(base_dir)?;

    Ok(TempFileBuilder::new().prefix(prefix).tempdir_in(base_dir)?)
}

/// Returns a temporary file path with random suffix. Does not create the file.
pub fn create_temp_file_path(dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    use rand::distributions::Alphanumeric;
    use rand::{Rng, thread_rng};

    let random_suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();

    let filename = format!("{prefix}_{random_suffix}.{extension}");
    dir.join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_removed_on_drop() {
        let base = tempfile::tempdir().unwrap();
        let path = {
            let dir = create_temp_dir(base.path(), "clipcut_test").unwrap();
            let path = dir.path().to_path_buf();
            assert!(path.exists());
            path
        };
        assert!(!path.exists(), "temp dir should be cleaned up on drop");
    }

    #[test]
    fn test_temp_file_path_has_prefix_and_extension() {
        let base = tempfile::tempdir().unwrap();
        let path = create_temp_file_path(base.path(), "download", "mp4");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("download_"), "{name}");
        assert!(name.ends_with(".mp4"), "{name}");
        assert!(!path.exists());
    }
}

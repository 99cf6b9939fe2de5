//! Acquisition of remote media sources.
//!
//! This module is the collaborator that turns a URL into a local,
//! fully-written file the pipeline can consume. Its failures are a
//! distinct error class ([`AcquireError`]) and are never conflated
//! with pipeline errors.
//!
//! Fetching is a capability dispatch: URLs on known video-hosting
//! sites need a specialized downloader (yt-dlp), generic direct URLs
//! get a streamed HTTP fetch. Both implement the same
//! [`MediaFetcher`] contract.

use crate::temp_files::create_temp_file_path;

use reqwest::Url;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Hosts whose URLs need the specialized downloader rather than a
/// direct HTTP fetch.
const HOSTED_SITES: &[&str] = &["youtube.com", "youtu.be", "vimeo.com"];

/// Errors from media acquisition. Kept separate from
/// [`crate::error::CoreError`]: a download failure is not a pipeline
/// failure.
#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("Malformed URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("Downloader '{0}' not found; install it to fetch hosted videos")]
    DownloaderNotFound(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The common contract both fetch strategies implement: produce a
/// local, fully-written file under `dest_dir` for the given URL.
pub trait MediaFetcher {
    /// Strategy name, for logging and dispatch inspection.
    fn name(&self) -> &'static str;

    fn fetch(&self, url: &Url, dest_dir: &Path) -> Result<PathBuf, AcquireError>;
}

/// Parses and checks a URL before any network I/O happens.
pub fn parse_media_url(url: &str) -> Result<Url, AcquireError> {
    let parsed = Url::parse(url).map_err(|e| AcquireError::MalformedUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AcquireError::MalformedUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(parsed)
}

/// Whether the URL points at a known video-hosting site.
pub fn is_hosted_url(url: &Url) -> bool {
    url.host_str().is_some_and(|host| {
        let host = host.strip_prefix("www.").unwrap_or(host);
        HOSTED_SITES
            .iter()
            .any(|site| host == *site || host.ends_with(&format!(".{site}")))
    })
}

/// Selects the fetch strategy for a URL.
pub fn fetcher_for_url(url: &Url) -> Box<dyn MediaFetcher> {
    if is_hosted_url(url) {
        Box::new(HostedFetcher)
    } else {
        Box::new(DirectFetcher)
    }
}

/// Parses, dispatches, and fetches in one call.
pub fn fetch_to_local_file(url: &str, dest_dir: &Path) -> Result<PathBuf, AcquireError> {
    let parsed = parse_media_url(url)?;
    let fetcher = fetcher_for_url(&parsed);
    log::info!("Fetching {url} via {} strategy", fetcher.name());
    fetcher.fetch(&parsed, dest_dir)
}

/// Fetches from known video-hosting sites by shelling out to yt-dlp.
pub struct HostedFetcher;

impl HostedFetcher {
    const DOWNLOADER: &'static str = "yt-dlp";
    const OUTPUT_PREFIX: &'static str = "hosted_fetch";
}

impl MediaFetcher for HostedFetcher {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    fn fetch(&self, url: &Url, dest_dir: &Path) -> Result<PathBuf, AcquireError> {
        crate::external::check_dependency(Self::DOWNLOADER)
            .map_err(|_| AcquireError::DownloaderNotFound(Self::DOWNLOADER.to_string()))?;

        std::fs::create_dir_all(dest_dir)?;
        let output_template = dest_dir
            .join(format!("{}.%(ext)s", Self::OUTPUT_PREFIX))
            .to_string_lossy()
            .into_owned();

        log::debug!("Running {} for {url}", Self::DOWNLOADER);
        let output = Command::new(Self::DOWNLOADER)
            .args(["-f", "best[ext=mp4]"])
            .args(["--no-playlist", "--quiet"])
            .args(["-o", &output_template])
            .arg(url.as_str())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(AcquireError::DownloadFailed(format!(
                "{} exited with status {:?}: {}",
                Self::DOWNLOADER,
                output.status.code(),
                stderr.trim()
            )));
        }

        // yt-dlp substitutes the real extension into the template.
        find_fetched_file(dest_dir, Self::OUTPUT_PREFIX)?.ok_or_else(|| {
            AcquireError::DownloadFailed(format!(
                "{} reported success but produced no file in {}",
                Self::DOWNLOADER,
                dest_dir.display()
            ))
        })
    }
}

/// Fetches generic direct URLs with a streamed HTTP download.
pub struct DirectFetcher;

impl MediaFetcher for DirectFetcher {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn fetch(&self, url: &Url, dest_dir: &Path) -> Result<PathBuf, AcquireError> {
        std::fs::create_dir_all(dest_dir)?;
        let extension = url
            .path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
            .and_then(|name| {
                Path::new(&name)
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "mp4".to_string());

        let dest = create_temp_file_path(dest_dir, "direct_fetch", &extension);

        let client = reqwest::blocking::Client::builder().build()?;
        let mut response = client.get(url.clone()).send()?.error_for_status()?;

        let mut file = std::fs::File::create(&dest)?;
        let bytes = response.copy_to(&mut file).map_err(|e| {
            // Leave no partial download behind.
            let _ = std::fs::remove_file(&dest);
            AcquireError::DownloadFailed(format!("streaming {url} failed: {e}"))
        })?;

        log::debug!("Downloaded {bytes} bytes to {}", dest.display());
        Ok(dest)
    }
}

/// Locates the file a downloader wrote under `dir` from a known
/// filename prefix.
fn find_fetched_file(dir: &Path, prefix: &str) -> Result<Option<PathBuf>, AcquireError> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(prefix) && entry.path().is_file() {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}

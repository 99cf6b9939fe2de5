// clipcut-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Clipcut: Clip extraction and transformation tool",
    long_about = "Trims, retimes, and captions video clips using ffmpeg via the clipcut-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extracts and transforms a clip from a local file or URL
    Edit(EditArgs),
    /// Prints media information for a local file
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Input media: a local file path or an http(s) URL
    #[arg(short = 'i', long = "input", required = true, value_name = "PATH_OR_URL")]
    pub input: String,

    /// Clip start time in seconds, measured on the source timeline
    #[arg(short = 's', long = "start", required = true, value_name = "SECONDS")]
    pub start: f64,

    /// Clip end time in seconds, measured on the source timeline
    #[arg(short = 'e', long = "end", required = true, value_name = "SECONDS")]
    pub end: f64,

    /// Playback speed multiplier (must be > 0; 2.0 halves the duration)
    #[arg(long = "speed", value_name = "FACTOR", default_value_t = 1.0)]
    pub speed: f64,

    /// Caption text rendered on a band at the bottom of the clip
    #[arg(short = 't', long = "text", value_name = "TEXT", default_value = "")]
    pub text: String,

    /// Output file path (defaults to clip_<timestamp>.mp4 in the current directory)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Optional: directory for temporary files (defaults to the system temp dir)
    #[arg(long, value_name = "TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Optional: override the x264 CRF quality (0-51, lower is better quality)
    #[arg(long, value_name = "CRF", value_parser = clap::value_parser!(u8).range(0..=51))]
    pub crf: Option<u8>,

    /// Optional: override the x264 encoder preset (e.g. fast, medium, slow)
    #[arg(long, value_name = "PRESET")]
    pub preset: Option<String>,
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Local media file to inspect
    #[arg(required = true, value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Print the information as JSON instead of formatted text
    #[arg(long)]
    pub json: bool,
}

// clipcut-cli/src/commands/edit.rs
//
// The `edit` subcommand: acquire the source if it is a URL, then run the
// clipcut-core pipeline with the parameters collected from the command line.

use crate::cli::EditArgs;
use crate::logging::get_timestamp;
use crate::output::{print_heading, print_info, print_section, print_success};
use clipcut_core::{
    CoreConfig, EditParameters, create_temp_dir, fetch_to_local_file, format_duration, transform,
};
use log::{debug, info};
use std::env;
use std::path::PathBuf;

/// Returns true when the input names a remote source rather than a local file.
fn is_remote_input(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Execute the edit command.
pub fn execute_edit(args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    print_heading("Clipcut Edit");

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("clip_{}.mp4", get_timestamp())));

    let temp_base = args.temp_dir.clone().unwrap_or_else(env::temp_dir);

    // Remote inputs are downloaded into a scoped temporary directory.
    // The TempDir guard lives until this function returns, so the fetched
    // file is removed whether the edit succeeds or fails.
    let mut fetch_dir = None;
    let source_path = if is_remote_input(&args.input) {
        info!("Fetching remote source {}", args.input);
        print_info("Fetching", &args.input);
        let dir = create_temp_dir(&temp_base, "clipcut_fetch")?;
        let local = fetch_to_local_file(&args.input, dir.path())?;
        debug!("Fetched to {}", local.display());
        fetch_dir = Some(dir);
        local
    } else {
        PathBuf::from(&args.input)
    };

    let params = EditParameters::new(args.start, args.end, args.speed, args.text.clone());

    let mut config = CoreConfig::new(output_path);
    if let Some(crf) = args.crf {
        config.crf = crf;
    }
    if let Some(preset) = args.preset.clone() {
        config.preset = preset;
    }

    print_section("Parameters");
    print_info("Source", source_path.display());
    print_info("Range", format!("{:.2}s - {:.2}s", args.start, args.end));
    print_info("Speed", format!("{}x", args.speed));
    if params.has_overlay() {
        print_info("Caption", &args.text);
    }
    print_info("Output", config.output_path.display());

    let result = transform(&source_path, &params, &config)?;

    print_success(&format!(
        "Wrote {} ({}, expected duration {})",
        result.path.display(),
        result.codec,
        format_duration(params.expected_output_duration())
    ));

    drop(fetch_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_input_detection() {
        assert!(is_remote_input("https://example.com/clip.mp4"));
        assert!(is_remote_input("http://example.com/clip.mp4"));
        assert!(!is_remote_input("/videos/clip.mp4"));
        assert!(!is_remote_input("clip.mp4"));
        assert!(!is_remote_input("ftp://example.com/clip.mp4"));
    }
}

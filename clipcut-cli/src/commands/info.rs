// clipcut-cli/src/commands/info.rs
//
// The `info` subcommand: probe a local file and print its properties.

use crate::cli::InfoArgs;
use crate::output::{print_heading, print_info};
use clipcut_core::{SourceMedia, format_duration};
use log::info;
use serde_json::json;

/// Execute the info command.
pub fn execute_info(args: InfoArgs) -> Result<(), Box<dyn std::error::Error>> {
    info!("Probing {}", args.input.display());

    // Same readability checks as the edit pipeline, and one ffprobe
    // run shared between them, so info and edit agree on what counts
    // as unreadable.
    let (source, media) = SourceMedia::open_with_info(&args.input)?;

    if args.json {
        let doc = json!({
            "path": source.path,
            "duration_seconds": source.duration,
            "width": media.width,
            "height": media.height,
            "audio_streams": media.audio_channels.len(),
            "audio_channels": media.audio_channels,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    print_heading("Media Information");
    print_info("Path", source.path.display());
    print_info(
        "Duration",
        format!("{} ({:.3}s)", format_duration(source.duration), source.duration),
    );
    match (media.width, media.height) {
        (Some(w), Some(h)) => print_info("Resolution", format!("{}x{}", w, h)),
        _ => print_info("Resolution", "unknown"),
    }
    if media.audio_channels.is_empty() {
        print_info("Audio", "none");
    } else {
        let channels = media
            .audio_channels
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        print_info(
            "Audio",
            format!("{} stream(s), channels: {}", media.audio_channels.len(), channels),
        );
    }

    Ok(())
}

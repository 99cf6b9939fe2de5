// clipcut-cli/src/main.rs
//
// Entry point for the clipcut command-line tool.
//
// Responsibilities:
// - Parsing command-line arguments (see cli.rs).
// - Initializing logging via env_logger (RUST_LOG controls verbosity).
// - Dispatching to the subcommand implementations in commands/.
// - Translating failures into a non-zero exit code with the error
//   message printed verbatim to stderr.

mod cli;
mod commands;
mod logging;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use std::process;

fn main() {
    // Default to info-level logs unless RUST_LOG overrides it.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Edit(args) => commands::edit::execute_edit(args),
        Commands::Info(args) => commands::info::execute_info(args),
    };

    if let Err(e) = result {
        output::print_error(&e.to_string());
        process::exit(1);
    }
}

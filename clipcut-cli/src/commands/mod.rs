// clipcut-cli/src/commands/mod.rs
//
// Subcommand implementations.

pub mod edit;
pub mod info;

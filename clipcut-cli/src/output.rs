// clipcut-cli/src/output.rs
//
// Terminal output helpers. All styling goes through the `console` crate so
// colors degrade gracefully when stdout is not a terminal.

use console::style;
use std::fmt::Display;

/// Print a heading with clear separation
pub fn print_heading(text: &str) {
    let line = "=".repeat(50);
    println!("\n{}", style(&line).blue());
    println!("{}", style(format!(" {} ", text)).bold().white());
    println!("{}\n", style(&line).blue());
}

/// Print a section heading (smaller than main heading)
pub fn print_section(text: &str) {
    let line = "-".repeat(40);
    println!("\n{}", style(&line).blue());
    println!("{}", style(format!(" {} ", text)).bold());
    println!("{}", style(&line).blue());
}

/// Print an info line with label and value, with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("{}: {}", style(label).cyan(), value);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}

//! Terminal output helpers.

use crossterm::style::Stylize;

/// Label column width for field listings.
const LABEL_WIDTH: usize = 14;

/// Print a package heading: `  <name> <version>`.
pub fn heading(name: &str, version: &str) {
    println!();
    println!("  {} {}", name.white().bold(), version.dark_grey());
    println!();
}

/// Print one aligned `label value` row.
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {label:<LABEL_WIDTH$}{value}");
}

/// Print a success line.
pub fn success(msg: &str) {
    println!("  {} {msg}", "✓".green());
}

/// Print a failure line.
pub fn failure(msg: &str) {
    println!("  {} {msg}", "✗".red());
}

/// Render a flag as `yes`/`no`.
pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Ready item line (green checkmark, indented)
pub fn ready_line(msg: &(impl std::fmt::Display + ?Sized)) -> String {
    format!("  {} {}", "✓".green(), msg)
}

/// Not-ready item line (red X, indented)
pub fn not_ready_line(msg: &(impl std::fmt::Display + ?Sized)) -> String {
    format!("  {} {}", "✗".red(), msg)
}

/// Labelled value line, indented
pub fn field_line(label: &str, value: &(impl std::fmt::Display + ?Sized)) -> String {
    format!("  {}: {}", label, value)
}

/// Indented detail line (no color)
pub fn detail_line(msg: &(impl std::fmt::Display + ?Sized)) -> String {
    format!("  {}", msg)
}

/// Print report title (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print section heading (bold)
pub fn section(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().bold());
}

/// Print plain output (no color, for scripts, manifests and names)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

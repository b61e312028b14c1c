//! Terminal styling utilities for consistent CLI output

use colored::Colorize;

/// Print an error message to stderr
pub fn error(msg: &str) {
    eprintln!("{}  {}", "✗".red().bold(), msg);
}

/// Print a dimmed follow-up line to stderr (parser diagnostics, hints)
pub fn hint(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a success message to stdout
pub fn success(msg: &str) {
    println!("{}  {}", "✓".green().bold(), msg);
}

/// Print a progress step (dimmed bullet)
pub fn step(msg: &str) {
    println!("{}", format!("• {msg}").dimmed());
}

/// Print a command header
pub fn header(msg: &str) {
    println!("{}", format!("➜  {msg}").cyan().bold());
}

/// Format a path for display (bright white)
pub fn path(p: &std::path::Path) -> String {
    p.display().to_string().bright_white().to_string()
}

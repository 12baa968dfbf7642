//! Terminal control utilities

use std::io::Write;

/// Prints a user-visible warning line on stderr. Skipped directories,
/// ignored filter lines, and degraded lookups all go through here so
/// nothing disappears silently.
pub fn warn(message: impl std::fmt::Display) {
    eprintln!("⚠️  {message}");
}

/// Sets the terminal title using ANSI escape sequences
pub fn set_terminal_title(title: &str) {
    print!("\x1b]0;{title}\x07");
}

/// Sets the terminal title and flushes stdout so it applies immediately
pub fn set_terminal_title_and_flush(title: &str) {
    set_terminal_title(title);
    let _ = std::io::stdout().flush();
}

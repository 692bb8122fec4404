//! Piped stdin detection and draining.

use std::io::{self, Read};

use crossterm::tty::IsTty;

/// Read piped stdin, if any.
///
/// Must run before anything else touches stdin. Returns `None` when stdin
/// is a terminal (interactive use) or the piped data is all whitespace.
/// Invalid UTF-8 is replaced, never fatal.
pub fn read_piped_stdin() -> Option<String> {
    let mut stdin = io::stdin();
    if stdin.is_tty() {
        return None;
    }

    let mut bytes = Vec::new();
    stdin.read_to_end(&mut bytes).ok()?;
    let content = String::from_utf8_lossy(&bytes);
    let trimmed = content.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

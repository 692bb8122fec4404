//! Pipe-aware chunked output.
//!
//! When stdout is a TTY and `--raw` is off, the response passes through
//! the markdown colorizer first; otherwise the raw text is written
//! unchanged. Writes are chunked; a chunk boundary never lands inside an
//! ANSI escape sequence or a UTF-8 code point, and a single trailing
//! newline is guaranteed.

use std::io::{self, Write};

use crossterm::tty::IsTty;

use super::markdown::render_markdown;

/// Target chunk size per write. A chunk may run a few bytes past this to
/// finish an escape sequence or a multi-byte character.
const CHUNK_SIZE: usize = 8192;

pub fn is_stdout_tty() -> bool {
    io::stdout().is_tty()
}

/// Render the response to stdout.
pub fn print_response(text: &str, raw: bool) -> io::Result<()> {
    let colorize = !raw && is_stdout_tty();
    let rendered;
    let out_text = if colorize {
        rendered = render_markdown(text);
        rendered.as_str()
    } else {
        text
    };

    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_chunked(&mut lock, out_text)?;
    if !out_text.ends_with('\n') {
        lock.write_all(b"\n")?;
    }
    lock.flush()
}

/// Write `text` in bounded chunks.
pub fn write_chunked(out: &mut impl Write, text: &str) -> io::Result<()> {
    for span in chunk_spans(text, CHUNK_SIZE) {
        out.write_all(span.as_bytes())?;
    }
    Ok(())
}

/// Split `text` into spans of roughly `size` bytes, cutting only at
/// character boundaries and never inside an ANSI CSI sequence.
fn chunk_spans(text: &str, size: usize) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut in_escape = false;

    for (idx, ch) in text.char_indices() {
        if !in_escape && idx - start >= size {
            spans.push(&text[start..idx]);
            start = idx;
        }
        if in_escape {
            // CSI sequences end at the first alphabetic byte
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        }
    }
    if start < text.len() {
        spans.push(&text[start..]);
    }
    spans
}

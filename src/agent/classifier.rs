//! Keyword-based agent detection.
//!
//! Keyword sets are bilingual (Polish + English) and matched as substrings
//! of an ASCII-lowercased copy of the prompt, so results never depend on
//! locale case folding. Priority is strict:
//! DEBUGGER > CODER > CREATIVE > SUMMARIZER > DEFAULT.

use super::AgentKind;

/// Attached files at or above this size suggest a summarization task even
/// without an explicit keyword.
pub const SUMMARIZER_FILE_THRESHOLD: u64 = 64 * 1024;

/// Only this much of piped stdin is inspected for error markers.
const STDERR_SNIFF_LIMIT: usize = 4096;

const DEBUG_KEYWORDS: &[&str] = &[
    "błąd", "error", "debug", "fix", "fail", "exception", "traceback", "broken", "napraw",
    "crash", "bug", "nie działa",
];

const CODE_KEYWORDS: &[&str] =
    &["kod", "code", "function", "funkcja", "refactor", "implement", "klasa", "class"];

const CREATIVE_KEYWORDS: &[&str] =
    &["opowiadanie", "wiersz", "story", "poem", "create", "napisz", "imagine", "wymyśl"];

const SUMMARY_KEYWORDS: &[&str] =
    &["podsumuj", "streść", "streszcz", "summarize", "tldr", "explain", "wytłumacz"];

const STDERR_MARKERS: &[&str] = &["Traceback", "Error:", "Exception", "FAILED", "at line"];

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw))
}

/// Heuristic: does piped stdin look like captured error output?
///
/// Checks the first 4 KiB for well-known error markers (case-sensitive,
/// the way compilers and test runners actually print them).
pub fn stdin_looks_like_stderr(stdin_data: &str) -> bool {
    let mut end = stdin_data.len().min(STDERR_SNIFF_LIMIT);
    while !stdin_data.is_char_boundary(end) {
        end -= 1;
    }
    let head = &stdin_data[..end];
    STDERR_MARKERS.iter().any(|marker| head.contains(marker))
}

/// Classify a request into an [`AgentKind`].
///
/// `file_bytes` is the combined size of all attachments; console output or
/// stderr-looking stdin wins over everything else.
pub fn classify_agent(
    prompt: &str,
    has_file: bool,
    file_bytes: u64,
    has_console: bool,
    stdin_is_stderr: bool,
) -> AgentKind {
    let normalized = prompt.to_ascii_lowercase();

    if has_console || stdin_is_stderr || contains_any(&normalized, DEBUG_KEYWORDS) {
        return AgentKind::Debugger;
    }
    if has_file && contains_any(&normalized, CODE_KEYWORDS) {
        return AgentKind::Coder;
    }
    if contains_any(&normalized, CREATIVE_KEYWORDS) {
        return AgentKind::Creative;
    }
    if contains_any(&normalized, SUMMARY_KEYWORDS)
        || (has_file && file_bytes >= SUMMARIZER_FILE_THRESHOLD)
    {
        return AgentKind::Summarizer;
    }

    AgentKind::Default
}

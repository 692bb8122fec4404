//! Context-injection envelopes.
//!
//! Attached files, captured command output, and piped stdin are embedded in
//! the outgoing user message between marker lines. Downstream models are
//! prompted to recognize these markers, so they are a wire contract: the
//! byte-exact strings below must never be paraphrased or reordered.

/// Marker pair delimiting an attached file.
pub const FILE_START: &str = "===FILE_START===";
pub const FILE_END: &str = "===FILE_END===";

/// Marker pair delimiting captured command output.
pub const CONSOLE_START: &str = "===CONSOLE_START===";
pub const CONSOLE_END: &str = "===CONSOLE_END===";

/// Marker pair delimiting piped standard input.
pub const STDIN_START: &str = "===STDIN_START===";
pub const STDIN_END: &str = "===STDIN_END===";

const START_MARKERS: [&str; 3] = [FILE_START, CONSOLE_START, STDIN_START];
const END_MARKERS: [&str; 3] = [FILE_END, CONSOLE_END, STDIN_END];

/// Wrap `content` between a marker pair.
///
/// The body keeps its content verbatim except that a single trailing
/// newline, if present, is folded into the newline before the end marker.
fn wrap(start: &str, end: &str, content: &str) -> String {
    let body = content.strip_suffix('\n').unwrap_or(content);
    format!("{start}\n{body}\n{end}")
}

/// Build the outgoing user message: the prompt followed by envelopes in
/// fixed order - FILE (one per attachment, in argument order), CONSOLE,
/// STDIN. Absent pieces produce no envelope.
pub fn build_user_message(
    prompt: &str,
    file_contents: &[String],
    console_output: Option<&str>,
    stdin_data: Option<&str>,
) -> String {
    let mut message = prompt.to_string();
    for content in file_contents {
        message.push_str("\n\n");
        message.push_str(&wrap(FILE_START, FILE_END, content));
    }
    if let Some(console) = console_output {
        message.push_str("\n\n");
        message.push_str(&wrap(CONSOLE_START, CONSOLE_END, console));
    }
    if let Some(stdin) = stdin_data {
        message.push_str("\n\n");
        message.push_str(&wrap(STDIN_START, STDIN_END, stdin));
    }
    message
}

/// Remove every envelope block (markers and enclosed content) from `text`.
///
/// Used to collapse a composed user message back to its plain prompt, e.g.
/// when deriving the Brave summarizer query. Trailing whitespace left over
/// from removed blocks is trimmed, so stripping a message built by
/// [`build_user_message`] returns the original prompt.
pub fn strip_envelopes(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut skip_until: Option<&str> = None;

    for line in text.lines() {
        if let Some(end) = skip_until {
            if line == end {
                skip_until = None;
            }
            continue;
        }
        if let Some(idx) = START_MARKERS.iter().position(|m| *m == line) {
            skip_until = Some(END_MARKERS[idx]);
            continue;
        }
        kept.push(line);
    }

    kept.join("\n").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_prompt_has_no_envelopes() {
        assert_eq!(build_user_message("hello", &[], None, None), "hello");
    }

    #[test]
    fn test_file_envelope_wraps_content() {
        let message = build_user_message("Summarize", &["line a\nline b".to_string()], None, None);
        assert_eq!(message, "Summarize\n\n===FILE_START===\nline a\nline b\n===FILE_END===");
    }

    #[test]
    fn test_trailing_newline_not_doubled() {
        let message = build_user_message("Translate", &[], None, Some("line1\nline2\n"));
        assert!(message.ends_with("===STDIN_START===\nline1\nline2\n===STDIN_END==="));
    }

    #[test]
    fn test_envelope_order_is_file_console_stdin() {
        let message = build_user_message(
            "q",
            &["f1".to_string(), "f2".to_string()],
            Some("console out"),
            Some("piped"),
        );
        let file1 = message.find("f1").unwrap();
        let file2 = message.find("f2").unwrap();
        let console = message.find(CONSOLE_START).unwrap();
        let stdin = message.find(STDIN_START).unwrap();
        assert!(file1 < file2 && file2 < console && console < stdin);
    }

    #[test]
    fn test_strip_reproduces_prompt() {
        let message = build_user_message(
            "What does this do?",
            &["fn main() {}\n".to_string()],
            Some("exit 0"),
            None,
        );
        assert_eq!(strip_envelopes(&message), "What does this do?");
    }

    #[test]
    fn test_strip_keeps_text_outside_envelopes() {
        assert_eq!(strip_envelopes("no markers here"), "no markers here");
    }

    #[test]
    fn test_strip_multiple_file_envelopes() {
        let message =
            build_user_message("Compare", &["first".to_string(), "second".to_string()], None, None);
        assert_eq!(strip_envelopes(&message), "Compare");
    }
}

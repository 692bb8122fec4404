//! Retro-styled markdown colorizer.
//!
//! Line-based: fenced code blocks flip a state bit and get frame markers,
//! headers are colored whole, inline elements (code, bold, italic, links,
//! bullets) are rewritten per line. Pure function of its input.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::{Captures, Regex};

// Retro palette, shared with the version banner
const CYAN: (u8, u8, u8) = (0x68, 0xc7, 0xc1);
const YELLOW: (u8, u8, u8) = (0xfa, 0xca, 0x78);
const CORAL: (u8, u8, u8) = (0xf5, 0x7f, 0x5b);
const RED: (u8, u8, u8) = (0xdd, 0x53, 0x41);
const BROWN: (u8, u8, u8) = (0x79, 0x4a, 0x3a);

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const DIM: &str = "\x1b[2m";

pub(crate) fn fg((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{r};{g};{b}m")
}

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("header regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("inline code regex"));
static BOLD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold regex"));
static ITALIC_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("italic regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link regex"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[-*•]\s+").expect("bullet regex"));

struct MarkdownRenderer {
    in_code_block: bool,
}

impl MarkdownRenderer {
    fn new() -> Self {
        Self { in_code_block: false }
    }

    fn render(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut first = true;
        for line in text.split('\n') {
            if !first {
                out.push('\n');
            }
            first = false;
            out.push_str(&self.render_line(line));
        }
        out
    }

    fn render_line(&mut self, line: &str) -> String {
        if line.trim_start().starts_with("```") {
            self.in_code_block = !self.in_code_block;
            let brown = fg(BROWN);
            if self.in_code_block {
                let lang = line.trim_start().trim_start_matches('`').trim();
                let label = if lang.is_empty() { "code" } else { lang };
                return format!("{DIM}{brown}┌─ {label} {RESET}");
            }
            return format!("{DIM}{brown}└─────{RESET}");
        }

        if self.in_code_block {
            return format!("{}{line}{RESET}", fg(CORAL));
        }

        if let Some(caps) = HEADER.captures(line) {
            let mut styled = String::new();
            let _ = write!(styled, "{BOLD}{}{} {}{RESET}", fg(CYAN), &caps[1], &caps[2]);
            return styled;
        }

        render_inline(line)
    }
}

fn render_inline(line: &str) -> String {
    // Code first so asterisks inside backticks stay literal, bold before
    // italic so ** pairs are consumed before single * pairs
    let line = INLINE_CODE.replace_all(line, |caps: &Captures| {
        format!("{}`{}`{RESET}", fg(CORAL), &caps[1])
    });
    let line = BOLD_SPAN.replace_all(&line, |caps: &Captures| {
        format!("{BOLD}{}{}{RESET}", fg(YELLOW), &caps[1])
    });
    let line = ITALIC_SPAN.replace_all(&line, |caps: &Captures| {
        format!("{ITALIC}{}{}{RESET}", fg(RED), &caps[1])
    });
    let line = LINK.replace_all(&line, |caps: &Captures| {
        format!("{}{}{RESET}{DIM} ({}){RESET}", fg(YELLOW), &caps[1], &caps[2])
    });
    let line = BULLET.replace_all(&line, |caps: &Captures| {
        format!("{}{}• {RESET}", &caps[1], fg(CYAN))
    });
    line.into_owned()
}

/// Colorize markdown `text` with the retro palette.
pub fn render_markdown(text: &str) -> String {
    MarkdownRenderer::new().render(text)
}

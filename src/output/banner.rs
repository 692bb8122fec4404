//! Gradient version banner.
//!
//! ASCII art with a vertical color gradient over the retro palette,
//! shown only for `--version` on a TTY.

use std::fmt::Write as _;

use super::markdown::fg;

const RETRO_COLORS: [(u8, u8, u8); 5] = [
    (0x68, 0xc7, 0xc1), // cyan-teal
    (0xfa, 0xca, 0x78), // warm yellow
    (0xf5, 0x7f, 0x5b), // coral
    (0xdd, 0x53, 0x41), // red-orange
    (0x79, 0x4a, 0x3a), // brown
];

const RESET: &str = "\x1b[0m";

const LOGO: &str = r#"        d8b  .d888
         Y8P d88P"
             888
 8888b.  888 888888 888d888
    "88b 888 888    888P"
.d888888 888 888    888
888  888 888 888    888
"Y888888 888 888    888"#;

fn interpolate(a: (u8, u8, u8), b: (u8, u8, u8), t: f32) -> (u8, u8, u8) {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn gradient_color(position: f32, colors: &[(u8, u8, u8)]) -> (u8, u8, u8) {
    match colors {
        [] => (255, 255, 255),
        [only] => *only,
        _ => {
            let position = position.clamp(0.0, 1.0);
            let segments = (colors.len() - 1) as f32;
            let scaled = position * segments;
            let idx = (scaled as usize).min(colors.len() - 2);
            interpolate(colors[idx], colors[idx + 1], scaled - idx as f32)
        }
    }
}

/// Render the banner with a vertical gradient plus a version line.
pub fn banner(version: &str) -> String {
    let lines: Vec<&str> = LOGO.lines().collect();
    let total = lines.len();
    let mut out = String::new();

    for (i, line) in lines.iter().enumerate() {
        let position = if total > 1 { i as f32 / (total - 1) as f32 } else { 0.0 };
        let color = gradient_color(position, &RETRO_COLORS);
        let _ = writeln!(out, "{}{line}{RESET}", fg(color));
    }
    let _ = write!(out, "{}v{version}{RESET}", fg(RETRO_COLORS[2]));
    out
}

// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write SGR sequences to any `impl Write`. The editor
// prints lines to the diagnostic stream rather than painting a screen, so
// this module only needs colours, attributes, and the reset code. Callers
// decide whether colour is wanted at all; `paint` honours a plain switch.
//
// All functions return `io::Result` propagated from the underlying writer.
use std::io::{self, Write};

use crate::color::CellColor;
use crate::style::{Attr, Style};

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Foreground Color ────────────────────────────────────────────────────────

/// Set the foreground (text) color.
///
/// Uses compact SGR codes for standard colors (30-37, 90-97), the 256-color
/// extended format for palette indices 16-255, and 24-bit `TrueColor` for RGB.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 30 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 82 + u16::from(idx))
            } else {
                write!(w, "\x1b[38;5;{idx}m")
            }
        }
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

// ─── Text Attributes ─────────────────────────────────────────────────────────

/// Emit SGR codes for text attributes as a single CSI sequence.
///
/// Does nothing if no attributes are set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    let codes: Vec<&str> = [
        (Attr::BOLD, "1"),
        (Attr::DIM, "2"),
        (Attr::UNDERLINE, "4"),
        (Attr::INVERSE, "7"),
    ]
    .into_iter()
    .filter(|(flag, _)| attr.contains(*flag))
    .map(|(_, code)| code)
    .collect();

    write!(w, "\x1b[{}m", codes.join(";"))
}

// ─── Styled Text ─────────────────────────────────────────────────────────────

/// Write `text` in `style`, resetting afterwards.
///
/// With `color` off the text is written bare, so the same rendering code
/// serves terminals, pipes, and report files.
pub fn paint(w: &mut impl Write, style: Style, text: &str, color: bool) -> io::Result<()> {
    if !color || style.is_plain() {
        return w.write_all(text.as_bytes());
    }
    attrs(w, style.attr)?;
    fg(w, style.fg)?;
    w.write_all(text.as_bytes())?;
    reset(w)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn fg_standard_colors_use_compact_codes() {
        assert_eq!(render(|w| fg(w, CellColor::Ansi256(1))), "\x1b[31m");
        assert_eq!(render(|w| fg(w, CellColor::Ansi256(9))), "\x1b[91m");
    }

    #[test]
    fn fg_extended_and_rgb() {
        assert_eq!(render(|w| fg(w, CellColor::Ansi256(200))), "\x1b[38;5;200m");
        assert_eq!(render(|w| fg(w, CellColor::Rgb(1, 2, 3))), "\x1b[38;2;1;2;3m");
        assert_eq!(render(|w| fg(w, CellColor::Default)), "\x1b[39m");
    }

    #[test]
    fn attrs_empty_writes_nothing() {
        assert_eq!(render(|w| attrs(w, Attr::empty())), "");
    }

    #[test]
    fn attrs_combined_in_one_sequence() {
        assert_eq!(render(|w| attrs(w, Attr::BOLD | Attr::INVERSE)), "\x1b[1;7m");
    }

    #[test]
    fn paint_without_color_is_bare_text() {
        assert_eq!(render(|w| paint(w, Style::CURSOR, "^", false)), "^");
    }

    #[test]
    fn paint_with_color_wraps_and_resets() {
        let s = render(|w| paint(w, Style::END, "**END**", true));
        assert_eq!(s, "\x1b[1m\x1b[32m**END**\x1b[0m");
    }

    #[test]
    fn paint_plain_style_skips_escapes() {
        assert_eq!(render(|w| paint(w, Style::PLAIN, "abc", true)), "abc");
    }
}

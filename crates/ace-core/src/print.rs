//! Line rendering for `P` — how a buffer line looks on the diagnostic stream.
//!
//! A printed line is split into sub-lines that fit the terminal width,
//! optionally prefixed with a right-justified line number. The cursor glyph
//! is spliced in when exactly one line is printed and the cursor is strictly
//! inside a sub-line (column 0 is left implicit). Control characters are
//! shown in caret notation, `^I` for tab, and C1 controls as `~@`..`~_`.
//!
//! Rendering is pure: [`render_line`] and [`render_end`] write into any
//! `Write` and never touch the buffer.

use std::io::{self, Write};

use ace_term::{OutputBuffer, Style, ansi};
use unicode_width::UnicodeWidthChar;

use crate::session::Settings;

/// Everything rendering needs from the session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintStyle {
    pub line_numbers: bool,
    pub terminal_max: usize,
    pub cursor_mark: char,
    pub color: bool,
}

impl PrintStyle {
    #[must_use]
    pub const fn from_settings(settings: &Settings) -> Self {
        Self {
            line_numbers: settings.line_numbers,
            terminal_max: settings.terminal_max,
            cursor_mark: settings.cursor_mark,
            color: settings.color,
        }
    }
}

impl Default for PrintStyle {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Digits reserved for line numbers in a buffer of `line_count` lines.
///
/// Always at least 3, so short files keep a stable gutter.
#[must_use]
pub const fn number_width(line_count: usize) -> usize {
    if line_count < 1_000 {
        3
    } else if line_count < 10_000 {
        4
    } else if line_count < 100_000 {
        5
    } else {
        6
    }
}

/// Caret notation for a control character, or `None` for a printable one.
fn control_image(c: char) -> Option<String> {
    let code = u32::from(c);
    let caret = |prefix: char, base: u32| {
        char::from_u32(u32::from('@') + code - base).map(|ch| format!("{prefix}{ch}"))
    };
    match code {
        0x00..0x20 => caret('^', 0x00),
        0x80..0xA0 => caret('~', 0x80),
        _ => None,
    }
}

/// Display width of `c` as printed.
fn print_width(c: char) -> usize {
    if control_image(c).is_some() {
        2
    } else {
        c.width().unwrap_or(0)
    }
}

/// Split `line` into char-column ranges no wider than `cpl` display cells.
///
/// An empty line still yields one empty sub-line.
#[must_use]
pub fn sub_lines(line: &str, cpl: usize) -> Vec<(usize, usize)> {
    let cpl = cpl.max(1);
    let mut ranges = Vec::new();
    let mut first = 0;
    let mut width = 0;
    for (col, c) in line.chars().enumerate() {
        let w = print_width(c);
        if width + w > cpl && col > first {
            ranges.push((first, col));
            first = col;
            width = 0;
        }
        width += w;
    }
    let end = line.chars().count();
    if ranges.is_empty() || first < end {
        ranges.push((first, end));
    }
    ranges
}

/// Write `text` with control characters in caret notation.
fn write_text(out: &mut impl Write, text: &str, color: bool) -> io::Result<()> {
    let mut plain = String::new();
    for c in text.chars() {
        if let Some(image) = control_image(c) {
            out.write_all(plain.as_bytes())?;
            plain.clear();
            ansi::paint(out, Style::CONTROL, &image, color)?;
        } else {
            plain.push(c);
        }
    }
    out.write_all(plain.as_bytes())
}

fn write_number(out: &mut impl Write, line_no: usize, width: usize, color: bool) -> io::Result<usize> {
    let prefix = format!("{line_no:>width$} ");
    ansi::paint(out, Style::NUMBER, &prefix, color)?;
    Ok(prefix.chars().count())
}

/// Render one buffer line.
///
/// `line_no` is 1-based; `cursor` is the column to mark, if any.
///
/// # Errors
///
/// Returns the first write error from `out`.
pub fn render_line(
    out: &mut (impl Write + ?Sized),
    line: &str,
    line_no: usize,
    line_count: usize,
    cursor: Option<usize>,
    style: &PrintStyle,
) -> io::Result<()> {
    let mut buf = OutputBuffer::new();
    let numbers = style.line_numbers.then(|| number_width(line_count));
    let prefix_width = numbers.map_or(0, |w| w + 1);
    let cpl = style.terminal_max.saturating_sub(prefix_width + 1);
    let mark = style.cursor_mark.to_string();

    for (first, last) in sub_lines(line, cpl) {
        if let Some(width) = numbers {
            write_number(&mut buf, line_no, width, style.color)?;
        }
        let segment = crate::position::slice(line, first, last);
        match cursor {
            Some(col) if first < col && col <= last => {
                let split = crate::position::byte_offset(segment, col - first);
                write_text(&mut buf, &segment[..split], style.color)?;
                ansi::paint(&mut buf, Style::CURSOR, &mark, style.color)?;
                write_text(&mut buf, &segment[split..], style.color)?;
            }
            _ => write_text(&mut buf, segment, style.color)?,
        }
        if numbers.is_some() {
            ansi::paint(&mut buf, Style::EOL, ".", style.color)?;
        }
        buf.write_all(b"\n")?;
    }
    buf.flush_to(out)
}

/// Render the end-of-file marker.
///
/// # Errors
///
/// Returns the first write error from `out`.
pub fn render_end(
    out: &mut (impl Write + ?Sized),
    line_no: usize,
    line_count: usize,
    style: &PrintStyle,
) -> io::Result<()> {
    let mut buf = OutputBuffer::new();
    if style.line_numbers {
        write_number(&mut buf, line_no, number_width(line_count), style.color)?;
    }
    ansi::paint(&mut buf, Style::END, "**END**", style.color)?;
    buf.write_all(b"\n")?;
    buf.flush_to(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Search — literal text location and the last-search memory.
//!
//! Searches are literal, case-sensitive substring matches over the line
//! buffer. They never wrap: forward searches stop at the end-of-file
//! sentinel, backward searches at line 0. The `limit` caps how many lines a
//! single search may scan, counting the line it starts on.
//!
//! # Search memory
//!
//! After a successful search-class command the buffer records what kind of
//! search ran and for which text. Any later cursor move or edit voids it.
//! The memory does two jobs:
//!
//! 1. **Repeat skip**: running the identical search again starts just past
//!    the previous hit instead of finding it a second time.
//! 2. **Substitute**: `S` replaces exactly the text the last search matched,
//!    on the side of the cursor where that search left it.

use crate::position::{Position, byte_offset, char_column, char_len};

/// Columns skipped when the identical search runs again.
pub const REPEAT_SKIP: usize = 1;

// ---------------------------------------------------------------------------
// SearchKind
// ---------------------------------------------------------------------------

/// The search-class command that last succeeded, or `Void`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SearchKind {
    #[default]
    Void,
    Find,
    Traverse,
    Uncover,
    Verify,
    FindBack,
    TraverseBack,
    UncoverBack,
    VerifyBack,
}

impl SearchKind {
    /// True when this search leaves the matched text immediately left of
    /// the cursor (the cursor sits just after the match).
    #[must_use]
    pub const fn text_left_of_cursor(self) -> bool {
        matches!(
            self,
            Self::Traverse | Self::TraverseBack | Self::UncoverBack | Self::VerifyBack
        )
    }
}

// ---------------------------------------------------------------------------
// SearchMemory
// ---------------------------------------------------------------------------

/// What the last successful search matched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchMemory {
    kind: SearchKind,
    text: String,
}

impl SearchMemory {
    #[must_use]
    pub const fn kind(&self) -> SearchKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self.kind, SearchKind::Void)
    }

    pub fn void(&mut self) {
        self.kind = SearchKind::Void;
        self.text.clear();
    }

    pub fn record(&mut self, kind: SearchKind, text: &str) {
        self.kind = kind;
        text.clone_into(&mut self.text);
    }

    /// The skip to use for a `kind` search of `text`: [`REPEAT_SKIP`] if the
    /// memory holds that same search, else 0.
    #[must_use]
    pub fn skip_for(&self, kind: SearchKind, text: &str) -> usize {
        if self.kind == kind && self.text == text {
            REPEAT_SKIP
        } else {
            0
        }
    }
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// A search match: start position and length in characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    /// Start position of the match (line, col).
    pub start: Position,
    /// Length of the match in characters.
    pub len: usize,
}

impl Match {
    /// Column just past the match.
    #[must_use]
    pub const fn end_col(&self) -> usize {
        self.start.col + self.len
    }
}

// ---------------------------------------------------------------------------
// Locate
// ---------------------------------------------------------------------------

/// Find `text` at or after `origin.col + skip` on the origin line, then on
/// following lines from column 0, scanning at most `limit` lines.
///
/// Fails when `origin` is the end-of-file sentinel.
#[must_use]
pub fn locate(lines: &[String], origin: Position, limit: usize, text: &str, skip: usize) -> Option<Match> {
    let len = char_len(text);
    let limit = limit.max(1);
    let mut line = origin.line;
    let mut from = origin.col + skip;
    let mut scanned = 1;

    loop {
        let content = lines.get(line)?;
        if let Some(col) = search_line_forward(content, text, from) {
            return Some(Match {
                start: Position::new(line, col),
                len,
            });
        }
        if scanned >= limit {
            return None;
        }
        line += 1;
        from = 0;
        scanned += 1;
    }
}

/// Find `text` ending at or before `origin.col - skip` on the origin line,
/// then anywhere on preceding lines, scanning at most `limit` lines.
///
/// Works from the end-of-file sentinel, where the first scanned line is the
/// last line of the buffer.
#[must_use]
pub fn locate_back(lines: &[String], origin: Position, limit: usize, text: &str, skip: usize) -> Option<Match> {
    let len = char_len(text);
    let limit = limit.max(1);
    let mut line = origin.line;
    let mut latest_start = origin.col.checked_sub(len + skip);
    let mut scanned = 1;

    loop {
        if let (Some(latest), Some(content)) = (latest_start, lines.get(line)) {
            if let Some(col) = search_line_backward(content, text, latest) {
                return Some(Match {
                    start: Position::new(line, col),
                    len,
                });
            }
        }
        if scanned >= limit || line == 0 {
            return None;
        }
        line -= 1;
        latest_start = char_len(&lines[line]).checked_sub(len);
        scanned += 1;
    }
}

/// Leftmost match starting at or after char column `from`.
fn search_line_forward(line: &str, text: &str, from: usize) -> Option<usize> {
    if from > char_len(line) {
        return None;
    }
    let start = byte_offset(line, from);
    line[start..]
        .find(text)
        .map(|b| char_column(line, start + b))
}

/// Rightmost match starting at or before char column `latest_start`.
fn search_line_backward(line: &str, text: &str, latest_start: usize) -> Option<usize> {
    let end = byte_offset(line, latest_start + char_len(text));
    line[..end].rfind(text).map(|b| char_column(line, b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

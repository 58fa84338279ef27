//! Line buffer — the text being edited and the cursor walking through it.
//!
//! A `Buffer` is a `Vec<String>` of lines without terminators plus a cursor.
//! The cursor may sit one past the last line, on the end-of-file sentinel;
//! most operations need a current line and fail there.
//!
//! Every command kind maps onto one operation here. Operations that take a
//! repeat count `n` run `n` times and stop at the first failing iteration,
//! succeeding only when every iteration did.
//!
//! # Changed flag and search memory
//!
//! Any cursor move or edit **touches** the buffer: it sets the changed flag
//! (which drives monitor-mode printing) and voids the search memory (see
//! [`crate::search`]). Search-class operations record a fresh memory after
//! their own movement. Printing clears the changed flag.
//!
//! # Auxiliary streams
//!
//! The buffer owns at most one auxiliary input (`C`, read by `A`) and one
//! auxiliary output (`O`, written by `W`). They close on drop.

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use ace_term::OutputBuffer;

use crate::error::BufferError;
use crate::position::{Position, byte_offset, char_len, slice};
use crate::print::{self, PrintStyle};
use crate::search::{self, SearchKind, SearchMemory};
use crate::stream::{AuxInput, AuxOutput};

/// Bytes accumulated before each write while saving.
const SAVE_BATCH: usize = 8_192;

/// Path meaning standard input (load) or standard output (save).
pub const STDIO_PATH: &str = "-";

/// Which way an operation moves or looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
}

/// The edited text, cursor, and per-buffer state.
#[derive(Default)]
pub struct Buffer {
    lines: Vec<String>,
    cursor: Position,
    changed: bool,
    memory: SearchMemory,
    input: Option<AuxInput>,
    output: Option<AuxOutput>,
}

impl Buffer {
    /// An empty buffer: no lines, cursor on the sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `lines`, cursor at the origin.
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Build a buffer from text, splitting on `\n`. A missing final
    /// terminator is tolerated.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.split_terminator('\n'))
    }

    // ── Loading and saving ─────────────────────────────────────────────────

    /// Load `path`, or standard input for `-`.
    ///
    /// Bytes that are not valid UTF-8 are replaced.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Load`] if the source cannot be read.
    pub fn load(path: &str) -> Result<Self, BufferError> {
        let load_err = |source: io::Error| BufferError::Load {
            path: PathBuf::from(path),
            source,
        };
        let mut bytes = Vec::new();
        if path == STDIO_PATH {
            io::stdin().lock().read_to_end(&mut bytes).map_err(load_err)?;
        } else {
            File::open(path)
                .and_then(|mut f| f.read_to_end(&mut bytes))
                .map_err(load_err)?;
        }
        let text = String::from_utf8(bytes).unwrap_or_else(|err| {
            tracing::warn!("{path}: not valid UTF-8, invalid bytes replaced");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        });
        let buffer = Self::from_text(&text);
        tracing::debug!(lines = buffer.line_count(), "loaded {path}");
        Ok(buffer)
    }

    /// Save every line, `\n`-terminated, to `path` or standard output for
    /// `-`. Returns the number of lines written.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Save`] if the target cannot be written.
    pub fn save(&self, path: &str) -> Result<usize, BufferError> {
        let written = if path == STDIO_PATH {
            self.write_to(&mut io::stdout().lock())
        } else {
            File::create(path).and_then(|mut f| self.write_to(&mut f))
        };
        let count = written.map_err(|source| BufferError::Save {
            path: PathBuf::from(path),
            source,
        })?;
        tracing::debug!(lines = count, "saved {path}");
        Ok(count)
    }

    /// Write every line to `w` in batches. Returns the line count.
    ///
    /// # Errors
    ///
    /// Returns the first write error.
    pub fn write_to(&self, w: &mut impl Write) -> io::Result<usize> {
        let mut batch = OutputBuffer::new();
        for line in &self.lines {
            batch.push_line(line);
            if batch.len() >= SAVE_BATCH {
                batch.flush_to(w)?;
            }
        }
        batch.flush_to(w)?;
        w.flush()?;
        Ok(self.lines.len())
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// True when the cursor is on the end-of-file sentinel.
    #[inline]
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.cursor.line >= self.lines.len()
    }

    /// The line under the cursor, or `None` on the sentinel.
    #[inline]
    #[must_use]
    pub fn current_line(&self) -> Option<&str> {
        self.lines.get(self.cursor.line).map(String::as_str)
    }

    /// True if the buffer was touched since the last print or
    /// [`clear_changed`](Self::clear_changed).
    #[inline]
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    pub const fn clear_changed(&mut self) {
        self.changed = false;
    }

    #[inline]
    #[must_use]
    pub const fn search_memory(&self) -> &SearchMemory {
        &self.memory
    }

    /// Place the cursor, clamped to the buffer.
    pub fn set_cursor(&mut self, pos: Position) {
        let line = pos.line.min(self.lines.len());
        let col = self.lines.get(line).map_or(0, |l| pos.col.min(char_len(l)));
        self.move_to(Position::new(line, col));
    }

    // ── Internal helpers ───────────────────────────────────────────────────

    fn touch(&mut self) {
        self.changed = true;
        self.memory.void();
    }

    fn move_to(&mut self, pos: Position) {
        if pos != self.cursor {
            self.cursor = pos;
            self.touch();
        }
    }

    fn current_len(&self) -> usize {
        self.current_line().map_or(0, char_len)
    }

    /// Replace char columns `[from, to)` of the current line with `with`.
    fn splice(&mut self, from: usize, to: usize, with: &str) {
        if let Some(line) = self.lines.get_mut(self.cursor.line) {
            let start = byte_offset(line, from);
            let end = byte_offset(line, to);
            line.replace_range(start..end, with);
        }
    }

    /// Insert `line` above the cursor line (or append at the sentinel).
    /// `onto` moves the cursor onto the new line; otherwise it stays on the
    /// line it was on. Either way the column resets.
    fn insert_line_above(&mut self, line: String, onto: bool) {
        let at = self.cursor.line;
        self.lines.insert(at, line);
        self.cursor = Position::line_start(if onto { at } else { at + 1 });
        self.touch();
    }

    fn step(&mut self, dir: Direction) -> bool {
        match dir {
            Direction::Forward => self.move_next(1),
            Direction::Back => self.move_back(1),
        }
    }

    // ── Movement ───────────────────────────────────────────────────────────

    /// `M`: down `n` lines to column 0. Fails at the sentinel.
    pub fn move_next(&mut self, n: usize) -> bool {
        for _ in 0..n {
            if self.at_end() {
                return false;
            }
            self.move_to(Position::line_start(self.cursor.line + 1));
        }
        true
    }

    /// `M-`: up `n` lines to column 0. The column resets even when already
    /// on line 0, which fails.
    pub fn move_back(&mut self, n: usize) -> bool {
        for _ in 0..n {
            self.move_to(Position::line_start(self.cursor.line));
            if self.cursor.line == 0 {
                return false;
            }
            self.move_to(Position::line_start(self.cursor.line - 1));
        }
        true
    }

    /// `L`: left `n` chars, clamped at column 0.
    pub fn left(&mut self, n: usize) -> bool {
        if self.at_end() {
            return false;
        }
        let delta = n.min(self.cursor.col);
        self.move_to(Position::new(self.cursor.line, self.cursor.col - delta));
        delta == n
    }

    /// `R`: right `n` chars, clamped at end of line.
    pub fn right(&mut self, n: usize) -> bool {
        if self.at_end() {
            return false;
        }
        let delta = n.min(self.current_len() - self.cursor.col);
        self.move_to(Position::new(self.cursor.line, self.cursor.col + delta));
        delta == n
    }

    // ── Searching ──────────────────────────────────────────────────────────

    /// Run a find or traverse search `n` times.
    fn search(&mut self, kind: SearchKind, limit: usize, text: &str, n: usize) -> bool {
        let backward = matches!(kind, SearchKind::FindBack | SearchKind::TraverseBack);
        let lands_after = matches!(kind, SearchKind::Traverse | SearchKind::TraverseBack);
        for _ in 0..n {
            let skip = self.memory.skip_for(kind, text);
            let found = if backward {
                search::locate_back(&self.lines, self.cursor, limit, text, skip)
            } else {
                search::locate(&self.lines, self.cursor, limit, text, skip)
            };
            let Some(m) = found else {
                return false;
            };
            let col = if lands_after { m.end_col() } else { m.start.col };
            self.move_to(Position::new(m.start.line, col));
            self.memory.record(kind, text);
        }
        true
    }

    /// `F`: cursor to the start of the next match.
    pub fn find(&mut self, limit: usize, text: &str, n: usize) -> bool {
        self.search(SearchKind::Find, limit, text, n)
    }

    /// `F-`: cursor to the start of the previous match.
    pub fn find_back(&mut self, limit: usize, text: &str, n: usize) -> bool {
        self.search(SearchKind::FindBack, limit, text, n)
    }

    /// `T`: cursor to just after the next match.
    pub fn traverse(&mut self, limit: usize, text: &str, n: usize) -> bool {
        self.search(SearchKind::Traverse, limit, text, n)
    }

    /// `T-`: cursor to just after the previous match.
    pub fn traverse_back(&mut self, limit: usize, text: &str, n: usize) -> bool {
        self.search(SearchKind::TraverseBack, limit, text, n)
    }

    fn delete(&mut self, dir: Direction, limit: usize, text: &str, n: usize) -> bool {
        for _ in 0..n {
            let found = match dir {
                Direction::Forward => search::locate(&self.lines, self.cursor, limit, text, 0),
                Direction::Back => search::locate_back(&self.lines, self.cursor, limit, text, 0),
            };
            let Some(m) = found else {
                return false;
            };
            self.move_to(m.start);
            self.splice(m.start.col, m.end_col(), "");
            self.touch();
        }
        true
    }

    /// `D`: delete the next match; cursor where the match started.
    pub fn delete_text(&mut self, limit: usize, text: &str, n: usize) -> bool {
        self.delete(Direction::Forward, limit, text, n)
    }

    /// `D-`: delete the previous match; cursor where the match started.
    pub fn delete_back(&mut self, limit: usize, text: &str, n: usize) -> bool {
        self.delete(Direction::Back, limit, text, n)
    }

    /// `U`: remove everything from the cursor up to the next match, joining
    /// lines when the match is further down. The cursor keeps its column,
    /// now just before the match.
    pub fn uncover(&mut self, limit: usize, text: &str, n: usize) -> bool {
        for _ in 0..n {
            let origin = self.cursor;
            let skip = self.memory.skip_for(SearchKind::Uncover, text);
            let Some(m) = search::locate(&self.lines, origin, limit, text, skip) else {
                return false;
            };
            if m.start.line == origin.line {
                self.splice(origin.col, m.start.col, "");
            } else {
                let prefix = slice(&self.lines[origin.line], 0, origin.col).to_owned();
                let suffix = slice(&self.lines[m.start.line], m.start.col, usize::MAX).to_owned();
                self.lines.drain(origin.line..m.start.line);
                self.lines[origin.line] = prefix + &suffix;
            }
            self.cursor = origin;
            self.touch();
            self.memory.record(SearchKind::Uncover, text);
        }
        true
    }

    /// `U-`: remove everything from just after the previous match up to the
    /// cursor, joining lines when the match is further up. The cursor ends
    /// just after the match.
    pub fn uncover_back(&mut self, limit: usize, text: &str, n: usize) -> bool {
        for _ in 0..n {
            let origin = self.cursor;
            let skip = self.memory.skip_for(SearchKind::UncoverBack, text);
            let Some(m) = search::locate_back(&self.lines, origin, limit, text, skip) else {
                return false;
            };
            let col = m.end_col();
            if m.start.line == origin.line {
                self.splice(col, origin.col, "");
            } else {
                let prefix = slice(&self.lines[m.start.line], 0, col).to_owned();
                let suffix = self
                    .lines
                    .get(origin.line)
                    .map_or("", |l| slice(l, origin.col, usize::MAX))
                    .to_owned();
                let end = (origin.line + 1).min(self.lines.len());
                self.lines.drain(m.start.line + 1..end);
                self.lines[m.start.line] = prefix + &suffix;
            }
            self.cursor = Position::new(m.start.line, col);
            self.touch();
            self.memory.record(SearchKind::UncoverBack, text);
        }
        true
    }

    /// `V`: does `text` follow the cursor? No movement.
    pub fn verify(&mut self, text: &str) -> bool {
        let Some(line) = self.current_line() else {
            return false;
        };
        if !slice(line, self.cursor.col, usize::MAX).starts_with(text) {
            return false;
        }
        self.memory.record(SearchKind::Verify, text);
        true
    }

    /// `V-`: does `text` precede the cursor? No movement.
    pub fn verify_back(&mut self, text: &str) -> bool {
        let Some(line) = self.current_line() else {
            return false;
        };
        if !slice(line, 0, self.cursor.col).ends_with(text) {
            return false;
        }
        self.memory.record(SearchKind::VerifyBack, text);
        true
    }

    // ── Editing ────────────────────────────────────────────────────────────

    fn insert_direction(&mut self, dir: Direction, text: &str, n: usize) -> bool {
        if self.at_end() {
            return false;
        }
        if text.is_empty() || n == 0 {
            return true;
        }
        let Some(insert) = repeated(text, n) else {
            return false;
        };
        let col = self.cursor.col;
        self.splice(col, col, &insert);
        if dir == Direction::Forward {
            self.cursor.col += char_len(&insert);
        }
        self.touch();
        true
    }

    /// `I`: insert `n` copies of `text`; cursor after them.
    pub fn insert(&mut self, text: &str, n: usize) -> bool {
        self.insert_direction(Direction::Forward, text, n)
    }

    /// `I-`: insert `n` copies of `text`; cursor before them.
    pub fn insert_back(&mut self, text: &str, n: usize) -> bool {
        self.insert_direction(Direction::Back, text, n)
    }

    /// `N`: insert the local time, `n` times; cursor after it.
    pub fn now(&mut self, n: usize) -> bool {
        self.insert(&timestamp(), n)
    }

    /// `N-`: insert the local time, `n` times; cursor before it.
    pub fn now_back(&mut self, n: usize) -> bool {
        self.insert_back(&timestamp(), n)
    }

    /// `E`: delete `n` chars right of the cursor.
    pub fn erase(&mut self, n: usize) -> bool {
        if self.at_end() {
            return false;
        }
        let col = self.cursor.col;
        let size = n.min(self.current_len() - col);
        self.splice(col, col + size, "");
        self.touch();
        size == n
    }

    /// `E-`: delete `n` chars left of the cursor.
    pub fn erase_back(&mut self, n: usize) -> bool {
        if self.at_end() {
            return false;
        }
        let col = self.cursor.col;
        let size = n.min(col);
        self.splice(col - size, col, "");
        self.cursor.col -= size;
        self.touch();
        size == n
    }

    fn change_case(&mut self, upper: bool, n: usize) -> bool {
        if self.at_end() {
            return false;
        }
        let col = self.cursor.col;
        let len = self.current_len();
        let size = n.min(len - col);
        let folded: String = slice(&self.lines[self.cursor.line], col, col + size)
            .chars()
            .map(|c| fold_case(c, upper))
            .collect();
        self.splice(col, col + size, &folded);
        self.cursor.col += size;
        self.touch();
        n <= len - col
    }

    /// `H`: upper-case `n` chars and step over them.
    pub fn upper_case(&mut self, n: usize) -> bool {
        self.change_case(true, n)
    }

    /// `H-`: lower-case `n` chars and step over them.
    pub fn lower_case(&mut self, n: usize) -> bool {
        self.change_case(false, n)
    }

    /// `J`: append the next line to this one; cursor at the seam.
    pub fn join(&mut self, n: usize) -> bool {
        for _ in 0..n {
            let line = self.cursor.line;
            if line + 1 >= self.lines.len() {
                return false;
            }
            let next = self.lines.remove(line + 1);
            self.cursor.col = char_len(&self.lines[line]);
            self.lines[line].push_str(&next);
            self.touch();
        }
        true
    }

    /// `J-`: append this line to the previous one; cursor at the seam.
    pub fn join_back(&mut self, n: usize) -> bool {
        for _ in 0..n {
            let line = self.cursor.line;
            if line == 0 || self.at_end() {
                return false;
            }
            let current = self.lines.remove(line);
            let prev = &mut self.lines[line - 1];
            self.cursor = Position::new(line - 1, char_len(prev));
            prev.push_str(&current);
            self.touch();
        }
        true
    }

    /// `K`: delete the current line; cursor to the start of the next.
    pub fn kill(&mut self, n: usize) -> bool {
        for _ in 0..n {
            if self.at_end() {
                return false;
            }
            self.lines.remove(self.cursor.line);
            self.cursor.col = 0;
            self.touch();
        }
        true
    }

    /// `K-`: delete the line above; cursor to column 0.
    pub fn kill_back(&mut self, n: usize) -> bool {
        for _ in 0..n {
            self.move_to(Position::line_start(self.cursor.line));
            if self.cursor.line == 0 {
                return false;
            }
            self.lines.remove(self.cursor.line - 1);
            self.cursor.line -= 1;
            self.touch();
        }
        true
    }

    fn break_direction(&mut self, dir: Direction, n: usize) {
        if n == 0 {
            return;
        }
        if self.at_end() {
            for _ in 0..n {
                self.lines.push(String::new());
            }
            let line = match dir {
                Direction::Forward => self.lines.len(),
                Direction::Back => self.lines.len().saturating_sub(1),
            };
            self.cursor = Position::line_start(line);
        } else {
            for _ in 0..n {
                let Position { line, col } = self.cursor;
                let split = byte_offset(&self.lines[line], col);
                let tail = self.lines[line].split_off(split);
                self.lines.insert(line + 1, tail);
                if dir == Direction::Forward {
                    self.cursor = Position::line_start(line + 1);
                }
            }
        }
        self.touch();
    }

    /// `B`: split the line at the cursor; cursor to the start of the second
    /// half. At the sentinel, appends a blank line instead.
    pub fn break_line(&mut self, n: usize) -> bool {
        self.break_direction(Direction::Forward, n);
        true
    }

    /// `B-`: split the line at the cursor; cursor stays at the end of the
    /// first half.
    pub fn break_line_back(&mut self, n: usize) -> bool {
        self.break_direction(Direction::Back, n);
        true
    }

    /// `Q`: copy `n` chars right of the cursor into `into`.
    pub fn quary(&self, n: usize, into: &mut String) -> bool {
        let Some(line) = self.current_line() else {
            return false;
        };
        let col = self.cursor.col;
        let len = char_len(line);
        slice(line, col, col + n.min(len - col)).clone_into(into);
        n <= len - col
    }

    /// `Q-`: copy `n` chars left of the cursor into `into`.
    pub fn quary_back(&self, n: usize, into: &mut String) -> bool {
        let Some(line) = self.current_line() else {
            return false;
        };
        let col = self.cursor.col;
        slice(line, col - n.min(col), col).clone_into(into);
        col >= n
    }

    fn substitute_direction(&mut self, dir: Direction, text: &str) -> bool {
        if self.at_end() || self.memory.is_void() {
            return false;
        }
        let matched = char_len(self.memory.text());
        let mut col = self.cursor.col;
        if self.memory.kind().text_left_of_cursor() {
            col = col.saturating_sub(matched);
        }
        let to = (col + matched).min(self.current_len());
        self.splice(col, to, text);
        self.cursor.col = match dir {
            Direction::Forward => col + char_len(text),
            Direction::Back => col,
        };
        self.touch();
        true
    }

    /// `S`: replace the last matched text with `text`; cursor after the
    /// replacement.
    pub fn substitute(&mut self, text: &str) -> bool {
        self.substitute_direction(Direction::Forward, text)
    }

    /// `S-`: as [`substitute`](Self::substitute), cursor before the
    /// replacement.
    pub fn substitute_back(&mut self, text: &str) -> bool {
        self.substitute_direction(Direction::Back, text)
    }

    // ── Line input and output ──────────────────────────────────────────────

    /// `C`: connect `path` as the auxiliary input. Empty `path` only
    /// disconnects.
    pub fn connect(&mut self, path: &str) -> bool {
        self.input = None;
        if path.is_empty() {
            return true;
        }
        match AuxInput::open(Path::new(path)) {
            Ok(input) => {
                self.input = Some(input);
                true
            }
            Err(err) => {
                tracing::warn!("connect {path}: {err}");
                false
            }
        }
    }

    /// `O`: open `path` as the auxiliary output. Empty `path` only closes.
    pub fn output(&mut self, path: &str) -> bool {
        if let Some(mut old) = self.output.take() {
            if let Err(err) = old.flush() {
                tracing::warn!("closing output: {err}");
            }
        }
        if path.is_empty() {
            return true;
        }
        match AuxOutput::create(Path::new(path)) {
            Ok(output) => {
                self.output = Some(output);
                true
            }
            Err(err) => {
                tracing::warn!("output {path}: {err}");
                false
            }
        }
    }

    fn absorb_direction(&mut self, dir: Direction, n: usize) -> bool {
        for _ in 0..n {
            let Some(input) = self.input.as_mut() else {
                return false;
            };
            let Some(line) = input.next_line() else {
                self.input = None;
                return false;
            };
            self.insert_line_above(line, dir == Direction::Back);
        }
        true
    }

    /// `A`: insert the next auxiliary input line above the cursor line.
    /// End of input disconnects and fails.
    pub fn absorb(&mut self, n: usize) -> bool {
        self.absorb_direction(Direction::Forward, n)
    }

    /// `A-`: as [`absorb`](Self::absorb), moving onto the inserted line.
    pub fn absorb_back(&mut self, n: usize) -> bool {
        self.absorb_direction(Direction::Back, n)
    }

    /// `G`/`G-`: insert lines from `next_line` above the cursor line.
    ///
    /// A line consisting of a single `:`, or `None`, ends input and fails.
    pub fn get(&mut self, dir: Direction, n: usize, mut next_line: impl FnMut() -> Option<String>) -> bool {
        for _ in 0..n {
            match next_line() {
                Some(line) if line != ":" => self.insert_line_above(line, dir == Direction::Back),
                _ => return false,
            }
        }
        true
    }

    fn write_direction(&mut self, dir: Direction, n: usize) -> bool {
        if self.output.is_none() {
            return false;
        }
        for j in 0..n {
            if j >= 1 && !self.step(dir) {
                return false;
            }
            if let (Some(output), Some(line)) = (self.output.as_mut(), self.lines.get(self.cursor.line)) {
                if let Err(err) = output.write_line(line) {
                    tracing::warn!("write: {err}");
                    return false;
                }
            }
        }
        true
    }

    /// `W`: write the current line to the auxiliary output, stepping down
    /// before each further line.
    pub fn write(&mut self, n: usize) -> bool {
        self.write_direction(Direction::Forward, n)
    }

    /// `W-`: as [`write`](Self::write), stepping up.
    pub fn write_back(&mut self, n: usize) -> bool {
        self.write_direction(Direction::Back, n)
    }

    // ── Printing ───────────────────────────────────────────────────────────

    /// `P`/`P-`: print `n` lines to `out`, stepping before each further
    /// line. The cursor glyph only appears when `n == 1`.
    pub fn print(&mut self, dir: Direction, n: usize, style: &PrintStyle, out: &mut dyn Write) -> bool {
        let mark_cursor = n == 1;
        let mut result = true;
        for j in 0..n {
            if j >= 1 && !self.step(dir) {
                result = false;
                break;
            }
            let line_no = self.cursor.line + 1;
            let written = match self.current_line() {
                Some(line) => {
                    let cursor = mark_cursor.then_some(self.cursor.col);
                    print::render_line(out, line, line_no, self.lines.len(), cursor, style)
                }
                None => print::render_end(out, line_no, self.lines.len(), style),
            };
            if let Err(err) = written {
                tracing::warn!("print: {err}");
            }
            self.clear_changed();
        }
        result
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.lines.len())
            .field("cursor", &self.cursor)
            .field("changed", &self.changed)
            .field("memory", &self.memory)
            .field("input", &self.input.is_some())
            .field("output", &self.output.is_some())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The message reported after saving `count` lines to `path`.
#[must_use]
pub fn save_report(count: usize, path: &str) -> String {
    if path == STDIO_PATH {
        format!("Output complete, {count} lines written to standard output")
    } else {
        format!("Output complete, {count} lines written to: {path}")
    }
}

/// Local time in `ctime` layout, e.g. `Sun Aug 16 13:22:34 2020`.
fn timestamp() -> String {
    chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
}

/// `n` copies of `text`, or `None` when they would not fit in memory.
fn repeated(text: &str, n: usize) -> Option<String> {
    let mut out = String::new();
    out.try_reserve_exact(text.len().checked_mul(n)?).ok()?;
    for _ in 0..n {
        out.push_str(text);
    }
    Some(out)
}

/// Case-fold one char, keeping it when the fold is not a single char.
fn fold_case(c: char, upper: bool) -> char {
    let mut folded = if upper {
        c.to_uppercase().collect::<Vec<_>>()
    } else {
        c.to_lowercase().collect::<Vec<_>>()
    };
    if folded.len() == 1 { folded.remove(0) } else { c }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn buf(lines: &[&str]) -> Buffer {
        Buffer::from_lines(lines.iter().copied())
    }

    fn at(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    fn text(b: &Buffer) -> Vec<&str> {
        b.lines().iter().map(String::as_str).collect()
    }

    // ── Construction ───────────────────────────────────────────────────────

    #[test]
    fn from_text_tolerates_missing_final_newline() {
        assert_eq!(text(&Buffer::from_text("a\nb\n")), vec!["a", "b"]);
        assert_eq!(text(&Buffer::from_text("a\nb")), vec!["a", "b"]);
        assert_eq!(text(&Buffer::from_text("\n")), vec![""]);
        assert!(Buffer::from_text("").lines().is_empty());
    }

    #[test]
    fn empty_buffer_cursor_is_sentinel() {
        let b = Buffer::new();
        assert!(b.at_end());
        assert_eq!(b.current_line(), None);
    }

    #[test]
    fn set_cursor_clamps() {
        let mut b = buf(&["abc"]);
        b.set_cursor(at(0, 10));
        assert_eq!(b.cursor(), at(0, 3));
        b.set_cursor(at(5, 2));
        assert_eq!(b.cursor(), at(1, 0));
    }

    // ── Load / save ────────────────────────────────────────────────────────

    #[test]
    fn save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.txt");
        let path = path.to_str().unwrap();
        let b = buf(&["alpha", "", "gamma"]);
        assert_eq!(b.save(path).unwrap(), 3);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "alpha\n\ngamma\n");
        let loaded = Buffer::load(path).unwrap();
        assert_eq!(text(&loaded), vec!["alpha", "", "gamma"]);
        assert_eq!(loaded.cursor(), Position::ZERO);
    }

    #[test]
    fn load_adds_missing_terminator_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.txt");
        std::fs::write(&src, "one\ntwo").unwrap();
        let b = Buffer::load(src.to_str().unwrap()).unwrap();
        let dst = dir.path().join("out.txt");
        b.save(dst.to_str().unwrap()).unwrap();
        assert_eq!(std::fs::read_to_string(dst).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = Buffer::load(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, BufferError::Load { .. }));
    }

    #[test]
    fn save_to_unwritable_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.txt");
        let err = buf(&["x"]).save(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, BufferError::Save { .. }));
    }

    #[test]
    fn write_to_batches_large_buffers() {
        let long = "z".repeat(1000);
        let b = Buffer::from_lines(std::iter::repeat_n(long.as_str(), 50));
        let mut out = Vec::new();
        assert_eq!(b.write_to(&mut out).unwrap(), 50);
        assert_eq!(out.len(), 50 * 1001);
    }

    #[test]
    fn save_report_wording() {
        assert_eq!(save_report(3, "f.txt"), "Output complete, 3 lines written to: f.txt");
        assert_eq!(save_report(0, "-"), "Output complete, 0 lines written to standard output");
    }

    // ── Movement ───────────────────────────────────────────────────────────

    #[test]
    fn move_next_and_back() {
        let mut b = buf(&["a", "b", "c"]);
        assert!(b.move_next(2));
        assert_eq!(b.cursor(), at(2, 0));
        assert!(b.move_next(1));
        assert!(b.at_end());
        assert!(!b.move_next(1));
        assert!(b.move_back(3));
        assert_eq!(b.cursor(), at(0, 0));
        assert!(!b.move_back(1));
    }

    #[test]
    fn move_back_resets_column_even_on_failure() {
        let mut b = buf(&["abc"]);
        b.set_cursor(at(0, 2));
        assert!(!b.move_back(1));
        assert_eq!(b.cursor(), at(0, 0));
    }

    #[test]
    fn move_past_end_stops_partway() {
        let mut b = buf(&["a", "b"]);
        assert!(!b.move_next(5));
        assert!(b.at_end());
    }

    #[test]
    fn left_right_clamp() {
        let mut b = buf(&["hello"]);
        assert!(b.right(3));
        assert_eq!(b.cursor().col, 3);
        assert!(!b.right(5));
        assert_eq!(b.cursor().col, 5);
        assert!(b.left(2));
        assert!(!b.left(10));
        assert_eq!(b.cursor().col, 0);
    }

    #[test]
    fn left_right_fail_at_sentinel() {
        let mut b = Buffer::new();
        assert!(!b.left(1));
        assert!(!b.right(1));
    }

    // ── Searching ──────────────────────────────────────────────────────────

    #[test]
    fn find_moves_to_match_start() {
        let mut b = buf(&["alpha", "beta", "gamma"]);
        assert!(b.find(100, "beta", 1));
        assert_eq!(b.cursor(), at(1, 0));
        assert_eq!(b.search_memory().kind(), SearchKind::Find);
    }

    #[test]
    fn find_repeated_moves_past_previous_hit() {
        let mut b = buf(&["x ab ab ab"]);
        assert!(b.find(1, "ab", 1));
        assert_eq!(b.cursor().col, 2);
        assert!(b.find(1, "ab", 1));
        assert_eq!(b.cursor().col, 5);
        assert!(b.find(1, "ab", 1));
        assert!(!b.find(1, "ab", 1));
        assert_eq!(b.cursor().col, 8);
    }

    #[test]
    fn find_failure_leaves_cursor() {
        let mut b = buf(&["alpha", "beta"]);
        b.set_cursor(at(0, 2));
        assert!(!b.find(100, "zeta", 1));
        assert_eq!(b.cursor(), at(0, 2));
    }

    #[test]
    fn find_back_repeat_skips_adjacent_match() {
        let mut b = buf(&["abab"]);
        b.set_cursor(at(0, 4));
        assert!(!b.find_back(1, "ab", 2));
        assert_eq!(b.cursor().col, 2);

        let mut b = buf(&["ab ab"]);
        b.set_cursor(at(0, 5));
        assert!(b.find_back(1, "ab", 2));
        assert_eq!(b.cursor().col, 0);
    }

    #[test]
    fn traverse_lands_after_match() {
        let mut b = buf(&["ab ab"]);
        assert!(b.traverse(1, "ab", 2));
        assert_eq!(b.cursor().col, 5);
        assert!(!b.traverse(1, "ab", 1));
    }

    #[test]
    fn traverse_repeat_skips_adjacent_match() {
        let mut b = buf(&["abab"]);
        assert!(b.traverse(1, "ab", 1));
        assert_eq!(b.cursor().col, 2);
        assert!(!b.traverse(1, "ab", 1));
        assert_eq!(b.cursor().col, 2);
    }

    #[test]
    fn traverse_back_steps_over_each_match() {
        let mut b = buf(&["one two one"]);
        b.set_cursor(at(0, 11));
        assert!(b.traverse_back(1, "one", 1));
        assert_eq!(b.cursor().col, 11);
        assert!(b.traverse_back(1, "one", 1));
        assert_eq!(b.cursor().col, 3);
    }

    #[test]
    fn delete_text_removes_match() {
        let mut b = buf(&["beta gamma"]);
        assert!(b.delete_text(1, "beta", 1));
        assert_eq!(text(&b), vec![" gamma"]);
        assert_eq!(b.cursor(), at(0, 0));
    }

    #[test]
    fn delete_text_outside_limit_fails_unchanged() {
        let mut b = buf(&["alpha", "beta gamma"]);
        assert!(!b.delete_text(1, "beta", 1));
        assert_eq!(text(&b), vec!["alpha", "beta gamma"]);
        assert_eq!(b.cursor(), at(0, 0));
    }

    #[test]
    fn delete_back_removes_previous_match() {
        let mut b = buf(&["one, two, three"]);
        b.set_cursor(at(0, 15));
        assert!(b.delete_back(1, ", ", 2));
        assert_eq!(text(&b), vec!["onetwothree"]);
        assert_eq!(b.cursor().col, 3);
    }

    #[test]
    fn uncover_same_line() {
        let mut b = buf(&["keep drop this: tail"]);
        b.set_cursor(at(0, 5));
        assert!(b.uncover(1, ":", 1));
        assert_eq!(text(&b), vec!["keep : tail"]);
        assert_eq!(b.cursor(), at(0, 5));
        assert_eq!(b.search_memory().kind(), SearchKind::Uncover);
    }

    #[test]
    fn uncover_across_lines() {
        let mut b = buf(&["start middle", "gone", "rest END tail", "after"]);
        b.set_cursor(at(0, 6));
        assert!(b.uncover(10, "END", 1));
        assert_eq!(text(&b), vec!["start END tail", "after"]);
        assert_eq!(b.cursor(), at(0, 6));
    }

    #[test]
    fn uncover_back_same_line() {
        let mut b = buf(&["head: junk here"]);
        b.set_cursor(at(0, 11));
        assert!(b.uncover_back(1, ":", 1));
        assert_eq!(text(&b), vec!["head:here"]);
        assert_eq!(b.cursor(), at(0, 5));
    }

    #[test]
    fn uncover_back_across_lines() {
        let mut b = buf(&["before", "top [ x", "gone", "y ] bottom"]);
        b.set_cursor(at(3, 2));
        assert!(b.uncover_back(10, "[", 1));
        assert_eq!(text(&b), vec!["before", "top [] bottom"]);
        assert_eq!(b.cursor(), at(1, 5));
    }

    #[test]
    fn uncover_back_from_sentinel_truncates_tail() {
        let mut b = buf(&["a=1", "b", "c"]);
        b.set_cursor(at(3, 0));
        assert!(b.uncover_back(10, "=", 1));
        assert_eq!(text(&b), vec!["a="]);
        assert_eq!(b.cursor(), at(0, 2));
    }

    #[test]
    fn verify_both_sides() {
        let mut b = buf(&["hello world"]);
        b.set_cursor(at(0, 6));
        assert!(b.verify("wor"));
        assert!(!b.verify("World"));
        assert!(b.verify_back("hello "));
        assert!(!b.verify_back("xhello "));
        assert_eq!(b.cursor(), at(0, 6));
        assert_eq!(b.search_memory().kind(), SearchKind::VerifyBack);
    }

    // ── Editing ────────────────────────────────────────────────────────────

    #[test]
    fn insert_forward_advances() {
        let mut b = buf(&["ac"]);
        b.set_cursor(at(0, 1));
        assert!(b.insert("b", 2));
        assert_eq!(text(&b), vec!["abbc"]);
        assert_eq!(b.cursor().col, 3);
    }

    #[test]
    fn insert_back_keeps_cursor() {
        let mut b = buf(&["ac"]);
        b.set_cursor(at(0, 1));
        assert!(b.insert_back("b", 1));
        assert_eq!(text(&b), vec!["abc"]);
        assert_eq!(b.cursor().col, 1);
    }

    #[test]
    fn insert_at_sentinel_fails_and_empty_succeeds() {
        let mut b = Buffer::new();
        assert!(!b.insert("x", 1));
        let mut b = buf(&["x"]);
        b.clear_changed();
        assert!(b.insert("", 3));
        assert!(!b.is_changed());
    }

    #[test]
    fn insert_oversized_repeat_fails_unchanged() {
        let mut b = buf(&["hello"]);
        b.clear_changed();
        assert!(!b.insert("x", usize::MAX));
        assert!(!b.insert_back("xy", usize::MAX / 2 + 1));
        assert_eq!(text(&b), vec!["hello"]);
        assert_eq!(b.cursor().col, 0);
        assert!(!b.is_changed());
    }

    #[test]
    fn now_inserts_timestamp() {
        let mut b = buf(&[""]);
        assert!(b.now(1));
        let line = b.current_line().unwrap();
        assert_eq!(line.len(), 24, "{line}");
        assert_eq!(b.cursor().col, 24);
    }

    #[test]
    fn erase_forward_and_back() {
        let mut b = buf(&["abcdef"]);
        b.set_cursor(at(0, 2));
        assert!(b.erase(2));
        assert_eq!(text(&b), vec!["abef"]);
        assert!(b.erase_back(1));
        assert_eq!(text(&b), vec!["aef"]);
        assert_eq!(b.cursor().col, 1);
        assert!(!b.erase(5));
        assert_eq!(text(&b), vec!["a"]);
    }

    #[test]
    fn erase_of_nothing_still_voids_memory() {
        let mut b = buf(&["ab"]);
        assert!(b.find(1, "b", 1));
        b.clear_changed();
        assert!(b.erase(0));
        assert!(b.is_changed());
        assert!(!b.substitute("X"));

        let mut b = buf(&["ab"]);
        assert!(b.traverse(1, "b", 1));
        assert!(!b.erase(1));
        assert!(b.search_memory().is_void());
        assert_eq!(text(&b), vec!["ab"]);
    }

    #[test]
    fn case_changes_advance() {
        let mut b = buf(&["hello"]);
        assert!(b.upper_case(3));
        assert_eq!(text(&b), vec!["HELlo"]);
        assert_eq!(b.cursor().col, 3);
        assert!(!b.upper_case(5));
        assert_eq!(text(&b), vec!["HELLO"]);
        b.set_cursor(at(0, 0));
        assert!(b.lower_case(2));
        assert_eq!(text(&b), vec!["heLLO"]);
    }

    #[test]
    fn case_change_keeps_multichar_folds() {
        let mut b = buf(&["straße"]);
        assert!(b.upper_case(6));
        assert_eq!(text(&b), vec!["STRAßE"]);
    }

    #[test]
    fn case_change_with_oversized_count_stops_at_line_end() {
        let mut b = buf(&["hello"]);
        b.set_cursor(at(0, 1));
        assert!(!b.upper_case(usize::MAX));
        assert_eq!(text(&b), vec!["hELLO"]);
        assert_eq!(b.cursor().col, 5);
    }

    #[test]
    fn join_forward_and_back() {
        let mut b = buf(&["ab", "cd", "ef"]);
        assert!(b.join(1));
        assert_eq!(text(&b), vec!["abcd", "ef"]);
        assert_eq!(b.cursor(), at(0, 2));
        assert!(b.join(1));
        assert!(!b.join(1));

        let mut b = buf(&["ab", "cd"]);
        b.set_cursor(at(1, 1));
        assert!(b.join_back(1));
        assert_eq!(text(&b), vec!["abcd"]);
        assert_eq!(b.cursor(), at(0, 2));
        assert!(!b.join_back(1));
    }

    #[test]
    fn kill_and_kill_back() {
        let mut b = buf(&["a", "b", "c"]);
        assert!(b.kill(1));
        assert_eq!(text(&b), vec!["b", "c"]);
        assert!(!b.kill(5));
        assert!(b.lines().is_empty());

        let mut b = buf(&["a", "b", "c"]);
        b.set_cursor(at(2, 1));
        assert!(b.kill_back(2));
        assert_eq!(text(&b), vec!["c"]);
        assert_eq!(b.cursor(), at(0, 0));
        assert!(!b.kill_back(1));
    }

    #[test]
    fn kill_back_from_sentinel_removes_last_line() {
        let mut b = buf(&["a", "b"]);
        b.set_cursor(at(2, 0));
        assert!(b.kill_back(1));
        assert_eq!(text(&b), vec!["a"]);
        assert!(b.at_end());
    }

    #[test]
    fn break_line_forward_and_back() {
        let mut b = buf(&["abcd"]);
        b.set_cursor(at(0, 2));
        assert!(b.break_line(1));
        assert_eq!(text(&b), vec!["ab", "cd"]);
        assert_eq!(b.cursor(), at(1, 0));

        let mut b = buf(&["abcd"]);
        b.set_cursor(at(0, 2));
        assert!(b.break_line_back(1));
        assert_eq!(text(&b), vec!["ab", "cd"]);
        assert_eq!(b.cursor(), at(0, 2));
    }

    #[test]
    fn break_line_at_sentinel_appends() {
        let mut b = buf(&["x"]);
        b.set_cursor(at(1, 0));
        assert!(b.break_line(2));
        assert_eq!(text(&b), vec!["x", "", ""]);
        assert!(b.at_end());

        let mut b = buf(&["x"]);
        b.set_cursor(at(1, 0));
        assert!(b.break_line_back(1));
        assert_eq!(text(&b), vec!["x", ""]);
        assert_eq!(b.cursor(), at(1, 0));
    }

    #[test]
    fn break_line_back_at_sentinel_lands_on_last_blank() {
        let mut b = buf(&["x"]);
        b.set_cursor(at(1, 0));
        assert!(b.break_line_back(3));
        assert_eq!(text(&b), vec!["x", "", "", ""]);
        assert_eq!(b.cursor(), at(3, 0));
    }

    #[test]
    fn quary_copies_without_moving() {
        let mut b = buf(&["abcdef"]);
        b.set_cursor(at(0, 2));
        let mut copied = String::new();
        assert!(b.quary(3, &mut copied));
        assert_eq!(copied, "cde");
        assert!(!b.quary(10, &mut copied));
        assert_eq!(copied, "cdef");
        assert!(b.quary_back(2, &mut copied));
        assert_eq!(copied, "ab");
        assert!(!b.quary_back(3, &mut copied));
        assert_eq!(b.cursor(), at(0, 2));
    }

    #[test]
    fn quary_with_oversized_count_copies_the_rest() {
        let mut b = buf(&["hello"]);
        b.set_cursor(at(0, 3));
        let mut copied = String::new();
        assert!(!b.quary(usize::MAX, &mut copied));
        assert_eq!(copied, "lo");
        assert!(!b.quary_back(usize::MAX, &mut copied));
        assert_eq!(copied, "hel");
    }

    #[test]
    fn substitute_after_find() {
        let mut b = buf(&["say hello there"]);
        assert!(b.find(1, "hello", 1));
        assert!(b.substitute("bye"));
        assert_eq!(text(&b), vec!["say bye there"]);
        assert_eq!(b.cursor().col, 7);
        // Memory is spent.
        assert!(!b.substitute("x"));
    }

    #[test]
    fn substitute_after_traverse_replaces_left() {
        let mut b = buf(&["say hello there"]);
        assert!(b.traverse(1, "hello", 1));
        assert!(b.substitute_back("hi"));
        assert_eq!(text(&b), vec!["say hi there"]);
        assert_eq!(b.cursor().col, 4);
    }

    #[test]
    fn substitute_requires_memory() {
        let mut b = buf(&["abc"]);
        assert!(!b.substitute("x"));
        assert!(b.find(1, "b", 1));
        assert!(b.right(0));
        assert!(b.substitute("X"));
        assert_eq!(text(&b), vec!["aXc"]);
    }

    #[test]
    fn any_move_voids_memory() {
        let mut b = buf(&["abc"]);
        assert!(b.find(1, "b", 1));
        assert!(b.right(1));
        assert!(b.search_memory().is_void());
        assert!(!b.substitute("X"));
    }

    // ── Line I/O ───────────────────────────────────────────────────────────

    #[test]
    fn connect_and_absorb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aux.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();

        let mut b = buf(&["last"]);
        assert!(!b.absorb(1));
        assert!(b.connect(path.to_str().unwrap()));
        assert!(b.absorb(1));
        assert_eq!(b.cursor(), at(1, 0));
        assert!(b.absorb_back(1));
        assert_eq!(text(&b), vec!["one", "two", "last"]);
        assert_eq!(b.cursor(), at(1, 0));
        assert!(!b.absorb(1));
        // End of input disconnected the stream.
        assert!(!b.absorb(1));
    }

    #[test]
    fn connect_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut b = Buffer::new();
        assert!(!b.connect(dir.path().join("nope").to_str().unwrap()));
        assert!(b.connect(""));
    }

    #[test]
    fn output_and_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut b = buf(&["a", "b", "c"]);
        assert!(!b.write(1));
        assert!(b.output(path.to_str().unwrap()));
        assert!(b.write(2));
        assert_eq!(b.cursor(), at(1, 0));
        assert!(!b.write(5));
        assert!(b.output(""));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\nb\nc\n");
    }

    #[test]
    fn get_inserts_until_colon() {
        let mut b = buf(&["end"]);
        let mut feed = vec!["x".to_owned(), "y".to_owned(), ":".to_owned()].into_iter();
        assert!(!b.get(Direction::Forward, 5, || feed.next()));
        assert_eq!(text(&b), vec!["x", "y", "end"]);
        assert_eq!(b.cursor(), at(2, 0));
    }

    #[test]
    fn get_back_moves_onto_inserted_line() {
        let mut b = buf(&["end"]);
        assert!(b.get(Direction::Back, 1, || Some("new".to_owned())));
        assert_eq!(text(&b), vec!["new", "end"]);
        assert_eq!(b.cursor(), at(0, 0));
    }

    // ── Printing ───────────────────────────────────────────────────────────

    fn plain() -> PrintStyle {
        PrintStyle {
            color: false,
            ..PrintStyle::default()
        }
    }

    #[test]
    fn print_current_line_with_cursor() {
        let mut b = buf(&["alpha", "beta"]);
        b.set_cursor(at(0, 3));
        let mut out = Vec::new();
        assert!(b.print(Direction::Forward, 1, &plain(), &mut out));
        assert_eq!(String::from_utf8(out).unwrap(), "alp^ha\n");
        assert!(!b.is_changed());
    }

    #[test]
    fn print_several_lines_moves_and_hits_end() {
        let mut b = buf(&["alpha", "beta"]);
        let mut out = Vec::new();
        assert!(b.print(Direction::Forward, 3, &plain(), &mut out));
        assert_eq!(String::from_utf8(out).unwrap(), "alpha\nbeta\n**END**\n");
        assert!(b.at_end());
        let mut out = Vec::new();
        assert!(!b.print(Direction::Forward, 2, &plain(), &mut out));
    }

    #[test]
    fn print_back_walks_upward() {
        let mut b = buf(&["one", "two"]);
        b.set_cursor(at(1, 0));
        let mut out = Vec::new();
        assert!(b.print(Direction::Back, 2, &plain(), &mut out));
        assert_eq!(String::from_utf8(out).unwrap(), "two\none\n");
    }

    #[test]
    fn print_with_numbers() {
        let mut b = buf(&["a"]);
        let style = PrintStyle {
            line_numbers: true,
            ..plain()
        };
        let mut out = Vec::new();
        b.print(Direction::Forward, 2, &style, &mut out);
        assert_eq!(String::from_utf8(out).unwrap(), "  1 a.\n  2 **END**\n");
    }
}

//! Line sources — where command lines and `G` input come from.
//!
//! The session reads every line through a [`LineSource`]: the command loop,
//! the `G`/`G-` commands, and macro definitions that prompt for their body.
//! Sources return `None` once exhausted; the session turns that into a close
//! request.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// A supplier of input lines.
pub trait LineSource {
    /// Next line without its terminator, or `None` when input is exhausted.
    ///
    /// `prompt` is shown first when the source is interactive.
    fn get_line(&mut self, prompt: Option<&str>) -> Option<String>;
}

// ---------------------------------------------------------------------------
// ScriptSource
// ---------------------------------------------------------------------------

/// A fixed list of lines, for scripted runs and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptSource {
    lines: VecDeque<String>,
}

impl ScriptSource {
    #[must_use]
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Lines not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptSource {
    fn get_line(&mut self, _prompt: Option<&str>) -> Option<String> {
        self.lines.pop_front()
    }
}

// ---------------------------------------------------------------------------
// ReaderSource
// ---------------------------------------------------------------------------

/// Lines from any buffered reader: a command file, a shell script, a pipe.
///
/// Prompts are written to `echo` when one is attached.
pub struct ReaderSource<R> {
    reader: R,
    echo: Option<Box<dyn Write>>,
}

impl<R: BufRead> ReaderSource<R> {
    pub const fn new(reader: R) -> Self {
        Self { reader, echo: None }
    }

    /// Write prompts to `echo` before each read.
    #[must_use]
    pub fn with_prompts(mut self, echo: Box<dyn Write>) -> Self {
        self.echo = Some(echo);
        self
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn get_line(&mut self, prompt: Option<&str>) -> Option<String> {
        if let (Some(echo), Some(prompt)) = (self.echo.as_mut(), prompt) {
            let _ = echo.write_all(prompt.as_bytes());
            let _ = echo.flush();
        }
        read_line(&mut self.reader)
    }
}

/// Read one line, stripping `\n` (and a `\r` before it).
///
/// A final line without a terminator still counts. Read errors end input.
pub fn read_line(reader: &mut impl BufRead) -> Option<String> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => {
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            Some(line)
        }
        Err(err) => {
            tracing::warn!("input read failed: {err}");
            None
        }
    }
}

impl<R> std::fmt::Debug for ReaderSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderSource")
            .field("prompts", &self.echo.is_some())
            .finish_non_exhaustive()
    }
}

/// Standard input as a line source, without prompts.
#[must_use]
pub fn stdin_source() -> ReaderSource<io::StdinLock<'static>> {
    ReaderSource::new(io::stdin().lock())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn script_source_yields_in_order_then_none() {
        let mut src = ScriptSource::new(["a", "b"]);
        assert_eq!(src.remaining(), 2);
        assert_eq!(src.get_line(None).as_deref(), Some("a"));
        assert_eq!(src.get_line(Some(">")).as_deref(), Some("b"));
        assert_eq!(src.get_line(None), None);
    }

    #[test]
    fn reader_source_strips_terminators() {
        let mut src = ReaderSource::new(Cursor::new("one\ntwo\r\nthree"));
        assert_eq!(src.get_line(None).as_deref(), Some("one"));
        assert_eq!(src.get_line(None).as_deref(), Some("two"));
        assert_eq!(src.get_line(None).as_deref(), Some("three"));
        assert_eq!(src.get_line(None), None);
    }

    #[test]
    fn reader_source_keeps_empty_lines() {
        let mut src = ReaderSource::new(Cursor::new("\n\nx\n"));
        assert_eq!(src.get_line(None).as_deref(), Some(""));
        assert_eq!(src.get_line(None).as_deref(), Some(""));
        assert_eq!(src.get_line(None).as_deref(), Some("x"));
        assert_eq!(src.get_line(None), None);
    }
}

//! The read-eval loop over one buffer and one session.
//!
//! Each input line is expanded, parsed, and run as a whole. A line that does
//! not parse is reported and skipped. A line that fails reports the last
//! command it ran. Afterwards the current line is shown according to the
//! display mode.

use crate::buffer::{Buffer, Direction, save_report};
use crate::command::Trace;
use crate::error::BufferError;
use crate::parser;
use crate::print::PrintStyle;
use crate::session::{Mode, Session};

const INTERRUPT_MESSAGE: &str = "SIGINT received - quitting current command sequence.";
const TERMINATE_MESSAGE: &str = "SIGTERM received - initiating orderly shutdown.";

/// Owns the buffer being edited and the session driving it.
#[derive(Debug)]
pub struct Interpreter {
    buffer: Buffer,
    session: Session,
}

impl Interpreter {
    #[must_use]
    pub const fn new(buffer: Buffer, session: Session) -> Self {
        Self { buffer, session }
    }

    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Expand, parse and execute `line`.
    ///
    /// Returns `None` when the line did not parse, otherwise the result of
    /// the whole line.
    pub fn run_commands(&mut self, line: &str) -> Option<bool> {
        let command = match parser::parse_line(line, &self.session) {
            Ok(command) => command,
            Err(err) => {
                self.session.report(format_args!("{err} - line ignored"));
                return None;
            }
        };

        let mut trace = Trace::default();
        let ok = command.execute(&mut self.buffer, &mut self.session, &mut trace);
        tracing::debug!(ok, last = ?trace.last_executed(), "line executed");

        if !ok {
            self.session.report(format_args!("Command failure: {}", trace.failure_image()));
        }
        if self.session.interrupt_pending() {
            self.session.report(INTERRUPT_MESSAGE);
        }
        Some(ok)
    }

    /// Run one interactive line: clear per-line state, execute, then print
    /// the current line as the display mode asks.
    pub fn run_line(&mut self, line: &str) {
        self.buffer.clear_changed();
        self.session.clear_interrupt();

        if self.run_commands(line).is_none() {
            return;
        }
        let show = match self.session.mode() {
            Mode::Full => true,
            Mode::Monitor => self.buffer.is_changed(),
            Mode::Quiet => false,
        };
        if show {
            self.print_current();
        }
    }

    /// Print the current line (or `**END**`) with the cursor mark.
    pub fn print_current(&mut self) {
        let style = PrintStyle::from_settings(self.session.settings());
        self.buffer.print(Direction::Forward, 1, &style, self.session.diagnostics());
    }

    /// Read and run lines until the session asks to close. Each line read is
    /// passed to `on_line` before it runs.
    pub fn run(&mut self, mut on_line: impl FnMut(&str)) {
        while !self.session.close_requested() {
            let Some(line) = self.session.read_line(">") else {
                break;
            };
            on_line(&line);
            self.run_line(&line);
        }
    }

    /// Save the buffer to the session target unless the session was
    /// abandoned. Returns the number of lines saved.
    ///
    /// # Errors
    ///
    /// Returns the save error; the caller decides on a fallback.
    pub fn finish(&mut self) -> Result<Option<usize>, BufferError> {
        if self.session.terminated() {
            self.session.report(TERMINATE_MESSAGE);
        }
        if self.session.abandoned() {
            tracing::info!("abandoned, not saving");
            return Ok(None);
        }

        let target = self.session.target().to_owned();
        let count = self.buffer.save(&target)?;
        self.session.report(save_report(count, &target));
        Ok(Some(count))
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.session.exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Capture, TextSlot, exit, test_session};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::sync::atomic::Ordering;

    fn interp(lines: &[&str], script: &[&str]) -> (Interpreter, Capture) {
        let (session, capture) = test_session(script);
        (Interpreter::new(Buffer::from_lines(lines.iter().copied()), session), capture)
    }

    #[test]
    fn find_moves_and_monitor_prints() {
        let (mut it, out) = interp(&["alpha", "beta", "gamma"], &[]);
        it.run_line("F/beta/");
        assert_eq!(it.buffer().cursor().line, 1);
        assert!(out.text().contains("beta"));
    }

    #[test]
    fn parse_error_runs_nothing() {
        let (mut it, out) = interp(&["alpha", "beta"], &[]);
        it.run_line("M (K");
        assert_eq!(out.text(), "Unmatched ( - line ignored\n");
        assert_eq!(it.buffer().cursor().line, 0);
        assert_eq!(it.buffer().line_count(), 2);
    }

    #[test]
    fn failure_reports_last_command() {
        let (mut it, out) = interp(&["alpha"], &[]);
        assert_eq!(it.run_commands("M2 F/zzz/"), Some(false));
        assert!(out.text().contains("Command failure: Move"), "{}", out.text());
    }

    #[test]
    fn oversized_counts_fail_without_panicking() {
        let (mut it, _) = interp(&["hello"], &[]);
        let huge = "99999999999999999999999";
        assert_eq!(it.run_commands(&format!("I/x/{huge}")), Some(false));
        assert_eq!(it.run_commands(&format!("R Q{huge}")), Some(false));
        assert_eq!(it.session().remembered(TextSlot::Modify), "ello");
        assert_eq!(it.run_commands(&format!("H{huge}")), Some(false));
        assert_eq!(it.buffer().lines(), ["hELLO"]);
        assert_eq!(it.buffer().cursor().col, 5);
    }

    #[test]
    fn failing_search_is_named_with_text() {
        let (mut it, out) = interp(&["alpha", "beta"], &[]);
        it.session_mut().set_mode(Mode::Quiet);
        it.run_line("F/zzz/");
        assert_eq!(out.text(), "Command failure: Find 'zzz'\n");
    }

    #[test]
    fn quiet_mode_prints_nothing() {
        let (mut it, out) = interp(&["alpha", "beta"], &[]);
        it.run_line("%Q");
        out.clear();
        it.run_line("M");
        assert_eq!(out.text(), "");
        assert_eq!(it.buffer().cursor().line, 1);
    }

    #[test]
    fn full_mode_prints_unchanged_line() {
        let (mut it, out) = interp(&["alpha", "beta"], &[]);
        it.run_line("%F");
        out.clear();
        it.run_line("V/alpha/");
        assert!(out.text().contains("alpha"));
    }

    #[test]
    fn pending_interrupt_unwinds_line() {
        let (mut it, out) = interp(&["a", "b", "c"], &[]);
        it.session().raise_interrupt();
        assert_eq!(it.run_commands("(M)2"), Some(true));
        assert_eq!(it.buffer().cursor().line, 0);
        assert!(out.text().contains(INTERRUPT_MESSAGE));
    }

    #[test]
    fn run_stops_at_close_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let (mut it, _) = interp(&["one", "two"], &["K", "%C", "never read"]);
        it.session_mut().set_target(path.to_string_lossy());

        let mut seen = Vec::new();
        it.run(|line| seen.push(line.to_owned()));
        assert_eq!(seen, vec!["K", "%C"]);

        assert_eq!(it.finish().unwrap(), Some(1));
        assert_eq!(fs::read_to_string(&path).unwrap(), "two\n");
        assert_eq!(it.exit_code(), exit::OK);
    }

    #[test]
    fn abandon_skips_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let (mut it, _) = interp(&["one"], &["%A"]);
        it.session_mut().set_target(path.to_string_lossy());

        it.run(|_| {});
        assert_eq!(it.finish().unwrap(), None);
        assert!(!path.exists());
        assert_eq!(it.exit_code(), exit::ABANDON);
    }

    #[test]
    fn exhausted_input_closes_with_code_one() {
        let (mut it, out) = interp(&["one"], &["M"]);
        it.session_mut().set_mode(Mode::Quiet);
        it.run(|_| {});
        assert_eq!(out.text(), "input terminated\n");
        assert_eq!(it.exit_code(), exit::INPUT_TERMINATED);
    }

    #[test]
    fn terminate_skips_loop_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let (mut it, out) = interp(&["one"], &["K"]);
        it.session_mut().set_target(path.to_string_lossy());
        it.session().terminate_handle().store(143, Ordering::Relaxed);

        it.run(|_| panic!("no line should be read"));
        assert_eq!(it.finish().unwrap(), Some(1));
        assert!(out.text().starts_with(TERMINATE_MESSAGE));
        assert_eq!(it.exit_code(), 143);
    }

    #[test]
    fn save_error_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let (mut it, _) = interp(&["one"], &[]);
        it.session_mut().set_target(path.to_string_lossy());
        assert!(matches!(it.finish(), Err(BufferError::Save { .. })));
    }

    #[test]
    fn macros_apply_across_lines() {
        let (mut it, _) = interp(&["a", "b", "c", "d"], &[]);
        it.run_line("%X/M2/");
        it.run_line("X");
        assert_eq!(it.buffer().cursor().line, 2);
    }
}

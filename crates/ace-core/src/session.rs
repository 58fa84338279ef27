//! Session context — settings and memory shared by every command.
//!
//! One [`Session`] lives for the whole editing run and is passed by `&mut`
//! into parsing and execution. It holds:
//!
//! - **Settings**: search/repeat/terminal limits, display mode, flags.
//! - **Memory**: the macro bodies `X`, `Y`, `Z` and the last search, modify,
//!   and filename texts that `&` reuses.
//! - **Run state**: interrupt, close, and abandon requests with the exit code.
//! - **I/O seams**: the injected [`LineSource`] and the diagnostic sink that
//!   receives printed lines, reports, and failure messages.
//!
//! # Settings
//!
//! | Setting        | Command    | Default  | Floor |
//! |----------------|------------|----------|-------|
//! | search maximum | `%L n`     | 100000   | 1     |
//! | repeat maximum | `%R n`     | 50000    | 1     |
//! | terminal width | `%T n`     | 160      | 32    |
//! | display mode   | `%F %M %Q` | Monitor  |       |
//! | line numbers   | `%N`       | off      |       |
//! | prompting      | `%P`       | on       |       |
//! | cursor mark    | `%S/c/`    | `^`      |       |
//! | smart quote    | `%D/c/`    | `:`      |       |

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use crate::source::LineSource;

/// Process exit codes.
pub mod exit {
    /// Normal close.
    pub const OK: i32 = 0;
    /// The line source ran dry, or the command line was unusable.
    pub const INPUT_TERMINATED: i32 = 1;
    /// Default code for `%A`.
    pub const ABANDON: i32 = 2;
    /// The source file could not be loaded.
    pub const LOAD_FAILED: i32 = 4;
    /// Saving the target failed; the buffer went to a temporary file.
    pub const FALLBACK_SAVED: i32 = 32;
    /// Saving the target and the temporary file both failed.
    pub const FALLBACK_FAILED: i32 = 64;
}

/// The fixed quote characters accepted around command text.
pub const QUOTES: &str = "\"/'!.+`:=|^";

const DEFAULT_SMART_QUOTE: char = ':';
const DEFAULT_CURSOR_MARK: char = '^';

// ---------------------------------------------------------------------------
// Small value types
// ---------------------------------------------------------------------------

/// When the interpreter prints the current line after a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Print only when the line changed or the cursor moved.
    #[default]
    Monitor,
    /// Print after every command line.
    Full,
    /// Never print automatically.
    Quiet,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Monitor => "Monitor",
            Self::Full => "Full",
            Self::Quiet => "Quiet",
        })
    }
}

/// One of the three user macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroName {
    X,
    Y,
    Z,
}

impl MacroName {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// The macro invoked by `letter` (either case).
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            _ => None,
        }
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Which remembered text a command's `&` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSlot {
    Search,
    Modify,
    Filename,
}

/// The characters that may delimit command text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteSet {
    smart: char,
}

impl QuoteSet {
    #[must_use]
    pub const fn new(smart: char) -> Self {
        Self { smart }
    }

    #[must_use]
    pub fn contains(self, c: char) -> bool {
        c == self.smart || QUOTES.contains(c)
    }

    #[must_use]
    pub const fn smart(self) -> char {
        self.smart
    }
}

impl Default for QuoteSet {
    fn default() -> Self {
        Self::new(DEFAULT_SMART_QUOTE)
    }
}

/// True if `c` can serve as the smart delimiter: printable and not already
/// meaningful in command syntax.
#[must_use]
pub fn is_valid_delimiter(c: char) -> bool {
    !(c.is_alphanumeric() || c.is_whitespace() || c.is_control() || "()-,;#%*&?@\\~".contains(c))
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Tunable session settings. See the module table for defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub search_max: usize,
    pub repeat_max: usize,
    pub terminal_max: usize,
    pub mode: Mode,
    pub line_numbers: bool,
    pub prompting: bool,
    pub cursor_mark: char,
    pub quotes: QuoteSet,
    /// Colour printed lines with ANSI escapes.
    pub color: bool,
}

impl Settings {
    pub const MIN_SEARCH_MAX: usize = 1;
    pub const MIN_REPEAT_MAX: usize = 1;
    pub const MIN_TERMINAL_MAX: usize = 32;
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_max: 100_000,
            repeat_max: 50_000,
            terminal_max: 160,
            mode: Mode::Monitor,
            line_numbers: false,
            prompting: true,
            cursor_mark: DEFAULT_CURSOR_MARK,
            quotes: QuoteSet::default(),
            color: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Settings, memory, run state, and I/O seams for one editing run.
pub struct Session {
    settings: Settings,
    macros: [String; 3],
    last_search: String,
    last_modify: String,
    last_filename: String,

    /// Where the buffer is saved on close; `-` is standard output.
    target: String,
    /// Scratch save location for `%I` and the close fallback.
    temp_path: PathBuf,

    interrupt: Arc<AtomicBool>,
    terminate: Arc<AtomicI32>,
    close: Option<i32>,
    abandon: bool,

    source: Box<dyn LineSource>,
    diag: Box<dyn Write>,
}

impl Session {
    /// A session with default settings reading from `source` and reporting
    /// to standard error.
    #[must_use]
    pub fn new(source: Box<dyn LineSource>) -> Self {
        Self {
            settings: Settings::default(),
            macros: Default::default(),
            last_search: String::new(),
            last_modify: String::new(),
            last_filename: String::new(),
            target: "-".to_owned(),
            temp_path: std::env::temp_dir().join(format!("ace.tmp_{}", std::process::id())),
            interrupt: Arc::new(AtomicBool::new(false)),
            terminate: Arc::new(AtomicI32::new(0)),
            close: None,
            abandon: false,
            source,
            diag: Box::new(io::stderr()),
        }
    }

    /// Send diagnostics (printed lines, reports) to `diag`.
    #[must_use]
    pub fn with_diagnostics(mut self, diag: Box<dyn Write>) -> Self {
        self.diag = diag;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    // ── Settings ────────────────────────────────────────────────────────

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn search_max(&self) -> usize {
        self.settings.search_max
    }

    #[must_use]
    pub const fn repeat_max(&self) -> usize {
        self.settings.repeat_max
    }

    #[must_use]
    pub const fn terminal_max(&self) -> usize {
        self.settings.terminal_max
    }

    pub fn set_search_max(&mut self, n: usize) {
        self.settings.search_max = n.max(Settings::MIN_SEARCH_MAX);
    }

    pub fn set_repeat_max(&mut self, n: usize) {
        self.settings.repeat_max = n.max(Settings::MIN_REPEAT_MAX);
    }

    pub fn set_terminal_max(&mut self, n: usize) {
        self.settings.terminal_max = n.max(Settings::MIN_TERMINAL_MAX);
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.settings.mode
    }

    pub const fn set_mode(&mut self, mode: Mode) {
        self.settings.mode = mode;
    }

    #[must_use]
    pub const fn line_numbers(&self) -> bool {
        self.settings.line_numbers
    }

    pub const fn toggle_line_numbers(&mut self) {
        self.settings.line_numbers = !self.settings.line_numbers;
    }

    #[must_use]
    pub const fn prompting(&self) -> bool {
        self.settings.prompting
    }

    pub const fn toggle_prompting(&mut self) {
        self.settings.prompting = !self.settings.prompting;
    }

    #[must_use]
    pub const fn cursor_mark(&self) -> char {
        self.settings.cursor_mark
    }

    /// Set the cursor glyph from the first char of `text`; empty restores `^`.
    pub fn set_cursor_mark(&mut self, text: &str) {
        self.settings.cursor_mark = text.chars().next().unwrap_or(DEFAULT_CURSOR_MARK);
    }

    #[must_use]
    pub const fn quotes(&self) -> QuoteSet {
        self.settings.quotes
    }

    /// Set the smart delimiter from the first char of `text`; empty restores
    /// `:`. Returns `false` (and changes nothing) for unusable characters.
    pub fn set_smart_delimiter(&mut self, text: &str) -> bool {
        let c = text.chars().next().unwrap_or(DEFAULT_SMART_QUOTE);
        if !is_valid_delimiter(c) {
            return false;
        }
        self.settings.quotes = QuoteSet::new(c);
        true
    }

    #[must_use]
    pub const fn color(&self) -> bool {
        self.settings.color
    }

    // ── Memory ──────────────────────────────────────────────────────────

    #[must_use]
    pub fn macro_body(&self, name: MacroName) -> &str {
        &self.macros[name.index()]
    }

    /// All three macro bodies, indexed `X`, `Y`, `Z`.
    #[must_use]
    pub fn macro_bodies(&self) -> [&str; 3] {
        MacroName::ALL.map(|name| self.macro_body(name))
    }

    pub fn define_macro(&mut self, name: MacroName, body: impl Into<String>) {
        self.macros[name.index()] = body.into();
    }

    /// The remembered text for `slot`.
    #[must_use]
    pub fn remembered(&self, slot: TextSlot) -> &str {
        match slot {
            TextSlot::Search => &self.last_search,
            TextSlot::Modify => &self.last_modify,
            TextSlot::Filename => &self.last_filename,
        }
    }

    pub fn remember(&mut self, slot: TextSlot, text: impl Into<String>) {
        let text = text.into();
        match slot {
            TextSlot::Search => self.last_search = text,
            TextSlot::Modify => self.last_modify = text,
            TextSlot::Filename => self.last_filename = text,
        }
    }

    /// Swap the last search and last modify texts (`%E`).
    pub fn exchange(&mut self) {
        std::mem::swap(&mut self.last_search, &mut self.last_modify);
    }

    // ── Files ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = target.into();
    }

    #[must_use]
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    pub fn set_temp_path(&mut self, path: impl Into<PathBuf>) {
        self.temp_path = path.into();
    }

    // ── Run state ───────────────────────────────────────────────────────

    /// Shared flag raised by SIGINT.
    #[must_use]
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    /// Shared cell receiving the SIGTERM exit code.
    #[must_use]
    pub fn terminate_handle(&self) -> Arc<AtomicI32> {
        Arc::clone(&self.terminate)
    }

    pub fn raise_interrupt(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    pub fn clear_interrupt(&self) {
        self.interrupt.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub fn interrupt_pending(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    /// True when running command groups must unwind: an interrupt is pending
    /// or the session is closing.
    #[must_use]
    pub fn should_unwind(&self) -> bool {
        self.interrupt_pending() || self.close_requested()
    }

    /// Ask for the session to end, saving the buffer, with exit code `code`.
    pub fn request_close(&mut self, code: i32) {
        self.close = Some(code);
    }

    /// Ask for the session to end without saving.
    pub fn request_abandon(&mut self, code: i32) {
        self.abandon = true;
        self.request_close(code);
    }

    #[must_use]
    pub fn close_requested(&self) -> bool {
        self.close.is_some() || self.terminated()
    }

    /// True once SIGTERM has been received.
    #[must_use]
    pub fn terminated(&self) -> bool {
        self.terminate.load(Ordering::Relaxed) != 0
    }

    #[must_use]
    pub const fn abandoned(&self) -> bool {
        self.abandon
    }

    /// The exit code the process should end with.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self.terminate.load(Ordering::Relaxed) {
            0 => self.close.unwrap_or(exit::OK),
            code => code,
        }
    }

    // ── I/O ─────────────────────────────────────────────────────────────

    /// Read a line from the line source, showing `prompt` when prompting is
    /// on. Exhausted input requests a close with
    /// [`exit::INPUT_TERMINATED`].
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        let prompt = self.settings.prompting.then_some(prompt);
        let line = self.source.get_line(prompt);
        if line.is_none() {
            tracing::debug!("line source exhausted");
            self.report("input terminated");
            self.request_close(exit::INPUT_TERMINATED);
        }
        line
    }

    /// The diagnostic sink.
    pub fn diagnostics(&mut self) -> &mut dyn Write {
        &mut *self.diag
    }

    /// Write one line to the diagnostic sink.
    pub fn report(&mut self, message: impl fmt::Display) {
        if let Err(err) = writeln!(self.diag, "{message}") {
            tracing::warn!("diagnostic write failed: {err}");
        }
    }

    /// Print session state at `detail` level (`%V`).
    pub fn show(&mut self, detail: usize) {
        let text = self.describe(detail);
        if let Err(err) = self.diag.write_all(text.as_bytes()) {
            tracing::warn!("diagnostic write failed: {err}");
        }
    }

    /// Session state as text: macros, then memory, flags, and limits as
    /// `detail` rises from 0 to 3.
    #[must_use]
    pub fn describe(&self, detail: usize) -> String {
        let mut out = String::new();
        for name in MacroName::ALL {
            let _ = writeln!(out, "Macro {} = {}", name.letter(), self.macro_body(name));
        }
        if detail >= 1 {
            let _ = writeln!(out, "Last Search: {}", self.last_search);
            let _ = writeln!(out, "Last Modify: {}", self.last_modify);
            let _ = writeln!(out, "Last File:   {}", self.last_filename);
        }
        if detail >= 2 {
            let on_off = |b: bool| if b { "On" } else { "Off" };
            let s = &self.settings;
            let _ = writeln!(out, "Monitor Mode: {}", s.mode);
            let _ = writeln!(out, "Line Numbers: {}", on_off(s.line_numbers));
            let _ = writeln!(out, "Prompting: {}", on_off(s.prompting));
            let _ = writeln!(out, "Cursor Mark: {}", s.cursor_mark);
            let _ = writeln!(out, "Smart Delimiter: {}", s.quotes.smart());
        }
        if detail >= 3 {
            let s = &self.settings;
            let _ = writeln!(out, "Repeat Limit: {}", s.repeat_max);
            let _ = writeln!(out, "Search Limit: {}", s.search_max);
            let _ = writeln!(out, "Terminal Max: {}", s.terminal_max);
        }
        out
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("settings", &self.settings)
            .field("target", &self.target)
            .field("close", &self.close)
            .field("abandon", &self.abandon)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------

/// A cloneable in-memory sink, so tests can read back what a session wrote.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct Capture(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

#[cfg(test)]
impl Capture {
    pub(crate) fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[cfg(test)]
impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A session fed from `lines`, with diagnostics captured.
#[cfg(test)]
pub(crate) fn test_session(lines: &[&str]) -> (Session, Capture) {
    let capture = Capture::default();
    let session = Session::new(Box::new(crate::source::ScriptSource::new(lines.iter().copied())))
        .with_diagnostics(Box::new(capture.clone()));
    (session, capture)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

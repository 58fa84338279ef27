//! Command model — the executable tree a command line parses into.
//!
//! A [`Command`] is either a [`Basic`] command (one catalog [`Kind`] with its
//! arguments) or a [`Compound`] group. A compound holds a sequence of
//! alternatives; each alternative is a list of commands run in order until
//! one fails.
//!
//! # Results and modifiers
//!
//! Every command yields success or failure. A trailing modifier reshapes
//! that result before it reaches the enclosing group:
//!
//! | Suffix      | Modifier            | Result            |
//! |-------------|---------------------|-------------------|
//! | (none)      | `Normal`            | unchanged         |
//! | `?` or `@`  | `NoFail`            | always success    |
//! | `\` or `~`  | `Invert`            | negated           |
//! | `*` or `0`  | `AsManyAsPossible`  | unchanged; repeat count becomes the session repeat maximum |
//!
//! # Compound execution
//!
//! Each repetition tries the alternatives in order; the first alternative
//! whose commands all succeed wins it. When none does, the remaining
//! repetitions are skipped and the group fails. A pending interrupt or close
//! request unwinds the whole tree with success as soon as it is seen.

use std::fmt;

use crate::buffer::{Buffer, Direction, save_report};
use crate::kind::Kind;
use crate::print::PrintStyle;
use crate::session::{Session, TextSlot};

// ---------------------------------------------------------------------------
// Modifier
// ---------------------------------------------------------------------------

/// How a command's raw result is reshaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modifier {
    #[default]
    Normal,
    NoFail,
    Invert,
    AsManyAsPossible,
}

impl Modifier {
    /// The modifier written as `c`, if any.
    #[must_use]
    pub const fn from_suffix(c: char) -> Option<Self> {
        match c {
            '?' | '@' => Some(Self::NoFail),
            '\\' | '~' => Some(Self::Invert),
            _ => None,
        }
    }

    #[must_use]
    pub const fn apply(self, ok: bool) -> bool {
        match self {
            Self::NoFail => true,
            Self::Invert => !ok,
            Self::Normal | Self::AsManyAsPossible => ok,
        }
    }

    /// The repeat count to run with.
    #[must_use]
    pub const fn repeat(self, repeat: usize, repeat_max: usize) -> usize {
        match self {
            Self::AsManyAsPossible => repeat_max,
            _ => repeat,
        }
    }
}

// ---------------------------------------------------------------------------
// Trace
// ---------------------------------------------------------------------------

/// Images of the most recently executed and most recently successful basic
/// commands, threaded through nested groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    last_executed: Option<String>,
    last_succeeded: Option<String>,
}

impl Trace {
    pub fn record(&mut self, image: String, ok: bool) {
        if ok {
            self.last_succeeded = Some(image.clone());
        }
        self.last_executed = Some(image);
    }

    #[must_use]
    pub fn last_executed(&self) -> Option<&str> {
        self.last_executed.as_deref()
    }

    #[must_use]
    pub fn last_succeeded(&self) -> Option<&str> {
        self.last_succeeded.as_deref()
    }

    /// What a failure report names: the last executed command or `None`.
    #[must_use]
    pub fn failure_image(&self) -> &str {
        self.last_executed().unwrap_or("None")
    }
}

// ---------------------------------------------------------------------------
// Basic
// ---------------------------------------------------------------------------

/// One catalog command with its parsed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basic {
    pub kind: Kind,
    pub modifier: Modifier,
    /// Line scope for searches, or the numeric parameter of a special
    /// command. `0` scopes searches to the session search maximum.
    pub limit: usize,
    pub repeat: usize,
    pub text: String,
    /// `&` was written: use the remembered text for the kind's slot.
    pub use_last_text: bool,
}

impl Basic {
    /// `kind` with default arguments.
    #[must_use]
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            modifier: Modifier::Normal,
            limit: kind.default_limit(),
            repeat: 1,
            text: String::new(),
            use_last_text: false,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub const fn with_repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat;
        self
    }

    #[must_use]
    pub const fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    #[must_use]
    pub const fn with_last_text(mut self) -> Self {
        self.use_last_text = true;
        self
    }

    /// `Name 'text'` for text-bearing kinds, `Name` otherwise.
    #[must_use]
    pub fn image(&self, text: &str) -> String {
        if self.kind.text_slot().is_some() {
            format!("{} '{text}'", self.kind.name())
        } else {
            self.kind.name().to_owned()
        }
    }

    /// The text to run with. Text-bearing kinds take the remembered text for
    /// `&` and store what they use back into their slot.
    fn resolve_text(&self, session: &mut Session) -> String {
        let Some(slot) = self.kind.text_slot() else {
            return self.text.clone();
        };
        let text = if self.use_last_text {
            session.remembered(slot).to_owned()
        } else {
            self.text.clone()
        };
        session.remember(slot, text.clone());
        text
    }

    pub fn execute(&self, buffer: &mut Buffer, session: &mut Session, trace: &mut Trace) -> bool {
        let limit = if self.limit == 0 { session.search_max() } else { self.limit };
        let repeat = self.modifier.repeat(self.repeat, session.repeat_max());
        let text = self.resolve_text(session);

        let ok = self.modifier.apply(self.dispatch(buffer, session, limit, repeat, &text));
        tracing::trace!(kind = %self.kind, limit, repeat, ok, "executed");
        trace.record(self.image(&text), ok);
        ok
    }

    fn dispatch(&self, buffer: &mut Buffer, session: &mut Session, limit: usize, n: usize, text: &str) -> bool {
        use Direction::{Back, Forward};

        match self.kind {
            Kind::Absorb => buffer.absorb(n),
            Kind::AbsorbBack => buffer.absorb_back(n),
            Kind::BreakLine => buffer.break_line(n),
            Kind::BreakLineBack => buffer.break_line_back(n),
            Kind::Connect => buffer.connect(text),
            Kind::DeleteText => buffer.delete_text(limit, text, n),
            Kind::DeleteBack => buffer.delete_back(limit, text, n),
            Kind::Erase => buffer.erase(n),
            Kind::EraseBack => buffer.erase_back(n),
            Kind::Find => buffer.find(limit, text, n),
            Kind::FindBack => buffer.find_back(limit, text, n),
            Kind::Get => buffer.get(Forward, n, || session.read_line(":")),
            Kind::GetBack => buffer.get(Back, n, || session.read_line(":")),
            Kind::UpperCase => buffer.upper_case(n),
            Kind::LowerCase => buffer.lower_case(n),
            Kind::Insert => buffer.insert(text, n),
            Kind::InsertBack => buffer.insert_back(text, n),
            Kind::Join => buffer.join(n),
            Kind::JoinBack => buffer.join_back(n),
            Kind::Kill => buffer.kill(n),
            Kind::KillBack => buffer.kill_back(n),
            Kind::Left => buffer.left(n),
            Kind::Right => buffer.right(n),
            Kind::Move => buffer.move_next(n),
            Kind::MoveBack => buffer.move_back(n),
            Kind::Now => buffer.now(n),
            Kind::NowBack => buffer.now_back(n),
            Kind::Output => buffer.output(text),
            Kind::Print | Kind::PrintBack => {
                let dir = if self.kind == Kind::Print { Forward } else { Back };
                let style = PrintStyle::from_settings(session.settings());
                buffer.print(dir, n, &style, session.diagnostics())
            }
            Kind::Quary | Kind::QuaryBack => {
                let mut copied = String::new();
                let ok = if self.kind == Kind::Quary {
                    buffer.quary(n, &mut copied)
                } else {
                    buffer.quary_back(n, &mut copied)
                };
                session.remember(TextSlot::Modify, copied);
                ok
            }
            Kind::Substitute => buffer.substitute(text),
            Kind::SubstituteBack => buffer.substitute_back(text),
            Kind::Traverse => buffer.traverse(limit, text, n),
            Kind::TraverseBack => buffer.traverse_back(limit, text, n),
            Kind::Uncover => buffer.uncover(limit, text, n),
            Kind::UncoverBack => buffer.uncover_back(limit, text, n),
            Kind::Verify => buffer.verify(text),
            Kind::VerifyBack => buffer.verify_back(text),
            Kind::Write => buffer.write(n),
            Kind::WriteBack => buffer.write_back(n),
            _ => self.special(buffer, session, text),
        }
    }

    /// `%` commands. These read the written limit, not the search-scoped one.
    fn special(&self, buffer: &Buffer, session: &mut Session, text: &str) -> bool {
        let code = i32::try_from(self.limit).unwrap_or(i32::MAX);
        match self.kind {
            Kind::Abandon => session.request_abandon(code),
            Kind::Close => session.request_close(code),
            Kind::Backup => {
                let target = session.target().to_owned();
                if target == crate::buffer::STDIO_PATH {
                    return false;
                }
                return save_and_report(buffer, session, &target);
            }
            Kind::Intermediate => {
                let path = session.temp_path().to_string_lossy().into_owned();
                return save_and_report(buffer, session, &path);
            }
            Kind::DelimiterSmart => return session.set_smart_delimiter(text),
            Kind::Exchange => session.exchange(),
            Kind::Full => session.set_mode(crate::session::Mode::Full),
            Kind::Monitor => session.set_mode(crate::session::Mode::Monitor),
            Kind::Quiet => session.set_mode(crate::session::Mode::Quiet),
            Kind::LimitSet => session.set_search_max(self.limit),
            Kind::RepeatSet => session.set_repeat_max(self.limit),
            Kind::TerminalMaxSet => session.set_terminal_max(self.limit),
            Kind::Numbers => session.toggle_line_numbers(),
            Kind::Prompt => session.toggle_prompting(),
            Kind::SetMark => session.set_cursor_mark(text),
            Kind::View => session.show(self.limit),
            Kind::DefineX | Kind::DefineY | Kind::DefineZ => {
                let Some(name) = self.kind.defines() else {
                    return false;
                };
                let body = if text.is_empty() {
                    session.read_line(&format!("{}? ", name.letter())).unwrap_or_default()
                } else {
                    text.to_owned()
                };
                session.define_macro(name, body);
            }
            _ => {
                tracing::warn!(kind = %self.kind, "no handler");
                return false;
            }
        }
        true
    }
}

fn save_and_report(buffer: &Buffer, session: &mut Session, path: &str) -> bool {
    match buffer.save(path) {
        Ok(count) => {
            session.report(save_report(count, path));
            true
        }
        Err(err) => {
            tracing::warn!("{err}");
            session.report(err);
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Compound
// ---------------------------------------------------------------------------

/// A bracketed group: alternatives separated by `,`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub sequence: Vec<Vec<Command>>,
    pub modifier: Modifier,
    pub repeat: usize,
}

impl Compound {
    /// A group run once with no modifier, as a whole input line is.
    #[must_use]
    pub const fn top_level(sequence: Vec<Vec<Command>>) -> Self {
        Self {
            sequence,
            modifier: Modifier::Normal,
            repeat: 1,
        }
    }

    pub fn execute(&self, buffer: &mut Buffer, session: &mut Session, trace: &mut Trace) -> bool {
        let repeat = self.modifier.repeat(self.repeat, session.repeat_max());
        let mut ok = true;

        for _ in 0..repeat {
            if session.should_unwind() {
                return true;
            }
            for alternative in &self.sequence {
                ok = true;
                for command in alternative {
                    ok = match command {
                        Command::Basic(basic) => basic.execute(buffer, session, trace),
                        Command::Compound(group) => group.execute_nested(buffer, session, trace),
                    };
                    if session.should_unwind() {
                        return true;
                    }
                    if !ok {
                        break;
                    }
                }
                if ok {
                    break;
                }
            }
            if !ok {
                break;
            }
        }
        self.modifier.apply(ok)
    }

    /// Run as a member of an enclosing group: a failed group passes no
    /// success up.
    fn execute_nested(&self, buffer: &mut Buffer, session: &mut Session, trace: &mut Trace) -> bool {
        let succeeded = trace.last_succeeded.clone();
        let ok = self.execute(buffer, session, trace);
        if !ok {
            trace.last_succeeded = succeeded;
        }
        ok
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A node of the command tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Basic(Basic),
    Compound(Compound),
}

impl Command {
    /// Run the command, returning its result after the modifier.
    pub fn execute(&self, buffer: &mut Buffer, session: &mut Session, trace: &mut Trace) -> bool {
        match self {
            Self::Basic(basic) => basic.execute(buffer, session, trace),
            Self::Compound(compound) => compound.execute(buffer, session, trace),
        }
    }

    #[must_use]
    pub const fn modifier(&self) -> Modifier {
        match self {
            Self::Basic(basic) => basic.modifier,
            Self::Compound(compound) => compound.modifier,
        }
    }
}

impl From<Basic> for Command {
    fn from(basic: Basic) -> Self {
        Self::Basic(basic)
    }
}

impl From<Compound> for Command {
    fn from(compound: Compound) -> Self {
        Self::Compound(compound)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(basic) => f.write_str(&basic.image(&basic.text)),
            Self::Compound(_) => f.write_str("Compound"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

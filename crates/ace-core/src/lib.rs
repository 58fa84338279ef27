//! # ace-core — Editor core for ace
//!
//! Everything between an input line and the edited text:
//!
//! - **[`session`]** — settings, macro bodies, remembered texts, run state
//! - **[`macros`]** — `X`/`Y`/`Z` expansion ahead of parsing
//! - **[`parser`]** — command line text to a [`Command`] tree
//! - **[`command`]** — basic and compound commands, modifiers, failure trace
//! - **[`kind`]** — the command catalog: letters, names, arguments
//! - **[`buffer`]** — the cursor-addressed line buffer and its operations
//! - **[`print`]** — line rendering with numbers, wrapping, and colour
//! - **[`interpreter`]** — per-line execution and the final save
//! - **[`help`]** — the built-in command reference
//!
//! Line input is injected through [`LineSource`]; the terminal side lives in
//! `ace-term`.

pub mod buffer;
pub mod command;
pub mod error;
pub mod help;
pub mod interpreter;
pub mod kind;
pub mod macros;
pub mod parser;
pub mod position;
pub mod print;
pub mod search;
pub mod session;
pub mod source;
pub mod stream;

pub use buffer::Buffer;
pub use command::{Command, Modifier, Trace};
pub use error::{BufferError, ParseError};
pub use interpreter::Interpreter;
pub use kind::Kind;
pub use position::Position;
pub use session::{Mode, Session, Settings};
pub use source::{LineSource, ReaderSource, ScriptSource};

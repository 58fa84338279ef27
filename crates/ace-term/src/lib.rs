// SPDX-License-Identifier: MIT
//
// ace-term — terminal plumbing for the ace line editor.
//
// ace never takes over the screen: it prints lines to the diagnostic stream
// and reads commands a line at a time. What it needs from the terminal is
// small and lives here: SGR colouring of printed lines, a batching output
// buffer, tty and width queries, and SIGINT/SIGTERM delivery into the
// session's atomics.
//
// Direct ANSI and libc, no terminal framework.

pub mod ansi;
pub mod color;
pub mod output;
pub mod signal;
pub mod style;
pub mod terminal;

pub use color::CellColor;
pub use output::OutputBuffer;
pub use style::{Attr, Style};

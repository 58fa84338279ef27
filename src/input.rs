// SPDX-License-Identifier: MIT
//
// Interactive command input.
//
// The `Prompter` reads commands from a terminal (or whatever stdin is),
// writing the prompt to the diagnostic side first so saved output on stdout
// stays clean.

use std::io::{self, BufRead, Write};

use ace_core::LineSource;
use ace_core::source::read_line;

// ─── Prompter ───────────────────────────────────────────────────────────────

/// A [`LineSource`] that prompts on `prompt_to` and reads from `reader`.
pub struct Prompter<R, W> {
    reader: R,
    prompt_to: W,
}

impl Prompter<io::StdinLock<'static>, io::Stderr> {
    /// Read from standard input, prompting on standard error.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, prompt_to: W) -> Self {
        Self { reader, prompt_to }
    }
}

impl<R: BufRead, W: Write> LineSource for Prompter<R, W> {
    fn get_line(&mut self, prompt: Option<&str>) -> Option<String> {
        if let Some(prompt) = prompt {
            let shown = self
                .prompt_to
                .write_all(prompt.as_bytes())
                .and_then(|()| self.prompt_to.flush());
            if let Err(err) = shown {
                tracing::warn!("prompt write failed: {err}");
            }
        }
        read_line(&mut self.reader)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

//! Macro expansion — textual substitution of `X`, `Y`, and `Z`.
//!
//! Before a line is parsed, every unquoted `X`, `Y`, or `Z` (either case)
//! that does not directly follow `%` is replaced by that macro's body. The
//! inserted body is not rescanned in the same pass; instead the whole line is
//! scanned again, so macros may call each other up to three levels deep. A
//! line that still needs expanding on a fourth pass is rejected.

use crate::error::ParseError;
use crate::session::{MacroName, QuoteSet};

/// Passes that may perform replacements.
pub const MAX_PASSES: usize = 3;

/// Expand macro calls in `raw` using `bodies` (indexed `X`, `Y`, `Z`).
///
/// # Errors
///
/// Returns [`ParseError::RecursiveMacro`] when expansion has not settled
/// after [`MAX_PASSES`] passes.
pub fn expand(raw: &str, bodies: [&str; 3], quotes: QuoteSet) -> Result<String, ParseError> {
    let mut line = raw.to_owned();
    for pass in 1..=MAX_PASSES + 1 {
        let Some(expanded) = expand_pass(&line, bodies, quotes) else {
            return Ok(line);
        };
        if pass > MAX_PASSES {
            return Err(ParseError::RecursiveMacro);
        }
        line = expanded;
    }
    Ok(line)
}

/// One scan over `line`. Returns `None` when nothing was replaced.
fn expand_pass(line: &str, bodies: [&str; 3], quotes: QuoteSet) -> Option<String> {
    let mut out = String::with_capacity(line.len());
    let mut replaced = false;
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;

    for c in line.chars() {
        if let Some(open) = quote {
            if c == open {
                quote = None;
            }
            out.push(c);
            prev = Some(c);
            continue;
        }
        match MacroName::from_letter(c) {
            Some(name) if prev != Some('%') => {
                let body = bodies[name.index()];
                out.push_str(body);
                if let Some(last) = body.chars().last() {
                    prev = Some(last);
                }
                replaced = true;
            }
            _ => {
                if quotes.contains(c) {
                    quote = Some(c);
                }
                out.push(c);
                prev = Some(c);
            }
        }
    }
    replaced.then_some(out)
}

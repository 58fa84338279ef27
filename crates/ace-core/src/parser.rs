//! Command-line parser — expanded text to a [`Command`] tree.
//!
//! # Grammar
//!
//! ```text
//! line      = { item | "," | comment } ;
//! item      = basic | "(" line ")" suffix ;
//! basic     = ( letter [ "-" ] | "%" letter ) args ;
//! args      = [ limit ] [ text ] suffix ;       (as the kind allows)
//! limit     = digits | "*" ;
//! text      = quote { char } [ same quote ] | "&" ;
//! suffix    = [ digits | "*" ] [ "?" | "@" | "\" | "~" ] ;
//! comment   = ( "#" | ";" ) { char } ;
//! ```
//!
//! Letters are case-insensitive; spaces and tabs between tokens are ignored.
//! A repeat of `*` or `0` means "as many times as possible" and takes no
//! further modifier. Text runs to the matching quote or the end of the line;
//! there is no escaping.
//!
//! Any error rejects the whole line: no partial tree is returned.

use crate::command::{Basic, Command, Compound, Modifier};
use crate::error::ParseError;
use crate::kind::{Args, Kind, Variant};
use crate::macros;
use crate::session::{QuoteSet, Session};

/// Parse an already-expanded command line.
///
/// The result is always a [`Command::Compound`] holding the line's
/// alternatives, run once.
///
/// # Errors
///
/// Returns the first [`ParseError`] found.
pub fn parse(text: &str, quotes: QuoteSet) -> Result<Command, ParseError> {
    let mut parser = Parser {
        chars: text.chars().collect(),
        pos: 0,
        quotes,
    };
    let command = parser.group(false)?;
    tracing::debug!(?command, "parsed");
    Ok(command)
}

/// Expand macros in `raw` with the session's bodies, then parse.
///
/// # Errors
///
/// Returns the expansion or parse error.
pub fn parse_line(raw: &str, session: &Session) -> Result<Command, ParseError> {
    let expanded = macros::expand(raw, session.macro_bodies(), session.quotes())?;
    parse(&expanded, session.quotes())
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    quotes: QuoteSet,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.pos += 1;
        }
    }

    /// A group body up to `)` (nested) or end of line (top level).
    fn group(&mut self, nested: bool) -> Result<Command, ParseError> {
        let mut sequence = Vec::new();
        let mut alternative = Vec::new();

        loop {
            let Some(c) = self.bump() else {
                if nested {
                    return Err(ParseError::UnmatchedOpen);
                }
                break;
            };
            match c {
                ' ' | '\t' => {}
                '#' | ';' => {
                    if nested {
                        return Err(ParseError::UnmatchedOpen);
                    }
                    break;
                }
                '(' => alternative.push(self.group(true)?),
                ',' => sequence.push(std::mem::take(&mut alternative)),
                ')' => {
                    if !nested {
                        return Err(ParseError::UnmatchedClose);
                    }
                    sequence.push(alternative);
                    let (repeat, modifier) = self.suffix(true, true);
                    return Ok(Compound {
                        sequence,
                        modifier,
                        repeat,
                    }
                    .into());
                }
                '%' => alternative.push(self.special()?),
                c if c.is_ascii_alphabetic() => alternative.push(self.letter(c)?),
                c => return Err(ParseError::UnknownCommand(c.to_string())),
            }
        }

        sequence.push(alternative);
        Ok(Compound::top_level(sequence).into())
    }

    /// `%` has been read: spaces, then the command letter.
    fn special(&mut self) -> Result<Command, ParseError> {
        self.skip_spaces();
        match self.bump() {
            Some(c) if c.is_ascii_alphabetic() => {
                let letter = c.to_ascii_uppercase();
                self.arguments(letter, Variant::Special, format!("%{letter}"))
            }
            Some(c) => Err(ParseError::UnknownCommand(format!("%{c}"))),
            None => Err(ParseError::UnknownCommand("%".to_owned())),
        }
    }

    /// A command letter has been read; a `-` directly after selects the
    /// backward form.
    fn letter(&mut self, c: char) -> Result<Command, ParseError> {
        let letter = c.to_ascii_uppercase();
        if self.peek() == Some('-') {
            self.pos += 1;
            self.arguments(letter, Variant::Back, format!("{letter}-"))
        } else {
            self.arguments(letter, Variant::Forward, letter.to_string())
        }
    }

    fn arguments(&mut self, letter: char, variant: Variant, token: String) -> Result<Command, ParseError> {
        let kind = Kind::lookup(letter, variant).ok_or_else(|| ParseError::UnknownCommand(token.clone()))?;
        let args = kind.args();
        let mut basic = Basic::new(kind);

        if args.contains(Args::LIMIT) {
            if let Some(limit) = self.number() {
                basic.limit = limit;
            }
        }

        if args.contains(Args::TEXT) {
            self.skip_spaces();
            if self.peek() == Some('&') {
                self.pos += 1;
                basic.use_last_text = true;
            } else {
                basic.text = self.quoted().ok_or(ParseError::MissingText(token))?;
            }
        }

        let (repeat, modifier) = self.suffix(args.contains(Args::REPEAT), args.contains(Args::MODIFIER));
        basic.repeat = repeat;
        basic.modifier = modifier;
        Ok(basic.into())
    }

    /// Digits or `*` (read as 0), after optional spaces.
    fn number(&mut self) -> Option<usize> {
        self.skip_spaces();
        match self.peek()? {
            '*' => {
                self.pos += 1;
                Some(0)
            }
            c if c.is_ascii_digit() => {
                let mut n: usize = 0;
                while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
                    n = n.saturating_mul(10).saturating_add(d as usize);
                    self.pos += 1;
                }
                Some(n)
            }
            _ => None,
        }
    }

    /// A quoted string, or `None` when no quote character follows.
    fn quoted(&mut self) -> Option<String> {
        self.skip_spaces();
        let quote = self.peek().filter(|&c| self.quotes.contains(c))?;
        self.pos += 1;
        let mut text = String::new();
        while let Some(c) = self.bump() {
            if c == quote {
                break;
            }
            text.push(c);
        }
        Some(text)
    }

    /// Optional repeat, then optional modifier. A repeat of `*` or `0`
    /// selects as-many-as-possible and takes no modifier.
    fn suffix(&mut self, repeat_allowed: bool, modifier_allowed: bool) -> (usize, Modifier) {
        let repeat = if repeat_allowed { self.number() } else { None };
        if repeat == Some(0) {
            return (0, Modifier::AsManyAsPossible);
        }
        let modifier = if modifier_allowed { self.modifier() } else { Modifier::Normal };
        (repeat.unwrap_or(1), modifier)
    }

    fn modifier(&mut self) -> Modifier {
        self.skip_spaces();
        match self.peek().and_then(Modifier::from_suffix) {
            Some(modifier) => {
                self.pos += 1;
                modifier
            }
            None => Modifier::Normal,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

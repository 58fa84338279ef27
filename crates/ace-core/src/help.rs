//! Built-in command reference.
//!
//! [`explain`] answers `--explain ITEM`, where the item is a command as typed
//! (`F`, `F-`, `%F`), a command name (`FindBack`, any case), or one of the
//! bracket and alternative characters. [`summary`] lists every command.

use std::fmt::Write;

use crate::kind::{Args, Kind, Variant};

const SUMMARY_COLUMNS: usize = 4;

/// One-line description and failure condition for `kind`.
#[allow(clippy::too_many_lines)]
const fn entry(kind: Kind) -> (&'static str, &'static str) {
    match kind {
        Kind::Absorb => (
            "Absorb a line from the secondary input before the current line.",
            "No secondary input is connected, or it is exhausted.",
        ),
        Kind::AbsorbBack => (
            "Absorb a line from the secondary input and move onto it.",
            "No secondary input is connected, or it is exhausted.",
        ),
        Kind::BreakLine => (
            "Break the current line at the cursor; cursor starts the second half.",
            "None.",
        ),
        Kind::BreakLineBack => (
            "Break the current line at the cursor; cursor ends the first half.",
            "None.",
        ),
        Kind::Connect => (
            "Connect the secondary input to the file named by /text/.",
            "The file does not exist or cannot be read.",
        ),
        Kind::DeleteText => (
            "Delete the next occurrence of /text/.",
            "The text does not occur within the limit.",
        ),
        Kind::DeleteBack => (
            "Delete the previous occurrence of /text/.",
            "The text does not occur within the limit.",
        ),
        Kind::Erase => (
            "Erase the character to the right of the cursor.",
            "Cursor is at end of line or at end of file.",
        ),
        Kind::EraseBack => (
            "Erase the character to the left of the cursor.",
            "Cursor is at start of line or at end of file.",
        ),
        Kind::Find => (
            "Find the next occurrence of /text/; cursor to its left.",
            "The text does not occur in the rest of the file within the limit.",
        ),
        Kind::FindBack => (
            "Find the previous occurrence of /text/; cursor to its left.",
            "The text does not occur before the cursor within the limit.",
        ),
        Kind::Get => (
            "Insert a line read from the command input before the current line.",
            "The line is a single ':' or the input is exhausted.",
        ),
        Kind::GetBack => (
            "Insert a line read from the command input and move onto it.",
            "The line is a single ':' or the input is exhausted.",
        ),
        Kind::UpperCase => (
            "Upper-case the character to the right of the cursor and step over it.",
            "Cursor is at end of line or at end of file.",
        ),
        Kind::LowerCase => (
            "Lower-case the character to the right of the cursor and step over it.",
            "Cursor is at end of line or at end of file.",
        ),
        Kind::Insert => ("Insert /text/ to the left of the cursor.", "Cursor is at end of file."),
        Kind::InsertBack => ("Insert /text/ to the right of the cursor.", "Cursor is at end of file."),
        Kind::Join => (
            "Join the next line onto the current line.",
            "Cursor is on the last line or at end of file.",
        ),
        Kind::JoinBack => (
            "Join the current line onto the previous line.",
            "Cursor is on the first line or at end of file.",
        ),
        Kind::Kill => (
            "Delete the current line; cursor to the start of the next line.",
            "Cursor is at end of file.",
        ),
        Kind::KillBack => ("Delete the previous line.", "Cursor is on the first line."),
        Kind::Left => (
            "Move the cursor left one character.",
            "Cursor is at start of line or at end of file.",
        ),
        Kind::Right => (
            "Move the cursor right one character.",
            "Cursor is at end of line or at end of file.",
        ),
        Kind::Move => ("Move to the start of the next line.", "Cursor is at end of file."),
        Kind::MoveBack => ("Move to the start of the previous line.", "Cursor is on the first line."),
        Kind::Now => (
            "Insert the current date and time to the left of the cursor.",
            "Cursor is at end of file.",
        ),
        Kind::NowBack => (
            "Insert the current date and time to the right of the cursor.",
            "Cursor is at end of file.",
        ),
        Kind::Output => (
            "Connect the secondary output to the file named by /text/.",
            "The file cannot be created.",
        ),
        Kind::Print => ("Print the current line and move forward.", "Cursor is at end of file."),
        Kind::PrintBack => ("Print the current line and move back.", "Cursor is on the first line."),
        Kind::Quary => (
            "Copy characters right of the cursor into the insert text; no movement.",
            "Fewer characters remain before end of line, or cursor is at end of file.",
        ),
        Kind::QuaryBack => (
            "Copy characters left of the cursor into the insert text; no movement.",
            "Fewer characters precede the cursor, or cursor is at end of file.",
        ),
        Kind::Substitute => (
            "Replace the text just found with /text/; cursor after it.",
            "No search has succeeded since the last change.",
        ),
        Kind::SubstituteBack => (
            "Replace the text just found with /text/; cursor before it.",
            "No search has succeeded since the last change.",
        ),
        Kind::Traverse => (
            "Find the next occurrence of /text/; cursor to its right.",
            "The text does not occur in the rest of the file within the limit.",
        ),
        Kind::TraverseBack => (
            "Find the previous occurrence of /text/; cursor to its right.",
            "The text does not occur before the cursor within the limit.",
        ),
        Kind::Uncover => (
            "Remove everything up to but not including the next /text/.",
            "The text does not occur within the limit.",
        ),
        Kind::UncoverBack => (
            "Remove everything back to but not including the previous /text/.",
            "The text does not occur within the limit.",
        ),
        Kind::Verify => (
            "Compare the text right of the cursor with /text/.",
            "The text does not match.",
        ),
        Kind::VerifyBack => (
            "Compare the text left of the cursor with /text/.",
            "The text does not match.",
        ),
        Kind::Write => (
            "Write the current line to the secondary output and move forward.",
            "No secondary output is connected, or cursor is at end of file.",
        ),
        Kind::WriteBack => (
            "Write the current line to the secondary output and move back.",
            "No secondary output is connected, or cursor is on the first line.",
        ),
        Kind::Abandon => ("Quit without saving, exiting with Number (default 2).", "None."),
        Kind::Close => ("Save and quit, exiting with Number (default 0).", "None."),
        Kind::Backup => (
            "Save the buffer to the target file now.",
            "The target is standard output or cannot be written.",
        ),
        Kind::Intermediate => (
            "Save the buffer to the session's temporary file.",
            "The file cannot be written.",
        ),
        Kind::DelimiterSmart => (
            "Set the smart delimiter to the first character of /text/.",
            "The character is a letter, digit, space or command character.",
        ),
        Kind::Exchange => ("Exchange the last search text and the last insert text.", "None."),
        Kind::Full => ("Print the current line after every command line.", "None."),
        Kind::Monitor => ("Print the current line after command lines that change it.", "None."),
        Kind::Quiet => ("Do not print after command lines.", "None."),
        Kind::LimitSet => ("Set the default search line limit (minimum 1).", "None."),
        Kind::RepeatSet => ("Set the ceiling on '*' repeats (minimum 1).", "None."),
        Kind::TerminalMaxSet => ("Set the print width (minimum 32).", "None."),
        Kind::Numbers => ("Toggle line numbers in printed lines.", "None."),
        Kind::Prompt => ("Toggle the command prompt.", "None."),
        Kind::SetMark => ("Set the cursor mark to the first character of /text/.", "None."),
        Kind::View => ("Show session settings; Number selects the detail level.", "None."),
        Kind::DefineX => ("Define macro X as /text/, prompting when empty.", "None."),
        Kind::DefineY => ("Define macro Y as /text/, prompting when empty.", "None."),
        Kind::DefineZ => ("Define macro Z as /text/, prompting when empty.", "None."),
    }
}

/// `Syntax:` line body for `kind`.
#[must_use]
pub fn syntax(kind: Kind) -> String {
    let args = kind.args();
    let mut syntax = kind.token();
    if args.contains(Args::LIMIT) {
        syntax.push_str(if kind.is_special() { " [Number]" } else { " [Limit]" });
    }
    if args.contains(Args::TEXT) {
        syntax.push_str(" {/text/,&}");
    }
    if args.contains(Args::REPEAT) {
        syntax.push_str(" [Repeat]");
    }
    if args.contains(Args::MODIFIER) {
        syntax.push_str(" [{@|?|\\|~}]");
    }
    syntax
}

/// Name, description, syntax and failure condition for one kind.
#[must_use]
pub fn command_help(kind: Kind) -> String {
    let (description, failure) = entry(kind);
    format!(
        "{}: {description}\nSyntax: {}\nFailure condition: {failure}\n\n",
        kind.name(),
        syntax(kind)
    )
}

/// Every command as `token : Name`, four columns, followed by the
/// structural characters.
#[must_use]
pub fn summary() -> String {
    let kinds: Vec<Kind> = Kind::all().collect();
    let rows = kinds.len().div_ceil(SUMMARY_COLUMNS);
    let mut out = String::new();

    for r in 0..rows {
        let mut line = String::new();
        for kind in (0..SUMMARY_COLUMNS).filter_map(|c| kinds.get(r + rows * c)) {
            let _ = write!(line, "{:<2} : {:<19}", kind.token(), kind.name());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push_str("(  : Start Compound     )  : End Compound       ,  : Alternative\n");
    out
}

/// Help for `item`, or an `Unknown command` line.
#[must_use]
pub fn explain(item: &str) -> String {
    match item {
        "(" => {
            return "Start Compound: Start of a compound command.\nSyntax: (\n\
                    Failure condition: Unmatched by an end compound.\n\n"
                .to_owned();
        }
        ")" => {
            return "End Compound: End of a compound command.\nSyntax: ) [Repeat] [{@|?|\\|~}]\n\
                    Failure condition: Unmatched by a start compound.\n\n"
                .to_owned();
        }
        "," => {
            return "Alternative: Introduces an alternative command sequence.\nSyntax: ,\n\
                    Failure condition: None.\n\n"
                .to_owned();
        }
        _ => {}
    }

    match lookup(item) {
        Some(kind) => command_help(kind),
        None => format!("Unknown command: {item}\n\n"),
    }
}

fn lookup(item: &str) -> Option<Kind> {
    let chars: Vec<char> = item.chars().collect();
    match chars.as_slice() {
        [letter] => Kind::lookup(*letter, Variant::Forward),
        [letter, '-'] => Kind::lookup(*letter, Variant::Back),
        ['%', letter] => Kind::lookup(*letter, Variant::Special),
        _ => Kind::from_name(item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn find_help() {
        assert_eq!(
            explain("F"),
            "Find: Find the next occurrence of /text/; cursor to its left.\n\
             Syntax: F [Limit] {/text/,&} [Repeat] [{@|?|\\|~}]\n\
             Failure condition: The text does not occur in the rest of the file within the limit.\n\n"
        );
    }

    #[test]
    fn lookup_forms() {
        assert_eq!(explain("u-"), explain("UncoverBack"));
        assert_eq!(explain("%c"), explain("close"));
        assert!(explain("%C").starts_with("Close: "));
    }

    #[test]
    fn special_syntax_uses_number() {
        assert_eq!(syntax(Kind::Abandon), "%A [Number]");
        assert_eq!(syntax(Kind::Connect), "C {/text/,&} [{@|?|\\|~}]");
        assert_eq!(syntax(Kind::SubstituteBack), "S- {/text/,&} [{@|?|\\|~}]");
        assert_eq!(syntax(Kind::Exchange), "%E");
        assert_eq!(syntax(Kind::Move), "M [Repeat] [{@|?|\\|~}]");
    }

    #[test]
    fn structural_items() {
        assert!(explain("(").starts_with("Start Compound:"));
        assert!(explain(")").contains("[Repeat]"));
        assert!(explain(",").starts_with("Alternative:"));
    }

    #[test]
    fn unknown_items() {
        assert_eq!(explain("C-"), "Unknown command: C-\n\n");
        assert_eq!(explain("Frobnicate"), "Unknown command: Frobnicate\n\n");
        assert_eq!(explain("%1"), "Unknown command: %1\n\n");
    }

    #[test]
    fn every_kind_has_help() {
        for kind in Kind::all() {
            let help = command_help(kind);
            assert!(help.starts_with(kind.name()), "{kind}");
            assert!(help.contains(&format!("Syntax: {}", kind.token())), "{kind}");
        }
    }

    #[test]
    fn summary_lists_every_kind() {
        let summary = summary();
        for kind in Kind::all() {
            assert!(summary.contains(&format!("{:<2} : {}", kind.token(), kind.name())), "{kind}");
        }
        assert!(summary.lines().next().is_some_and(|l| l.starts_with("A  : Absorb")));
        assert!(summary.ends_with(",  : Alternative\n"));
    }
}

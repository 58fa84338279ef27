//! The command catalog — every basic command kind and its letter form.
//!
//! Each kind is written as a letter (`F`), a letter with a trailing dash for
//! the backward variant (`F-`), or a `%`-prefixed letter for the special
//! form (`%F`). The letter table below is the single source of truth for
//! that mapping; names, argument sets, and defaults hang off [`Kind`].

use std::fmt;

use bitflags::bitflags;

use crate::session::{MacroName, TextSlot};

/// Which of the three forms of a command letter was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// `A`
    Forward,
    /// `A-`
    Back,
    /// `%A`
    Special,
}

impl Variant {
    pub const ALL: [Self; 3] = [Self::Forward, Self::Back, Self::Special];

    const fn column(self) -> usize {
        match self {
            Self::Forward => 0,
            Self::Back => 1,
            Self::Special => 2,
        }
    }
}

bitflags! {
    /// The arguments a kind accepts, in parse order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Args: u8 {
        /// A line limit or numeric parameter.
        const LIMIT    = 0b0001;
        /// A quoted string or `&`.
        const TEXT     = 0b0010;
        /// A repeat count or `*`.
        const REPEAT   = 0b0100;
        /// A trailing `?`, `@`, `\`, or `~`.
        const MODIFIER = 0b1000;

        const SEARCH   = Self::LIMIT.bits() | Self::TEXT.bits() | Self::REPEAT.bits() | Self::MODIFIER.bits();
        const EDIT     = Self::TEXT.bits() | Self::REPEAT.bits() | Self::MODIFIER.bits();
        const QUOTED   = Self::TEXT.bits() | Self::MODIFIER.bits();
        const COUNTED  = Self::REPEAT.bits() | Self::MODIFIER.bits();
    }
}

/// A basic command kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    // Forward
    Absorb,
    BreakLine,
    Connect,
    DeleteText,
    Erase,
    Find,
    Get,
    UpperCase,
    Insert,
    Join,
    Kill,
    Left,
    Move,
    Now,
    Output,
    Print,
    Quary,
    Right,
    Substitute,
    Traverse,
    Uncover,
    Verify,
    Write,

    // Backward
    AbsorbBack,
    BreakLineBack,
    DeleteBack,
    EraseBack,
    FindBack,
    GetBack,
    LowerCase,
    InsertBack,
    JoinBack,
    KillBack,
    MoveBack,
    NowBack,
    PrintBack,
    QuaryBack,
    SubstituteBack,
    TraverseBack,
    UncoverBack,
    VerifyBack,
    WriteBack,

    // Special
    Abandon,
    Backup,
    Close,
    DelimiterSmart,
    Exchange,
    Full,
    Intermediate,
    LimitSet,
    Monitor,
    Numbers,
    Prompt,
    Quiet,
    RepeatSet,
    SetMark,
    TerminalMaxSet,
    View,
    DefineX,
    DefineY,
    DefineZ,
}

use Kind as K;

/// Letter `A`..`Z` → forward / backward / special kind.
const TABLE: [[Option<Kind>; 3]; 26] = [
    [Some(K::Absorb), Some(K::AbsorbBack), Some(K::Abandon)],
    [Some(K::BreakLine), Some(K::BreakLineBack), Some(K::Backup)],
    [Some(K::Connect), None, Some(K::Close)],
    [Some(K::DeleteText), Some(K::DeleteBack), Some(K::DelimiterSmart)],
    [Some(K::Erase), Some(K::EraseBack), Some(K::Exchange)],
    [Some(K::Find), Some(K::FindBack), Some(K::Full)],
    [Some(K::Get), Some(K::GetBack), None],
    [Some(K::UpperCase), Some(K::LowerCase), None],
    [Some(K::Insert), Some(K::InsertBack), Some(K::Intermediate)],
    [Some(K::Join), Some(K::JoinBack), None],
    [Some(K::Kill), Some(K::KillBack), None],
    [Some(K::Left), None, Some(K::LimitSet)],
    [Some(K::Move), Some(K::MoveBack), Some(K::Monitor)],
    [Some(K::Now), Some(K::NowBack), Some(K::Numbers)],
    [Some(K::Output), None, None],
    [Some(K::Print), Some(K::PrintBack), Some(K::Prompt)],
    [Some(K::Quary), Some(K::QuaryBack), Some(K::Quiet)],
    [Some(K::Right), None, Some(K::RepeatSet)],
    [Some(K::Substitute), Some(K::SubstituteBack), Some(K::SetMark)],
    [Some(K::Traverse), Some(K::TraverseBack), Some(K::TerminalMaxSet)],
    [Some(K::Uncover), Some(K::UncoverBack), None],
    [Some(K::Verify), Some(K::VerifyBack), Some(K::View)],
    [Some(K::Write), Some(K::WriteBack), None],
    [None, None, Some(K::DefineX)],
    [None, None, Some(K::DefineY)],
    [None, None, Some(K::DefineZ)],
];

impl Kind {
    /// The kind written as `letter` (either case) in form `variant`.
    #[must_use]
    pub fn lookup(letter: char, variant: Variant) -> Option<Self> {
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        let row = usize::from(u8::try_from(letter.to_ascii_uppercase()).ok()? - b'A');
        TABLE[row][variant.column()]
    }

    /// Every kind: forward forms, then backward, then special, each in
    /// letter order.
    pub fn all() -> impl Iterator<Item = Self> {
        Variant::ALL
            .into_iter()
            .flat_map(|variant| TABLE.iter().filter_map(move |row| row[variant.column()]))
    }

    /// Letter and form this kind is written with.
    #[must_use]
    pub fn spelling(self) -> Option<(char, Variant)> {
        ('A'..='Z').zip(TABLE.iter()).find_map(|(letter, row)| {
            Variant::ALL
                .into_iter()
                .find(|variant| row[variant.column()] == Some(self))
                .map(|variant| (letter, variant))
        })
    }

    /// How the command is typed: `F`, `F-`, or `%F`.
    #[must_use]
    pub fn token(self) -> String {
        match self.spelling() {
            Some((letter, Variant::Forward)) => letter.to_string(),
            Some((letter, Variant::Back)) => format!("{letter}-"),
            Some((letter, Variant::Special)) => format!("%{letter}"),
            None => self.name().to_owned(),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Absorb => "Absorb",
            Self::BreakLine => "BreakLine",
            Self::Connect => "Connect",
            Self::DeleteText => "DeleteText",
            Self::Erase => "Erase",
            Self::Find => "Find",
            Self::Get => "Get",
            Self::UpperCase => "UpperCase",
            Self::Insert => "Insert",
            Self::Join => "Join",
            Self::Kill => "Kill",
            Self::Left => "Left",
            Self::Move => "Move",
            Self::Now => "Now",
            Self::Output => "Output",
            Self::Print => "Print",
            Self::Quary => "Quary",
            Self::Right => "Right",
            Self::Substitute => "Substitute",
            Self::Traverse => "Traverse",
            Self::Uncover => "Uncover",
            Self::Verify => "Verify",
            Self::Write => "Write",
            Self::AbsorbBack => "AbsorbBack",
            Self::BreakLineBack => "BreakLineBack",
            Self::DeleteBack => "DeleteBack",
            Self::EraseBack => "EraseBack",
            Self::FindBack => "FindBack",
            Self::GetBack => "GetBack",
            Self::LowerCase => "LowerCase",
            Self::InsertBack => "InsertBack",
            Self::JoinBack => "JoinBack",
            Self::KillBack => "KillBack",
            Self::MoveBack => "MoveBack",
            Self::NowBack => "NowBack",
            Self::PrintBack => "PrintBack",
            Self::QuaryBack => "QuaryBack",
            Self::SubstituteBack => "SubstituteBack",
            Self::TraverseBack => "TraverseBack",
            Self::UncoverBack => "UncoverBack",
            Self::VerifyBack => "VerifyBack",
            Self::WriteBack => "WriteBack",
            Self::Abandon => "Abandon",
            Self::Backup => "Backup",
            Self::Close => "Close",
            Self::DelimiterSmart => "DelimiterSmart",
            Self::Exchange => "Exchange",
            Self::Full => "Full",
            Self::Intermediate => "Intermediate",
            Self::LimitSet => "LimitSet",
            Self::Monitor => "Monitor",
            Self::Numbers => "Numbers",
            Self::Prompt => "Prompt",
            Self::Quiet => "Quiet",
            Self::RepeatSet => "RepeatSet",
            Self::SetMark => "SetMark",
            Self::TerminalMaxSet => "TerminalMaxSet",
            Self::View => "View",
            Self::DefineX => "DefineX",
            Self::DefineY => "DefineY",
            Self::DefineZ => "DefineZ",
        }
    }

    /// The kind named `name`, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// The arguments this kind accepts.
    #[must_use]
    pub const fn args(self) -> Args {
        match self {
            Self::DeleteText
            | Self::Find
            | Self::Traverse
            | Self::Uncover
            | Self::DeleteBack
            | Self::FindBack
            | Self::TraverseBack
            | Self::UncoverBack => Args::SEARCH,

            Self::Insert | Self::InsertBack => Args::EDIT,

            Self::Connect
            | Self::Output
            | Self::Substitute
            | Self::SubstituteBack
            | Self::Verify
            | Self::VerifyBack => Args::QUOTED,

            Self::Abandon
            | Self::Close
            | Self::LimitSet
            | Self::RepeatSet
            | Self::TerminalMaxSet
            | Self::View => Args::LIMIT,

            Self::DelimiterSmart | Self::SetMark | Self::DefineX | Self::DefineY | Self::DefineZ => Args::TEXT,

            Self::Backup
            | Self::Exchange
            | Self::Full
            | Self::Intermediate
            | Self::Monitor
            | Self::Numbers
            | Self::Prompt
            | Self::Quiet => Args::empty(),

            _ => Args::COUNTED,
        }
    }

    /// The limit used when none is written.
    ///
    /// Finds scan up to the search maximum (`0`); `%A` exits with code 2,
    /// `%C` with 0, and `%V` shows the least detail.
    #[must_use]
    pub const fn default_limit(self) -> usize {
        match self {
            Self::Find | Self::FindBack | Self::Close | Self::View => 0,
            Self::Abandon => 2,
            _ => 1,
        }
    }

    /// The remembered text that `&` stands for and that this kind updates.
    #[must_use]
    pub const fn text_slot(self) -> Option<TextSlot> {
        match self {
            Self::DeleteText
            | Self::Find
            | Self::Traverse
            | Self::Uncover
            | Self::Verify
            | Self::DeleteBack
            | Self::FindBack
            | Self::TraverseBack
            | Self::UncoverBack
            | Self::VerifyBack => Some(TextSlot::Search),
            Self::Insert | Self::InsertBack | Self::Substitute | Self::SubstituteBack => Some(TextSlot::Modify),
            Self::Connect | Self::Output => Some(TextSlot::Filename),
            _ => None,
        }
    }

    /// The macro a `%X`/`%Y`/`%Z` defines.
    #[must_use]
    pub const fn defines(self) -> Option<MacroName> {
        match self {
            Self::DefineX => Some(MacroName::X),
            Self::DefineY => Some(MacroName::Y),
            Self::DefineZ => Some(MacroName::Z),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_special(self) -> bool {
        matches!(self.spelling(), Some((_, Variant::Special)))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_by_letter_and_form() {
        assert_eq!(Kind::lookup('f', Variant::Forward), Some(Kind::Find));
        assert_eq!(Kind::lookup('F', Variant::Back), Some(Kind::FindBack));
        assert_eq!(Kind::lookup('F', Variant::Special), Some(Kind::Full));
        assert_eq!(Kind::lookup('h', Variant::Back), Some(Kind::LowerCase));
        assert_eq!(Kind::lookup('X', Variant::Special), Some(Kind::DefineX));
    }

    #[test]
    fn empty_slots_are_unknown() {
        assert_eq!(Kind::lookup('C', Variant::Back), None);
        assert_eq!(Kind::lookup('O', Variant::Special), None);
        assert_eq!(Kind::lookup('X', Variant::Forward), None);
        assert_eq!(Kind::lookup('1', Variant::Forward), None);
        assert_eq!(Kind::lookup('é', Variant::Forward), None);
    }

    #[test]
    fn every_kind_round_trips_through_its_token() {
        let kinds: Vec<Kind> = Kind::all().collect();
        assert_eq!(kinds.len(), 61);
        for kind in kinds {
            let (letter, variant) = kind.spelling().unwrap();
            assert_eq!(Kind::lookup(letter, variant), Some(kind), "{kind}");
        }
    }

    #[test]
    fn tokens() {
        assert_eq!(Kind::Find.token(), "F");
        assert_eq!(Kind::UncoverBack.token(), "U-");
        assert_eq!(Kind::TerminalMaxSet.token(), "%T");
    }

    #[test]
    fn names_are_unique_and_searchable() {
        assert_eq!(Kind::from_name("traverseback"), Some(Kind::TraverseBack));
        assert_eq!(Kind::from_name("nothing"), None);
        let mut names: Vec<&str> = Kind::all().map(Kind::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 61);
    }

    #[test]
    fn argument_sets() {
        assert_eq!(Kind::Uncover.args(), Args::SEARCH);
        assert_eq!(Kind::InsertBack.args(), Args::EDIT);
        assert_eq!(Kind::SubstituteBack.args(), Args::QUOTED);
        assert_eq!(Kind::Verify.args(), Args::TEXT | Args::MODIFIER);
        assert_eq!(Kind::Move.args(), Args::REPEAT | Args::MODIFIER);
        assert_eq!(Kind::View.args(), Args::LIMIT);
        assert_eq!(Kind::SetMark.args(), Args::TEXT);
        assert!(Kind::Quiet.args().is_empty());
    }

    #[test]
    fn default_limits() {
        assert_eq!(Kind::Find.default_limit(), 0);
        assert_eq!(Kind::Traverse.default_limit(), 1);
        assert_eq!(Kind::Abandon.default_limit(), 2);
        assert_eq!(Kind::Close.default_limit(), 0);
    }

    #[test]
    fn text_slots() {
        assert_eq!(Kind::VerifyBack.text_slot(), Some(TextSlot::Search));
        assert_eq!(Kind::Insert.text_slot(), Some(TextSlot::Modify));
        assert_eq!(Kind::Output.text_slot(), Some(TextSlot::Filename));
        assert_eq!(Kind::SetMark.text_slot(), None);
        assert_eq!(Kind::Quary.text_slot(), None);
    }

    #[test]
    fn special_forms() {
        assert!(Kind::Backup.is_special());
        assert!(!Kind::BreakLine.is_special());
        assert_eq!(Kind::DefineY.defines(), Some(MacroName::Y));
    }
}

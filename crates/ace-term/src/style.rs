// SPDX-License-Identifier: MIT
//
// Text styles for printed buffer lines.
//
// A `Style` pairs a foreground colour with attribute flags. The editor uses
// a fixed set of them: the cursor glyph, the end-of-file marker, line
// numbers, the end-of-line marker, and escaped control characters.

use crate::color::CellColor;

bitflags::bitflags! {
    /// SGR text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u8 {
        /// Bold / increased intensity (SGR 1).
        const BOLD      = 1 << 0;
        /// Dim / decreased intensity (SGR 2).
        const DIM       = 1 << 1;
        /// Single underline (SGR 4).
        const UNDERLINE = 1 << 2;
        /// Swap foreground and background (SGR 7).
        const INVERSE   = 1 << 3;
    }
}

/// Foreground colour plus attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: CellColor,
    pub attr: Attr,
}

impl Style {
    /// No colour, no attributes.
    pub const PLAIN: Self = Self::new(CellColor::Default, Attr::empty());
    /// The cursor-mark glyph.
    pub const CURSOR: Self = Self::new(CellColor::RED, Attr::BOLD);
    /// The `**END**` marker shown at the end-of-file sentinel.
    pub const END: Self = Self::new(CellColor::GREEN, Attr::BOLD);
    /// Line-number prefix.
    pub const NUMBER: Self = Self::new(CellColor::YELLOW, Attr::empty());
    /// End-of-line marker shown with line numbers on.
    pub const EOL: Self = Self::new(CellColor::BLUE, Attr::BOLD);
    /// Control characters rendered as `^X`.
    pub const CONTROL: Self = Self::new(CellColor::CYAN, Attr::empty());

    #[must_use]
    pub const fn new(fg: CellColor, attr: Attr) -> Self {
        Self { fg, attr }
    }

    /// True when painting with this style emits no escape codes.
    #[must_use]
    pub fn is_plain(self) -> bool {
        self.fg == CellColor::Default && self.attr.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_is_plain() {
        assert!(Style::PLAIN.is_plain());
        assert!(Style::default().is_plain());
    }

    #[test]
    fn marker_styles_are_colored() {
        for style in [Style::CURSOR, Style::END, Style::NUMBER, Style::EOL, Style::CONTROL] {
            assert!(!style.is_plain(), "{style:?}");
        }
    }

    #[test]
    fn attr_flags_combine() {
        let a = Attr::BOLD | Attr::UNDERLINE;
        assert!(a.contains(Attr::BOLD));
        assert!(!a.contains(Attr::DIM));
    }
}

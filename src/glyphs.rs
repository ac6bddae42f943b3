//! Glyph sets for Unicode-capable and ASCII-only terminals.
//!
//! The only capability the crate adapts to is whether box drawing and other
//! non-ASCII symbols render. Everything that paints a decorative symbol asks
//! the active [`GlyphSet`] for it.

use crate::buffer::{BorderStyle, BoxStyle};
use crate::style::Style;

/// Which symbol repertoire to paint with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GlyphMode {
    #[default]
    Unicode,
    Ascii,
}

/// Decorative symbols used while painting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphSet {
    pub mode: GlyphMode,
    pub scroll_track: char,
    pub scroll_thumb: char,
    pub check_on: &'static str,
    pub check_off: &'static str,
    pub tree_branch: &'static str,
    pub tree_last: &'static str,
    pub tree_pipe: &'static str,
    pub tree_blank: &'static str,
    pub expanded: char,
    pub collapsed: char,
    pub ellipsis: &'static str,
}

impl GlyphSet {
    pub const UNICODE: Self = Self {
        mode: GlyphMode::Unicode,
        scroll_track: '│',
        scroll_thumb: '█',
        check_on: "[✓]",
        check_off: "[ ]",
        tree_branch: "├─ ",
        tree_last: "└─ ",
        tree_pipe: "│  ",
        tree_blank: "   ",
        expanded: '▾',
        collapsed: '▸',
        ellipsis: "…",
    };

    pub const ASCII: Self = Self {
        mode: GlyphMode::Ascii,
        scroll_track: '|',
        scroll_thumb: '#',
        check_on: "[x]",
        check_off: "[ ]",
        tree_branch: "|- ",
        tree_last: "`- ",
        tree_pipe: "|  ",
        tree_blank: "   ",
        expanded: 'v',
        collapsed: '>',
        ellipsis: "...",
    };

    /// Glyphs for a mode.
    #[must_use]
    pub const fn for_mode(mode: GlyphMode) -> Self {
        match mode {
            GlyphMode::Unicode => Self::UNICODE,
            GlyphMode::Ascii => Self::ASCII,
        }
    }

    /// Border characters; ASCII mode maps every family to `+-|`.
    #[must_use]
    pub fn box_style(&self, border: BorderStyle, style: Style) -> BoxStyle {
        match self.mode {
            GlyphMode::Unicode => BoxStyle::for_border(border, style),
            GlyphMode::Ascii => BoxStyle::ascii(style),
        }
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::UNICODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_glyphs_are_ascii() {
        let g = GlyphSet::ASCII;
        for s in [
            g.check_on,
            g.check_off,
            g.tree_branch,
            g.tree_last,
            g.tree_pipe,
            g.ellipsis,
        ] {
            assert!(s.is_ascii(), "{s:?}");
        }
        let b = g.box_style(BorderStyle::Rounded, Style::NONE);
        assert_eq!(b.top_left, '+');
    }

    #[test]
    fn test_tree_prefixes_share_width() {
        for g in [GlyphSet::UNICODE, GlyphSet::ASCII] {
            let w = crate::text::str_width(g.tree_branch);
            assert_eq!(crate::text::str_width(g.tree_last), w);
            assert_eq!(crate::text::str_width(g.tree_pipe), w);
            assert_eq!(crate::text::str_width(g.tree_blank), w);
        }
    }
}

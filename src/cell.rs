//! Terminal cell type representing a single character position.
//!
//! A terminal display is a grid of cells, where each cell contains a single
//! character along with styling information.
//!
//! # Wide Characters
//!
//! Some characters (CJK, emoji) have display width 2. When a wide character
//! is placed in a cell, the following cell becomes a
//! [`CellContent::Continuation`] to indicate it's occupied by the previous
//! character.
//!
//! # Examples
//!
//! ```
//! use tessera::{Cell, Rgb, Style};
//!
//! let cell = Cell::new('A', Style::fg(Rgb::new(0, 255, 0)));
//! assert_eq!(cell.to_ansi(), "\x1b[38;2;0;255;0mA\x1b[0m");
//!
//! let plain = Cell::new('b', Style::NONE);
//! assert_eq!(plain.to_ansi(), "b");
//! ```

use crate::ansi;
use crate::color::Rgb;
use crate::style::{Style, TextAttributes};

/// Content of a terminal cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellContent {
    /// A single character (display width 1 or 2).
    Char(char),
    /// Empty/cleared cell, rendered as a space.
    #[default]
    Empty,
    /// Continuation of a wide character from the previous cell.
    Continuation,
}

impl CellContent {
    /// Get the display width of this content.
    #[must_use]
    pub fn display_width(&self) -> usize {
        match self {
            Self::Char(c) => crate::text::char_width(*c),
            Self::Empty => 1,
            Self::Continuation => 0,
        }
    }

    /// Check if this is a continuation cell.
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        matches!(self, Self::Continuation)
    }

    /// Check if this is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The character shown for this content; a space for empty cells.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            Self::Empty => Some(' '),
            Self::Continuation => None,
        }
    }
}

/// A single terminal cell with content and styling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The character content.
    pub content: CellContent,
    /// Foreground color (None = terminal default).
    pub fg: Option<Rgb>,
    /// Background color (None = terminal default).
    pub bg: Option<Rgb>,
    /// Text rendering attributes.
    pub attributes: TextAttributes,
}

impl Cell {
    /// Create a new cell with a single character.
    #[must_use]
    pub fn new(ch: char, style: Style) -> Self {
        Self {
            content: CellContent::Char(ch),
            fg: style.fg,
            bg: style.bg,
            attributes: style.attributes,
        }
    }

    /// Create a cleared/empty cell with the specified background.
    #[must_use]
    pub fn clear(bg: Option<Rgb>) -> Self {
        Self {
            content: CellContent::Empty,
            fg: None,
            bg,
            attributes: TextAttributes::empty(),
        }
    }

    /// Create a continuation cell (placeholder for wide characters).
    #[must_use]
    pub fn continuation(style: Style) -> Self {
        Self {
            content: CellContent::Continuation,
            fg: style.fg,
            bg: style.bg,
            attributes: style.attributes,
        }
    }

    /// Get the display width of this cell.
    #[must_use]
    pub fn display_width(&self) -> usize {
        self.content.display_width()
    }

    /// Check if this is a continuation cell.
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        self.content.is_continuation()
    }

    /// Check if this cell is empty/cleared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Character displayed by the cell (space for empty, `None` for continuations).
    #[must_use]
    pub fn ch(&self) -> Option<char> {
        self.content.as_char()
    }

    /// The cell's styling as a [`Style`].
    #[must_use]
    pub fn style(&self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            attributes: self.attributes,
            mask: self.attributes,
        }
    }

    /// True when the cell carries no color or attribute.
    #[must_use]
    pub fn is_unstyled(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attributes.is_empty()
    }

    /// Apply a style to this cell; fields the style sets win.
    pub fn apply_style(&mut self, style: Style) {
        if let Some(fg) = style.fg {
            self.fg = Some(fg);
        }
        if let Some(bg) = style.bg {
            self.bg = Some(bg);
        }
        self.attributes =
            self.attributes.difference(style.mask) | style.attributes.intersection(style.mask);
    }

    /// Encode as one SGR prefix, the character and a reset.
    ///
    /// Unstyled cells encode as the bare character; continuation cells encode
    /// as nothing.
    #[must_use]
    pub fn to_ansi(&self) -> String {
        let Some(ch) = self.ch() else {
            return String::new();
        };
        if self.is_unstyled() {
            return ch.to_string();
        }
        let mut out = ansi::sgr_for(self.fg, self.bg, self.attributes);
        out.push(ch);
        out.push_str(ansi::RESET);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_default_is_empty() {
        let cell = Cell::default();
        assert!(cell.is_empty());
        assert_eq!(cell.ch(), Some(' '));
        assert!(cell.is_unstyled());
    }

    #[test]
    fn test_cell_new_takes_style() {
        let style = Style::fg(Rgb::RED).with_bg(Rgb::BLUE).with_bold();
        let cell = Cell::new('x', style);
        assert_eq!(cell.fg, Some(Rgb::RED));
        assert_eq!(cell.bg, Some(Rgb::BLUE));
        assert!(cell.attributes.contains(TextAttributes::BOLD));
    }

    #[test]
    fn test_display_width() {
        assert_eq!(Cell::new('a', Style::NONE).display_width(), 1);
        assert_eq!(Cell::new('漢', Style::NONE).display_width(), 2);
        assert_eq!(Cell::continuation(Style::NONE).display_width(), 0);
    }

    #[test]
    fn test_apply_style_respects_mask() {
        let mut cell = Cell::new('a', Style::bold());
        cell.apply_style(Style::fg(Rgb::GREEN));
        assert!(cell.attributes.contains(TextAttributes::BOLD));
        assert_eq!(cell.fg, Some(Rgb::GREEN));

        cell.apply_style(Style::builder().no_bold().build());
        assert!(!cell.attributes.contains(TextAttributes::BOLD));
    }

    #[test]
    fn test_to_ansi_full() {
        let style = Style::fg(Rgb::new(1, 2, 3))
            .with_bg(Rgb::new(4, 5, 6))
            .with_bold()
            .with_underline();
        let cell = Cell::new('Z', style);
        assert_eq!(
            cell.to_ansi(),
            "\x1b[38;2;1;2;3;48;2;4;5;6;1;4mZ\x1b[0m"
        );
    }

    #[test]
    fn test_to_ansi_unstyled_and_continuation() {
        assert_eq!(Cell::new('q', Style::NONE).to_ansi(), "q");
        assert_eq!(Cell::clear(None).to_ansi(), " ");
        assert_eq!(Cell::continuation(Style::NONE).to_ansi(), "");
    }
}

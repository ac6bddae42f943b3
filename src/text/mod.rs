//! Text measurement, wrapping and truncation.
//!
//! All functions here are ANSI aware: escape sequences pass through untouched
//! and never count toward width. Layout measures wrapped text with the same
//! [`wrap_text`] that paint uses, so measured and painted heights agree.
//!
//! # Examples
//!
//! ```
//! use tessera::text::{truncate_ansi, wrap_text};
//!
//! assert_eq!(wrap_text("the quick brown fox", 10), vec!["the quick ", "brown fox"]);
//! assert_eq!(truncate_ansi("\x1b[1mbold text", 4), "\x1b[1mbold\x1b[0m");
//! ```

mod wrap;

pub use wrap::{truncate_ansi, truncate_with_ellipsis, wrap_text};

use crate::geom::AlignH;
use unicode_width::UnicodeWidthChar;

/// Display width of a character in terminal columns.
///
/// Tabs count as one column (the tokenizer turns them into spaces); other
/// control characters and combining marks are zero width.
#[inline]
#[must_use]
pub fn char_width(c: char) -> usize {
    if (' '..='~').contains(&c) || c == '\t' {
        return 1;
    }
    if c < ' ' {
        return 0;
    }
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Display width of plain text (no escape handling).
#[must_use]
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Column at which a line of `used` columns starts inside `width` columns.
#[must_use]
pub fn align_offset(align: AlignH, width: usize, used: usize) -> usize {
    let free = width.saturating_sub(used);
    match align {
        AlignH::Left => 0,
        AlignH::Center => free / 2,
        AlignH::Right => free,
    }
}

/// Pad `text` with spaces on both sides to `width` columns, extra space on
/// the right. Text wider than `width` is returned unchanged.
#[must_use]
pub fn center_pad(text: &str, width: usize) -> String {
    let used = crate::ansi::visible_width(text);
    let left = align_offset(AlignH::Center, width, used);
    let right = width.saturating_sub(used + left);
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_width() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('\t'), 1);
        assert_eq!(char_width('\n'), 0);
        assert_eq!(char_width('中'), 2);
        assert_eq!(char_width('\u{0301}'), 0);
    }

    #[test]
    fn test_align_offset() {
        assert_eq!(align_offset(AlignH::Left, 10, 4), 0);
        assert_eq!(align_offset(AlignH::Center, 10, 4), 3);
        assert_eq!(align_offset(AlignH::Right, 10, 4), 6);
        assert_eq!(align_offset(AlignH::Right, 3, 4), 0);
    }

    #[test]
    fn test_center_pad() {
        assert_eq!(center_pad("ab", 5), " ab  ");
        assert_eq!(center_pad("toolong", 3), "toolong");
    }
}

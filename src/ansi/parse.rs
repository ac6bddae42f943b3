//! Tolerant ANSI tokenizer and the cell codec built on it.
//!
//! The tokenizer never fails. SGR sequences are surfaced so callers can track
//! style state; every other escape (cursor movement, OSC hyperlinks, DCS,
//! charset selection) and every C0/C1 control except newline is reported as
//! [`AnsiToken::Control`] so it can be dropped. Unterminated sequences swallow
//! the rest of the input.

use crate::ansi;
use crate::cell::Cell;
use crate::color::Rgb;
use crate::style::{Style, TextAttributes};
use crate::text::char_width;

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// One lexical unit of ANSI-bearing text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnsiToken<'a> {
    /// A visible character. Tabs arrive as a space; newlines pass through.
    Text(char),
    /// Select Graphic Rendition: `raw` is the whole sequence, `params` the
    /// bytes between `ESC[` and `m`.
    Sgr { raw: &'a str, params: &'a str },
    /// Anything else that occupies no cells.
    Control(&'a str),
}

/// Iterator over the [`AnsiToken`]s of a string.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    rest: &'a str,
}

/// Tokenize a string.
#[must_use]
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}

impl<'a> Tokens<'a> {
    fn take(&mut self, len: usize) -> &'a str {
        let len = len.min(self.rest.len());
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        head
    }

    fn escape(&mut self) -> AnsiToken<'a> {
        let bytes = self.rest.as_bytes();
        let Some(&kind) = bytes.get(1) else {
            return AnsiToken::Control(self.take(1));
        };
        match kind {
            b'[' => {
                let mut end = 2;
                while let Some(&b) = bytes.get(end) {
                    match b {
                        0x40..=0x7e => {
                            let raw = self.take(end + 1);
                            return if b == b'm' {
                                AnsiToken::Sgr {
                                    raw,
                                    params: &raw[2..end],
                                }
                            } else {
                                AnsiToken::Control(raw)
                            };
                        }
                        0x20..=0x3f => end += 1,
                        // Malformed: drop what we have and resume at `b`.
                        _ => return AnsiToken::Control(self.take(end)),
                    }
                }
                AnsiToken::Control(self.take(bytes.len()))
            }
            // OSC, DCS, SOS, PM, APC: string terminated by BEL or ST.
            b']' | b'P' | b'X' | b'^' | b'_' => {
                let mut i = 2;
                while let Some(&b) = bytes.get(i) {
                    if b == BEL {
                        return AnsiToken::Control(self.take(i + 1));
                    }
                    if b == ESC && bytes.get(i + 1) == Some(&b'\\') {
                        return AnsiToken::Control(self.take(i + 2));
                    }
                    i += 1;
                }
                AnsiToken::Control(self.take(bytes.len()))
            }
            // nF escapes such as `ESC ( B`: intermediates then a final byte.
            0x20..=0x2f => {
                let mut end = 2;
                while let Some(&b) = bytes.get(end) {
                    match b {
                        0x20..=0x2f => end += 1,
                        0x30..=0x7e => return AnsiToken::Control(self.take(end + 1)),
                        _ => break,
                    }
                }
                AnsiToken::Control(self.take(end))
            }
            0x30..=0x7e => AnsiToken::Control(self.take(2)),
            _ => AnsiToken::Control(self.take(1)),
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = AnsiToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.rest.chars().next()?;
        if c == '\x1b' {
            return Some(self.escape());
        }
        let raw = self.take(c.len_utf8());
        Some(match c {
            '\t' => AnsiToken::Text(' '),
            '\n' => AnsiToken::Text('\n'),
            c if c.is_control() => AnsiToken::Control(raw),
            c => AnsiToken::Text(c),
        })
    }
}

/// Cumulative graphic rendition state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SgrState {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub attributes: TextAttributes,
}

impl SgrState {
    /// Apply the parameter list of one SGR sequence.
    ///
    /// An empty list or `0` resets. Parsing stops at the first malformed
    /// parameter; everything applied before it is kept.
    pub fn apply(&mut self, params: &str) {
        let mut codes = params.split([';', ':']).map(|p| {
            if p.is_empty() {
                Some(0)
            } else {
                p.parse::<u16>().ok()
            }
        });

        while let Some(code) = codes.next() {
            let Some(code) = code else { return };
            match code {
                0 => *self = Self::default(),
                1 => self.attributes.insert(TextAttributes::BOLD),
                2 => self.attributes.insert(TextAttributes::DIM),
                3 => self.attributes.insert(TextAttributes::ITALIC),
                4 => self.attributes.insert(TextAttributes::UNDERLINE),
                7 => self.attributes.insert(TextAttributes::REVERSE),
                22 => self
                    .attributes
                    .remove(TextAttributes::BOLD | TextAttributes::DIM),
                23 => self.attributes.remove(TextAttributes::ITALIC),
                24 => self.attributes.remove(TextAttributes::UNDERLINE),
                27 => self.attributes.remove(TextAttributes::REVERSE),
                30..=37 => self.fg = Some(Rgb::from_16_color((code - 30) as u8)),
                90..=97 => self.fg = Some(Rgb::from_16_color((code - 90 + 8) as u8)),
                40..=47 => self.bg = Some(Rgb::from_16_color((code - 40) as u8)),
                100..=107 => self.bg = Some(Rgb::from_16_color((code - 100 + 8) as u8)),
                38 => match extended_color(&mut codes) {
                    Some(c) => self.fg = Some(c),
                    None => return,
                },
                48 => match extended_color(&mut codes) {
                    Some(c) => self.bg = Some(c),
                    None => return,
                },
                39 => self.fg = None,
                49 => self.bg = None,
                _ => {}
            }
        }
    }

    /// True when no color or attribute is active.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attributes.is_empty()
    }

    /// The state as a fully specified [`Style`].
    #[must_use]
    pub fn style(&self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            attributes: self.attributes,
            mask: TextAttributes::all(),
        }
    }

    /// One SGR sequence that re-establishes this state from a reset terminal.
    #[must_use]
    pub fn to_sgr(&self) -> String {
        ansi::sgr_for(self.fg, self.bg, self.attributes)
    }
}

fn extended_color(codes: &mut impl Iterator<Item = Option<u16>>) -> Option<Rgb> {
    match codes.next()?? {
        5 => {
            let n = codes.next()??;
            Some(Rgb::from_256_color(u8::try_from(n).ok()?))
        }
        2 => {
            let r = u8::try_from(codes.next()??).ok()?;
            let g = u8::try_from(codes.next()??).ok()?;
            let b = u8::try_from(codes.next()??).ok()?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}

/// Decode ANSI text into cells.
///
/// Each visible character becomes one cell (plus a continuation cell when it
/// is double width) carrying the SGR state active at that point. Newlines,
/// zero-width characters and non-SGR sequences produce no cells.
#[must_use]
pub fn ansi_string_to_cells(text: &str) -> Vec<Cell> {
    let mut state = SgrState::default();
    let mut cells = Vec::with_capacity(text.len());
    for token in tokenize(text) {
        match token {
            AnsiToken::Sgr { params, .. } => state.apply(params),
            AnsiToken::Text(c) => {
                let width = char_width(c);
                if c == '\n' || width == 0 {
                    continue;
                }
                let style = state.style();
                cells.push(Cell::new(c, style));
                if width == 2 {
                    cells.push(Cell::continuation(style));
                }
            }
            AnsiToken::Control(_) => {}
        }
    }
    cells
}

/// Encode cells back to ANSI text, one [`Cell::to_ansi`] per cell.
#[must_use]
pub fn cells_to_ansi(cells: &[Cell]) -> String {
    cells.iter().map(Cell::to_ansi).collect()
}

/// Remove every escape sequence and stray control character.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    tokenize(text)
        .filter_map(|t| match t {
            AnsiToken::Text(c) => Some(c),
            _ => None,
        })
        .collect()
}

/// Display width of text, ignoring escape sequences.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    tokenize(text)
        .map(|t| match t {
            AnsiToken::Text(c) => char_width(c),
            _ => 0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellContent;

    #[test]
    fn test_tokenize_kinds() {
        let tokens: Vec<_> = tokenize("a\x1b[1mb\x1b[2Kc").collect();
        assert_eq!(
            tokens,
            vec![
                AnsiToken::Text('a'),
                AnsiToken::Sgr {
                    raw: "\x1b[1m",
                    params: "1"
                },
                AnsiToken::Text('b'),
                AnsiToken::Control("\x1b[2K"),
                AnsiToken::Text('c'),
            ]
        );
    }

    #[test]
    fn test_strip_osc_hyperlink() {
        let bel = "\x1b]8;;https://example.com\x07link\x1b]8;;\x07";
        assert_eq!(strip_ansi(bel), "link");
        let st = "\x1b]8;;https://example.com\x1b\\link\x1b]8;;\x1b\\";
        assert_eq!(strip_ansi(st), "link");
    }

    #[test]
    fn test_strip_malformed() {
        assert_eq!(strip_ansi("ab\x1b"), "ab");
        assert_eq!(strip_ansi("ab\x1b[12"), "ab");
        assert_eq!(strip_ansi("a\x1b(Bb"), "ab");
        assert_eq!(strip_ansi("a\x1b]unterminated"), "a");
        assert_eq!(strip_ansi("x\x1b[1\x1b[0my"), "xy");
        assert_eq!(strip_ansi("t\u{7}ab\tc"), "tab c");
    }

    #[test]
    fn test_sgr_state_basic_colors() {
        let mut s = SgrState::default();
        s.apply("1;31;44");
        assert_eq!(s.fg, Some(Rgb::from_16_color(1)));
        assert_eq!(s.bg, Some(Rgb::from_16_color(4)));
        assert!(s.attributes.contains(TextAttributes::BOLD));

        s.apply("92;103");
        assert_eq!(s.fg, Some(Rgb::from_16_color(10)));
        assert_eq!(s.bg, Some(Rgb::from_16_color(11)));

        s.apply("39;49;22");
        assert!(s.is_default());
    }

    #[test]
    fn test_sgr_state_extended_colors() {
        let mut s = SgrState::default();
        s.apply("38;5;196;48;2;1;2;3");
        assert_eq!(s.fg, Some(Rgb::new(255, 0, 0)));
        assert_eq!(s.bg, Some(Rgb::new(1, 2, 3)));

        s.apply("");
        assert!(s.is_default());
    }

    #[test]
    fn test_sgr_state_malformed_stops() {
        let mut s = SgrState::default();
        s.apply("1;x;4");
        assert_eq!(s.attributes, TextAttributes::BOLD);

        let mut s = SgrState::default();
        s.apply("38;2;300;0;0;4");
        assert_eq!(s.fg, None);
        assert!(!s.attributes.contains(TextAttributes::UNDERLINE));
    }

    #[test]
    fn test_sgr_22_clears_bold_and_dim() {
        let mut s = SgrState::default();
        s.apply("1;2;3");
        s.apply("22");
        assert_eq!(s.attributes, TextAttributes::ITALIC);
    }

    #[test]
    fn test_string_to_cells() {
        let cells = ansi_string_to_cells("\x1b[1;38;2;10;20;30mA\x1b[0mb");
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].content, CellContent::Char('A'));
        assert_eq!(cells[0].fg, Some(Rgb::new(10, 20, 30)));
        assert!(cells[0].attributes.contains(TextAttributes::BOLD));
        assert!(cells[1].is_unstyled());
    }

    #[test]
    fn test_wide_char_adds_continuation() {
        let cells = ansi_string_to_cells("漢x");
        assert_eq!(cells.len(), 3);
        assert!(cells[1].is_continuation());
        assert_eq!(cells_to_ansi(&cells), "漢x");
    }

    #[test]
    fn test_round_trip_normalizes_once() {
        let src = "\x1b[3;4mhi\x1b[24m there\x1b[0m\x1b[2J!";
        let cells = ansi_string_to_cells(src);
        let encoded = cells_to_ansi(&cells);
        assert_eq!(strip_ansi(&encoded), "hi there!");
        assert_eq!(ansi_string_to_cells(&encoded), cells);
    }

    #[test]
    fn test_visible_width() {
        assert_eq!(visible_width("\x1b[31mred\x1b[0m"), 3);
        assert_eq!(visible_width("日本"), 4);
        assert_eq!(visible_width(""), 0);
    }
}

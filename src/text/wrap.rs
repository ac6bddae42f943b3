use crate::ansi::{self, AnsiToken, SgrState, tokenize, visible_width};
use crate::text::char_width;

const BREAK_AFTER: &str = "-.,;:!?)]}\"'";

fn is_boundary(c: char) -> bool {
    c.is_whitespace() || BREAK_AFTER.contains(c)
}

#[derive(Clone, Copy)]
enum Piece<'a> {
    Char(char, usize),
    Sgr(&'a str, &'a str),
}

/// Accumulates the pieces of the line being built.
struct LineBuilder<'a> {
    /// SGR state in effect when the current line starts.
    start: SgrState,
    pieces: Vec<Piece<'a>>,
    width: usize,
    /// Piece index just past the most recent boundary character.
    boundary: Option<usize>,
    /// Set after a break until the first visible non-whitespace char.
    continuation: bool,
}

impl<'a> LineBuilder<'a> {
    fn new(start: SgrState) -> Self {
        Self {
            start,
            pieces: Vec::new(),
            width: 0,
            boundary: None,
            continuation: false,
        }
    }

    fn push_char(&mut self, c: char, w: usize) {
        if self.continuation && c.is_whitespace() {
            return;
        }
        self.continuation = false;
        self.pieces.push(Piece::Char(c, w));
        self.width += w;
        if is_boundary(c) {
            self.boundary = Some(self.pieces.len());
        }
    }

    /// Emit the current line, breaking after the last boundary if any, and
    /// keep the remainder as the start of the next line.
    fn break_line(&mut self, out: &mut Vec<String>) {
        let split = self.boundary.unwrap_or(self.pieces.len());
        let carry = self.pieces.split_off(split);
        let end = self.emit(out);

        self.start = end;
        self.width = 0;
        self.boundary = None;
        self.continuation = true;
        for piece in carry {
            match piece {
                Piece::Char(c, w) => self.push_char(c, w),
                Piece::Sgr(..) => self.pieces.push(piece),
            }
        }
    }

    /// Render pieces with the carried prefix and a closing reset; returns
    /// the SGR state at the end of the line.
    fn emit(&mut self, out: &mut Vec<String>) -> SgrState {
        let mut state = self.start;
        if self.pieces.is_empty() {
            out.push(String::new());
            return state;
        }
        let mut line = state.to_sgr();
        for piece in self.pieces.drain(..) {
            match piece {
                Piece::Char(c, _) => line.push(c),
                Piece::Sgr(raw, params) => {
                    line.push_str(raw);
                    state.apply(params);
                }
            }
        }
        if !state.is_default() {
            line.push_str(ansi::RESET);
        }
        out.push(line);
        state
    }
}

/// Wrap ANSI text to `width` columns.
///
/// Each `\n`-separated line wraps independently. Characters accumulate while
/// the visible width stays within `width`; on overflow the line breaks after
/// the most recent whitespace, hyphen or closing punctuation, or mid-word when
/// there is none; an overflowing whitespace character breaks in place.
/// Leading whitespace on continuation lines is dropped. Active SGR state is
/// re-opened at the start of each continuation line and closed with a reset
/// at the end of each line. A width of zero disables wrapping.
///
/// No line is wider than `width`, except that a character wider than
/// `width` (a double-width character at width 1) still gets a line of its
/// own rather than being dropped.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut out = Vec::new();
    let mut state = SgrState::default();
    for source_line in text.split('\n') {
        let mut line = LineBuilder::new(state);
        for token in tokenize(source_line) {
            match token {
                AnsiToken::Text(c) => {
                    let w = char_width(c);
                    while line.width > 0 && line.width + w > width {
                        // Overflowing whitespace ends the line as it stands.
                        if c.is_whitespace() {
                            line.boundary = None;
                        }
                        line.break_line(&mut out);
                    }
                    line.push_char(c, w);
                }
                AnsiToken::Sgr { raw, params } => line.pieces.push(Piece::Sgr(raw, params)),
                AnsiToken::Control(_) => {}
            }
        }
        state = line.emit(&mut out);
    }
    out
}

/// Cut ANSI text to at most `width` visible columns.
///
/// Escape sequences before the cut are kept; a reset closes any style still
/// active. Control sequences other than SGR are dropped.
#[must_use]
pub fn truncate_ansi(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = SgrState::default();
    let mut used = 0;
    for token in tokenize(text) {
        match token {
            AnsiToken::Text('\n') | AnsiToken::Control(_) => {}
            AnsiToken::Text(c) => {
                let w = char_width(c);
                if used + w > width {
                    break;
                }
                used += w;
                out.push(c);
            }
            AnsiToken::Sgr { raw, params } => {
                out.push_str(raw);
                state.apply(params);
            }
        }
    }
    if !state.is_default() {
        out.push_str(ansi::RESET);
    }
    out
}

/// Like [`truncate_ansi`] but marks the cut with `ellipsis` when text is lost.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, width: usize, ellipsis: &str) -> String {
    if visible_width(text) <= width {
        return text.to_string();
    }
    let mark = visible_width(ellipsis);
    if mark >= width {
        return truncate_ansi(ellipsis, width);
    }
    let mut out = truncate_ansi(text, width - mark);
    out.push_str(ellipsis);
    out
}

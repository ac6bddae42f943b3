//! Text and box drawing operations.

use crate::ansi::{AnsiToken, SgrState, tokenize, visible_width};
use crate::buffer::CellBuffer;
use crate::cell::Cell;
use crate::geom::{AlignH, Bounds};
use crate::style::Style;
use crate::text::char_width;

/// Border line family for frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderStyle {
    /// No border line.
    None,
    #[default]
    Single,
    Double,
    Rounded,
    Heavy,
}

impl BorderStyle {
    /// Cells consumed on each side.
    #[must_use]
    pub const fn thickness(self) -> u32 {
        match self {
            Self::None => 0,
            _ => 1,
        }
    }
}

/// Box drawing style with corner and edge characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoxStyle {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    pub style: Style,
}

impl BoxStyle {
    /// Single-line box drawing characters.
    #[must_use]
    pub fn single(style: Style) -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
            style,
        }
    }

    /// Double-line box drawing characters.
    #[must_use]
    pub fn double(style: Style) -> Self {
        Self {
            top_left: '╔',
            top_right: '╗',
            bottom_left: '╚',
            bottom_right: '╝',
            horizontal: '═',
            vertical: '║',
            style,
        }
    }

    /// Rounded corner box drawing characters.
    #[must_use]
    pub fn rounded(style: Style) -> Self {
        Self {
            top_left: '╭',
            top_right: '╮',
            bottom_left: '╰',
            bottom_right: '╯',
            horizontal: '─',
            vertical: '│',
            style,
        }
    }

    /// Heavy (bold) box drawing characters.
    #[must_use]
    pub fn heavy(style: Style) -> Self {
        Self {
            top_left: '┏',
            top_right: '┓',
            bottom_left: '┗',
            bottom_right: '┛',
            horizontal: '━',
            vertical: '┃',
            style,
        }
    }

    /// ASCII box drawing characters (works in all terminals).
    #[must_use]
    pub fn ascii(style: Style) -> Self {
        Self {
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
            horizontal: '-',
            vertical: '|',
            style,
        }
    }

    /// Box characters for a border family.
    #[must_use]
    pub fn for_border(border: BorderStyle, style: Style) -> Self {
        match border {
            BorderStyle::Double => Self::double(style),
            BorderStyle::Rounded => Self::rounded(style),
            BorderStyle::Heavy => Self::heavy(style),
            BorderStyle::Single | BorderStyle::None => Self::single(style),
        }
    }
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self::single(Style::NONE)
    }
}

/// Draw ANSI text at position, handling wide characters.
///
/// SGR sequences in `text` overlay `style` for the characters that follow.
/// Newlines and other controls are skipped. Returns the column after the last
/// character written.
pub fn draw_text(buffer: &mut CellBuffer, x: i32, y: i32, text: &str, style: Style) -> i32 {
    let mut col = x;
    let mut sgr = SgrState::default();
    let mut current = style;

    for token in tokenize(text) {
        match token {
            AnsiToken::Sgr { params, .. } => {
                sgr.apply(params);
                current = style.merge(Style {
                    fg: sgr.fg,
                    bg: sgr.bg,
                    attributes: sgr.attributes,
                    mask: sgr.attributes,
                });
            }
            AnsiToken::Text(c) => {
                let width = char_width(c);
                if c == '\n' || width == 0 {
                    continue;
                }
                if width == 2 && !buffer.is_visible(col.saturating_add(1), y) {
                    // Half a wide glyph cannot be shown.
                    buffer.set(col, y, Cell::new(' ', current));
                } else {
                    buffer.set(col, y, Cell::new(c, current));
                    if width == 2 {
                        buffer.set(col + 1, y, Cell::continuation(current));
                    }
                }
                col = col.saturating_add(width as i32);
            }
            AnsiToken::Control(_) => {}
        }
    }
    col
}

/// Draw a box border with an optional title on the top edge.
///
/// Boxes smaller than 2x2 are not drawn. The title is placed after the
/// top-left corner with one cell of padding and truncated to fit.
pub fn draw_box(
    buffer: &mut CellBuffer,
    rect: Bounds,
    box_style: &BoxStyle,
    title: Option<&str>,
    title_align: AlignH,
) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let style = box_style.style;
    let (x, y) = (rect.x, rect.y);
    let (r, b) = (rect.right() - 1, rect.bottom() - 1);

    buffer.set(x, y, Cell::new(box_style.top_left, style));
    buffer.set(r, y, Cell::new(box_style.top_right, style));
    buffer.set(x, b, Cell::new(box_style.bottom_left, style));
    buffer.set(r, b, Cell::new(box_style.bottom_right, style));

    let inner = rect.width - 2;
    draw_hline(buffer, x + 1, y, inner, box_style.horizontal, style);
    draw_hline(buffer, x + 1, b, inner, box_style.horizontal, style);
    draw_vline(buffer, x, y + 1, rect.height - 2, box_style.vertical, style);
    draw_vline(buffer, r, y + 1, rect.height - 2, box_style.vertical, style);

    if let Some(title) = title.filter(|t| !t.is_empty()) {
        // Keep one horizontal cell on each side of the title.
        let room = inner.saturating_sub(2) as usize;
        if room == 0 {
            return;
        }
        let label = crate::text::truncate_ansi(title, room);
        let used = visible_width(&label);
        let offset = crate::text::align_offset(title_align, room, used);
        draw_text(buffer, x + 2 + offset as i32, y, &label, style);
    }
}

/// Draw a horizontal line.
pub fn draw_hline(buffer: &mut CellBuffer, x: i32, y: i32, len: u32, ch: char, style: Style) {
    for i in 0..len {
        buffer.set(x.saturating_add_unsigned(i), y, Cell::new(ch, style));
    }
}

/// Draw a vertical line.
pub fn draw_vline(buffer: &mut CellBuffer, x: i32, y: i32, len: u32, ch: char, style: Style) {
    for i in 0..len {
        buffer.set(x, y.saturating_add_unsigned(i), Cell::new(ch, style));
    }
}

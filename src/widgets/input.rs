//! Single-line text entry.
//!
//! The cursor counts grapheme clusters, so a base letter and its combining
//! marks move and delete as one unit.

use crate::element::{Element, ElementBase, interactive_via_base};
use crate::geom::{Extent, Size};
use crate::input::{KeyCode, KeyEvent, MouseButton, MouseEvent};
use crate::paint::PaintContext;
use crate::style::Style;
use crate::text::str_width;
use unicode_segmentation::UnicodeSegmentation;

/// A one-row editable field. The cursor is a grapheme index into `value`.
#[derive(Clone, Debug)]
pub struct TextInput {
    pub base: ElementBase,
    value: String,
    cursor: usize,
    pub placeholder: String,
}

interactive_via_base!(TextInput);

fn cell_width(grapheme: &str) -> usize {
    str_width(grapheme).max(1)
}

impl TextInput {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let mut base = ElementBase::sized(Size::Fill, Size::Fixed(1));
        base.focusable = true;
        Self {
            base,
            cursor: value.graphemes(true).count(),
            value,
            placeholder: String::new(),
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.len();
    }

    fn len(&self) -> usize {
        self.value.graphemes(true).count()
    }

    /// Byte offset of the grapheme at `index`, or the end of the value.
    fn byte_at(&self, index: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Insert at the cursor. A combining mark joins the grapheme before it,
    /// leaving the cursor where it was.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.value.insert(at, c);
        self.cursor = self.value[..at + c.len_utf8()].graphemes(true).count();
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.remove_at_cursor();
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        self.remove_at_cursor();
        true
    }

    fn remove_at_cursor(&mut self) {
        let from = self.byte_at(self.cursor);
        let to = self.byte_at(self.cursor + 1);
        self.value.replace_range(from..to, "");
    }

    pub fn move_to(&mut self, index: usize) -> bool {
        let index = index.min(self.len());
        let moved = index != self.cursor;
        self.cursor = index;
        moved
    }

    /// First visible grapheme index so the cursor cell fits in `width`.
    fn window_start(&self, width: usize) -> usize {
        let widths: Vec<usize> = self.value.graphemes(true).map(cell_width).collect();
        let mut start = 0;
        let mut used: usize = widths[..self.cursor].iter().sum();
        while start < self.cursor && used + 1 > width {
            used -= widths[start];
            start += 1;
        }
        start
    }
}

impl Element for TextInput {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "textinput"
    }

    fn measure(&self, _available: Extent) -> Extent {
        let shown = str_width(&self.value).max(str_width(&self.placeholder)) + 1;
        Extent::new(u32::try_from(shown).unwrap_or(u32::MAX), 1)
    }

    fn render_to(&self, ctx: &mut PaintContext<'_>) {
        let style = ctx.resolve(self);
        ctx.fill(style);
        let width = ctx.width() as usize;
        let focused = self.base.focused;

        if self.value.is_empty() && !focused {
            ctx.write_text(0, 0, &self.placeholder, style.merge(Style::dim()));
            return;
        }

        let start = self.window_start(width);
        let mut x = 0usize;
        for (i, g) in self.value.graphemes(true).enumerate().skip(start) {
            let w = cell_width(g);
            if x + w > width {
                break;
            }
            let cell_style = if focused && i == self.cursor {
                style.merge(Style::reverse())
            } else {
                style
            };
            ctx.write_text(x as i32, 0, g, cell_style);
            x += w;
        }
        if focused && self.cursor == self.len() && x < width {
            ctx.set_cell(x as i32, 0, ' ', style.merge(Style::reverse()));
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if self.base.disabled {
            return false;
        }
        if let Some(c) = key.typed_char() {
            self.insert(c);
            return true;
        }
        match key.code {
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_to(self.cursor + 1),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.len()),
            _ => false,
        }
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        if !event.is_press() || event.button != MouseButton::Left {
            return false;
        }
        let Some(bounds) = self.base.bounds else {
            return false;
        };
        let start = self.window_start(bounds.width as usize);
        let col = usize::try_from(event.x - bounds.x).unwrap_or(0);
        let mut x = 0;
        let mut index = start;
        for g in self.value.graphemes(true).skip(start) {
            if x >= col {
                break;
            }
            x += cell_width(g);
            index += 1;
        }
        self.move_to(index);
        true
    }
}

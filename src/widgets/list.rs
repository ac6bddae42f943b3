//! Selectable, scrolling list of lines.

use crate::ansi::visible_width;
use crate::element::{Element, ElementBase, interactive_via_base};
use crate::geom::{Extent, Size};
use crate::input::{KeyCode, KeyEvent, MouseButton, MouseEvent};
use crate::paint::PaintContext;
use crate::scroll::ScrollState;
use crate::text::truncate_ansi;
use crate::theme::PseudoClass;

/// One line per item; the selected row follows the keyboard and stays in
/// view.
#[derive(Clone, Debug)]
pub struct ListView {
    pub base: ElementBase,
    items: Vec<String>,
    selected: Option<usize>,
    scroll: ScrollState,
    pub show_scrollbar: bool,
}

interactive_via_base!(ListView);

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl ListView {
    #[must_use]
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let mut base = ElementBase::sized(Size::Fill, Size::Fill);
        base.focusable = true;
        Self {
            base,
            selected: (!items.is_empty()).then_some(0),
            scroll: ScrollState::new(to_u32(items.len()), 0),
            items,
            show_scrollbar: true,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Replace the items, keeping the selection index where it still exists.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.selected = match self.selected {
            _ if self.items.is_empty() => None,
            Some(i) => Some(i.min(self.items.len() - 1)),
            None => Some(0),
        };
        self.scroll.set_content_size(to_u32(self.items.len()));
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&str> {
        self.selected.and_then(|i| self.items.get(i)).map(String::as_str)
    }

    #[must_use]
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Select an index (clamped) and scroll it into view.
    pub fn select(&mut self, index: usize) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let index = index.min(self.items.len() - 1);
        let changed = self.selected != Some(index);
        self.selected = Some(index);
        self.scroll.ensure_visible(to_u32(index));
        changed
    }

    fn move_by(&mut self, delta: i64) -> bool {
        let current = self.selected.unwrap_or(0) as i64;
        let target = (current + delta).max(0);
        self.select(usize::try_from(target).unwrap_or(usize::MAX))
    }

    fn has_scrollbar(&self) -> bool {
        self.show_scrollbar && self.scroll.is_scrollable()
    }
}

impl Element for ListView {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "listview"
    }

    fn measure(&self, _available: Extent) -> Extent {
        let width = self.items.iter().map(|s| visible_width(s)).max().unwrap_or(0);
        Extent::new(to_u32(width), to_u32(self.items.len()))
    }

    fn render_to(&self, ctx: &mut PaintContext<'_>) {
        let style = ctx.resolve(self);
        if style.bg.is_some() {
            ctx.fill(style);
        }
        let bar = self.has_scrollbar();
        let width = ctx.width().saturating_sub(u32::from(bar));
        let range = self.scroll.visible_range();
        let first = range.start;

        for (row, item) in self.scroll.visible(&self.items).iter().enumerate() {
            let index = first + row;
            let mut pseudo = PseudoClass::empty();
            if self.selected == Some(index) {
                pseudo |= PseudoClass::SELECTED;
                if self.base.focused {
                    pseudo |= PseudoClass::FOCUS;
                }
            }
            let row_style = style.merge(ctx.resolve_classes(&["list-item"], pseudo, None));
            if !pseudo.is_empty() {
                ctx.fill_rect(0, row as i32, width, 1, ' ', row_style);
            }
            ctx.write_text(0, row as i32, &truncate_ansi(item, width as usize), row_style);
        }

        if bar {
            ctx.draw_scrollbar(width as i32, 0, ctx.height(), &self.scroll);
        }
    }

    fn scroll_state(&self) -> Option<&ScrollState> {
        Some(&self.scroll)
    }

    fn scroll_state_mut(&mut self) -> Option<&mut ScrollState> {
        Some(&mut self.scroll)
    }

    fn on_layout(&mut self) {
        let height = self.base.bounds.map_or(0, |b| b.height);
        self.scroll.resize(to_u32(self.items.len()), height);
        if let Some(i) = self.selected {
            self.scroll.ensure_visible(to_u32(i));
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let page = i64::from(self.scroll.viewport_size().max(1));
        match key.code {
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::PageUp => self.move_by(-page),
            KeyCode::PageDown => self.move_by(page),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(self.items.len().saturating_sub(1)),
            _ => return false,
        };
        true
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        if event.is_scroll() {
            return self.scroll.handle_wheel(event);
        }
        let Some(bounds) = self.base.bounds else {
            return false;
        };
        if !event.is_press()
            || event.button != MouseButton::Left
            || !bounds.contains(event.x, event.y)
        {
            return false;
        }
        let row = u32::try_from(event.y - bounds.y).unwrap_or(0);
        let index = (self.scroll.position() + row) as usize;
        if index >= self.items.len() {
            return false;
        }
        self.select(index);
        true
    }
}

//! Stacks and frames.

use super::{Element, ElementBase, interactive_via_base};
use crate::ansi::visible_width;
use crate::buffer::BorderStyle;
use crate::geom::{Align, AlignH, AlignV, Axis, Bounds, Extent, Insets};
use crate::input::{KeyEvent, MouseEvent};
use crate::paint::PaintContext;
use crate::scroll::ScrollState;
use crate::style::Style;
use crate::text::{align_offset, truncate_ansi, wrap_text};

/// How a container arranges its children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// Children top to bottom.
    #[default]
    VStack,
    /// Children left to right.
    HStack,
    /// Bordered box; text and children stack vertically inside.
    Frame,
}

impl LayoutMode {
    /// Main axis of the arrangement.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::HStack => Axis::Horizontal,
            Self::VStack | Self::Frame => Axis::Vertical,
        }
    }
}

/// Treatment of frame text wider than the content area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverflowX {
    /// Truncate each line, keeping its styling.
    #[default]
    Clip,
    /// Paint past the right edge, over whatever is beside the frame.
    Visible,
    /// Reflow at word boundaries.
    Wrap,
}

/// An element that arranges ordered children.
pub struct Container {
    pub base: ElementBase,
    pub mode: LayoutMode,
    pub children: Vec<Box<dyn Element>>,
    pub spacing: u32,
    pub padding: Insets,
    pub align_h: AlignH,
    pub align_v: AlignV,
    pub content_align_h: AlignH,
    pub content_align_v: AlignV,
    pub border: BorderStyle,
    pub title: Option<String>,
    pub title_align: AlignH,
    pub text: Option<String>,
    pub overflow_x: OverflowX,
    pub scrollable: bool,
    pub show_scrollbar: bool,
    pub scroll: ScrollState,
}

interactive_via_base!(Container);

impl Container {
    #[must_use]
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            base: ElementBase::default(),
            mode,
            children: Vec::new(),
            spacing: 0,
            padding: Insets::ZERO,
            align_h: AlignH::Left,
            align_v: AlignV::Top,
            content_align_h: AlignH::Left,
            content_align_v: AlignV::Top,
            border: if mode == LayoutMode::Frame {
                BorderStyle::Single
            } else {
                BorderStyle::None
            },
            title: None,
            title_align: AlignH::Left,
            text: None,
            overflow_x: OverflowX::Clip,
            scrollable: false,
            show_scrollbar: true,
            scroll: ScrollState::default(),
        }
    }

    #[must_use]
    pub fn vstack() -> Self {
        Self::new(LayoutMode::VStack)
    }

    #[must_use]
    pub fn hstack() -> Self {
        Self::new(LayoutMode::HStack)
    }

    #[must_use]
    pub fn frame() -> Self {
        Self::new(LayoutMode::Frame)
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: impl Element + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn push(&mut self, child: Box<dyn Element>) {
        self.children.push(child);
    }

    #[must_use]
    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn align(mut self, h: AlignH, v: AlignV) -> Self {
        self.align_h = h;
        self.align_v = v;
        self
    }

    #[must_use]
    pub fn content_align(mut self, h: AlignH, v: AlignV) -> Self {
        self.content_align_h = h;
        self.content_align_v = v;
        self
    }

    #[must_use]
    pub fn with_border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn overflow(mut self, overflow_x: OverflowX) -> Self {
        self.overflow_x = overflow_x;
        self
    }

    #[must_use]
    pub fn scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    #[must_use]
    pub fn scrollbar(mut self, show: bool) -> Self {
        self.show_scrollbar = show;
        self
    }

    /// Border cells on each side.
    #[must_use]
    pub fn border_thickness(&self) -> u32 {
        match self.mode {
            LayoutMode::Frame => self.border.thickness(),
            LayoutMode::VStack | LayoutMode::HStack => 0,
        }
    }

    fn reserves_scrollbar(&self) -> bool {
        self.scrollable && self.show_scrollbar
    }

    /// Total space taken by border, padding and scrollbar column.
    #[must_use]
    pub fn chrome(&self) -> Insets {
        let b = self.border_thickness();
        let bar = u32::from(self.reserves_scrollbar());
        Insets::new(
            b.saturating_add(self.padding.top),
            b.saturating_add(self.padding.right).saturating_add(bar),
            b.saturating_add(self.padding.bottom),
            b.saturating_add(self.padding.left),
        )
    }

    /// Bounds minus border, padding and scrollbar column.
    #[must_use]
    pub fn content_rect(&self, bounds: Bounds) -> Bounds {
        bounds.inset(self.chrome())
    }

    /// Frame text split into display lines for a content width.
    #[must_use]
    pub fn text_lines(&self, width: u32) -> Vec<String> {
        let Some(text) = self.text.as_deref() else {
            return Vec::new();
        };
        match self.overflow_x {
            OverflowX::Wrap => wrap_text(text, width as usize),
            OverflowX::Clip | OverflowX::Visible => text.split('\n').map(str::to_string).collect(),
        }
    }

    /// Rows of the content rect taken by text before children start.
    #[must_use]
    pub fn text_rows(&self, content: Bounds) -> u32 {
        if self.text.is_none() {
            return 0;
        }
        if self.scrollable {
            return content.height;
        }
        let lines = u32::try_from(self.text_lines(content.width).len()).unwrap_or(u32::MAX);
        lines.min(content.height)
    }

    fn paint_text(&self, ctx: &mut PaintContext<'_>, content: Bounds, style: Style) {
        let lines = self.text_lines(content.width);
        let rows = self.text_rows(content);
        let visible: &[String] = if self.scrollable {
            self.scroll.visible(&lines)
        } else {
            &lines[..(rows as usize).min(lines.len())]
        };

        let used = u32::try_from(visible.len()).unwrap_or(u32::MAX);
        let area = if self.children.is_empty() {
            content.height
        } else {
            rows
        };
        let top = Align::from(self.content_align_v).offset(area, used);
        let origin = ctx.bounds();
        let (dx, dy) = (content.x - origin.x, content.y - origin.y);

        for (i, line) in visible.iter().enumerate() {
            let y = dy + (top as i32) + i as i32;
            if self.overflow_x == OverflowX::Visible {
                let offset =
                    align_offset(self.content_align_h, content.width as usize, visible_width(line));
                ctx.write_text_overflow(dx + offset as i32, y, line, style);
                continue;
            }
            let clipped = truncate_ansi(line, content.width as usize);
            let offset =
                align_offset(self.content_align_h, content.width as usize, visible_width(&clipped));
            ctx.write_text(dx + offset as i32, y, &clipped, style);
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::vstack()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.base.id)
            .field("mode", &self.mode)
            .field("bounds", &self.base.bounds)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

impl Element for Container {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        match self.mode {
            LayoutMode::VStack => "vstack",
            LayoutMode::HStack => "hstack",
            LayoutMode::Frame => "frame",
        }
    }

    fn measure(&self, available: Extent) -> Extent {
        let chrome = self.chrome();
        let inner = Extent::new(
            available.width.saturating_sub(chrome.horizontal()),
            available.height.saturating_sub(chrome.vertical()),
        );

        let lines = self.text_lines(inner.width);
        let text_w = lines
            .iter()
            .map(|l| u32::try_from(visible_width(l)).unwrap_or(u32::MAX))
            .max()
            .unwrap_or(0);
        let text_h = u32::try_from(lines.len()).unwrap_or(u32::MAX);

        let kids = crate::layout::measure_children(self, inner);
        let width = text_w.max(kids.width);
        let height = match (text_h, kids.height) {
            (0, h) | (h, 0) => h,
            (t, h) => t.saturating_add(h),
        };

        Extent::new(
            width.saturating_add(chrome.horizontal()),
            height.saturating_add(chrome.vertical()),
        )
    }

    fn render_to(&self, ctx: &mut PaintContext<'_>) {
        let style = ctx.resolve(self);
        let bounds = ctx.bounds();
        if style.bg.is_some() {
            ctx.fill(style);
        }

        if self.mode == LayoutMode::Frame && self.border != BorderStyle::None {
            let border_style = ctx.resolve_class(self, "frame");
            ctx.draw_border(self.border, border_style, self.title.as_deref(), self.title_align);
        }

        let content = self.content_rect(bounds);
        if self.reserves_scrollbar() {
            let x = content.right() - bounds.x;
            let y = content.y - bounds.y;
            ctx.draw_scrollbar(x, y, content.height, &self.scroll);
        }

        if self.text.is_some() {
            self.paint_text(ctx, content, style);
        }

        let mut inner = if self.overflow_x == OverflowX::Visible {
            ctx.child_overflow(content)
        } else {
            ctx.child(content)
        };
        for child in &self.children {
            inner.paint_child(child.as_ref());
        }
    }

    fn children(&self) -> &[Box<dyn Element>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Element>] {
        &mut self.children
    }

    fn as_container(&self) -> Option<&Container> {
        Some(self)
    }

    fn as_container_mut(&mut self) -> Option<&mut Container> {
        Some(self)
    }

    fn scroll_state(&self) -> Option<&ScrollState> {
        self.scrollable.then_some(&self.scroll)
    }

    fn scroll_state_mut(&mut self) -> Option<&mut ScrollState> {
        self.scrollable.then_some(&mut self.scroll)
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        self.scrollable && self.scroll.handle_key(key)
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        self.scrollable && self.scroll.handle_wheel(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementBuilder;
    use crate::geom::Size;
    use crate::widgets::Text;

    #[test]
    fn test_huge_padding_saturates() {
        let mut frame = Container::frame()
            .with_padding(Insets::new(0, u32::MAX, 0, 0))
            .scrollable(true)
            .child(Text::new("hidden"));
        assert_eq!(frame.chrome().right, u32::MAX);
        assert_eq!(frame.chrome().left, 1);

        crate::layout::layout(&mut frame, Bounds::sized(10, 5));
        assert_eq!(frame.content_rect(Bounds::sized(10, 5)).width, 0);
        let text = crate::snapshot::render_plain(&mut frame, 10, 5);
        assert!(!text.contains("hidden"));

        let mut left = Container::frame()
            .with_padding(Insets::new(u32::MAX, 0, 0, u32::MAX))
            .child(Text::new("x"));
        crate::layout::layout(&mut left, Bounds::sized(10, 5));
        let inner = left.children[0].base().bounds.unwrap_or_default();
        assert_eq!((inner.width, inner.height), (0, 0));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Container::vstack().type_name(), "vstack");
        assert_eq!(Container::hstack().type_name(), "hstack");
        assert_eq!(Container::frame().type_name(), "frame");
    }

    #[test]
    fn test_content_rect_subtracts_chrome() {
        let frame = Container::frame().with_padding(Insets::symmetric(0, 1));
        let content = frame.content_rect(Bounds::new(0, 0, 20, 5));
        assert_eq!(content, Bounds::new(2, 1, 16, 3));

        let scroller = Container::vstack().scrollable(true);
        assert_eq!(
            scroller.content_rect(Bounds::new(0, 0, 10, 4)),
            Bounds::new(0, 0, 9, 4)
        );
        let bare = Container::vstack().scrollable(true).scrollbar(false);
        assert_eq!(bare.content_rect(Bounds::new(0, 0, 10, 4)).width, 10);
    }

    #[test]
    fn test_stack_has_no_border() {
        let stack = Container::vstack().with_border(BorderStyle::Double);
        assert_eq!(stack.border_thickness(), 0);
    }

    #[test]
    fn test_measure_frame_text() {
        let frame = Container::frame().with_text("hello\nworld!");
        assert_eq!(frame.measure(Extent::new(80, 24)), Extent::new(8, 4));

        let wrapped = Container::frame()
            .with_text("aaaa bbbb cccc")
            .overflow(OverflowX::Wrap);
        assert_eq!(wrapped.measure(Extent::new(11, 24)), Extent::new(11, 4));
    }

    #[test]
    fn test_measure_stacks() {
        let v = Container::vstack()
            .with_spacing(1)
            .child(Text::new("abc").with_height(Size::Auto))
            .child(Text::new("abcdef").with_height(Size::Auto));
        assert_eq!(v.measure(Extent::new(80, 24)), Extent::new(6, 3));

        let h = Container::hstack()
            .with_spacing(2)
            .child(Text::new("abc").with_width(Size::Auto))
            .child(Text::new("de").with_width(Size::Auto));
        assert_eq!(h.measure(Extent::new(80, 24)), Extent::new(7, 1));
    }

    #[test]
    fn test_scroll_state_only_when_scrollable() {
        assert!(Container::vstack().scroll_state().is_none());
        assert!(Container::vstack().scrollable(true).scroll_state().is_some());
    }
}

//! Static, optionally wrapped text.

use crate::ansi::visible_width;
use crate::element::{Element, ElementBase, interactive_via_base};
use crate::geom::{AlignH, Extent, Size};
use crate::paint::PaintContext;
use crate::text::{align_offset, truncate_ansi, wrap_text};

/// A block of ANSI-aware text.
///
/// Fills the available width and is as tall as its (wrapped) line count.
#[derive(Clone, Debug)]
pub struct Text {
    pub base: ElementBase,
    pub content: String,
    /// Reflow at word boundaries; otherwise only `\n` breaks lines.
    pub wrap: bool,
    pub align: AlignH,
}

interactive_via_base!(Text);

impl Text {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            base: ElementBase::sized(Size::Fill, Size::Auto),
            content: content.into(),
            wrap: true,
            align: AlignH::Left,
        }
    }

    #[must_use]
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    #[must_use]
    pub fn align(mut self, align: AlignH) -> Self {
        self.align = align;
        self
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Display lines at a given width.
    #[must_use]
    pub fn lines(&self, width: u32) -> Vec<String> {
        if self.wrap {
            wrap_text(&self.content, width as usize)
        } else {
            self.content.split('\n').map(str::to_string).collect()
        }
    }
}

impl Element for Text {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "text"
    }

    fn measure(&self, available: Extent) -> Extent {
        let lines = self.lines(available.width);
        let width = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
        Extent::new(
            u32::try_from(width).unwrap_or(u32::MAX),
            u32::try_from(lines.len()).unwrap_or(u32::MAX),
        )
    }

    fn render_to(&self, ctx: &mut PaintContext<'_>) {
        let style = ctx.resolve(self);
        if style.bg.is_some() {
            ctx.fill(style);
        }
        let width = ctx.width() as usize;
        for (row, line) in self.lines(ctx.width()).iter().take(ctx.height() as usize).enumerate() {
            let clipped = truncate_ansi(line, width);
            let x = align_offset(self.align, width, visible_width(&clipped));
            ctx.write_text(x as i32, row as i32, &clipped, style);
        }
    }
}

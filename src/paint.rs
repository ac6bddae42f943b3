//! Bounded, style-aware write surfaces.
//!
//! A [`PaintContext`] is what an element's `render_to` receives: a view of
//! the shared [`CellBuffer`] restricted to the element's bounds. Coordinates
//! passed to its drawing methods are local to those bounds, and every write
//! is clipped to the context's clip rectangle (its bounds intersected with
//! every ancestor's clip).

use crate::buffer::{BorderStyle, CellBuffer};
use crate::cell::Cell;
use crate::element::Element;
use crate::geom::{AlignH, Bounds};
use crate::glyphs::GlyphSet;
use crate::scroll::ScrollState;
use crate::style::Style;
use crate::theme::{PseudoClass, StyleResolver};

/// Write surface for one element.
pub struct PaintContext<'a> {
    buffer: &'a mut CellBuffer,
    resolver: &'a StyleResolver,
    glyphs: GlyphSet,
    bounds: Bounds,
    clip: Bounds,
    /// Clip of the enclosing context; used by visible-overflow writes.
    outer_clip: Bounds,
}

fn narrow(clip: Bounds, rect: Bounds) -> Bounds {
    clip.intersect(&rect)
        .unwrap_or(Bounds::new(rect.x, rect.y, 0, 0))
}

impl<'a> PaintContext<'a> {
    /// Root context covering the whole buffer.
    pub fn new(buffer: &'a mut CellBuffer, resolver: &'a StyleResolver, glyphs: GlyphSet) -> Self {
        let bounds = buffer.bounds();
        Self {
            buffer,
            resolver,
            glyphs,
            bounds,
            clip: bounds,
            outer_clip: bounds,
        }
    }

    /// Absolute bounds of this context.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    /// Absolute clip rectangle.
    #[must_use]
    pub fn clip(&self) -> Bounds {
        self.clip
    }

    #[must_use]
    pub fn glyphs(&self) -> &GlyphSet {
        &self.glyphs
    }

    #[must_use]
    pub fn resolver(&self) -> &StyleResolver {
        self.resolver
    }

    /// Context for a nested rectangle (absolute coordinates), clipped to
    /// this one.
    pub fn child(&mut self, bounds: Bounds) -> PaintContext<'_> {
        PaintContext {
            buffer: &mut *self.buffer,
            resolver: self.resolver,
            glyphs: self.glyphs,
            bounds,
            clip: narrow(self.clip, bounds),
            outer_clip: self.clip,
        }
    }

    /// Like [`Self::child`] but clipped only by the enclosing context, so
    /// content may spill past this context's edges.
    pub fn child_overflow(&mut self, bounds: Bounds) -> PaintContext<'_> {
        PaintContext {
            buffer: &mut *self.buffer,
            resolver: self.resolver,
            glyphs: self.glyphs,
            bounds,
            clip: self.outer_clip,
            outer_clip: self.outer_clip,
        }
    }

    /// Paint an element in a context for its assigned bounds. Elements that
    /// have not been laid out are skipped.
    pub fn paint_child(&mut self, element: &dyn Element) {
        if let Some(bounds) = element.base().bounds {
            let mut ctx = self.child(bounds);
            element.render_to(&mut ctx);
        }
    }

    fn absolute(&self, x: i32, y: i32) -> (i32, i32) {
        (self.bounds.x.saturating_add(x), self.bounds.y.saturating_add(y))
    }

    fn with_clip<R>(&mut self, clip: Bounds, f: impl FnOnce(&mut CellBuffer) -> R) -> R {
        self.buffer.push_scissor(clip);
        let out = f(self.buffer);
        self.buffer.pop_scissor();
        out
    }

    /// Write ANSI-aware text at a local position. Returns the local column
    /// after the last character.
    pub fn write_text(&mut self, x: i32, y: i32, text: &str, style: Style) -> i32 {
        let (ax, ay) = self.absolute(x, y);
        let end = self.with_clip(self.clip, |buf| buf.draw_text(ax, ay, text, style));
        end - self.bounds.x
    }

    /// Write text clipped only by the enclosing context.
    pub fn write_text_overflow(&mut self, x: i32, y: i32, text: &str, style: Style) -> i32 {
        let (ax, ay) = self.absolute(x, y);
        let end = self.with_clip(self.outer_clip, |buf| buf.draw_text(ax, ay, text, style));
        end - self.bounds.x
    }

    /// Fill a local rectangle.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, ch: char, style: Style) {
        let (ax, ay) = self.absolute(x, y);
        let rect = Bounds::new(ax, ay, width, height);
        self.with_clip(self.clip, |buf| buf.fill_rect(rect, ch, style));
    }

    /// Fill the whole context with spaces.
    pub fn fill(&mut self, style: Style) {
        self.fill_rect(0, 0, self.bounds.width, self.bounds.height, ' ', style);
    }

    /// Set one cell at a local position.
    pub fn set_cell(&mut self, x: i32, y: i32, ch: char, style: Style) {
        let (ax, ay) = self.absolute(x, y);
        self.with_clip(self.clip, |buf| buf.set(ax, ay, Cell::new(ch, style)));
    }

    /// Border around the whole context, in the active glyph set.
    pub fn draw_border(
        &mut self,
        border: BorderStyle,
        style: Style,
        title: Option<&str>,
        title_align: AlignH,
    ) {
        if border == BorderStyle::None {
            return;
        }
        let box_style = self.glyphs.box_style(border, style);
        let rect = self.bounds;
        self.with_clip(self.clip, |buf| buf.draw_box(rect, &box_style, title, title_align));
    }

    /// Vertical scrollbar of `len` rows at a local position.
    pub fn draw_scrollbar(&mut self, x: i32, y: i32, len: u32, state: &ScrollState) {
        let track_style = self.resolve_classes(&["scrollbar"], PseudoClass::empty(), None);
        let thumb_style = self.resolve_classes(&["scrollbar-thumb"], PseudoClass::empty(), None);
        let thumb = state.thumb(len);
        for row in 0..len {
            let on_thumb = thumb.is_some_and(|t| row >= t.offset && row < t.offset + t.size);
            let (ch, style) = if on_thumb {
                (self.glyphs.scroll_thumb, thumb_style)
            } else {
                (self.glyphs.scroll_track, track_style)
            };
            self.set_cell(x, y.saturating_add_unsigned(row), ch, style);
        }
    }

    /// Cascade style for an element.
    #[must_use]
    pub fn resolve(&self, element: &dyn Element) -> Style {
        self.resolver.resolve_style(element, None, None)
    }

    /// Cascade style for an element under an explicit base class.
    #[must_use]
    pub fn resolve_class(&self, element: &dyn Element, class: &str) -> Style {
        self.resolver.resolve_style(element, Some(class), None)
    }

    /// Cascade style for sub-parts such as list rows.
    #[must_use]
    pub fn resolve_classes(
        &self,
        classes: &[&str],
        pseudo: PseudoClass,
        inline: Option<Style>,
    ) -> Style {
        self.resolver.resolve_classes(classes, pseudo, inline)
    }
}

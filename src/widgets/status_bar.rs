//! Three-section status line.

use crate::ansi::visible_width;
use crate::element::{Element, ElementBase, interactive_via_base};
use crate::geom::{Extent, Size};
use crate::paint::PaintContext;
use crate::text::truncate_ansi;

/// Section texts and columns for a bar of a given width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLayout {
    pub left: String,
    pub center: String,
    pub right: String,
    pub center_x: usize,
    pub right_x: usize,
}

/// Place left, center and right sections in `width` columns.
///
/// When everything fits nothing is cut. Otherwise the right section is cut
/// to a third of the width first, then the left to half of what remains, and
/// the center gets whatever is left after both. The center is centred on the
/// bar where it can be, and pushed between the other two where it cannot.
#[must_use]
pub fn status_layout(left: &str, center: &str, right: &str, width: usize) -> StatusLayout {
    let total = visible_width(left) + visible_width(center) + visible_width(right);
    let (left, center, right) = if total <= width {
        (left.to_string(), center.to_string(), right.to_string())
    } else {
        let right = truncate_ansi(right, width / 3);
        let remaining = width - visible_width(&right);
        let left = truncate_ansi(left, remaining / 2);
        let center = truncate_ansi(center, remaining - visible_width(&left));
        (left, center, right)
    };

    let (lw, cw, rw) = (visible_width(&left), visible_width(&center), visible_width(&right));
    let right_x = width - rw;
    let centred = width.saturating_sub(cw) / 2;
    let center_x = centred.max(lw).min(right_x.saturating_sub(cw));

    StatusLayout {
        left,
        center,
        right,
        center_x,
        right_x,
    }
}

/// A one-row bar with left, center and right sections.
#[derive(Clone, Debug, Default)]
pub struct StatusBar {
    pub base: ElementBase,
    pub left: String,
    pub center: String,
    pub right: String,
}

interactive_via_base!(StatusBar);

impl StatusBar {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: ElementBase::sized(Size::Fill, Size::Fixed(1)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn left(mut self, text: impl Into<String>) -> Self {
        self.left = text.into();
        self
    }

    #[must_use]
    pub fn center(mut self, text: impl Into<String>) -> Self {
        self.center = text.into();
        self
    }

    #[must_use]
    pub fn right(mut self, text: impl Into<String>) -> Self {
        self.right = text.into();
        self
    }
}

impl Element for StatusBar {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "statusbar"
    }

    fn measure(&self, _available: Extent) -> Extent {
        let sections = [&self.left, &self.center, &self.right];
        let used: usize = sections.iter().map(|s| visible_width(s)).sum();
        let gaps = sections.iter().filter(|s| !s.is_empty()).count().saturating_sub(1);
        Extent::new(u32::try_from(used + gaps).unwrap_or(u32::MAX), 1)
    }

    fn render_to(&self, ctx: &mut PaintContext<'_>) {
        let style = ctx.resolve(self);
        ctx.fill(style);
        let l = status_layout(&self.left, &self.center, &self.right, ctx.width() as usize);
        ctx.write_text(0, 0, &l.left, style);
        ctx.write_text(l.center_x as i32, 0, &l.center, style);
        ctx.write_text(l.right_x as i32, 0, &l.right, style);
    }
}

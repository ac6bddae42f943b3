use crate::element::{Element, ElementBase, interactive_via_base};
use crate::geom::{Extent, Size};
use crate::paint::PaintContext;

/// Empty element that takes space. Fills both axes unless sized.
#[derive(Clone, Debug, Default)]
pub struct Spacer {
    pub base: ElementBase,
}

interactive_via_base!(Spacer);

impl Spacer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An `n` by `n` gap.
    #[must_use]
    pub fn fixed(n: u32) -> Self {
        Self {
            base: ElementBase::sized(Size::Fixed(n), Size::Fixed(n)),
        }
    }
}

impl Element for Spacer {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "spacer"
    }

    fn measure(&self, _available: Extent) -> Extent {
        Extent::default()
    }

    fn render_to(&self, ctx: &mut PaintContext<'_>) {
        let style = ctx.resolve(self);
        if style.bg.is_some() {
            ctx.fill(style);
        }
    }
}

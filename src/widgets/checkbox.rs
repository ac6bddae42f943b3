use crate::ansi::visible_width;
use crate::element::{Element, ElementBase, interactive_via_base};
use crate::geom::{Extent, Size};
use crate::glyphs::GlyphSet;
use crate::input::{KeyEvent, MouseButton, MouseEvent};
use crate::paint::PaintContext;

/// A labelled toggle. The checked state lives in the base so the theme's
/// `:checked` rules apply.
#[derive(Clone, Debug)]
pub struct Checkbox {
    pub base: ElementBase,
    pub label: String,
}

interactive_via_base!(Checkbox);

impl Checkbox {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        let mut base = ElementBase::sized(Size::Auto, Size::Fixed(1));
        base.focusable = true;
        Self {
            base,
            label: label.into(),
        }
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.base.checked = checked;
        self
    }

    /// Flip the state unless disabled.
    pub fn toggle(&mut self) -> bool {
        if self.base.disabled {
            return false;
        }
        self.base.checked = !self.base.checked;
        true
    }

    fn line(&self, glyphs: &GlyphSet) -> String {
        let mark = if self.base.checked {
            glyphs.check_on
        } else {
            glyphs.check_off
        };
        format!("{mark} {}", self.label)
    }
}

impl Element for Checkbox {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "checkbox"
    }

    fn measure(&self, _available: Extent) -> Extent {
        // Both glyph sets use three-column marks.
        let width = 4 + visible_width(&self.label);
        Extent::new(u32::try_from(width).unwrap_or(u32::MAX), 1)
    }

    fn render_to(&self, ctx: &mut PaintContext<'_>) {
        let style = ctx.resolve(self);
        if style.bg.is_some() {
            ctx.fill(style);
        }
        let line = self.line(ctx.glyphs());
        ctx.write_text(0, 0, &line, style);
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        key.is_activate() && self.toggle()
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        event.is_press() && event.button == MouseButton::Left && self.toggle()
    }
}

//! Push buttons.

use crate::ansi::visible_width;
use crate::element::{Element, ElementBase, interactive_via_base};
use crate::geom::{Extent, Size};
use crate::input::{KeyEvent, MouseButton, MouseEvent};
use crate::paint::PaintContext;
use crate::text::{center_pad, truncate_ansi};

/// Decoration around a button label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonVariant {
    /// `[ label ]`
    #[default]
    Brackets,
    /// `< label >`
    Angle,
    /// `( label )`
    Round,
    /// ` label `
    Plain,
}

impl ButtonVariant {
    const fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Self::Brackets => ("[ ", " ]"),
            Self::Angle => ("< ", " >"),
            Self::Round => ("( ", " )"),
            Self::Plain => (" ", " "),
        }
    }
}

/// A focusable, one-row button.
#[derive(Clone, Debug)]
pub struct Button {
    pub base: ElementBase,
    pub label: String,
    pub variant: ButtonVariant,
    presses: u32,
}

interactive_via_base!(Button);

impl Button {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        let mut base = ElementBase::sized(Size::Auto, Size::Fixed(1));
        base.focusable = true;
        Self {
            base,
            label: label.into(),
            variant: ButtonVariant::default(),
            presses: 0,
        }
    }

    #[must_use]
    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Label with its decoration.
    #[must_use]
    pub fn decorated(&self) -> String {
        let (open, close) = self.variant.delimiters();
        format!("{open}{}{close}", self.label)
    }

    /// Times the button has been activated.
    #[must_use]
    pub fn presses(&self) -> u32 {
        self.presses
    }

    /// Activate unless disabled. Returns true when activated.
    pub fn press(&mut self) -> bool {
        if self.base.disabled {
            return false;
        }
        self.presses += 1;
        true
    }
}

impl Element for Button {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "button"
    }

    fn measure(&self, _available: Extent) -> Extent {
        let width = u32::try_from(visible_width(&self.decorated())).unwrap_or(u32::MAX);
        Extent::new(width, 1)
    }

    fn render_to(&self, ctx: &mut PaintContext<'_>) {
        let style = ctx.resolve(self);
        ctx.fill(style);
        let width = ctx.width() as usize;
        let label = center_pad(&truncate_ansi(&self.decorated(), width), width);
        let row = (ctx.height() / 2) as i32;
        ctx.write_text(0, row, &label, style);
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        key.is_activate() && self.press()
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        event.is_press() && event.button == MouseButton::Left && self.press()
    }
}

//! Leaf elements.
//!
//! Each widget owns an [`ElementBase`](crate::element::ElementBase), reports
//! an intrinsic size for `auto` layout and paints itself inside the bounds
//! layout assigned. Styles come from the theme class derived from the type
//! name unless the widget was given explicit classes.

mod button;
mod checkbox;
mod input;
mod list;
mod spacer;
mod status_bar;
mod text;
mod tree;

pub use button::{Button, ButtonVariant};
pub use checkbox::Checkbox;
pub use input::TextInput;
pub use list::ListView;
pub use spacer::Spacer;
pub use status_bar::{StatusBar, StatusLayout, status_layout};
pub use text::Text;
pub use tree::{TreeNode, TreeRow, TreeView};

/// Lay out and paint a single element on a fresh buffer.
#[cfg(test)]
pub(crate) fn paint_alone(
    element: &mut dyn crate::element::Element,
    width: u32,
    height: u32,
) -> crate::buffer::CellBuffer {
    use crate::buffer::CellBuffer;
    use crate::geom::Bounds;
    use crate::glyphs::GlyphSet;
    use crate::paint::PaintContext;
    use crate::theme::StyleResolver;

    crate::layout::layout(element, Bounds::sized(width, height));
    let mut buffer = CellBuffer::new(width, height);
    let resolver = StyleResolver::default();
    PaintContext::new(&mut buffer, &resolver, GlyphSet::ASCII).paint_child(element);
    buffer
}

//! The runtime element tree.
//!
//! Every node implements [`Element`]: it owns an [`ElementBase`] (identity,
//! declared sizes, assigned bounds, interactive flags) and knows how to
//! measure and paint itself. [`Container`] arranges ordered children;
//! everything else lives in [`crate::widgets`].
//!
//! Nodes are addressed by [`ElementPath`], the list of child indices from the
//! root. Focus, hover and hit testing hold paths rather than references, so
//! the tree stays singly owned.

mod container;

pub use container::{Container, LayoutMode, OverflowX};

use crate::geom::{Bounds, Extent, Insets, Size};
use crate::input::{KeyEvent, MouseEvent};
use crate::paint::PaintContext;
use crate::scroll::ScrollState;
use crate::style::Style;

/// Child-index path from the root. The root itself is the empty path.
pub type ElementPath = Vec<usize>;

/// Interactive states consulted by the style cascade.
///
/// Every method defaults to `false`, so an element only reports the states
/// it actually has.
pub trait InteractiveState {
    fn is_focused(&self) -> bool {
        false
    }

    fn is_hovered(&self) -> bool {
        false
    }

    fn is_disabled(&self) -> bool {
        false
    }

    fn is_checked(&self) -> bool {
        false
    }

    fn is_selected(&self) -> bool {
        false
    }
}

/// Implements [`InteractiveState`] by reading the flags in a `base` field.
macro_rules! interactive_via_base {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::element::InteractiveState for $ty {
                fn is_focused(&self) -> bool {
                    self.base.focused
                }

                fn is_hovered(&self) -> bool {
                    self.base.hovered
                }

                fn is_disabled(&self) -> bool {
                    self.base.disabled
                }

                fn is_checked(&self) -> bool {
                    self.base.checked
                }

                fn is_selected(&self) -> bool {
                    self.base.selected
                }
            }
        )+
    };
}

pub(crate) use interactive_via_base;

/// State shared by every element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementBase {
    pub id: Option<String>,
    /// Theme classes; empty means "derive from the type name".
    pub classes: Vec<String>,
    pub width: Size,
    pub height: Size,
    pub margin: Insets,
    /// Assigned by layout; `None` until the first pass.
    pub bounds: Option<Bounds>,
    pub focusable: bool,
    pub focused: bool,
    pub hovered: bool,
    pub disabled: bool,
    pub checked: bool,
    pub selected: bool,
    /// Highest-priority style overrides.
    pub inline_style: Option<Style>,
}

impl ElementBase {
    /// Base with the given declared sizes.
    #[must_use]
    pub fn sized(width: Size, height: Size) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Declared size along an axis.
    #[must_use]
    pub const fn size(&self, axis: crate::geom::Axis) -> Size {
        match axis {
            crate::geom::Axis::Horizontal => self.width,
            crate::geom::Axis::Vertical => self.height,
        }
    }
}

/// A node in the UI tree.
pub trait Element: InteractiveState {
    fn base(&self) -> &ElementBase;

    fn base_mut(&mut self) -> &mut ElementBase;

    /// Runtime type name, used to derive the default theme class.
    fn type_name(&self) -> &'static str;

    /// Intrinsic size of the content, given the space on offer.
    fn measure(&self, available: Extent) -> Extent;

    /// Paint into a context whose bounds are this element's bounds.
    fn render_to(&self, ctx: &mut PaintContext<'_>);

    fn children(&self) -> &[Box<dyn Element>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Element>] {
        &mut []
    }

    fn as_container(&self) -> Option<&Container> {
        None
    }

    fn as_container_mut(&mut self) -> Option<&mut Container> {
        None
    }

    fn scroll_state(&self) -> Option<&ScrollState> {
        None
    }

    fn scroll_state_mut(&mut self) -> Option<&mut ScrollState> {
        None
    }

    /// Called by layout once bounds are assigned.
    fn on_layout(&mut self) {}

    fn set_focused(&mut self, focused: bool) {
        self.base_mut().focused = focused;
    }

    fn on_hover_enter(&mut self) {
        self.base_mut().hovered = true;
    }

    fn on_hover_exit(&mut self) {
        self.base_mut().hovered = false;
    }

    /// Returns true when the key was consumed.
    fn handle_key(&mut self, _key: &KeyEvent) -> bool {
        false
    }

    /// Returns true when the event was consumed. Coordinates are absolute.
    fn handle_mouse(&mut self, _event: &MouseEvent) -> bool {
        false
    }
}

/// Chainable setters for every element.
pub trait ElementBuilder: Element + Sized {
    #[must_use]
    fn with_id(mut self, id: impl Into<String>) -> Self {
        self.base_mut().id = Some(id.into());
        self
    }

    #[must_use]
    fn with_class(mut self, class: impl Into<String>) -> Self {
        self.base_mut().classes.push(class.into());
        self
    }

    #[must_use]
    fn with_width(mut self, width: impl Into<Size>) -> Self {
        self.base_mut().width = width.into();
        self
    }

    #[must_use]
    fn with_height(mut self, height: impl Into<Size>) -> Self {
        self.base_mut().height = height.into();
        self
    }

    #[must_use]
    fn with_margin(mut self, margin: Insets) -> Self {
        self.base_mut().margin = margin;
        self
    }

    #[must_use]
    fn with_style(mut self, style: Style) -> Self {
        self.base_mut().inline_style = Some(style);
        self
    }

    #[must_use]
    fn disabled(mut self, disabled: bool) -> Self {
        self.base_mut().disabled = disabled;
        self
    }

    #[must_use]
    fn focusable(mut self, focusable: bool) -> Self {
        self.base_mut().focusable = focusable;
        self
    }

    fn boxed(self) -> Box<dyn Element>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<T: Element + Sized> ElementBuilder for T {}

/// Element at `path`, or `None` when the path leaves the tree.
#[must_use]
pub fn find<'a>(root: &'a dyn Element, path: &[usize]) -> Option<&'a dyn Element> {
    let mut node = root;
    for &index in path {
        node = node.children().get(index)?.as_ref();
    }
    Some(node)
}

/// Mutable element at `path`.
pub fn find_mut<'a>(root: &'a mut dyn Element, path: &[usize]) -> Option<&'a mut dyn Element> {
    let mut node = root;
    for &index in path {
        node = node.children_mut().get_mut(index)?.as_mut();
    }
    Some(node)
}

/// Visit every element in paint order (parent before children).
pub fn walk(root: &dyn Element, visit: &mut dyn FnMut(&ElementPath, &dyn Element)) {
    fn go(
        node: &dyn Element,
        path: &mut ElementPath,
        visit: &mut dyn FnMut(&ElementPath, &dyn Element),
    ) {
        visit(path, node);
        for (i, child) in node.children().iter().enumerate() {
            path.push(i);
            go(child.as_ref(), path, visit);
            path.pop();
        }
    }
    go(root, &mut Vec::new(), visit);
}

/// Mutable [`walk`].
pub fn walk_mut(root: &mut dyn Element, visit: &mut dyn FnMut(&ElementPath, &mut dyn Element)) {
    fn go(
        node: &mut dyn Element,
        path: &mut ElementPath,
        visit: &mut dyn FnMut(&ElementPath, &mut dyn Element),
    ) {
        visit(path, node);
        for (i, child) in node.children_mut().iter_mut().enumerate() {
            path.push(i);
            go(child.as_mut(), path, visit);
            path.pop();
        }
    }
    go(root, &mut Vec::new(), visit);
}

/// Path of the first element (in paint order) with the given id.
#[must_use]
pub fn find_by_id(root: &dyn Element, id: &str) -> Option<ElementPath> {
    let mut found = None;
    walk(root, &mut |path, el| {
        if found.is_none() && el.base().id.as_deref() == Some(id) {
            found = Some(path.clone());
        }
    });
    found
}

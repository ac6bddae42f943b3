//! Keyboard focus, hover tracking and event routing.
//!
//! Both managers hold [`ElementPath`]s into a tree they do not own; every
//! operation that touches element state takes the root explicitly. Paths go
//! stale when the tree is rebuilt, so call [`FocusManager::set_elements`]
//! again after structural changes.

use crate::element::{Element, ElementPath, find, find_by_id, find_mut, walk};
use crate::event::{Diagnostics, LogLevel};
use crate::input::{KeyEvent, MouseEvent, Traversal};
use crate::renderer::Renderer;

fn describe(path: &[usize]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

fn set_focus(root: &mut dyn Element, path: &[usize], focused: bool) {
    if let Some(el) = find_mut(root, path) {
        el.set_focused(focused);
    }
}

/// Single-focus ring over the focusable elements of a tree.
///
/// At most one managed element is focused, and it is the one at
/// [`current_index`](Self::current_index).
#[derive(Clone, Debug, Default)]
pub struct FocusManager {
    elements: Vec<ElementPath>,
    current: Option<usize>,
    diagnostics: Diagnostics,
}

impl FocusManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report focus changes to `diagnostics`.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Collect focusable elements in tree order and focus the first.
    ///
    /// Any previously focused element is blurred first, including one that
    /// is no longer managed.
    pub fn set_elements(&mut self, root: &mut dyn Element) {
        let mut stale = Vec::new();
        let mut focusable = Vec::new();
        walk(root, &mut |path, el| {
            if el.is_focused() {
                stale.push(path.clone());
            }
            if el.base().focusable {
                focusable.push(path.clone());
            }
        });
        for path in &stale {
            set_focus(root, path, false);
        }

        self.elements = focusable;
        self.current = None;
        if !self.elements.is_empty() {
            self.move_to(root, 0);
        }
    }

    /// Managed paths in focus order.
    #[must_use]
    pub fn elements(&self) -> &[ElementPath] {
        &self.elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Path of the focused element.
    #[must_use]
    pub fn current(&self) -> Option<&ElementPath> {
        self.current.and_then(|i| self.elements.get(i))
    }

    /// Blur the current element, then focus `index`.
    fn move_to(&mut self, root: &mut dyn Element, index: usize) {
        if let Some(old) = self.current() {
            let old = old.clone();
            set_focus(root, &old, false);
        }
        self.current = Some(index);
        if let Some(path) = self.elements.get(index) {
            set_focus(root, path, true);
            self.diagnostics.emit_event("focus_changed", &describe(path));
        }
    }

    /// Focus the next element, wrapping from last to first.
    pub fn focus_next(&mut self, root: &mut dyn Element) -> bool {
        if self.elements.is_empty() {
            return false;
        }
        let next = self.current.map_or(0, |i| (i + 1) % self.elements.len());
        self.move_to(root, next);
        true
    }

    /// Focus the previous element, wrapping from first to last.
    pub fn focus_previous(&mut self, root: &mut dyn Element) -> bool {
        let len = self.elements.len();
        if len == 0 {
            return false;
        }
        let prev = self.current.map_or(len - 1, |i| (i + len - 1) % len);
        self.move_to(root, prev);
        true
    }

    pub fn focus_first(&mut self, root: &mut dyn Element) -> bool {
        if self.elements.is_empty() {
            return false;
        }
        self.move_to(root, 0);
        true
    }

    pub fn focus_last(&mut self, root: &mut dyn Element) -> bool {
        let Some(last) = self.elements.len().checked_sub(1) else {
            return false;
        };
        self.move_to(root, last);
        true
    }

    /// Focus a managed element. Returns false, changing nothing, when the
    /// path is not managed.
    pub fn focus_element(&mut self, root: &mut dyn Element, path: &[usize]) -> bool {
        let Some(index) = self.elements.iter().position(|p| p == path) else {
            if self.diagnostics.logs_enabled() {
                let message = format!("focus target {} not managed", describe(path));
                self.diagnostics.emit_log(LogLevel::Debug, &message);
            }
            return false;
        };
        self.move_to(root, index);
        true
    }

    /// Focus the managed element with the given id.
    pub fn focus_by_id(&mut self, root: &mut dyn Element, id: &str) -> bool {
        match find_by_id(root, id) {
            Some(path) => self.focus_element(root, &path),
            None => false,
        }
    }

    /// Blur everything and forget the managed list.
    pub fn clear(&mut self, root: &mut dyn Element) {
        for path in &self.elements {
            set_focus(root, path, false);
        }
        self.elements.clear();
        self.current = None;
    }

    /// Tab and BackTab move focus. Returns true when the key was used.
    pub fn handle_key(&mut self, root: &mut dyn Element, key: &KeyEvent) -> bool {
        match key.traversal() {
            Some(Traversal::Forward) => self.focus_next(root),
            Some(Traversal::Backward) => self.focus_previous(root),
            None => false,
        }
    }
}

/// A change of hovered element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverTransition {
    pub previous: Option<ElementPath>,
    pub current: Option<ElementPath>,
}

impl HoverTransition {
    /// Run the exit hook on the old element, then the enter hook on the new.
    pub fn apply(&self, root: &mut dyn Element) {
        if let Some(path) = &self.previous {
            if let Some(el) = find_mut(root, path) {
                el.on_hover_exit();
            }
        }
        if let Some(path) = &self.current {
            if let Some(el) = find_mut(root, path) {
                el.on_hover_enter();
            }
        }
    }
}

/// Tracks the element under the pointer.
#[derive(Clone, Debug, Default)]
pub struct HoverManager {
    current: Option<ElementPath>,
    diagnostics: Diagnostics,
}

impl HoverManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report hover transitions to `diagnostics`.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    #[must_use]
    pub fn current(&self) -> Option<&ElementPath> {
        self.current.as_ref()
    }

    /// Record a new hover target. `None` when nothing changed.
    pub fn set_hovered(&mut self, target: Option<ElementPath>) -> Option<HoverTransition> {
        if self.current == target {
            return None;
        }
        let previous = std::mem::replace(&mut self.current, target);
        Some(HoverTransition {
            previous,
            current: self.current.clone(),
        })
    }

    /// Record the target and run the hooks. Returns whether hover changed.
    pub fn hover(&mut self, root: &mut dyn Element, target: Option<ElementPath>) -> bool {
        let Some(transition) = self.set_hovered(target) else {
            return false;
        };
        transition.apply(root);
        let data = transition.current.as_deref().map(describe).unwrap_or_default();
        self.diagnostics.emit_event("hover_changed", &data);
        true
    }

    /// Hover whatever the last frame painted at a screen cell.
    pub fn hover_at(
        &mut self,
        root: &mut dyn Element,
        renderer: &Renderer,
        x: i32,
        y: i32,
    ) -> bool {
        let target = renderer.element_at(x, y).cloned();
        self.hover(root, target)
    }
}

/// Apply `handler` to the element at `path`, then each ancestor, until one
/// consumes the event.
fn bubble(
    root: &mut dyn Element,
    path: &[usize],
    mut handler: impl FnMut(&mut dyn Element) -> bool,
) -> bool {
    for depth in (0..=path.len()).rev() {
        if let Some(el) = find_mut(root, &path[..depth]) {
            if handler(el) {
                return true;
            }
        }
    }
    false
}

/// Deliver a key to the focused element, bubbling to its ancestors so an
/// enclosing scroll region sees keys the element ignores.
pub fn dispatch_key(root: &mut dyn Element, focus: &FocusManager, key: &KeyEvent) -> bool {
    let Some(path) = focus.current() else {
        return false;
    };
    bubble(root, path, |el| !el.is_disabled() && el.handle_key(key))
}

/// Deliver a mouse event to the element under the pointer, bubbling to its
/// ancestors. A press also moves focus to the nearest focusable ancestor.
pub fn dispatch_mouse(
    root: &mut dyn Element,
    renderer: &Renderer,
    focus: &mut FocusManager,
    event: &MouseEvent,
) -> bool {
    let Some(path) = renderer.element_at(event.x, event.y).cloned() else {
        return false;
    };
    if event.is_press() {
        let target = (0..=path.len())
            .rev()
            .map(|d| &path[..d])
            .find(|p| find(&*root, p).is_some_and(|el| el.base().focusable));
        if let Some(target) = target {
            focus.focus_element(root, target);
        }
    }
    bubble(root, &path, |el| !el.is_disabled() && el.handle_mouse(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Container, ElementBuilder};
    use crate::geom::Size;
    use crate::input::{KeyCode, KeyModifiers};
    use crate::widgets::{Button, Text};

    fn form() -> Container {
        Container::vstack()
            .child(Text::new("title"))
            .child(Button::new("a").with_id("a"))
            .child(
                Container::hstack()
                    .child(Button::new("b").with_id("b"))
                    .child(Button::new("c").with_id("c")),
            )
    }

    fn focused(root: &dyn Element) -> Vec<ElementPath> {
        let mut out = Vec::new();
        walk(root, &mut |p, el| {
            if el.is_focused() {
                out.push(p.clone());
            }
        });
        out
    }

    #[test]
    fn test_set_elements_focuses_first() {
        let mut root = form();
        let mut fm = FocusManager::new();
        fm.set_elements(&mut root);
        assert_eq!(fm.elements(), &[vec![1], vec![2, 0], vec![2, 1]]);
        assert_eq!(fm.current_index(), Some(0));
        assert_eq!(focused(&root), vec![vec![1]]);
    }

    #[test]
    fn test_set_elements_blurs_previous() {
        let mut root = form();
        let mut fm = FocusManager::new();
        fm.set_elements(&mut root);
        fm.focus_last(&mut root);
        fm.set_elements(&mut root);
        assert_eq!(focused(&root), vec![vec![1]]);
    }

    #[test]
    fn test_next_previous_wrap() {
        let mut root = form();
        let mut fm = FocusManager::new();
        fm.set_elements(&mut root);
        fm.focus_next(&mut root);
        fm.focus_next(&mut root);
        assert_eq!(fm.current(), Some(&vec![2, 1]));
        fm.focus_next(&mut root);
        assert_eq!(fm.current(), Some(&vec![1]));
        fm.focus_previous(&mut root);
        assert_eq!(fm.current(), Some(&vec![2, 1]));
        assert_eq!(focused(&root), vec![vec![2, 1]]);
    }

    #[test]
    fn test_focus_element_miss_has_no_effect() {
        let mut root = form();
        let mut fm = FocusManager::new();
        fm.set_elements(&mut root);
        assert!(!fm.focus_element(&mut root, &[0]));
        assert!(!fm.focus_by_id(&mut root, "nope"));
        assert_eq!(fm.current_index(), Some(0));
        assert!(fm.focus_by_id(&mut root, "c"));
        assert_eq!(focused(&root), vec![vec![2, 1]]);
    }

    #[test]
    fn test_clear() {
        let mut root = form();
        let mut fm = FocusManager::new();
        fm.set_elements(&mut root);
        fm.clear(&mut root);
        assert!(fm.is_empty());
        assert!(fm.current().is_none());
        assert!(focused(&root).is_empty());
        assert!(!fm.focus_next(&mut root));
    }

    #[test]
    fn test_tab_keys() {
        let mut root = form();
        let mut fm = FocusManager::new();
        fm.set_elements(&mut root);
        assert!(fm.handle_key(&mut root, &KeyEvent::key(KeyCode::Tab)));
        assert_eq!(fm.current_index(), Some(1));
        let shift_tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        fm.handle_key(&mut root, &shift_tab);
        fm.handle_key(&mut root, &KeyEvent::key(KeyCode::BackTab));
        assert_eq!(fm.current_index(), Some(2));
        assert!(!fm.handle_key(&mut root, &KeyEvent::char('x')));
    }

    #[test]
    fn test_hover_transitions() {
        let mut root = form();
        let mut hm = HoverManager::new();
        assert!(hm.hover(&mut root, Some(vec![1])));
        assert!(find(&root, &[1]).unwrap().is_hovered());
        assert!(!hm.hover(&mut root, Some(vec![1])));

        let t = hm.set_hovered(Some(vec![2, 0])).unwrap();
        assert_eq!(t.previous, Some(vec![1]));
        t.apply(&mut root);
        assert!(!find(&root, &[1]).unwrap().is_hovered());
        assert!(find(&root, &[2, 0]).unwrap().is_hovered());

        assert!(hm.hover(&mut root, None));
        assert!(!find(&root, &[2, 0]).unwrap().is_hovered());
        assert!(hm.set_hovered(None).is_none());
    }

    #[test]
    fn test_dispatch_key_bubbles_to_scroll_parent() {
        let mut root = Container::vstack()
            .scrollable(true)
            .child(Button::new("a"))
            .child(Text::new("x").with_height(Size::Fixed(20)));
        crate::layout::layout(&mut root, crate::geom::Bounds::sized(10, 5));
        let mut fm = FocusManager::new();
        fm.set_elements(&mut root);

        assert!(dispatch_key(&mut root, &fm, &KeyEvent::key(KeyCode::Enter)));
        assert!(dispatch_key(&mut root, &fm, &KeyEvent::key(KeyCode::Down)));
        assert_eq!(root.scroll.position(), 1);
        assert!(!dispatch_key(&mut root, &fm, &KeyEvent::char('q')));
    }
}

//! Scroll position bookkeeping for scrollable regions.
//!
//! A [`ScrollState`] tracks one axis of one region. Every mutation re-clamps,
//! so `0 <= position <= max_scroll` holds after any call.
//!
//! # Examples
//!
//! ```
//! use tessera::scroll::ScrollState;
//!
//! let mut s = ScrollState::new(100, 10);
//! s.page_down();
//! assert_eq!(s.position(), 10);
//! s.scroll_by(1_000);
//! assert_eq!(s.position(), 90);
//! s.set_content_size(20);
//! assert_eq!(s.position(), 10);
//! ```

use crate::element::{Element, walk, walk_mut};
use crate::input::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use std::collections::HashMap;
use std::ops::Range;

/// Lines moved per mouse wheel notch.
pub const WHEEL_LINES: i64 = 3;

/// Scrollbar thumb geometry along a track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Thumb {
    pub offset: u32,
    pub size: u32,
}

/// Position, content length and viewport length of a scrollable region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollState {
    position: u32,
    content_size: u32,
    viewport_size: u32,
}

impl ScrollState {
    #[must_use]
    pub const fn new(content_size: u32, viewport_size: u32) -> Self {
        Self {
            position: 0,
            content_size,
            viewport_size,
        }
    }

    /// Current first visible line.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    #[must_use]
    pub const fn content_size(&self) -> u32 {
        self.content_size
    }

    #[must_use]
    pub const fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    /// Largest valid position.
    #[must_use]
    pub const fn max_scroll(&self) -> u32 {
        self.content_size.saturating_sub(self.viewport_size)
    }

    /// True when content exceeds the viewport.
    #[must_use]
    pub const fn is_scrollable(&self) -> bool {
        self.content_size > self.viewport_size
    }

    /// Position as a fraction of `max_scroll`; 0 when nothing scrolls.
    #[must_use]
    pub fn scroll_percentage(&self) -> f64 {
        match self.max_scroll() {
            0 => 0.0,
            max => f64::from(self.position) / f64::from(max),
        }
    }

    fn clamp(&mut self) {
        self.position = self.position.min(self.max_scroll());
    }

    /// Move by `delta` lines. Returns true if the position changed.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let target = i64::from(self.position).saturating_add(delta);
        self.scroll_to(u32::try_from(target.max(0)).unwrap_or(u32::MAX))
    }

    /// Jump to a position. Returns true if the position changed.
    pub fn scroll_to(&mut self, position: u32) -> bool {
        let old = self.position;
        self.position = position.min(self.max_scroll());
        old != self.position
    }

    /// Move back one viewport. A zero-height viewport does not move.
    pub fn page_up(&mut self) -> bool {
        self.scroll_by(-i64::from(self.viewport_size))
    }

    pub fn page_down(&mut self) -> bool {
        self.scroll_by(i64::from(self.viewport_size))
    }

    pub fn home(&mut self) -> bool {
        self.scroll_to(0)
    }

    pub fn end(&mut self) -> bool {
        self.scroll_to(self.max_scroll())
    }

    pub fn set_content_size(&mut self, size: u32) {
        self.content_size = size;
        self.clamp();
    }

    pub fn set_viewport_size(&mut self, size: u32) {
        self.viewport_size = size;
        self.clamp();
    }

    /// Update both lengths at once.
    pub fn resize(&mut self, content_size: u32, viewport_size: u32) {
        self.content_size = content_size;
        self.viewport_size = viewport_size;
        self.clamp();
    }

    /// Indices of the visible content lines.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.position as usize;
        let end = self
            .position
            .saturating_add(self.viewport_size)
            .min(self.content_size) as usize;
        start..end.max(start)
    }

    /// The visible window of `items`.
    #[must_use]
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Range { start, end } = self.visible_range();
        let end = end.min(items.len());
        items.get(start.min(end)..end).unwrap_or(&[])
    }

    /// Thumb geometry for a track of `track` cells, `None` when nothing
    /// scrolls.
    ///
    /// Thumb length is proportional to `viewport / content` (at least one
    /// cell); its offset is proportional to [`Self::scroll_percentage`].
    #[must_use]
    pub fn thumb(&self, track: u32) -> Option<Thumb> {
        if !self.is_scrollable() || track == 0 {
            return None;
        }
        let ratio = f64::from(self.viewport_size) / f64::from(self.content_size);
        let size = ((f64::from(track) * ratio).round() as u32).clamp(1, track);
        let room = track - size;
        let offset = ((f64::from(room) * self.scroll_percentage()).round() as u32).min(room);
        Some(Thumb { offset, size })
    }

    /// Scroll the minimum amount that brings line `index` into view.
    pub fn ensure_visible(&mut self, index: u32) -> bool {
        if index < self.position {
            return self.scroll_to(index);
        }
        let last = self
            .position
            .saturating_add(self.viewport_size.max(1))
            .saturating_sub(1);
        if index > last {
            let target = index.saturating_sub(self.viewport_size.max(1).saturating_sub(1));
            return self.scroll_to(target);
        }
        false
    }

    /// Arrow, page, home and end keys. Returns true when the key was a
    /// scroll key, whether or not the position moved.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Home => self.home(),
            KeyCode::End => self.end(),
            _ => return false,
        };
        true
    }

    /// Mouse wheel scrolls [`WHEEL_LINES`] per notch.
    pub fn handle_wheel(&mut self, event: &MouseEvent) -> bool {
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_LINES),
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_LINES),
            _ => return false,
        };
        true
    }
}

/// Scroll states keyed by element id, carried across tree rebuilds.
///
/// Element trees are rebuilt on every template pass, so a scrolled region
/// would jump back to the top. Capture before discarding the old tree and
/// restore into the new one before the next layout.
#[derive(Clone, Debug, Default)]
pub struct ScrollRegistry {
    states: HashMap<String, ScrollState>,
}

impl ScrollRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state of every scrollable element that has an id.
    pub fn capture(&mut self, root: &dyn Element) {
        walk(root, &mut |_, el| {
            if let (Some(id), Some(state)) = (el.base().id.as_ref(), el.scroll_state()) {
                self.states.insert(id.clone(), *state);
            }
        });
    }

    /// Apply recorded states to matching elements. Returns how many matched.
    ///
    /// The next layout pass re-clamps against the new content.
    pub fn restore(&self, root: &mut dyn Element) -> usize {
        let mut restored = 0;
        walk_mut(root, &mut |_, el| {
            let Some(saved) = el.base().id.as_ref().and_then(|id| self.states.get(id)) else {
                return;
            };
            let saved = *saved;
            if let Some(state) = el.scroll_state_mut() {
                *state = saved;
                restored += 1;
            }
        });
        restored
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ScrollState> {
        self.states.get(id)
    }

    pub fn set(&mut self, id: impl Into<String>, state: ScrollState) {
        self.states.insert(id.into(), state);
    }

    pub fn remove(&mut self, id: &str) -> Option<ScrollState> {
        self.states.remove(id)
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Container, ElementBuilder};
    use crate::widgets::Text;

    #[test]
    fn test_derived_values() {
        let s = ScrollState::new(50, 10);
        assert_eq!(s.max_scroll(), 40);
        assert!(s.is_scrollable());
        assert!((s.scroll_percentage() - 0.0).abs() < f64::EPSILON);

        let small = ScrollState::new(5, 10);
        assert_eq!(small.max_scroll(), 0);
        assert!(!small.is_scrollable());
        assert!((small.scroll_percentage() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scroll_clamps() {
        let mut s = ScrollState::new(50, 10);
        assert!(!s.scroll_by(-5));
        assert_eq!(s.position(), 0);
        assert!(s.scroll_to(100));
        assert_eq!(s.position(), 40);
        assert!((s.scroll_percentage() - 1.0).abs() < f64::EPSILON);
        s.scroll_by(i64::MIN);
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_paging_and_jumps() {
        let mut s = ScrollState::new(25, 10);
        s.page_down();
        assert_eq!(s.position(), 10);
        s.page_down();
        assert_eq!(s.position(), 15);
        s.page_up();
        assert_eq!(s.position(), 5);
        s.end();
        assert_eq!(s.position(), 15);
        s.home();
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_paging_moves_by_viewport_size() {
        let mut collapsed = ScrollState::new(10, 0);
        assert!(!collapsed.page_down());
        assert_eq!(collapsed.position(), 0);
        assert!(collapsed.scroll_by(3));
        assert!(!collapsed.page_up());
        assert_eq!(collapsed.position(), 3);

        let mut one = ScrollState::new(10, 1);
        one.page_down();
        assert_eq!(one.position(), 1);
    }

    #[test]
    fn test_resize_reclamps() {
        let mut s = ScrollState::new(100, 10);
        s.end();
        s.set_viewport_size(40);
        assert_eq!(s.position(), 60);
        s.set_content_size(30);
        assert_eq!(s.position(), 0);
        s.resize(200, 20);
        s.end();
        assert_eq!(s.position(), 180);
    }

    #[test]
    fn test_visible_window() {
        let items: Vec<u32> = (0..20).collect();
        let mut s = ScrollState::new(20, 5);
        s.scroll_to(3);
        assert_eq!(s.visible_range(), 3..8);
        assert_eq!(s.visible(&items), &[3, 4, 5, 6, 7]);
        // Fewer items than content claims.
        assert_eq!(s.visible(&items[..5]), &[3, 4]);
        assert!(s.visible(&items[..2]).is_empty());
    }

    #[test]
    fn test_thumb_geometry() {
        let mut s = ScrollState::new(100, 10);
        assert_eq!(s.thumb(10), Some(Thumb { offset: 0, size: 1 }));
        s.end();
        assert_eq!(s.thumb(10), Some(Thumb { offset: 9, size: 1 }));

        let mut s = ScrollState::new(20, 10);
        assert_eq!(s.thumb(10), Some(Thumb { offset: 0, size: 5 }));
        s.end();
        assert_eq!(s.thumb(10), Some(Thumb { offset: 5, size: 5 }));

        assert_eq!(ScrollState::new(5, 10).thumb(10), None);
        assert_eq!(ScrollState::new(50, 10).thumb(0), None);
    }

    #[test]
    fn test_ensure_visible() {
        let mut s = ScrollState::new(100, 10);
        assert!(!s.ensure_visible(9));
        assert!(s.ensure_visible(10));
        assert_eq!(s.position(), 1);
        assert!(s.ensure_visible(0));
        assert_eq!(s.position(), 0);
        s.ensure_visible(500);
        assert_eq!(s.position(), 90);
    }

    #[test]
    fn test_keys_and_wheel() {
        let mut s = ScrollState::new(100, 10);
        assert!(s.handle_key(&KeyEvent::key(KeyCode::Down)));
        assert_eq!(s.position(), 1);
        assert!(s.handle_key(&KeyEvent::key(KeyCode::End)));
        assert_eq!(s.position(), 90);
        assert!(!s.handle_key(&KeyEvent::char('x')));

        s.home();
        assert!(s.handle_wheel(&MouseEvent::scroll_down(0, 0)));
        assert_eq!(s.position(), 3);
        assert!(s.handle_wheel(&MouseEvent::scroll_up(0, 0)));
        assert_eq!(s.position(), 0);
        assert!(!s.handle_wheel(&MouseEvent::move_to(0, 0)));
    }

    #[test]
    fn test_registry_round_trip() {
        let build = || {
            Container::vstack()
                .scrollable(true)
                .with_id("log")
                .child(Text::new("a"))
        };

        let mut old = build();
        old.scroll = ScrollState::new(50, 10);
        old.scroll.scroll_to(12);

        let mut registry = ScrollRegistry::new();
        registry.capture(&old);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("log").map(ScrollState::position), Some(12));

        let mut fresh = build();
        assert_eq!(registry.restore(&mut fresh), 1);
        assert_eq!(fresh.scroll.position(), 12);
    }
}

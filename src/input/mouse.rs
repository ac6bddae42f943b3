//! Mouse event types.

/// Mouse button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// No button (for move and wheel events).
    None,
}

/// Kind of mouse event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    Press,
    Release,
    Move,
    ScrollUp,
    ScrollDown,
}

/// A mouse event in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    pub button: MouseButton,
    pub kind: MouseEventKind,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub fn new(x: i32, y: i32, button: MouseButton, kind: MouseEventKind) -> Self {
        Self { x, y, button, kind }
    }

    /// Create a press event.
    #[must_use]
    pub fn press(x: i32, y: i32, button: MouseButton) -> Self {
        Self::new(x, y, button, MouseEventKind::Press)
    }

    /// Create a release event.
    #[must_use]
    pub fn release(x: i32, y: i32, button: MouseButton) -> Self {
        Self::new(x, y, button, MouseEventKind::Release)
    }

    /// Create a move event.
    #[must_use]
    pub fn move_to(x: i32, y: i32) -> Self {
        Self::new(x, y, MouseButton::None, MouseEventKind::Move)
    }

    #[must_use]
    pub fn scroll_up(x: i32, y: i32) -> Self {
        Self::new(x, y, MouseButton::None, MouseEventKind::ScrollUp)
    }

    #[must_use]
    pub fn scroll_down(x: i32, y: i32) -> Self {
        Self::new(x, y, MouseButton::None, MouseEventKind::ScrollDown)
    }

    /// Check if this is a click (press) event.
    #[must_use]
    pub fn is_press(&self) -> bool {
        self.kind == MouseEventKind::Press
    }

    /// Check if this is a wheel event.
    #[must_use]
    pub fn is_scroll(&self) -> bool {
        matches!(
            self.kind,
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        )
    }

    /// Same event translated into a local coordinate space.
    #[must_use]
    pub fn relative_to(&self, origin_x: i32, origin_y: i32) -> Self {
        Self {
            x: self.x.saturating_sub(origin_x),
            y: self.y.saturating_sub(origin_y),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_event() {
        let event = MouseEvent::press(10, 5, MouseButton::Left);
        assert_eq!(event.x, 10);
        assert_eq!(event.y, 5);
        assert!(event.is_press());
        assert!(!event.is_scroll());
    }

    #[test]
    fn test_mouse_scroll() {
        let event = MouseEvent::scroll_up(0, 0);
        assert!(event.is_scroll());
        assert!(!event.is_press());
        assert!(MouseEvent::scroll_down(1, 1).is_scroll());
    }

    #[test]
    fn test_relative_to() {
        let e = MouseEvent::press(12, 7, MouseButton::Left).relative_to(10, 5);
        assert_eq!((e.x, e.y), (2, 2));
        assert_eq!(e.button, MouseButton::Left);
    }
}

//! Scissor (clipping) rectangle stack.

use crate::geom::Bounds;

/// Clip region that admits every coordinate a buffer can address.
const UNBOUNDED: Bounds = Bounds::new(i32::MIN, i32::MIN, u32::MAX, u32::MAX);

/// Stack of scissor rectangles with intersection.
#[derive(Clone, Debug)]
pub struct ScissorStack {
    stack: Vec<Bounds>,
    current: Bounds,
}

impl Default for ScissorStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScissorStack {
    /// Create a new scissor stack with infinite bounds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            current: UNBOUNDED,
        }
    }

    /// Push a new scissor rectangle, intersecting with current.
    pub fn push(&mut self, rect: Bounds) {
        self.stack.push(self.current);
        self.current = self
            .current
            .intersect(&rect)
            .unwrap_or(Bounds::new(rect.x, rect.y, 0, 0));
    }

    /// Pop the top scissor rectangle.
    pub fn pop(&mut self) {
        if let Some(rect) = self.stack.pop() {
            self.current = rect;
        }
    }

    /// Clear the stack.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.current = UNBOUNDED;
    }

    /// Check if a point is within the current scissor region.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.current.contains(x, y)
    }

    /// Get the current effective scissor rectangle.
    #[must_use]
    pub fn current(&self) -> Bounds {
        self.current
    }

    /// Number of pushed rectangles.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Check if current scissor region is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scissor_stack() {
        let mut stack = ScissorStack::new();

        // Default contains everything
        assert!(stack.contains(1000, 1000));
        assert!(stack.contains(-5, -5));

        stack.push(Bounds::new(0, 0, 100, 100));
        assert!(stack.contains(50, 50));
        assert!(!stack.contains(150, 150));

        stack.push(Bounds::new(25, 25, 50, 50));
        assert!(stack.contains(50, 50));
        assert!(!stack.contains(10, 10));
        assert_eq!(stack.depth(), 2);

        stack.pop();
        assert!(stack.contains(10, 10));

        stack.pop();
        assert!(stack.contains(1000, 1000));
    }

    #[test]
    fn test_disjoint_push_is_empty() {
        let mut stack = ScissorStack::new();
        stack.push(Bounds::new(0, 0, 10, 10));
        stack.push(Bounds::new(20, 20, 5, 5));
        assert!(stack.is_empty());
        assert!(!stack.contains(0, 0));
        assert!(!stack.contains(21, 21));
    }

    #[test]
    fn test_pop_on_empty_is_noop() {
        let mut stack = ScissorStack::new();
        stack.pop();
        assert!(stack.contains(0, 0));
        assert_eq!(stack.depth(), 0);
    }
}

//! Cell-based frame buffer with scissoring.
//!
//! This module provides [`CellBuffer`], the drawing surface every element
//! paints into. Buffers are 2D grids of cells that support:
//!
//! - **Basic drawing**: Set individual cells, draw ANSI text, draw boxes
//! - **Scissor clipping**: Restrict drawing to rectangular regions
//! - **Wide characters**: Double-width glyphs occupy a cell plus a
//!   continuation, and overwriting either half blanks the other
//!
//! # Examples
//!
//! ```
//! use tessera::buffer::{BoxStyle, CellBuffer};
//! use tessera::geom::{AlignH, Bounds};
//! use tessera::{Rgb, Style};
//!
//! let mut buf = CellBuffer::new(20, 3);
//! buf.draw_box(Bounds::new(0, 0, 20, 3), &BoxStyle::ascii(Style::NONE), None, AlignH::Left);
//!
//! // Use scissor to clip drawing
//! buf.push_scissor(Bounds::new(1, 1, 5, 1));
//! buf.draw_text(1, 1, "clipped text", Style::fg(Rgb::GREEN));
//! buf.pop_scissor();
//!
//! assert_eq!(buf.row_text(1), "|clipp             |");
//! ```

mod drawing;
mod scissor;

pub use drawing::{BorderStyle, BoxStyle, draw_hline, draw_vline};
pub use scissor::ScissorStack;

use crate::cell::Cell;
use crate::color::Rgb;
use crate::geom::{AlignH, Bounds};
use crate::style::Style;

/// Cell grid for terminal rendering.
///
/// The buffer maintains a 2D grid of [`Cell`]s along with a scissor stack for
/// controlling where drawing operations land.
///
/// # Coordinate System
///
/// Coordinates are (x, y) where (0, 0) is the top-left corner. X increases
/// to the right, Y increases downward. Drawing accepts negative coordinates
/// (content scrolled above or left of the screen) and silently drops them.
#[derive(Clone, Debug)]
pub struct CellBuffer {
    width: u32,
    height: u32,
    cells: Vec<Cell>,

    scissor_stack: ScissorStack,
}

impl CellBuffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// Zero dimensions are clamped to 1.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
            scissor_stack: ScissorStack::new(),
        }
    }

    /// Get buffer dimensions.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get buffer width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get buffer height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The whole buffer as a rectangle.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::sized(self.width, self.height)
    }

    #[inline]
    fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize)
            .checked_mul(self.width as usize)?
            .checked_add(x as usize)?;
        (idx < self.cells.len()).then_some(idx)
    }

    /// Get cell at position.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.cell_index(x, y).map(|idx| &self.cells[idx])
    }

    /// Get mutable cell at position, bypassing the scissor stack.
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.cell_index(x, y).map(|idx| &mut self.cells[idx])
    }

    /// True when a write at this position would land.
    #[must_use]
    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.cell_index(x, y).is_some() && self.scissor_stack.contains(x, y)
    }

    /// Set cell at position, respecting the scissor.
    ///
    /// Overwriting one half of a wide character blanks the other half so the
    /// grid never holds a dangling continuation.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if !self.is_visible(x, y) {
            return;
        }
        let Some(idx) = self.cell_index(x, y) else {
            return;
        };

        let old = self.cells[idx];
        if old.is_continuation() && !cell.is_continuation() {
            if let Some(lead) = self.get_mut(x - 1, y) {
                lead.content = crate::cell::CellContent::Char(' ');
            }
        }
        if old.display_width() == 2 && cell.display_width() != 2 {
            if let Some(next) = self.get_mut(x + 1, y) {
                if next.is_continuation() {
                    next.content = crate::cell::CellContent::Char(' ');
                }
            }
        }
        self.cells[idx] = cell;
    }

    /// Clear entire buffer with background color.
    pub fn clear(&mut self, bg: Option<Rgb>) {
        self.cells.fill(Cell::clear(bg));
    }

    /// Fill a rectangular region with a character, respecting the scissor.
    pub fn fill_rect(&mut self, rect: Bounds, ch: char, style: Style) {
        let Some(area) = rect
            .intersect(&self.bounds())
            .and_then(|r| r.intersect(&self.scissor_stack.current()))
        else {
            return;
        };
        let width = crate::text::char_width(ch).max(1);
        for row in area.y..area.bottom() {
            let mut col = area.x;
            while col < area.right() {
                if width == 2 && col + 1 >= area.right() {
                    self.set(col, row, Cell::new(' ', style));
                } else {
                    self.set(col, row, Cell::new(ch, style));
                    if width == 2 {
                        self.set(col + 1, row, Cell::continuation(style));
                    }
                }
                col += width as i32;
            }
        }
    }

    /// Draw ANSI text at position; see [`drawing::draw_text`].
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, style: Style) -> i32 {
        drawing::draw_text(self, x, y, text, style)
    }

    /// Draw a box border with an optional title.
    pub fn draw_box(
        &mut self,
        rect: Bounds,
        box_style: &BoxStyle,
        title: Option<&str>,
        title_align: AlignH,
    ) {
        drawing::draw_box(self, rect, box_style, title, title_align);
    }

    // Scissor stack operations

    /// Push a scissor rectangle onto the stack.
    pub fn push_scissor(&mut self, rect: Bounds) {
        self.scissor_stack.push(rect);
    }

    /// Pop the top scissor rectangle.
    pub fn pop_scissor(&mut self) {
        self.scissor_stack.pop();
    }

    /// Clear the scissor stack.
    pub fn clear_scissors(&mut self) {
        self.scissor_stack.clear();
    }

    /// The effective clip rectangle.
    #[must_use]
    pub fn scissor(&self) -> Bounds {
        self.scissor_stack.current()
    }

    /// Resize buffer, clearing contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        let size = (self.width as usize).saturating_mul(self.height as usize);
        self.cells = vec![Cell::default(); size];
        self.scissor_stack.clear();
    }

    /// Get raw cell slice.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells.
    #[must_use]
    pub fn row(&self, y: u32) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Iterate over cells with positions.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, &Cell)> {
        self.cells.iter().enumerate().map(|(i, cell)| {
            let x = (i as u32) % self.width;
            let y = (i as u32) / self.width;
            (x, y, cell)
        })
    }

    /// Visible characters of one row, continuation cells skipped.
    #[must_use]
    pub fn row_text(&self, y: u32) -> String {
        self.row(y).iter().filter_map(Cell::ch).collect()
    }

    /// Plain-text rendering: one line per row, trailing spaces trimmed.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for CellBuffer {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellContent;

    #[test]
    fn test_buffer_creation() {
        let buf = CellBuffer::new(80, 24);
        assert_eq!(buf.size(), (80, 24));
        assert_eq!(buf.cells().len(), 80 * 24);
    }

    #[test]
    fn test_zero_size_buffer() {
        let buf = CellBuffer::new(0, 0);
        assert_eq!(buf.size(), (1, 1));
    }

    #[test]
    fn test_buffer_resize_clears() {
        let mut buf = CellBuffer::new(10, 10);
        buf.set(5, 5, Cell::new('X', Style::NONE));
        buf.resize(20, 5);

        assert_eq!(buf.size(), (20, 5));
        assert!(buf.get(5, 5).is_none());
        assert!(buf.get(5, 4).unwrap().is_empty());
    }

    #[test]
    fn test_buffer_clear() {
        let mut buf = CellBuffer::new(10, 10);
        buf.clear(Some(Rgb::BLUE));
        assert!(buf.cells().iter().all(|c| c.bg == Some(Rgb::BLUE)));
    }

    #[test]
    fn test_buffer_bounds_check() {
        let mut buf = CellBuffer::new(10, 10);
        assert!(buf.get(9, 9).is_some());
        assert!(buf.get(10, 0).is_none());
        assert!(buf.get(-1, 0).is_none());

        // Out-of-range writes are ignored.
        buf.set(-1, 3, Cell::new('X', Style::NONE));
        buf.set(10, 3, Cell::new('X', Style::NONE));
        assert!(buf.cells().iter().all(Cell::is_empty));
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut buf = CellBuffer::new(10, 10);
        buf.push_scissor(Bounds::new(0, 0, 5, 5));
        buf.fill_rect(Bounds::new(3, 3, 10, 10), '#', Style::NONE);
        buf.pop_scissor();

        assert_eq!(buf.get(3, 3).unwrap().content, CellContent::Char('#'));
        assert_eq!(buf.get(4, 4).unwrap().content, CellContent::Char('#'));
        assert!(buf.get(5, 5).unwrap().is_empty());
        assert!(buf.get(2, 2).unwrap().is_empty());
    }

    #[test]
    fn test_overwrite_half_of_wide_char() {
        let mut buf = CellBuffer::new(6, 1);
        buf.draw_text(0, 0, "漢字", Style::NONE);
        buf.set(1, 0, Cell::new('x', Style::NONE));
        assert_eq!(buf.row_text(0), " x字  ");

        buf.set(2, 0, Cell::new('y', Style::NONE));
        assert_eq!(buf.row_text(0), " xy   ");
    }

    #[test]
    fn test_plain_text() {
        let mut buf = CellBuffer::new(5, 2);
        buf.draw_text(0, 0, "ab", Style::NONE);
        buf.draw_text(1, 1, "cd", Style::NONE);
        assert_eq!(buf.to_plain_text(), "ab\n cd");
    }
}

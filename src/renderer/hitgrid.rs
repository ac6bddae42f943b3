//! Screen-cell to element lookup for mouse events.

use crate::geom::Bounds;

/// Maps each screen cell to the id of the last area registered over it.
#[derive(Clone, Debug)]
pub struct HitGrid {
    width: u32,
    height: u32,
    cells: Vec<Option<usize>>,
}

impl HitGrid {
    /// Uses saturating multiplication so huge dimensions cannot overflow.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            cells: vec![None; size],
        }
    }

    #[inline]
    fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize).checked_mul(self.width as usize)?.checked_add(x as usize)?;
        (idx < self.cells.len()).then_some(idx)
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Register an area; later registrations win where areas overlap.
    /// Parts outside the grid are ignored.
    pub fn register(&mut self, area: Bounds, id: usize) {
        let Some(area) = area.intersect(&Bounds::sized(self.width, self.height)) else {
            return;
        };
        for row in area.y..area.bottom() {
            for col in area.x..area.right() {
                if let Some(idx) = self.cell_index(col, row) {
                    self.cells[idx] = Some(id);
                }
            }
        }
    }

    /// Id registered at a cell.
    #[must_use]
    pub fn test(&self, x: i32, y: i32) -> Option<usize> {
        self.cell_index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Resize, dropping every registration.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for HitGrid {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

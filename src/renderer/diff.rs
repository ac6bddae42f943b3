//! Frame-to-frame cell diffing.

use crate::buffer::CellBuffer;

/// A horizontal run of changed cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl DirtyRegion {
    #[must_use]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding box of both regions.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = (self.x + self.width).max(other.x + other.width);
        let y2 = (self.y + self.height).max(other.y + other.height);

        Self::new(x1, y1, x2 - x1, y2 - y1)
    }
}

/// Cells that differ between two equally sized buffers.
#[derive(Clone, Debug, Default)]
pub struct BufferDiff {
    /// Changed cells (x, y) in row-major order.
    pub changed_cells: Vec<(u32, u32)>,
    /// Changed cells grouped into per-row runs.
    pub dirty_regions: Vec<DirtyRegion>,
    pub change_count: usize,
}

impl BufferDiff {
    /// Compare two buffers. Buffers of different sizes count as entirely
    /// changed.
    #[must_use]
    pub fn compute(old: &CellBuffer, new: &CellBuffer) -> Self {
        let (width, height) = new.size();
        let mut changed_cells = Vec::new();

        if old.size() == new.size() {
            for (i, (a, b)) in old.cells().iter().zip(new.cells()).enumerate() {
                if a != b {
                    let i = i as u32;
                    changed_cells.push((i % width, i / width));
                }
            }
        } else {
            changed_cells.extend((0..height).flat_map(|y| (0..width).map(move |x| (x, y))));
        }

        let change_count = changed_cells.len();
        let dirty_regions = Self::merge_into_regions(&changed_cells);

        Self {
            changed_cells,
            dirty_regions,
            change_count,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed_cells.is_empty()
    }

    /// Group changed cells into runs of adjacent columns on the same row.
    fn merge_into_regions(cells: &[(u32, u32)]) -> Vec<DirtyRegion> {
        let mut regions: Vec<DirtyRegion> = Vec::new();
        for &(x, y) in cells {
            match regions.last_mut() {
                Some(r) if r.y == y && r.x + r.width == x => r.width += 1,
                _ => regions.push(DirtyRegion::new(x, y, 1, 1)),
            }
        }
        regions
    }

    /// More than half the screen changed; a full repaint is cheaper.
    #[must_use]
    pub fn should_full_redraw(&self, total_cells: usize) -> bool {
        self.change_count > total_cells / 2
    }
}

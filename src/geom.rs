//! Cell-grid geometry: rectangles, insets, alignment and size specifications.
//!
//! Everything here works in whole terminal cells. Operations clamp instead of
//! failing: a negative or oversized request collapses to the nearest valid
//! value, so layout can never panic on degenerate input.
//!
//! # Examples
//!
//! ```
//! use tessera::geom::{Bounds, Size};
//!
//! let b = Bounds::new(2, 1, 10, 4);
//! assert!(b.contains(2, 1));
//! assert!(!b.contains(b.right(), 1));
//!
//! let half: Size = "50%".parse().unwrap();
//! assert_eq!(half.calculate(31), 16);
//! ```

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// An axis-aligned rectangle of terminal cells.
///
/// The right and bottom edges are exclusive: a `Bounds` at `x = 0` with
/// `width = 3` covers columns 0, 1 and 2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin.
    #[must_use]
    pub const fn sized(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Exclusive right edge.
    #[must_use]
    pub fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    /// Number of cells covered.
    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// True when the rectangle covers no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Check whether the interiors of two rectangles intersect.
    ///
    /// Rectangles that merely share an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Intersection of two rectangles, `None` when they do not overlap.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 > x1 && y2 > y1 {
            Some(Self::new(x1, y1, x2.abs_diff(x1), y2.abs_diff(y1)))
        } else {
            None
        }
    }

    /// Shrink by the given insets, clamping to zero size.
    #[must_use]
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            x: self.x.saturating_add_unsigned(insets.left),
            y: self.y.saturating_add_unsigned(insets.top),
            width: self.width.saturating_sub(insets.horizontal()),
            height: self.height.saturating_sub(insets.vertical()),
        }
    }

    /// Move by an offset.
    #[must_use]
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Length along an axis.
    #[must_use]
    pub const fn len(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Start coordinate along an axis.
    #[must_use]
    pub const fn start(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Build a rectangle from main/cross axis components.
    #[must_use]
    pub const fn from_axes(
        main: Axis,
        main_start: i32,
        main_len: u32,
        cross_start: i32,
        cross_len: u32,
    ) -> Self {
        match main {
            Axis::Horizontal => Self::new(main_start, cross_start, main_len, cross_len),
            Axis::Vertical => Self::new(cross_start, main_start, cross_len, main_len),
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// A layout axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Edge insets, used for both padding and margin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create insets in CSS order (top, right, bottom, left).
    #[must_use]
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same inset on every side.
    #[must_use]
    pub const fn uniform(n: u32) -> Self {
        Self::new(n, n, n, n)
    }

    /// Vertical and horizontal insets.
    #[must_use]
    pub const fn symmetric(vertical: u32, horizontal: u32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Left plus right.
    #[must_use]
    pub const fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Top plus bottom.
    #[must_use]
    pub const fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }

    /// Total inset along an axis.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.horizontal(),
            Axis::Vertical => self.vertical(),
        }
    }

    /// Leading inset along an axis (left or top).
    #[must_use]
    pub const fn leading(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }
}

/// Horizontal alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AlignH {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AlignV {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Axis-neutral alignment used inside the layout engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    /// Offset of an item of length `used` within `space` cells.
    #[must_use]
    pub const fn offset(self, space: u32, used: u32) -> u32 {
        let free = space.saturating_sub(used);
        match self {
            Self::Start => 0,
            Self::Center => free / 2,
            Self::End => free,
        }
    }
}

impl From<AlignH> for Align {
    fn from(a: AlignH) -> Self {
        match a {
            AlignH::Left => Self::Start,
            AlignH::Center => Self::Center,
            AlignH::Right => Self::End,
        }
    }
}

impl From<AlignV> for Align {
    fn from(a: AlignV) -> Self {
        match a {
            AlignV::Top => Self::Start,
            AlignV::Middle => Self::Center,
            AlignV::Bottom => Self::End,
        }
    }
}

/// Intrinsic content size reported by measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Length along an axis.
    #[must_use]
    pub const fn len(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Classification of a [`Size`] used for layout branching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeKind {
    Fixed,
    Percent,
    Fill,
    Auto,
}

/// A sizing specification along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Size {
    /// Exact number of cells.
    Fixed(u32),
    /// Fraction of the parent's available length, `0.0..=1.0`.
    Percent(f64),
    /// Share of the space left after all other siblings.
    #[default]
    Fill,
    /// Measure intrinsic content.
    Auto,
}

impl Size {
    /// Percentage size from a value in `0..=100`.
    #[must_use]
    pub fn percent(pct: f64) -> Self {
        Self::Percent((pct / 100.0).clamp(0.0, 1.0))
    }

    /// Classify for layout. A 100% percentage behaves exactly like fill.
    #[must_use]
    pub fn kind(&self) -> SizeKind {
        match self {
            Self::Fixed(_) => SizeKind::Fixed,
            Self::Percent(p) if *p >= 1.0 => SizeKind::Fill,
            Self::Percent(_) => SizeKind::Percent,
            Self::Fill => SizeKind::Fill,
            Self::Auto => SizeKind::Auto,
        }
    }

    /// Resolve to a concrete length given the space available.
    ///
    /// Fixed and percentage sizes never exceed `available`. Fill and auto
    /// return `available` unchanged: the layout engine pre-divides space among
    /// fill siblings and measures auto content itself.
    #[must_use]
    pub fn calculate(&self, available: u32) -> u32 {
        match self.kind() {
            SizeKind::Fixed => match self {
                Self::Fixed(v) => (*v).min(available),
                _ => available,
            },
            SizeKind::Percent => match self {
                Self::Percent(p) => {
                    let raw = (f64::from(available) * p.clamp(0.0, 1.0)).round_ties_even();
                    (raw.max(0.0) as u32).min(available)
                }
                _ => available,
            },
            SizeKind::Fill | SizeKind::Auto => available,
        }
    }
}

impl From<u32> for Size {
    fn from(v: u32) -> Self {
        Self::Fixed(v)
    }
}

impl FromStr for Size {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t.to_ascii_lowercase().as_str() {
            "fill" | "*" => return Ok(Self::Fill),
            "auto" => return Ok(Self::Auto),
            _ => {}
        }
        if let Some(pct) = t.strip_suffix('%') {
            let value: f64 = pct
                .trim()
                .parse()
                .map_err(|_| Error::InvalidSize(s.to_string()))?;
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidSize(s.to_string()));
            }
            return Ok(Self::percent(value));
        }
        t.parse::<u32>()
            .map(Self::Fixed)
            .map_err(|_| Error::InvalidSize(s.to_string()))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => write!(f, "{v}"),
            Self::Percent(p) => write!(f, "{}%", p * 100.0),
            Self::Fill => f.write_str("fill"),
            Self::Auto => f.write_str("auto"),
        }
    }
}

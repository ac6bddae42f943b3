//! Measure-then-allocate box layout.
//!
//! [`layout`] assigns bounds to an element and every descendant. For each
//! container it works in two passes over the children:
//!
//! 1. Resolve each child's cross size, then its main size. Fixed and
//!    percentage sizes resolve against the content length; `auto` children
//!    are measured at their final cross size.
//! 2. Split what is left (after sizes, margins and spacing) evenly among
//!    `fill` children, giving the remainder to the earliest ones, then place
//!    the children in order.
//!
//! # Examples
//!
//! ```
//! use tessera::element::{Container, Element, ElementBuilder};
//! use tessera::geom::{Bounds, Size};
//! use tessera::layout::layout;
//! use tessera::widgets::Spacer;
//!
//! let mut row = Container::hstack()
//!     .with_spacing(2)
//!     .child(Spacer::new())
//!     .child(Spacer::new())
//!     .child(Spacer::new());
//! layout(&mut row, Bounds::sized(100, 1));
//!
//! let widths: Vec<u32> = row
//!     .children()
//!     .iter()
//!     .map(|c| c.base().bounds.unwrap().width)
//!     .collect();
//! assert_eq!(widths, [32, 32, 32]);
//! ```

use crate::element::{Container, Element, OverflowX};
use crate::geom::{Align, Axis, Bounds, Extent, Size, SizeKind};
use crate::scroll::ScrollState;

/// Assign bounds to `element` (the available rect minus its margin) and
/// arrange all of its descendants.
pub fn layout(element: &mut dyn Element, available: Bounds) {
    let bounds = available.inset(element.base().margin);
    place(element, bounds);
}

fn place(element: &mut dyn Element, bounds: Bounds) {
    element.base_mut().bounds = Some(bounds);
    if let Some(container) = element.as_container_mut() {
        arrange(container, bounds);
    }
    element.on_layout();
}

/// Preferred size of an element, honouring its declared sizes.
///
/// Fixed and percentage sizes win; `fill` and `auto` fall back to the
/// element's intrinsic measurement. A fixed width is fed into the intrinsic
/// measurement so wrapped content is measured at the width it will get.
#[must_use]
pub fn measure(element: &dyn Element, available: Extent) -> Extent {
    let base = element.base();
    let w = declared_len(base.width, available.width);
    let h = declared_len(base.height, available.height);
    if let (Some(w), Some(h)) = (w, h) {
        return Extent::new(w, h);
    }
    let natural = element.measure(Extent::new(
        w.unwrap_or(available.width),
        h.unwrap_or(available.height),
    ));
    Extent::new(w.unwrap_or(natural.width), h.unwrap_or(natural.height))
}

fn declared_len(size: Size, available: u32) -> Option<u32> {
    match (size.kind(), size) {
        (SizeKind::Fixed, Size::Fixed(v)) => Some(v),
        (SizeKind::Percent, _) => Some(size.calculate(available)),
        _ => None,
    }
}

/// Intrinsic extent of a container's children stacked along its main axis.
#[must_use]
pub fn measure_children(container: &Container, inner: Extent) -> Extent {
    let axis = container.mode.axis();
    let cross = axis.cross();
    let mut main_total: u32 = 0;
    let mut cross_max: u32 = 0;

    for child in &container.children {
        let m = child.base().margin;
        let avail = Extent::new(
            inner.width.saturating_sub(m.horizontal()),
            inner.height.saturating_sub(m.vertical()),
        );
        let pref = measure(child.as_ref(), avail);
        main_total = main_total
            .saturating_add(pref.len(axis))
            .saturating_add(m.along(axis));
        cross_max = cross_max.max(pref.len(cross).saturating_add(m.along(cross)));
    }
    if let Some(gaps) = gap_count(container.children.len()) {
        main_total = main_total.saturating_add(container.spacing.saturating_mul(gaps));
    }

    match axis {
        Axis::Vertical => Extent::new(cross_max, main_total),
        Axis::Horizontal => Extent::new(main_total, cross_max),
    }
}

fn gap_count(children: usize) -> Option<u32> {
    u32::try_from(children.checked_sub(1)?).ok()
}

fn arrange(container: &mut Container, bounds: Bounds) {
    let content = container.content_rect(bounds);
    let (align_h, align_v) = match container.mode {
        crate::element::LayoutMode::Frame => (container.content_align_h, container.content_align_v),
        _ => (container.align_h, container.align_v),
    };

    let mut area = content;
    let text_scrolls = container.text.is_some() && container.scrollable;
    if container.text.is_some() {
        if text_scrolls {
            let lines = container.text_lines(content.width).len();
            container
                .scroll
                .resize(u32::try_from(lines).unwrap_or(u32::MAX), content.height);
        }
        let rows = container.text_rows(content);
        area.y = area.y.saturating_add_unsigned(rows);
        area.height = area.height.saturating_sub(rows);
    }

    let axis = container.mode.axis();
    let (main_align, cross_align) = match axis {
        Axis::Vertical => (Align::from(align_v), Align::from(align_h)),
        Axis::Horizontal => (Align::from(align_h), Align::from(align_v)),
    };
    let run = Run {
        area,
        axis,
        spacing: container.spacing,
        main_align,
        cross_align,
        unclamped: container.scrollable || container.overflow_x == OverflowX::Visible,
    };
    let scroll = (container.scrollable && !text_scrolls).then_some(&mut container.scroll);
    run.place(&mut container.children, scroll);
}

/// One stacking pass over a container's children.
struct Run {
    area: Bounds,
    axis: Axis,
    spacing: u32,
    main_align: Align,
    cross_align: Align,
    /// Children may extend past the content end (scrolling or visible
    /// overflow).
    unclamped: bool,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    main: u32,
    cross: u32,
    cross_avail: u32,
    fill: bool,
}

fn to_i32(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}

fn to_u32(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

impl Run {
    fn extent(&self, main: u32, cross: u32) -> Extent {
        match self.axis {
            Axis::Vertical => Extent::new(cross, main),
            Axis::Horizontal => Extent::new(main, cross),
        }
    }

    fn measure_slot(&self, child: &dyn Element) -> Slot {
        let base = child.base();
        let cross_axis = self.axis.cross();
        let main_len = self.area.len(self.axis);
        let m = base.margin;
        let cross_avail = self.area.len(cross_axis).saturating_sub(m.along(cross_axis));
        let main_avail = main_len.saturating_sub(m.along(self.axis));

        let cross_size = base.size(cross_axis);
        let cross = match cross_size.kind() {
            SizeKind::Fixed | SizeKind::Percent => cross_size.calculate(cross_avail),
            SizeKind::Fill => cross_avail,
            SizeKind::Auto => child
                .measure(self.extent(main_avail, cross_avail))
                .len(cross_axis)
                .min(cross_avail),
        };

        let main_size = base.size(self.axis);
        let (main, fill) = match (main_size.kind(), main_size) {
            (SizeKind::Fill, _) => (0, true),
            (SizeKind::Fixed, Size::Fixed(v)) if self.unclamped => (v, false),
            (SizeKind::Fixed | SizeKind::Percent, _) => (main_size.calculate(main_len), false),
            (SizeKind::Auto, _) => {
                let measured = child.measure(self.extent(main_avail, cross)).len(self.axis);
                (if self.unclamped { measured } else { measured.min(main_len) }, false)
            }
        };

        Slot {
            main,
            cross,
            cross_avail,
            fill,
        }
    }

    fn place(&self, children: &mut [Box<dyn Element>], scroll: Option<&mut ScrollState>) {
        let main_len = self.area.len(self.axis);
        let Some(gaps) = gap_count(children.len()) else {
            if let Some(scroll) = scroll {
                scroll.resize(0, main_len);
            }
            return;
        };

        let mut slots: Vec<Slot> = children.iter().map(|c| self.measure_slot(c.as_ref())).collect();

        let margins: u64 = children
            .iter()
            .map(|c| u64::from(c.base().margin.along(self.axis)))
            .sum();
        let sized: u64 = slots.iter().map(|s| u64::from(s.main)).sum();
        let used = sized + margins + u64::from(self.spacing) * u64::from(gaps);

        let fills = slots.iter().filter(|s| s.fill).count() as u64;
        let remaining = u64::from(main_len).saturating_sub(used);
        if fills > 0 {
            let share = remaining / fills;
            let mut extra = remaining % fills;
            for slot in slots.iter_mut().filter(|s| s.fill) {
                slot.main = to_u32(share + u64::from(extra > 0));
                extra = extra.saturating_sub(1);
            }
        }
        let total = used + if fills > 0 { remaining } else { 0 };

        let mut cursor = i64::from(self.area.start(self.axis));
        if fills == 0 && total < u64::from(main_len) {
            cursor += i64::from(self.main_align.offset(main_len, to_u32(total)));
        }
        if let Some(scroll) = scroll {
            scroll.resize(to_u32(total), main_len);
            cursor -= i64::from(scroll.position());
        }

        let end = i64::from(self.area.start(self.axis)) + i64::from(main_len);
        let cross_axis = self.axis.cross();
        let cross_start = i64::from(self.area.start(cross_axis));

        for (child, slot) in children.iter_mut().zip(&slots) {
            let m = child.base().margin;
            cursor += i64::from(m.leading(self.axis));

            let len = if self.unclamped {
                slot.main
            } else {
                let room = (end - cursor).clamp(0, i64::from(u32::MAX));
                slot.main.min(to_u32(room.unsigned_abs()))
            };
            let cross_pos = cross_start
                + i64::from(m.leading(cross_axis))
                + i64::from(self.cross_align.offset(slot.cross_avail, slot.cross));

            let bounds = Bounds::from_axes(
                self.axis,
                to_i32(cursor),
                len,
                to_i32(cross_pos),
                slot.cross,
            );
            place(child.as_mut(), bounds);

            let trailing = m.along(self.axis) - m.leading(self.axis);
            cursor += i64::from(slot.main) + i64::from(trailing) + i64::from(self.spacing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementBuilder, LayoutMode};
    use crate::geom::{AlignH, AlignV, Insets};
    use crate::widgets::{Button, Spacer, Text};

    fn bounds_of(c: &Container) -> Vec<Bounds> {
        c.children
            .iter()
            .map(|ch| ch.base().bounds.unwrap_or_default())
            .collect()
    }

    fn fills(n: usize) -> Container {
        let mut c = Container::hstack().with_spacing(2);
        for _ in 0..n {
            c.push(Box::new(Spacer::new()));
        }
        c
    }

    #[test]
    fn test_three_fills_exact() {
        let mut row = fills(3);
        layout(&mut row, Bounds::sized(100, 1));
        let b = bounds_of(&row);
        assert_eq!(b.iter().map(|r| r.width).collect::<Vec<_>>(), [32, 32, 32]);
        assert_eq!(b.iter().map(|r| r.x).collect::<Vec<_>>(), [0, 34, 68]);
    }

    #[test]
    fn test_fill_remainder_goes_first() {
        // 101 - 2 * 2 = 97 -> 33/32/32
        let mut row = fills(3);
        layout(&mut row, Bounds::sized(101, 1));
        let widths: Vec<u32> = bounds_of(&row).iter().map(|r| r.width).collect();
        assert_eq!(widths, [33, 32, 32]);

        // 98 - 4 = 94 -> 32/31/31
        let mut row = fills(3);
        layout(&mut row, Bounds::sized(98, 1));
        let widths: Vec<u32> = bounds_of(&row).iter().map(|r| r.width).collect();
        assert_eq!(widths, [32, 31, 31]);
    }

    #[test]
    fn test_oversubscribed_fills_get_zero() {
        let mut row = Container::hstack()
            .child(Spacer::new().with_width(Size::Fixed(8)))
            .child(Spacer::new())
            .child(Spacer::new());
        layout(&mut row, Bounds::sized(5, 1));
        let b = bounds_of(&row);
        assert_eq!(b[0].width, 5);
        assert_eq!(b[1].width, 0);
        assert_eq!(b[2].width, 0);
    }

    #[test]
    fn test_zero_children() {
        let mut empty = Container::vstack();
        layout(&mut empty, Bounds::new(1, 1, 0, 0));
        assert_eq!(empty.base.bounds, Some(Bounds::new(1, 1, 0, 0)));
    }

    #[test]
    fn test_fixed_percent_and_fill_mix() {
        let mut row = Container::hstack()
            .child(Spacer::new().with_width(Size::Fixed(10)))
            .child(Spacer::new().with_width(Size::percent(25.0)))
            .child(Spacer::new());
        layout(&mut row, Bounds::sized(40, 3));
        let widths: Vec<u32> = bounds_of(&row).iter().map(|r| r.width).collect();
        assert_eq!(widths, [10, 10, 20]);
        assert!(bounds_of(&row).iter().all(|r| r.height == 3));
    }

    #[test]
    fn test_padding_border_and_margin() {
        let mut frame = Container::frame()
            .with_padding(Insets::uniform(1))
            .child(Spacer::new().with_margin(Insets::new(1, 0, 0, 2)));
        layout(&mut frame, Bounds::sized(20, 10));
        // border 1 + padding 1 = content at (2,2) 16x6; margin shifts by (2,1)
        assert_eq!(bounds_of(&frame)[0], Bounds::new(4, 3, 14, 5));
    }

    #[test]
    fn test_cross_alignment() {
        let mut col = Container::vstack()
            .align(AlignH::Center, AlignV::Top)
            .child(Button::new("OK"))
            .child(Button::new("OK").with_width(Size::Fill));
        layout(&mut col, Bounds::sized(20, 5));
        let b = bounds_of(&col);
        // "[ OK ]" is 6 wide, centred in 20.
        assert_eq!(b[0], Bounds::new(7, 0, 6, 1));
        assert_eq!(b[1], Bounds::new(0, 1, 20, 1));
    }

    #[test]
    fn test_main_axis_group_alignment() {
        let mut col = Container::vstack()
            .align(AlignH::Left, AlignV::Bottom)
            .child(Spacer::new().with_height(Size::Fixed(2)))
            .child(Spacer::new().with_height(Size::Fixed(1)));
        layout(&mut col, Bounds::sized(4, 10));
        let b = bounds_of(&col);
        assert_eq!(b[0].y, 7);
        assert_eq!(b[1].y, 9);

        let mut col = Container::vstack()
            .align(AlignH::Left, AlignV::Middle)
            .child(Spacer::new().with_height(Size::Fixed(2)));
        layout(&mut col, Bounds::sized(4, 10));
        assert_eq!(bounds_of(&col)[0].y, 4);
    }

    #[test]
    fn test_children_clamped_to_content() {
        let mut col = Container::vstack()
            .child(Spacer::new().with_height(Size::Fixed(4)))
            .child(Spacer::new().with_height(Size::Fixed(4)));
        layout(&mut col, Bounds::sized(5, 6));
        let b = bounds_of(&col);
        assert_eq!(b[1], Bounds::new(0, 4, 5, 2));
    }

    #[test]
    fn test_auto_height_uses_final_width() {
        let text = "aaaa bbbb cccc dddd";
        let mut col = Container::vstack()
            .child(Text::new(text).with_height(Size::Auto))
            .child(Spacer::new());
        layout(&mut col, Bounds::sized(9, 10));
        let b = bounds_of(&col);
        // Wrapped at 9: "aaaa bbbb" / "cccc dddd"
        assert_eq!(b[0].height, 2);
        assert_eq!(b[1], Bounds::new(0, 2, 9, 8));
        assert_eq!(
            crate::text::wrap_text(text, b[0].width as usize).len() as u32,
            b[0].height
        );
    }

    #[test]
    fn test_scrollable_records_content_and_offsets() {
        let mut col = Container::vstack().scrollable(true);
        for _ in 0..10 {
            col.push(Box::new(Spacer::new().with_height(Size::Fixed(2))));
        }
        layout(&mut col, Bounds::sized(10, 5));
        assert_eq!(col.scroll.content_size(), 20);
        assert_eq!(col.scroll.viewport_size(), 5);
        // Scrollbar column reserved.
        assert_eq!(bounds_of(&col)[0].width, 9);

        col.scroll.scroll_to(3);
        layout(&mut col, Bounds::sized(10, 5));
        let b = bounds_of(&col);
        assert_eq!(b[0].y, -3);
        assert_eq!(b[2].y, 1);
        assert_eq!(b[9].height, 2);
    }

    #[test]
    fn test_scroll_reclamped_when_content_shrinks() {
        let mut col = Container::vstack().scrollable(true);
        for _ in 0..10 {
            col.push(Box::new(Spacer::new().with_height(Size::Fixed(1))));
        }
        layout(&mut col, Bounds::sized(10, 5));
        col.scroll.end();
        assert_eq!(col.scroll.position(), 5);
        col.children.truncate(6);
        layout(&mut col, Bounds::sized(10, 5));
        assert_eq!(col.scroll.position(), 1);
    }

    #[test]
    fn test_nested_recursion() {
        let mut root = Container::vstack()
            .child(
                Container::hstack()
                    .with_height(Size::Fixed(3))
                    .child(Spacer::new())
                    .child(Spacer::new()),
            )
            .child(Spacer::new());
        layout(&mut root, Bounds::sized(10, 8));
        let row = root.children[0].as_container().unwrap();
        assert_eq!(row.mode, LayoutMode::HStack);
        let b = bounds_of(row);
        assert_eq!(b[0], Bounds::new(0, 0, 5, 3));
        assert_eq!(b[1], Bounds::new(5, 0, 5, 3));
        assert_eq!(root.children[1].base().bounds, Some(Bounds::new(0, 3, 10, 5)));
    }

    #[test]
    fn test_frame_text_rows_push_children_down() {
        let mut frame = Container::frame()
            .with_text("one\ntwo")
            .child(Spacer::new());
        layout(&mut frame, Bounds::sized(10, 6));
        assert_eq!(bounds_of(&frame)[0], Bounds::new(1, 3, 8, 2));
    }

    #[test]
    fn test_scrollable_wrapped_text_frame() {
        let mut frame = Container::frame()
            .with_text("aaaa bbbb cccc dddd eeee")
            .overflow(OverflowX::Wrap)
            .scrollable(true);
        // content: 12 - 2 border - 1 scrollbar = 9 wide, 2 tall
        layout(&mut frame, Bounds::sized(12, 4));
        assert_eq!(frame.scroll.content_size(), 3);
        assert_eq!(frame.scroll.viewport_size(), 2);
        assert_eq!(frame.scroll.max_scroll(), 1);
    }

    #[test]
    fn test_measure_honours_declared_sizes() {
        let t = Text::new("hello world").with_width(Size::Fixed(5)).with_height(Size::Auto);
        assert_eq!(measure(&t, Extent::new(80, 24)), Extent::new(5, 2));
        let s = Spacer::new().with_width(Size::Fixed(3)).with_height(Size::percent(50.0));
        assert_eq!(measure(&s, Extent::new(80, 24)), Extent::new(3, 12));
    }
}

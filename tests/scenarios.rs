//! End-to-end acceptance scenarios for layout, wrapping, the status bar and
//! the style cascade.

use tessera::ansi::visible_width;
use tessera::element::{Container, Element, ElementBuilder};
use tessera::geom::{Bounds, Size};
use tessera::text::wrap_text;
use tessera::theme::{StyleResolver, Theme};
use tessera::widgets::{Button, Spacer, StatusBar, status_layout};
use tessera::{Style, layout};

fn widths(row: &Container) -> Vec<(i32, u32)> {
    row.children
        .iter()
        .map(|c| {
            let b = c.base().bounds.unwrap_or_default();
            (b.x, b.width)
        })
        .collect()
}

fn three_fills() -> Container {
    Container::hstack()
        .with_spacing(2)
        .child(Spacer::new())
        .child(Spacer::new())
        .child(Spacer::new())
}

#[test]
fn three_fills_divide_exactly() {
    let mut row = three_fills();
    layout(&mut row, Bounds::sized(100, 1));
    assert_eq!(widths(&row), vec![(0, 32), (34, 32), (68, 32)]);
}

#[test]
fn fill_remainder_goes_to_earliest() {
    // 101 - 2 * 2 = 97 cells to share.
    let mut row = three_fills();
    layout(&mut row, Bounds::sized(101, 1));
    assert_eq!(widths(&row), vec![(0, 33), (35, 32), (69, 32)]);
}

#[test]
fn supercalifragilistic_hard_breaks() {
    let lines = wrap_text("Supercalifragilisticexpialidocious", 10);
    assert!(lines.len() >= 4);
    assert!(lines.iter().all(|l| visible_width(l) <= 10));
    assert_eq!(lines.concat(), "Supercalifragilisticexpialidocious");
}

#[test]
fn status_bar_thirty_wide() {
    let left = "A".repeat(20);
    let right = "C".repeat(20);
    let parts = status_layout(&left, "BBBB", &right, 30);

    assert!(visible_width(&parts.right) <= 10);
    let remaining = 30 - visible_width(&parts.right);
    assert!(visible_width(&parts.left) <= remaining / 2);
    let total = visible_width(&parts.left)
        + visible_width(&parts.center)
        + visible_width(&parts.right);
    assert!(total <= 30);
    assert_eq!(parts.center, "BBBB");

    let mut bar = StatusBar::new().left(left).center("BBBB").right(right);
    let text = tessera::snapshot::render_plain(&mut bar, 30, 1);
    assert!(visible_width(&text) <= 30);
    assert!(text.starts_with("AAAAAAAAAA"));
    assert!(text.ends_with("CCCCCCCCCC"));
}

#[test]
fn button_focus_resolves_bold() {
    let theme = Theme::new("scenario")
        .with("button", Style::NONE)
        .with("button:focus", Style::bold());
    let resolver = StyleResolver::new(theme);

    let mut button = Button::new("OK");
    button.set_focused(true);
    assert!(resolver.resolve_style(&button, None, None).is_bold());

    button.set_focused(false);
    assert!(!resolver.resolve_style(&button, None, None).is_bold());
}

#[test]
fn padding_margin_and_fixed_sizes_compose() {
    let mut root = Container::frame()
        .with_padding(tessera::Insets::uniform(1))
        .with_border(tessera::buffer::BorderStyle::Single)
        .child(
            Container::hstack()
                .child(Button::new("a").with_width(Size::Fixed(4)))
                .child(Spacer::new())
                .child(Button::new("b").with_width(Size::percent(50.0))),
        );
    layout(&mut root, Bounds::sized(24, 7));
    let row = root.children[0].as_container().unwrap();
    assert_eq!(row.base.bounds, Some(Bounds::new(2, 2, 20, 3)));
    // 50% of 20 = 10; the spacer takes the 6 left over.
    assert_eq!(widths(row), vec![(2, 4), (6, 6), (12, 10)]);
}

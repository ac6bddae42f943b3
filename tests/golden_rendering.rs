//! Golden renderings: plain-text screens, layout outlines and JSON cell lists.

use serde_json::{Value, json};
use tessera::element::{Container, ElementBuilder};
use tessera::geom::{Insets, Size};
use tessera::snapshot::{
    CellRecord, ansi_to_json, buffer_to_json, cells_to_records, layout_outline, render_buffer,
    render_plain,
};
use tessera::widgets::{Button, Checkbox, Spacer, StatusBar, Text, TreeNode, TreeView};
use tessera::{GlyphSet, Rgb};

fn app() -> Container {
    Container::vstack()
        .with_id("app")
        .child(StatusBar::new().left("file.rs").right("1:1"))
        .child(
            Container::hstack()
                .with_spacing(1)
                .child(Button::new("OK").with_id("ok"))
                .child(Spacer::new())
                .child(Checkbox::new("wrap")),
        )
        .child(Text::new("footer"))
}

#[test]
fn app_layout_outline() {
    let mut root = app();
    render_plain(&mut root, 40, 10);
    insta::assert_snapshot!(layout_outline(&root).trim_end(), @r"
    vstack#app 0,0 40x10
      statusbar 0,0 40x1
      hstack 0,1 40x8
        button#ok 0,1 6x1
        spacer 7,1 24x8
        checkbox 32,1 8x1
      text 0,9 40x1
    ");
}

#[test]
fn titled_frame_with_checkboxes() {
    let mut root = Container::frame()
        .with_title("Tasks")
        .with_padding(Insets::symmetric(0, 1))
        .child(Checkbox::new("write docs").checked(true))
        .child(Checkbox::new("ship"));
    insta::assert_snapshot!(render_plain(&mut root, 20, 4), @r"
    +-Tasks------------+
    | [x] write docs   |
    | [ ] ship         |
    +------------------+
    ");
}

#[test]
fn tree_connectors() {
    let mut tree = TreeView::new(vec![
        TreeNode::branch(
            "src",
            vec![
                TreeNode::leaf("main.rs"),
                TreeNode::branch("widgets", vec![TreeNode::leaf("a.rs")]).collapsed(),
                TreeNode::leaf("lib.rs"),
            ],
        ),
        TreeNode::leaf("Cargo.toml"),
    ]);
    insta::assert_snapshot!(render_plain(&mut tree, 20, 6).trim_end(), @r"
    v src
    |- main.rs
    |- > widgets
    `- lib.rs
    Cargo.toml
    ");
}

#[test]
fn wrapped_frame_text() {
    let mut root = Container::frame()
        .with_text("the quick brown fox jumps over the lazy dog")
        .overflow(tessera::OverflowX::Wrap)
        .with_height(Size::Fixed(5));
    let text = render_plain(&mut root, 14, 5);
    insta::assert_snapshot!(text, @r"
    +------------+
    |the quick   |
    |brown fox   |
    |jumps over  |
    +------------+
    ");
}

#[test]
fn codec_cell_list() {
    let json = ansi_to_json("\x1b[1;38;2;255;0;0mA\x1b[0m\x1b[4mb").unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        json!([
            {
                "char": "A", "fg_color": "#ff0000", "bg_color": null,
                "bold": true, "italic": false, "underline": false
            },
            {
                "char": "b", "fg_color": null, "bg_color": null,
                "bold": false, "italic": false, "underline": true
            },
        ])
    );
}

#[test]
fn osc_links_leave_no_cells() {
    let records = cells_to_records(&tessera::ansi::ansi_string_to_cells(
        "\x1b]8;;https://example.com\x07link\x1b]8;;\x07 \x1b]0;title\x1b\\x",
    ));
    let text: String = records.iter().map(|r| r.char.as_str()).collect();
    assert_eq!(text, "link x");
}

#[test]
fn styled_cells_snapshot() {
    let mut root = Text::new("\x1b[1;38;2;255;0;0mA\x1b[0m");
    let buffer = render_buffer(&mut root, 1, 1, GlyphSet::ASCII);
    let records: Vec<CellRecord> = cells_to_records(buffer.row(0));
    assert_eq!(records[0].fg_color, Some(Rgb::RED));
    insta::assert_json_snapshot!(records, @r##"
    [
      {
        "char": "A",
        "fg_color": "#ff0000",
        "bg_color": null,
        "bold": true,
        "italic": false,
        "underline": false
      }
    ]
    "##);
}

#[test]
fn buffer_json_has_one_array_per_row() {
    let mut root = Text::new("ab\ncd");
    let buffer = render_buffer(&mut root, 3, 2, GlyphSet::ASCII);
    let value: Value = serde_json::from_str(&buffer_to_json(&buffer).unwrap()).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][1]["char"], "d");
    assert_eq!(rows[1][2]["char"], " ");
}

fn labelled_frame(overflow: tessera::OverflowX) -> Container {
    Container::hstack()
        .child(
            Container::frame()
                .with_width(Size::Fixed(6))
                .with_text("hello world")
                .overflow(overflow),
        )
        .child(Spacer::new())
}

#[test]
fn visible_overflow_paints_over_sibling() {
    let mut root = labelled_frame(tessera::OverflowX::Visible);
    insta::assert_snapshot!(render_plain(&mut root, 14, 3), @r"
    +----+
    |hello world
    +----+
    ");
}

#[test]
fn clipped_overflow_stays_inside_frame() {
    let mut root = labelled_frame(tessera::OverflowX::Clip);
    insta::assert_snapshot!(render_plain(&mut root, 14, 3), @r"
    +----+
    |hell|
    +----+
    ");
}

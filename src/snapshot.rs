//! Golden-output helpers for regression tests.
//!
//! Two renderings are supported: a JSON list of cell records
//! (`char, fg_color, bg_color, bold, italic, underline`) for checking styling,
//! and plain text for checking layout. [`layout_outline`] prints the assigned
//! bounds of every element, which makes layout regressions easy to read in a
//! snapshot diff.
//!
//! ```
//! use tessera::snapshot::ansi_to_json;
//!
//! let json = ansi_to_json("\x1b[1mA\x1b[0mb").unwrap();
//! assert!(json.contains(r#""char":"A""#));
//! ```

use crate::ansi::ansi_string_to_cells;
use crate::buffer::CellBuffer;
use crate::cell::Cell;
use crate::color::Rgb;
use crate::element::{Element, walk};
use crate::error::Result;
use crate::geom::Bounds;
use crate::glyphs::GlyphSet;
use crate::layout::layout;
use crate::paint::PaintContext;
use crate::style::{Style, TextAttributes};
use crate::theme::StyleResolver;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// One cell as exported to golden files. Continuation halves of wide
/// characters are not exported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub char: String,
    pub fg_color: Option<Rgb>,
    pub bg_color: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl CellRecord {
    /// Record for a cell, or `None` for a continuation cell.
    #[must_use]
    pub fn from_cell(cell: &Cell) -> Option<Self> {
        let ch = cell.ch()?;
        let style = cell.style();
        Some(Self {
            char: ch.to_string(),
            fg_color: cell.fg,
            bg_color: cell.bg,
            bold: style.is_bold(),
            italic: style.is_italic(),
            underline: style.is_underline(),
        })
    }

    /// Rebuild the cell. Records hold only the first character of `char`;
    /// an empty `char` becomes a space.
    #[must_use]
    pub fn to_cell(&self) -> Cell {
        let mut attrs = TextAttributes::empty();
        attrs.set(TextAttributes::BOLD, self.bold);
        attrs.set(TextAttributes::ITALIC, self.italic);
        attrs.set(TextAttributes::UNDERLINE, self.underline);
        let mut style = Style::NONE.with_attributes(attrs);
        style.fg = self.fg_color;
        style.bg = self.bg_color;
        Cell::new(self.char.chars().next().unwrap_or(' '), style)
    }
}

/// Records for a run of cells.
#[must_use]
pub fn cells_to_records(cells: &[Cell]) -> Vec<CellRecord> {
    cells.iter().filter_map(CellRecord::from_cell).collect()
}

/// JSON array of cell records.
pub fn cells_to_json(cells: &[Cell]) -> Result<String> {
    Ok(serde_json::to_string(&cells_to_records(cells))?)
}

/// Decode ANSI text and export the resulting cells as JSON.
pub fn ansi_to_json(text: &str) -> Result<String> {
    cells_to_json(&ansi_string_to_cells(text))
}

/// Parse a JSON array of cell records back into cells.
pub fn cells_from_json(json: &str) -> Result<Vec<Cell>> {
    let records: Vec<CellRecord> = serde_json::from_str(json)?;
    Ok(records.iter().map(CellRecord::to_cell).collect())
}

/// JSON array of rows, each an array of cell records.
pub fn buffer_to_json(buffer: &CellBuffer) -> Result<String> {
    let rows: Vec<Vec<CellRecord>> = (0..buffer.height())
        .map(|y| cells_to_records(buffer.row(y)))
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Lay out and paint a tree into a fresh buffer with the default theme.
pub fn render_buffer(
    root: &mut dyn Element,
    width: u32,
    height: u32,
    glyphs: GlyphSet,
) -> CellBuffer {
    let resolver = StyleResolver::default();
    render_buffer_with(root, width, height, glyphs, &resolver)
}

/// [`render_buffer`] with an explicit resolver.
pub fn render_buffer_with(
    root: &mut dyn Element,
    width: u32,
    height: u32,
    glyphs: GlyphSet,
    resolver: &StyleResolver,
) -> CellBuffer {
    let mut buffer = CellBuffer::new(width, height);
    layout(root, Bounds::sized(width, height));
    PaintContext::new(&mut buffer, resolver, glyphs).paint_child(&*root);
    buffer
}

/// Plain-text rendering with ASCII glyphs, trailing blanks trimmed per row.
pub fn render_plain(root: &mut dyn Element, width: u32, height: u32) -> String {
    render_buffer(root, width, height, GlyphSet::ASCII).to_plain_text()
}

/// One line per element: indentation by depth, type, optional `#id`, and
/// the assigned bounds as `x,y wxh`.
#[must_use]
pub fn layout_outline(root: &dyn Element) -> String {
    let mut out = String::new();
    walk(root, &mut |path, el| {
        let indent = "  ".repeat(path.len());
        let id = el.base().id.as_deref().map(|id| format!("#{id}")).unwrap_or_default();
        let bounds = el.base().bounds.map_or_else(
            || "unplaced".to_string(),
            |b| format!("{},{} {}x{}", b.x, b.y, b.width, b.height),
        );
        let _ = writeln!(out, "{indent}{}{id} {bounds}", el.type_name());
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Container, ElementBuilder};
    use crate::geom::Size;
    use crate::widgets::{Button, Text};

    #[test]
    fn test_record_shape() {
        let cell = Cell::new('A', Style::fg(Rgb::RED).with_bold());
        let json = cells_to_json(&[cell]).unwrap();
        let expected = concat!(
            r##"[{"char":"A","fg_color":"#ff0000","bg_color":null,"##,
            r#""bold":true,"italic":false,"underline":false}]"#
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn test_continuations_skipped() {
        let cells = ansi_string_to_cells("漢x");
        assert_eq!(cells.len(), 3);
        let chars: Vec<_> = cells_to_records(&cells).into_iter().map(|r| r.char).collect();
        assert_eq!(chars, ["漢", "x"]);
    }

    #[test]
    fn test_json_back_to_cells() {
        let cells = ansi_string_to_cells("\x1b[3;4;38;2;1;2;3mhi\x1b[0m!");
        let json = cells_to_json(&cells).unwrap();
        assert_eq!(cells_from_json(&json).unwrap(), cells);
    }

    #[test]
    fn test_render_plain_and_outline() {
        let mut root = Container::vstack()
            .with_id("root")
            .child(Text::new("title").with_height(Size::Fixed(1)))
            .child(Button::new("Go").with_id("go"));
        assert_eq!(render_plain(&mut root, 10, 2), "title\n[ Go ]");
        assert_eq!(
            layout_outline(&root),
            "vstack#root 0,0 10x2\n  text 0,0 10x1\n  button#go 0,1 6x1\n"
        );
    }

    #[test]
    fn test_outline_before_layout() {
        let root = Text::new("x");
        assert_eq!(layout_outline(&root), "text unplaced\n");
    }
}

//! Buffered ANSI output writer with state tracking.

use crate::ansi::{self, attr, color};
use crate::cell::{Cell, CellContent};
use crate::color::Rgb;
use crate::style::TextAttributes;
use std::io::{self, Write};

/// Buffered writer that tracks ANSI state to minimize escape sequences.
pub struct AnsiWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,

    // Current state for delta encoding
    current_fg: Option<Rgb>,
    current_bg: Option<Rgb>,
    current_attrs: TextAttributes,

    // Cursor position
    cursor_row: u32,
    cursor_col: u32,

    bytes_flushed: usize,
}

impl<W: Write> AnsiWriter<W> {
    /// Create a new ANSI writer wrapping the given output.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(8192),
            current_fg: None,
            current_bg: None,
            current_attrs: TextAttributes::empty(),
            cursor_row: 0,
            cursor_col: 0,
            bytes_flushed: 0,
        }
    }

    /// Write a raw string to the buffer.
    pub fn write_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    /// Move cursor to position, using relative moves if more efficient.
    pub fn move_cursor(&mut self, row: u32, col: u32) {
        if row == self.cursor_row && col == self.cursor_col {
            return;
        }

        let dy = row as i32 - self.cursor_row as i32;
        let dx = col as i32 - self.cursor_col as i32;

        // ESC[r;cH = 4 + digits
        let abs_cost = 4 + digits(row + 1) + digits(col + 1);
        let rel_cost = if dy != 0 {
            3 + digits(dy.unsigned_abs())
        } else {
            0
        } + if dx != 0 {
            3 + digits(dx.unsigned_abs())
        } else {
            0
        };

        if rel_cost < abs_cost {
            let _ = ansi::write_cursor_move(&mut self.buffer, dx, dy);
        } else {
            let _ = ansi::write_cursor_position(&mut self.buffer, row, col);
        }

        self.cursor_row = row;
        self.cursor_col = col;
    }

    /// Move with an absolute position sequence regardless of tracked state.
    ///
    /// Needed after writing the last column of a row, where terminals park
    /// the cursor on that column instead of one past it.
    pub fn move_cursor_absolute(&mut self, row: u32, col: u32) {
        let _ = ansi::write_cursor_position(&mut self.buffer, row, col);
        self.cursor_row = row;
        self.cursor_col = col;
    }

    /// Set foreground color if different from current.
    pub fn set_fg(&mut self, fg: Option<Rgb>) {
        if self.current_fg == fg {
            return;
        }
        match fg {
            Some(c) => {
                let _ = ansi::write_sgr(&mut self.buffer, Some(c), None, TextAttributes::empty());
            }
            None => self.write_str(color::FG_DEFAULT),
        }
        self.current_fg = fg;
    }

    /// Set background color if different from current.
    pub fn set_bg(&mut self, bg: Option<Rgb>) {
        if self.current_bg == bg {
            return;
        }
        match bg {
            Some(c) => {
                let _ = ansi::write_sgr(&mut self.buffer, None, Some(c), TextAttributes::empty());
            }
            None => self.write_str(color::BG_DEFAULT),
        }
        self.current_bg = bg;
    }

    /// Set text attributes, only writing changes.
    pub fn set_attributes(&mut self, attrs: TextAttributes) {
        if self.current_attrs == attrs {
            return;
        }

        let removed = self.current_attrs - attrs;
        if !removed.is_empty() {
            // 22 turns off bold and dim together.
            if removed.intersects(TextAttributes::BOLD | TextAttributes::DIM) {
                self.write_str(attr::RESET_INTENSITY);
                self.current_attrs -= TextAttributes::BOLD | TextAttributes::DIM;
            }
            if removed.contains(TextAttributes::ITALIC) {
                self.write_str(attr::RESET_ITALIC);
            }
            if removed.contains(TextAttributes::UNDERLINE) {
                self.write_str(attr::RESET_UNDERLINE);
            }
            if removed.contains(TextAttributes::REVERSE) {
                self.write_str(attr::RESET_REVERSE);
            }
            self.current_attrs -= removed;
        }

        let to_add = attrs - self.current_attrs;
        if !to_add.is_empty() {
            let _ = ansi::write_sgr(&mut self.buffer, None, None, to_add);
        }

        self.current_attrs = attrs;
    }

    /// Write a cell at the current cursor position.
    pub fn write_cell(&mut self, cell: &Cell) {
        if cell.is_continuation() {
            return;
        }
        self.set_attributes(cell.attributes);
        self.set_fg(cell.fg);
        self.set_bg(cell.bg);

        match cell.content {
            CellContent::Char(c) => {
                let mut buf = [0u8; 4];
                self.buffer
                    .extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            CellContent::Empty => self.buffer.push(b' '),
            CellContent::Continuation => {}
        }

        self.cursor_col += cell.display_width() as u32;
    }

    /// Reset all ANSI attributes.
    pub fn reset(&mut self) {
        self.write_str(ansi::RESET);
        self.current_fg = None;
        self.current_bg = None;
        self.current_attrs = TextAttributes::empty();
    }

    /// Flush the buffer to the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.buffer)?;
        self.bytes_flushed += self.buffer.len();
        self.buffer.clear();
        self.writer.flush()
    }

    /// Total bytes handed to the underlying writer.
    #[must_use]
    pub fn bytes_flushed(&self) -> usize {
        self.bytes_flushed
    }

    /// Get the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Get a reference to the buffer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Clear the buffer without flushing.
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }
}

/// Count decimal digits in a number.
fn digits(n: u32) -> usize {
    if n == 0 { 1 } else { (n.ilog10() + 1) as usize }
}

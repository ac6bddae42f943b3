//! ANSI escape sequence generation and parsing.
//!
//! Output side: SGR encoding of cell styles ([`sgr_for`], [`write_sgr`]) and
//! the state-tracking [`AnsiWriter`]. Input side: a tolerant tokenizer
//! ([`tokenize`]) and the cell codec ([`ansi_string_to_cells`],
//! [`cells_to_ansi`]).

pub mod output;
pub mod parse;
pub mod sequences;

pub use output::AnsiWriter;
pub use parse::{
    AnsiToken, SgrState, Tokens, ansi_string_to_cells, cells_to_ansi, strip_ansi, tokenize,
    visible_width,
};
pub use sequences::*;

use crate::color::Rgb;
use crate::style::TextAttributes;
use std::io::{self, Write};

/// Write a u8 as decimal digits to a writer without formatting overhead.
#[inline]
fn write_u8_decimal(w: &mut impl Write, n: u8) -> io::Result<()> {
    if n >= 100 {
        w.write_all(&[b'0' + n / 100, b'0' + (n / 10) % 10, b'0' + n % 10])
    } else if n >= 10 {
        w.write_all(&[b'0' + n / 10, b'0' + n % 10])
    } else {
        w.write_all(&[b'0' + n])
    }
}

/// Write a u32 as decimal digits to a writer without formatting overhead.
#[inline]
fn write_u32_decimal(w: &mut impl Write, n: u32) -> io::Result<()> {
    if n < 10 {
        return w.write_all(&[b'0' + n as u8]);
    }
    let mut buf = [0u8; 10];
    let mut i = buf.len();
    let mut val = n;
    while val > 0 {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
    }
    w.write_all(&buf[i..])
}

fn write_separator(w: &mut impl Write, first: &mut bool) -> io::Result<()> {
    if *first {
        *first = false;
        Ok(())
    } else {
        w.write_all(b";")
    }
}

fn write_rgb_params(w: &mut impl Write, lead: &[u8], color: Rgb) -> io::Result<()> {
    w.write_all(lead)?;
    write_u8_decimal(w, color.r)?;
    w.write_all(b";")?;
    write_u8_decimal(w, color.g)?;
    w.write_all(b";")?;
    write_u8_decimal(w, color.b)
}

/// Write one combined SGR sequence for the given style components.
///
/// Parameters appear in a fixed order: true-color foreground, true-color
/// background, then attribute codes 1/2/3/4/7. Writes nothing when every
/// component is empty.
pub fn write_sgr(
    w: &mut impl Write,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    attrs: TextAttributes,
) -> io::Result<()> {
    if fg.is_none() && bg.is_none() && attrs.is_empty() {
        return Ok(());
    }
    w.write_all(b"\x1b[")?;
    let mut first = true;
    if let Some(fg) = fg {
        write_separator(w, &mut first)?;
        write_rgb_params(w, b"38;2;", fg)?;
    }
    if let Some(bg) = bg {
        write_separator(w, &mut first)?;
        write_rgb_params(w, b"48;2;", bg)?;
    }
    for (flag, code) in TextAttributes::SGR_CODES {
        if attrs.contains(flag) {
            write_separator(w, &mut first)?;
            write_u8_decimal(w, code)?;
        }
    }
    w.write_all(b"m")
}

/// SGR sequence for the given style components as a string.
#[must_use]
pub fn sgr_for(fg: Option<Rgb>, bg: Option<Rgb>, attrs: TextAttributes) -> String {
    let mut buf = Vec::with_capacity(32);
    // Writing into a Vec cannot fail.
    let _ = write_sgr(&mut buf, fg, bg, attrs);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Generate SGR sequence for a true-color foreground.
#[must_use]
pub fn fg_color(color: Rgb) -> String {
    sgr_for(Some(color), None, TextAttributes::empty())
}

/// Generate SGR sequence for a true-color background.
#[must_use]
pub fn bg_color(color: Rgb) -> String {
    sgr_for(None, Some(color), TextAttributes::empty())
}

/// Generate cursor position sequence (0-indexed input, 1-indexed output).
#[must_use]
pub fn cursor_position(row: u32, col: u32) -> String {
    let mut buf = Vec::new();
    let _ = write_cursor_position(&mut buf, row, col);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write cursor position sequence to a writer.
pub fn write_cursor_position(w: &mut impl Write, row: u32, col: u32) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, row.saturating_add(1))?;
    w.write_all(b";")?;
    write_u32_decimal(w, col.saturating_add(1))?;
    w.write_all(b"H")
}

/// Write relative cursor movement to a writer.
pub fn write_cursor_move(w: &mut impl Write, dx: i32, dy: i32) -> io::Result<()> {
    if dy < 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dy.unsigned_abs())?;
        w.write_all(b"A")?;
    } else if dy > 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dy.unsigned_abs())?;
        w.write_all(b"B")?;
    }

    if dx > 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dx.unsigned_abs())?;
        w.write_all(b"C")?;
    } else if dx < 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dx.unsigned_abs())?;
        w.write_all(b"D")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sgr_order() {
        let attrs = TextAttributes::REVERSE | TextAttributes::BOLD | TextAttributes::DIM;
        assert_eq!(
            sgr_for(Some(Rgb::new(255, 0, 10)), None, attrs),
            "\x1b[38;2;255;0;10;1;2;7m"
        );
    }

    #[test]
    fn test_sgr_empty() {
        assert_eq!(sgr_for(None, None, TextAttributes::empty()), "");
    }

    #[test]
    fn test_colors() {
        assert_eq!(fg_color(Rgb::RED), "\x1b[38;2;255;0;0m");
        assert_eq!(bg_color(Rgb::new(0, 9, 99)), "\x1b[48;2;0;9;99m");
    }

    #[test]
    fn test_cursor_sequences() {
        assert_eq!(cursor_position(0, 0), "\x1b[1;1H");
        assert_eq!(cursor_position(23, 79), "\x1b[24;80H");

        let mut buf = Vec::new();
        write_cursor_move(&mut buf, -3, 2).unwrap();
        assert_eq!(buf, b"\x1b[2B\x1b[3D");
    }
}

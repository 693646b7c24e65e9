#![forbid(unsafe_code)]

//! Cell grid.

use unicode_width::UnicodeWidthChar;

use crate::geometry::Rect;
use crate::style::Style;

/// Marker character stored in the trailing cell of a double-width glyph.
///
/// Backends must skip continuation cells when presenting a row.
pub const CONTINUATION: char = '\0';

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Displayed character ([`CONTINUATION`] for wide-glyph trailers).
    pub ch: char,
    /// Resolved style.
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

impl Cell {
    /// Create a cell.
    #[must_use]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

/// A rectangular grid of styled cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a blank buffer.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    /// Buffer width in cells.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Full-buffer bounds.
    #[must_use]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Read a cell; `None` out of bounds.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write a cell; out-of-bounds writes are discarded.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Reset every cell to the blank default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Fill an area with one cell, clipped to the buffer.
    pub fn fill(&mut self, area: Rect, cell: Cell) {
        let area = area.intersection(&self.area());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Merge a style over every cell in an area, keeping characters.
    pub fn set_style_area(&mut self, area: Rect, style: Style) {
        let area = area.intersection(&self.area());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(i) = self.index(x, y) {
                    self.cells[i].style = style.merge(&self.cells[i].style);
                }
            }
        }
    }

    /// Draw a text span at `(x, y)`, clipped at `limit` (exclusive) and at
    /// the buffer edge. Returns the x position after the last drawn cell.
    ///
    /// Double-width glyphs occupy two cells; the trailer is marked with
    /// [`CONTINUATION`]. A wide glyph that would straddle the limit is
    /// dropped.
    pub fn draw_span(&mut self, x: u16, y: u16, text: &str, style: Style, limit: u16) -> u16 {
        let limit = limit.min(self.width);
        let mut x = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if x.saturating_add(w) > limit {
                break;
            }
            self.set(x, y, Cell::new(ch, style));
            if w == 2 {
                self.set(x + 1, y, Cell::new(CONTINUATION, style));
            }
            x += w;
        }
        x
    }

    /// Copy `src` into this buffer with its origin at `(dest_x, dest_y)`,
    /// clipped to this buffer's bounds.
    pub fn blit(&mut self, src: &Buffer, dest_x: u16, dest_y: u16) {
        for y in 0..src.height {
            for x in 0..src.width {
                if let Some(cell) = src.get(x, y) {
                    self.set(dest_x.saturating_add(x), dest_y.saturating_add(y), *cell);
                }
            }
        }
    }

    /// Plain text of one row, with continuation cells elided. Test helper.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::new();
        for x in 0..self.width {
            match self.get(x, y) {
                Some(cell) if cell.ch != CONTINUATION => out.push(cell.ch),
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn draw_span_clips_at_limit() {
        let mut buf = Buffer::new(10, 1);
        let next = buf.draw_span(0, 0, "hello world", Style::default(), 5);
        assert_eq!(next, 5);
        assert_eq!(buf.row_text(0), "hello     ");
    }

    #[test]
    fn draw_span_returns_next_column() {
        let mut buf = Buffer::new(20, 1);
        let next = buf.draw_span(3, 0, "ab", Style::default(), 20);
        assert_eq!(next, 5);
    }

    #[test]
    fn wide_glyphs_take_two_cells() {
        let mut buf = Buffer::new(6, 1);
        let next = buf.draw_span(0, 0, "漢a", Style::default(), 6);
        assert_eq!(next, 3);
        assert_eq!(buf.get(1, 0).unwrap().ch, CONTINUATION);
        assert_eq!(buf.row_text(0), "漢a   ");
    }

    #[test]
    fn wide_glyph_straddling_limit_is_dropped() {
        let mut buf = Buffer::new(6, 1);
        let next = buf.draw_span(0, 0, "a漢", Style::default(), 2);
        assert_eq!(next, 1);
        assert_eq!(buf.get(1, 0).unwrap().ch, ' ');
    }

    #[test]
    fn out_of_bounds_writes_are_discarded() {
        let mut buf = Buffer::new(2, 2);
        buf.set(5, 5, Cell::new('x', Style::default()));
        buf.draw_span(0, 9, "y", Style::default(), 2);
        assert!(buf.cells.iter().all(|cell| cell.ch == ' '));
    }

    #[test]
    fn set_style_area_keeps_characters() {
        let mut buf = Buffer::new(4, 1);
        buf.draw_span(0, 0, "abcd", Style::default(), 4);
        buf.set_style_area(Rect::new(1, 0, 2, 1), Style::new().fg(Color::Red));
        assert_eq!(buf.row_text(0), "abcd");
        assert_eq!(buf.get(1, 0).unwrap().style.fg, Some(Color::Red));
        assert_eq!(buf.get(0, 0).unwrap().style.fg, None);
    }

    #[test]
    fn blit_copies_with_offset_and_clips() {
        let mut dest = Buffer::new(4, 2);
        let mut src = Buffer::new(3, 1);
        src.draw_span(0, 0, "xyz", Style::default(), 3);
        dest.blit(&src, 2, 1);
        assert_eq!(dest.row_text(1), "  xy");
    }
}

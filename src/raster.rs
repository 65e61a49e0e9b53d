//! Off-screen render buffer.
//!
//! A `Raster` is a grid of coloured character cells. Entities are drawn
//! into it with `render`, then the frontend blits it to the screen.

use crate::entities::{GameObject, Size};

/// Closed colour palette for cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tint {
    Black,
    White,
    Grey,
    DarkGrey,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub tint: Tint,
}

impl Cell {
    pub const BLANK: Cell = Cell { glyph: ' ', tint: Tint::Black };

    pub const fn new(glyph: char, tint: Tint) -> Self {
        Cell { glyph, tint }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Raster {
    pub fn new(size: Size) -> Self {
        let width = size.width.max(0) as usize;
        let height = size.height.max(0) as usize;
        Raster {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Writes are clipped: coordinates outside the buffer are ignored.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Row `y` as plain text, handy for snapshots in tests and logs. Empty
    /// past the last row.
    pub fn row_text(&self, y: usize) -> String {
        self.row(y)
            .map(|row| row.iter().map(|c| c.glyph).collect())
            .unwrap_or_default()
    }
}

/// Draw an entity's sprite at its bounding rectangle. Inactive entities are
/// skipped; transparent sprite cells leave the target untouched.
pub fn render(entity: &GameObject, target: &mut Raster) {
    if !entity.active {
        return;
    }
    let sprite = &entity.sprite;
    for dy in 0..sprite.height() {
        for dx in 0..sprite.width() {
            if let Some(cell) = sprite.cell(dx, dy) {
                target.set(entity.rect.x + dx, entity.rect.y + dy, cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_writes_are_clipped() {
        let mut r = Raster::new(Size::new(3, 2));
        let star = Cell::new('*', Tint::White);
        r.set(-1, 0, star);
        r.set(3, 0, star);
        r.set(0, 2, star);
        r.set(2, 1, star);
        assert_eq!(r.row_text(0), "   ");
        assert_eq!(r.row_text(1), "  *");
        assert_eq!(r.get(5, 5), None);
    }

    #[test]
    fn rows_past_the_bottom_are_none() {
        let r = Raster::new(Size::new(3, 2));
        assert_eq!(r.row(1).map(<[Cell]>::len), Some(3));
        assert_eq!(r.row(2), None);
        assert_eq!(r.row_text(7), "");
    }

    #[test]
    fn rows_cover_the_buffer() {
        let r = Raster::new(Size::new(4, 3));
        assert_eq!(r.rows().count(), 3);
        assert!(r.rows().all(|row| row.len() == 4));
    }
}

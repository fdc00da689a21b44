use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// `Default` has no colour of its own; callers substitute what lies beneath.
    pub fn rgba(self) -> Option<[u8; 4]> {
        match self {
            Color::Default => None,
            Color::Black => Some([12, 12, 16, 255]),
            Color::Red => Some([205, 49, 49, 255]),
            Color::Green => Some([52, 140, 64, 255]),
            Color::Yellow => Some([229, 200, 60, 255]),
            Color::Blue => Some([36, 84, 200, 255]),
            Color::Magenta => Some([188, 63, 188, 255]),
            Color::Cyan => Some([17, 168, 205, 255]),
            Color::White => Some([236, 236, 236, 255]),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub fg: Color,
    pub bg: Color,
    pub ch: char,
}

impl Cell {
    pub fn background(bg: Color) -> Self {
        Self {
            fg: Color::Default,
            bg,
            ch: ' ',
        }
    }

    pub fn glyph(ch: char, fg: Color, bg: Color) -> Self {
        Self { fg, bg, ch }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("cell ({x}, {y}) is outside a {width}x{height} canvas")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Rectangular block of cells; unset cells are transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    cells: Vec<Option<Cell>>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn filled(width: u32, height: u32, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![Some(cell); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn set(&mut self, x: u32, y: u32, cell: Cell) -> Result<(), CanvasError> {
        let index = self.index_of(x, y).ok_or(CanvasError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.cells[index] = Some(cell);
        Ok(())
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Cell> {
        self.index_of(x, y).and_then(|index| self.cells[index])
    }

    /// Visits every set cell as `(x, y, cell)`.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, Cell)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            cell.map(|cell| (index as u32 % width, index as u32 / width, cell))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_fully_transparent() {
        let canvas = Canvas::new(3, 2);
        assert_eq!(canvas.cells().count(), 0);
        assert_eq!(canvas.get(0, 0), None);
    }

    #[test]
    fn set_and_get_address_column_then_row() {
        let mut canvas = Canvas::new(3, 2);
        let cell = Cell::glyph('o', Color::White, Color::Cyan);
        canvas.set(2, 1, cell).expect("in bounds");

        assert_eq!(canvas.get(2, 1), Some(cell));
        assert_eq!(canvas.get(1, 2), None);
        assert_eq!(canvas.cells().collect::<Vec<_>>(), vec![(2, 1, cell)]);
    }

    #[test]
    fn set_rejects_out_of_bounds() {
        let mut canvas = Canvas::new(2, 2);
        let err = canvas
            .set(2, 0, Cell::background(Color::Red))
            .expect_err("out of bounds");
        assert_eq!(
            err,
            CanvasError::OutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            }
        );
    }

    #[test]
    fn default_color_has_no_rgba() {
        assert_eq!(Color::Default.rgba(), None);
        assert!(Color::Cyan.rgba().is_some());
    }
}

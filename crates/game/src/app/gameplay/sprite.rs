use grid_engine::{Canvas, CanvasError, Cell, Color};

use super::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Body,
    Eye,
    Crest,
    Mouth,
}

type Pattern = (u32, u32, &'static [(u32, u32, Part)]);

const LEFT: Pattern = (2, 2, &[(0, 0, Part::Eye), (1, 0, Part::Body), (1, 1, Part::Body)]);
const RIGHT: Pattern = (2, 2, &[(0, 0, Part::Body), (1, 0, Part::Eye), (0, 1, Part::Body)]);
const UP: Pattern = (
    3,
    2,
    &[
        (0, 0, Part::Body),
        (1, 0, Part::Crest),
        (2, 0, Part::Body),
        (1, 1, Part::Body),
    ],
);
const DOWN: Pattern = (
    3,
    2,
    &[
        (0, 0, Part::Eye),
        (1, 0, Part::Mouth),
        (2, 0, Part::Eye),
        (1, 1, Part::Body),
    ],
);

/// Facing to sprite lookup. The four canvases are built once for the
/// configured body colour.
#[derive(Debug, Clone)]
pub(crate) struct SpriteSelector {
    up: Canvas,
    down: Canvas,
    left: Canvas,
    right: Canvas,
}

impl SpriteSelector {
    pub(crate) fn new(body: Color) -> Result<Self, CanvasError> {
        Ok(Self {
            up: build(UP, body)?,
            down: build(DOWN, body)?,
            left: build(LEFT, body)?,
            right: build(RIGHT, body)?,
        })
    }

    pub(crate) fn canvas_for(&self, facing: Direction) -> Canvas {
        match facing {
            Direction::Up => self.up.clone(),
            Direction::Down => self.down.clone(),
            Direction::Left => self.left.clone(),
            Direction::Right => self.right.clone(),
        }
    }
}

fn build((width, height, cells): Pattern, body: Color) -> Result<Canvas, CanvasError> {
    let mut canvas = Canvas::new(width, height);
    for &(x, y, part) in cells {
        canvas.set(x, y, part_cell(part, body))?;
    }
    Ok(canvas)
}

fn part_cell(part: Part, body: Color) -> Cell {
    match part {
        Part::Body => Cell::background(body),
        Part::Eye => Cell::glyph('o', Color::White, body),
        Part::Crest => Cell::glyph('#', Color::White, body),
        Part::Mouth => Cell::glyph('_', Color::Black, body),
    }
}

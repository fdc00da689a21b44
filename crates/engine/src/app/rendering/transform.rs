use crate::app::Point;

#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Pixel footprint of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub width_px: u32,
    pub height_px: u32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width_px: 10,
            height_px: 14,
        }
    }
}

impl CellMetrics {
    pub(crate) fn normalized(self) -> Self {
        Self {
            width_px: self.width_px.max(1),
            height_px: self.height_px.max(1),
        }
    }

    pub fn columns(&self, viewport: Viewport) -> i32 {
        (viewport.width / self.width_px.max(1)) as i32
    }

    pub fn rows(&self, viewport: Viewport) -> i32 {
        (viewport.height / self.height_px.max(1)) as i32
    }
}

pub fn world_to_screen_cell(world: Point, offset: Point) -> Point {
    world - offset
}

pub fn screen_cell_to_world(screen: Point, offset: Point) -> Point {
    screen + offset
}

pub fn screen_px_to_cell(x_px: f64, y_px: f64, metrics: CellMetrics) -> Point {
    let metrics = metrics.normalized();
    Point::new(
        (x_px / metrics.width_px as f64).floor() as i32,
        (y_px / metrics.height_px as f64).floor() as i32,
    )
}

pub fn cell_origin_px(cell: Point, metrics: CellMetrics) -> (i32, i32) {
    (
        cell.x * metrics.width_px as i32,
        cell.y * metrics.height_px as i32,
    )
}

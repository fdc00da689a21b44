use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::{Cell, Color, Level, Point};

use super::glyphs::{glyph_for, Glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::transform::{cell_origin_px, world_to_screen_cell, CellMetrics, Viewport};

const CLEAR_COLOR: [u8; 4] = [20, 22, 28, 255];
const DEFAULT_FOREGROUND_COLOR: [u8; 4] = [236, 236, 236, 255];

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
    cell_metrics: CellMetrics,
}

impl Renderer {
    pub fn new(window: Arc<Window>, cell_metrics: CellMetrics) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
            cell_metrics: cell_metrics.normalized(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub(crate) fn render_level(&mut self, level: &Level) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }
        let viewport = self.viewport;
        let metrics = self.cell_metrics;
        let frame = self.pixels.frame_mut();
        draw_level(frame, viewport, metrics, level);
        self.pixels.render()
    }
}

pub(crate) fn draw_level(frame: &mut [u8], viewport: Viewport, metrics: CellMetrics, level: &Level) {
    let clear_color = level.background().bg.rgba().unwrap_or(CLEAR_COLOR);
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&clear_color);
    }

    let offset = level.offset();
    for entity in level.entities() {
        for (x, y, cell) in entity.canvas.cells() {
            let world = entity.position + Point::new(x as i32, y as i32);
            let screen = world_to_screen_cell(world, offset);
            draw_cell(frame, viewport, metrics, screen, cell);
        }
    }
}

fn draw_cell(
    frame: &mut [u8],
    viewport: Viewport,
    metrics: CellMetrics,
    screen_cell: Point,
    cell: Cell,
) {
    if screen_cell.x < 0
        || screen_cell.y < 0
        || screen_cell.x >= metrics.columns(viewport)
        || screen_cell.y >= metrics.rows(viewport)
    {
        return;
    }
    let (left, top) = cell_origin_px(screen_cell, metrics);

    if let Some(bg) = cell.bg.rgba() {
        draw_filled_rect(
            frame,
            viewport,
            left,
            top,
            metrics.width_px as i32,
            metrics.height_px as i32,
            bg,
        );
    }

    if let Some(glyph) = glyph_for(cell.ch) {
        let fg = match cell.fg {
            Color::Default => DEFAULT_FOREGROUND_COLOR,
            other => other.rgba().unwrap_or(DEFAULT_FOREGROUND_COLOR),
        };
        draw_glyph_centered(frame, viewport, metrics, left, top, glyph, fg);
    }
}

fn draw_glyph_centered(
    frame: &mut [u8],
    viewport: Viewport,
    metrics: CellMetrics,
    left: i32,
    top: i32,
    glyph: Glyph,
    color: [u8; 4],
) {
    let scale = (metrics.width_px as i32 / (GLYPH_WIDTH + 1))
        .min(metrics.height_px as i32 / (GLYPH_HEIGHT + 1))
        .max(1);
    let inset_x = (metrics.width_px as i32 - GLYPH_WIDTH * scale) / 2;
    let inset_y = (metrics.height_px as i32 - GLYPH_HEIGHT * scale) / 2;

    for row in 0..GLYPH_HEIGHT {
        for col in 0..GLYPH_WIDTH {
            if !glyph.is_set(col, row) {
                continue;
            }
            draw_filled_rect(
                frame,
                viewport,
                left + inset_x + col * scale,
                top + inset_y + row * scale,
                scale,
                scale,
                color,
            );
        }
    }
}

fn draw_filled_rect(
    frame: &mut [u8],
    viewport: Viewport,
    x: i32,
    y: i32,
    rect_width: i32,
    rect_height: i32,
    color: [u8; 4],
) {
    let start_x = x.max(0);
    let start_y = y.max(0);
    let end_x = (x + rect_width).min(viewport.width as i32);
    let end_y = (y + rect_height).min(viewport.height as i32);
    if end_x <= start_x || end_y <= start_y {
        return;
    }

    for py in start_y..end_y {
        for px in start_x..end_x {
            write_pixel_rgba(frame, viewport.width as usize, px as usize, py as usize, color);
        }
    }
}

fn write_pixel_rgba(frame: &mut [u8], width: usize, x: usize, y: usize, color: [u8; 4]) {
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    frame[byte_offset..end].copy_from_slice(&color);
}

mod glyphs;
mod renderer;
mod transform;

pub use renderer::Renderer;
pub use transform::{
    cell_origin_px, screen_cell_to_world, screen_px_to_cell, world_to_screen_cell, CellMetrics,
    Viewport,
};

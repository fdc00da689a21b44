mod canvas;
mod input;
mod level;
mod loop_runner;
mod metrics;
mod rendering;

pub use canvas::{Canvas, CanvasError, Cell, Color};
pub use input::{PointerButton, PointerEvent, PointerEventKind};
pub use level::{Collision, Entity, EntityId, EntityKind, Level, Point, Scene};
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use rendering::{
    cell_origin_px, screen_cell_to_world, screen_px_to_cell, world_to_screen_cell, CellMetrics,
    Renderer, Viewport,
};

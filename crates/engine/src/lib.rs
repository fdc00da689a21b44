//! Cell-grid game engine: an entity container with a pannable view, rectangle
//! overlap detection, grid-cell pointer events and a windowed frame loop.

pub mod app;

pub use app::{
    cell_origin_px, run_app, screen_cell_to_world, screen_px_to_cell, world_to_screen_cell,
    AppError, Canvas, CanvasError, Cell, CellMetrics, Collision, Color, Entity, EntityId,
    EntityKind, Level, LoopConfig, Point, PointerButton, PointerEvent, PointerEventKind, Renderer,
    Scene, Viewport,
};

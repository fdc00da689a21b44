use grid_engine::{
    screen_cell_to_world, Canvas, Cell, Color, EntityId, EntityKind, Level, Point, PointerButton,
    PointerEvent, PointerEventKind,
};
use tracing::info;

use super::world_state::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PanState {
    Idle,
    Panning { anchor: Point },
}

/// Pointer handling for the view and the target: middle-drag pans, left
/// click places the target (with a marker), right click clears it.
#[derive(Debug)]
pub(crate) struct TargetController {
    pan: PanState,
    marker: Option<EntityId>,
}

impl Default for TargetController {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetController {
    pub(crate) fn new() -> Self {
        Self {
            pan: PanState::Idle,
            marker: None,
        }
    }

    pub(crate) fn handle_pointer(
        &mut self,
        event: PointerEvent,
        world: &mut WorldState,
        level: &mut Level,
    ) {
        if let PanState::Panning { anchor } = self.pan {
            let delta = event.position - anchor;
            level.set_offset(level.offset() - delta);
            self.pan = PanState::Panning {
                anchor: event.position,
            };
        }

        match (event.kind, event.button) {
            (PointerEventKind::ButtonDown, PointerButton::Middle) => {
                if self.pan == PanState::Idle {
                    info!(x = event.position.x, y = event.position.y, "pan_started");
                }
                self.pan = PanState::Panning {
                    anchor: event.position,
                };
            }
            (PointerEventKind::ButtonDown, PointerButton::Left) => {
                let world_point = screen_cell_to_world(event.position, level.offset());
                self.place_target(world_point, world, level);
            }
            (PointerEventKind::ButtonDown, PointerButton::Right) => {
                self.clear_target(world, level);
            }
            (PointerEventKind::ButtonUp, _) => {
                if self.pan != PanState::Idle {
                    let offset = level.offset();
                    info!(offset_x = offset.x, offset_y = offset.y, "pan_ended");
                    self.pan = PanState::Idle;
                }
            }
            _ => {}
        }
    }

    /// Moves the target to `world_point`, replacing any existing marker.
    pub(crate) fn place_target(
        &mut self,
        world_point: Point,
        world: &mut WorldState,
        level: &mut Level,
    ) {
        self.remove_marker(level);
        world.set_target(world_point);
        self.marker = Some(level.spawn(
            EntityKind::Marker,
            world_point,
            Canvas::filled(1, 1, Cell::glyph('!', Color::Red, Color::White)),
        ));
        info!(x = world_point.x, y = world_point.y, "target_set");
    }

    pub(crate) fn clear_target(&mut self, world: &mut WorldState, level: &mut Level) {
        self.remove_marker(level);
        if let Some(previous) = world.clear_target() {
            info!(x = previous.x, y = previous.y, "target_cleared");
        }
    }

    fn remove_marker(&mut self, level: &mut Level) {
        if let Some(marker) = self.marker.take() {
            level.despawn(marker);
        }
    }
}

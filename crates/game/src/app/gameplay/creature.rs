use std::time::Duration;

use grid_engine::{EntityId, EntityKind, Level, Point};
use serde::Deserialize;

use super::direction::{Direction, DirectionSource};
use super::sprite::SpriteSelector;
use super::world_state::WorldState;

/// Per-creature stats. Only `move_speed` drives behaviour; the rest is
/// carried as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Attributes {
    pub(crate) health: i32,
    pub(crate) damage: i32,
    pub(crate) move_speed: i32,
    pub(crate) attack_rate: i32,
    pub(crate) can_fly: bool,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            health: 40,
            damage: 5,
            move_speed: 1,
            attack_rate: 1,
            can_fly: false,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Creature {
    entity: EntityId,
    previous_position: Point,
    facing: Direction,
    accumulated: Duration,
    attributes: Attributes,
}

impl Creature {
    /// Queues the creature's entity facing right. The entity becomes visible
    /// to the level after the next `apply_pending`.
    pub(crate) fn spawn(
        level: &mut Level,
        position: Point,
        attributes: Attributes,
        sprites: &SpriteSelector,
    ) -> Self {
        let facing = Direction::Right;
        let entity = level.spawn(EntityKind::Creature, position, sprites.canvas_for(facing));
        Self {
            entity,
            previous_position: position,
            facing,
            accumulated: Duration::ZERO,
            attributes,
        }
    }

    pub(crate) fn entity(&self) -> EntityId {
        self.entity
    }

    pub(crate) fn facing(&self) -> Direction {
        self.facing
    }

    pub(crate) fn previous_position(&self) -> Point {
        self.previous_position
    }

    /// Advances the decision timer by `frame_dt`. On a decision tick the
    /// creature records its position, steps toward the target (or wanders
    /// when there is none) and refreshes its sprite. Returns the direction
    /// moved, if any.
    pub(crate) fn update(
        &mut self,
        frame_dt: Duration,
        world: &WorldState,
        directions: &mut dyn DirectionSource,
        sprites: &SpriteSelector,
        level: &mut Level,
    ) -> Option<Direction> {
        self.accumulated = self.accumulated.saturating_add(frame_dt);
        if self.accumulated < world.tick_interval() {
            return None;
        }

        let position = level.position(self.entity)?;
        self.previous_position = position;

        let direction = match world.target() {
            Some(target) => Direction::toward(position, target),
            None => Some(directions.next_fallback()),
        };

        if let Some(direction) = direction {
            level.set_position(
                self.entity,
                position + direction.step(self.attributes.move_speed),
            );
            if direction != self.facing {
                self.facing = direction;
                level.set_canvas(self.entity, sprites.canvas_for(direction));
            }
        }

        self.accumulated = Duration::ZERO;
        direction
    }

    /// Restores the position recorded on the last decision tick.
    pub(crate) fn revert(&self, level: &mut Level) -> bool {
        level.set_position(self.entity, self.previous_position)
    }
}

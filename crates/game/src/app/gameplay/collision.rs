use grid_engine::{Collision, EntityKind, Level};

use super::creature::Creature;

/// What a creature ran into, as far as movement is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CounterpartKind {
    Obstacle,
    Creature,
    Other,
}

impl From<EntityKind> for CounterpartKind {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Obstacle => CounterpartKind::Obstacle,
            EntityKind::Creature => CounterpartKind::Creature,
            EntityKind::Marker | EntityKind::Decoration => CounterpartKind::Other,
        }
    }
}

/// Undoes the creature's last move when it overlaps something solid.
/// Returns whether a revert happened.
pub(crate) fn resolve_collision(
    creature: &Creature,
    collision: &Collision,
    level: &mut Level,
) -> bool {
    match CounterpartKind::from(collision.counterpart_kind) {
        CounterpartKind::Obstacle | CounterpartKind::Creature => creature.revert(level),
        CounterpartKind::Other => false,
    }
}

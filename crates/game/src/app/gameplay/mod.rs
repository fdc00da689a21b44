mod collision;
mod creature;
mod direction;
mod sprite;
mod target;
mod world_state;

use std::time::Duration;

use grid_engine::{
    Canvas, CanvasError, Cell, Collision, EntityKind, Level, Point, PointerEvent, Scene,
};
use tracing::{debug, info};

use super::config::{ObstacleConfig, SimConfig};
use collision::resolve_collision;
use creature::Creature;
use direction::{DirectionSource, SeededDirections};
use sprite::SpriteSelector;
use target::TargetController;
use world_state::WorldState;

pub(crate) use creature::Attributes;

pub(crate) fn build_scene(config: &SimConfig) -> Result<FlockScene, CanvasError> {
    let directions = match config.rng_seed {
        Some(seed) => SeededDirections::from_seed(seed),
        None => SeededDirections::from_entropy(),
    };
    FlockScene::new(config, Box::new(directions))
}

pub(crate) fn build_level(config: &SimConfig) -> Level {
    Level::new(Cell::background(config.background))
}

/// Creatures chasing a pointer-placed target around a single obstacle.
pub(crate) struct FlockScene {
    background: Cell,
    obstacle: ObstacleConfig,
    spawn_points: Vec<Point>,
    attributes: Attributes,
    sprites: SpriteSelector,
    directions: Box<dyn DirectionSource>,
    world: WorldState,
    target: TargetController,
    creatures: Vec<Creature>,
}

impl FlockScene {
    pub(crate) fn new(
        config: &SimConfig,
        directions: Box<dyn DirectionSource>,
    ) -> Result<Self, CanvasError> {
        Ok(Self {
            background: Cell::background(config.background),
            obstacle: config.obstacle.clone(),
            spawn_points: config.creatures.clone(),
            attributes: config.attributes,
            sprites: SpriteSelector::new(config.creature_color)?,
            directions,
            world: WorldState::new(config.tick_interval()),
            target: TargetController::new(),
            creatures: Vec::new(),
        })
    }

    fn creature_for(&self, collision: &Collision) -> Option<&Creature> {
        self.creatures
            .iter()
            .find(|creature| creature.entity() == collision.entity)
    }
}

impl Scene for FlockScene {
    fn load(&mut self, level: &mut Level) {
        level.set_background(self.background);
        level.spawn(
            EntityKind::Obstacle,
            Point::new(self.obstacle.x, self.obstacle.y),
            Canvas::filled(
                self.obstacle.width,
                self.obstacle.height,
                Cell::background(self.obstacle.color),
            ),
        );

        self.creatures = self
            .spawn_points
            .iter()
            .map(|&position| Creature::spawn(level, position, self.attributes, &self.sprites))
            .collect();

        info!(
            creatures = self.creatures.len(),
            tick_interval_ms = self.world.tick_interval().as_millis() as u64,
            health = self.attributes.health,
            damage = self.attributes.damage,
            move_speed = self.attributes.move_speed,
            attack_rate = self.attributes.attack_rate,
            can_fly = self.attributes.can_fly,
            "scene_loaded"
        );
    }

    fn handle_pointer(&mut self, event: PointerEvent, level: &mut Level) {
        self.target.handle_pointer(event, &mut self.world, level);
    }

    fn update(&mut self, frame_dt: Duration, level: &mut Level) {
        for creature in &mut self.creatures {
            creature.update(
                frame_dt,
                &self.world,
                self.directions.as_mut(),
                &self.sprites,
                level,
            );
        }
    }

    fn on_collision(&mut self, collision: Collision, level: &mut Level) {
        let Some(creature) = self.creature_for(&collision) else {
            return;
        };
        if resolve_collision(creature, &collision, level) {
            let restored = creature.previous_position();
            debug!(
                entity = collision.entity.0,
                counterpart = collision.counterpart.0,
                x = restored.x,
                y = restored.y,
                facing = creature.facing().as_token(),
                "creature_reverted"
            );
        }
    }

    fn unload(&mut self, level: &mut Level) {
        self.world.clear_target();
        self.target = TargetController::new();
        self.creatures.clear();
        level.clear();
        info!("scene_unloaded");
    }

    fn debug_title(&self, level: &Level) -> Option<String> {
        let target = match self.world.target() {
            Some(point) => format!("({}, {})", point.x, point.y),
            None => "none".to_string(),
        };
        let offset = level.offset();
        Some(format!(
            "flockgrid | target: {target} | view: ({}, {}) | creatures: {}",
            offset.x,
            offset.y,
            self.creatures.len()
        ))
    }
}

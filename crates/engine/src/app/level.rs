use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::time::Duration;

use serde::Deserialize;

use super::canvas::{Canvas, Cell};
use super::input::PointerEvent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Obstacle,
    Creature,
    Marker,
    Decoration,
}

impl EntityKind {
    /// Only creatures are told about overlaps; everything else is static.
    pub fn receives_collisions(self) -> bool {
        matches!(self, EntityKind::Creature)
    }
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Point,
    pub canvas: Canvas,
    applied_spawn_order: u64,
}

impl Entity {
    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn overlaps(&self, other: &Entity) -> bool {
        let (w, h) = self.size();
        let (ow, oh) = other.size();
        if w == 0 || h == 0 || ow == 0 || oh == 0 {
            return false;
        }
        let (x, y) = (i64::from(self.position.x), i64::from(self.position.y));
        let (ox, oy) = (i64::from(other.position.x), i64::from(other.position.y));
        x < ox + i64::from(ow)
            && ox < x + i64::from(w)
            && y < oy + i64::from(oh)
            && oy < y + i64::from(h)
    }
}

/// Overlap notification addressed to `entity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub entity: EntityId,
    pub counterpart: EntityId,
    pub counterpart_kind: EntityKind,
}

#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Entity container plus the view offset. A world point `p` is drawn at
/// screen cell `p - offset`.
#[derive(Debug, Default)]
pub struct Level {
    allocator: EntityIdAllocator,
    entities: Vec<Entity>,
    pending_spawns: Vec<Entity>,
    pending_despawns: Vec<EntityId>,
    next_applied_spawn_order: u64,
    offset: Point,
    background: Cell,
}

impl Level {
    pub fn new(background: Cell) -> Self {
        Self {
            background,
            ..Self::default()
        }
    }

    pub fn spawn(&mut self, kind: EntityKind, position: Point, canvas: Canvas) -> EntityId {
        let id = self.allocator.allocate();
        self.pending_spawns.push(Entity {
            id,
            kind,
            position,
            canvas,
            applied_spawn_order: 0,
        });
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        let exists_now = self.entities.iter().any(|entity| entity.id == id);
        let pending_spawn = self.pending_spawns.iter().any(|entity| entity.id == id);
        if !exists_now && !pending_spawn {
            return false;
        }
        self.pending_despawns.push(id);
        true
    }

    pub fn apply_pending(&mut self) {
        if !self.pending_despawns.is_empty() {
            self.pending_despawns.sort();
            self.pending_despawns.dedup();
            let pending = &self.pending_despawns;
            self.entities
                .retain(|entity| pending.binary_search(&entity.id).is_err());
            self.pending_spawns
                .retain(|entity| pending.binary_search(&entity.id).is_err());
            self.pending_despawns.clear();
        }

        for mut entity in self.pending_spawns.drain(..) {
            entity.applied_spawn_order = self.next_applied_spawn_order;
            self.next_applied_spawn_order = self.next_applied_spawn_order.saturating_add(1);
            self.entities.push(entity);
        }
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending_spawns.clear();
        self.pending_despawns.clear();
        self.next_applied_spawn_order = 0;
        self.offset = Point::ORIGIN;
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Despawns queued since the last `apply_pending`.
    pub fn pending_despawns(&self) -> &[EntityId] {
        &self.pending_despawns
    }

    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    pub fn position(&self, id: EntityId) -> Option<Point> {
        self.find_entity(id).map(|entity| entity.position)
    }

    pub fn set_position(&mut self, id: EntityId, position: Point) -> bool {
        match self.find_entity_mut(id) {
            Some(entity) => {
                entity.position = position;
                true
            }
            None => false,
        }
    }

    pub fn set_canvas(&mut self, id: EntityId, canvas: Canvas) -> bool {
        match self.find_entity_mut(id) {
            Some(entity) => {
                entity.canvas = canvas;
                true
            }
            None => false,
        }
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    pub fn background(&self) -> Cell {
        self.background
    }

    pub fn set_background(&mut self, background: Cell) {
        self.background = background;
    }

    /// Every overlapping pair, reported once to each side that receives
    /// collisions, in spawn order.
    pub fn detect_collisions(&self) -> Vec<Collision> {
        let mut ordered: Vec<&Entity> = self.entities.iter().collect();
        ordered.sort_by_key(|entity| entity.applied_spawn_order);

        let mut collisions = Vec::new();
        for (index, a) in ordered.iter().enumerate() {
            for b in &ordered[index + 1..] {
                if !a.kind.receives_collisions() && !b.kind.receives_collisions() {
                    continue;
                }
                if !a.overlaps(b) {
                    continue;
                }
                if a.kind.receives_collisions() {
                    collisions.push(Collision {
                        entity: a.id,
                        counterpart: b.id,
                        counterpart_kind: b.kind,
                    });
                }
                if b.kind.receives_collisions() {
                    collisions.push(Collision {
                        entity: b.id,
                        counterpart: a.id,
                        counterpart_kind: a.kind,
                    });
                }
            }
        }
        collisions
    }
}

pub trait Scene {
    fn load(&mut self, level: &mut Level);
    fn handle_pointer(&mut self, event: PointerEvent, level: &mut Level);
    /// Per-frame simulation hook; `frame_dt` is the elapsed time of the frame.
    fn update(&mut self, frame_dt: Duration, level: &mut Level);
    fn on_collision(&mut self, collision: Collision, level: &mut Level);
    fn unload(&mut self, level: &mut Level);
    fn debug_title(&self, _level: &Level) -> Option<String> {
        None
    }
}

pub(crate) struct SceneRuntime {
    scene: Box<dyn Scene>,
    level: Level,
    is_loaded: bool,
}

impl SceneRuntime {
    pub(crate) fn new(scene: Box<dyn Scene>, level: Level) -> Self {
        Self {
            scene,
            level,
            is_loaded: false,
        }
    }

    pub(crate) fn load(&mut self) {
        if self.is_loaded {
            return;
        }
        self.scene.load(&mut self.level);
        self.level.apply_pending();
        self.is_loaded = true;
    }

    /// Input first, then the update pass, then overlap resolution.
    pub(crate) fn run_frame(&mut self, events: &[PointerEvent], frame_dt: Duration) {
        for event in events {
            self.scene.handle_pointer(*event, &mut self.level);
        }
        self.level.apply_pending();

        self.scene.update(frame_dt, &mut self.level);
        self.level.apply_pending();

        for collision in self.level.detect_collisions() {
            self.scene.on_collision(collision, &mut self.level);
        }
        self.level.apply_pending();
    }

    pub(crate) fn level(&self) -> &Level {
        &self.level
    }

    pub(crate) fn debug_title(&self) -> Option<String> {
        self.scene.debug_title(&self.level)
    }

    pub(crate) fn shutdown(&mut self) {
        if self.is_loaded {
            self.scene.unload(&mut self.level);
            self.level.clear();
            self.is_loaded = false;
        }
    }
}

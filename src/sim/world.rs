/// WorldState: static geometry plus the entity list.
///
/// The tile map is the collision oracle. It is never mutated while a tick
/// runs; entities are processed one at a time against it.

use crate::domain::collision::TileMap;
use crate::domain::entity::{Archetype, Entity, EntityId, Physical};
use crate::domain::geometry::{to_world_space, BoundingBox, Point};

#[derive(Clone, Debug)]
pub struct WorldState {
    pub name: String,
    pub map: TileMap,
    pub entities: Vec<Entity>,
    pub tick: u64,
    next_id: u32,
}

impl WorldState {
    pub fn new(map: TileMap) -> Self {
        WorldState {
            name: String::new(),
            map,
            entities: Vec::new(),
            tick: 0,
            next_id: 0,
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a bare entity. Components are attached by the caller.
    pub fn spawn(&mut self, build: impl FnOnce(Entity) -> Entity, position: Point) -> EntityId {
        let id = self.allocate_id();
        self.entities.push(build(Entity::new(id, position)));
        id
    }

    /// Spawn a physics-enabled entity of the given archetype, feet at `position`.
    pub fn spawn_archetype(&mut self, archetype: Archetype, position: Point, speed_x: f32) -> EntityId {
        self.spawn(
            |e| e.with_archetype(archetype)
                .with_bbox(archetype.bounding_box())
                .with_physical(archetype.physical(speed_x)),
            position,
        )
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Entities the physics step simulates: Physical + BoundingBox + Active.
    pub fn simulated(&self) -> impl Iterator<Item = (&Entity, &Physical, &BoundingBox)> {
        self.entities.iter().filter_map(|e| match (&e.physical, &e.bbox) {
            (Some(p), Some(b)) if e.active => Some((e, p, b)),
            _ => None,
        })
    }

    /// World-space box of an entity, if it has one.
    pub fn world_bbox(&self, id: EntityId) -> Option<BoundingBox> {
        let e = self.entity(id)?;
        e.bbox.as_ref().map(|b| to_world_space(b, e.position))
    }

    /// Text picture of the current frame: tiles, with entity boxes drawn on
    /// top. Entities that collided this tick are drawn in lowercase.
    pub fn render_ascii(&self) -> String {
        let mut grid: Vec<Vec<char>> = self.map.rows().iter()
            .map(|row| row.iter().map(|t| t.glyph()).collect())
            .collect();

        for e in &self.entities {
            let (Some(bbox), Some(archetype)) = (e.bbox.as_ref(), e.archetype) else { continue };
            let world = to_world_space(bbox, e.position);
            let glyph = if e.collided_with_world {
                archetype.glyph().to_ascii_lowercase()
            } else {
                archetype.glyph()
            };
            for y in world.top()..=world.bottom() {
                for x in world.left()..=world.right() {
                    if x < 0 || y < 0 { continue; }
                    if let Some(cell) = grid.get_mut(y as usize).and_then(|r| r.get_mut(x as usize)) {
                        *cell = glyph;
                    }
                }
            }
        }

        let mut out = String::new();
        for row in grid {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

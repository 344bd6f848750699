/// Entities: a fat record with optional components.
/// Position is always present; the physics core only touches entities that
/// also carry a bounding box, a Physical component and the Active marker.

use super::geometry::{BoundingBox, Extents, Point};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EntityId(pub u32);

/// Real-valued velocity in pixels per tick.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Vec2f {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2f { x, y }
    }
}

/// Physics-enabled state. Traits are fixed at spawn.
#[derive(Clone, Debug)]
pub struct Physical {
    pub velocity: Vec2f,
    pub gravity_affected: bool,
    pub can_step_up_stairs: bool,
}

impl Physical {
    pub fn new(velocity: Vec2f, gravity_affected: bool) -> Self {
        Physical { velocity, gravity_affected, can_step_up_stairs: false }
    }

    pub fn with_stair_stepping(mut self) -> Self {
        self.can_step_up_stairs = true;
        self
    }
}

/// Spawnable entity kinds and their authored shapes/traits.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Archetype {
    Player,
    Walker,
    Floater,
}

impl Archetype {
    pub fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            'P' => Some(Archetype::Player),
            'E' => Some(Archetype::Walker),
            'F' => Some(Archetype::Floater),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Archetype::Player => 'P',
            Archetype::Walker => 'E',
            Archetype::Floater => 'F',
        }
    }

    /// Local collision box, in entity space.
    pub fn bounding_box(self) -> BoundingBox {
        let size = match self {
            Archetype::Player => Extents::new(3, 5),
            Archetype::Walker => Extents::new(3, 3),
            Archetype::Floater => Extents::new(2, 2),
        };
        BoundingBox::new(Point::default(), size)
    }

    pub fn physical(self, speed_x: f32) -> Physical {
        match self {
            Archetype::Player => Physical::new(Vec2f::new(speed_x, 0.0), true).with_stair_stepping(),
            Archetype::Walker => Physical::new(Vec2f::new(speed_x, 0.0), true),
            Archetype::Floater => Physical::new(Vec2f::new(speed_x, 0.0), false),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub archetype: Option<Archetype>,
    pub position: Point,
    pub bbox: Option<BoundingBox>,
    pub physical: Option<Physical>,
    /// Selects this entity for simulation.
    pub active: bool,
    /// Set by the physics step when this tick's movement was clipped.
    pub collided_with_world: bool,
}

impl Entity {
    pub fn new(id: EntityId, position: Point) -> Self {
        Entity {
            id,
            archetype: None,
            position,
            bbox: None,
            physical: None,
            active: true,
            collided_with_world: false,
        }
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_physical(mut self, physical: Physical) -> Self {
        self.physical = Some(physical);
        self
    }

    pub fn with_archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = Some(archetype);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

//! Integer-pixel movement and world-collision core for tile-based
//! platformers.
//!
//! `domain` holds the pure pieces: geometry, tiles, the collision oracle and
//! the movement resolvers. `sim` owns the world, runs the per-tick physics
//! step and loads levels.

pub mod config;
pub mod domain;
pub mod sim;

pub use domain::collision::{CollisionOracle, TileMap};
pub use domain::entity::{Archetype, Entity, EntityId, Physical, Vec2f};
pub use domain::geometry::{to_world_space, BoundingBox, Extents, Point};
pub use domain::physics::GravityModel;
pub use sim::step::{step, PhysicsSystem, StepSummary};
pub use sim::world::WorldState;

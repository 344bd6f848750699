/// The physics step: advances every simulated entity by one tick.
///
/// Per-entity order:
///   1. Snapshot position
///   2. Horizontal movement (truncated velocity.x)
///   3. Recompute world box from the new position
///   4. Gravity (sees the post-horizontal box, so walking off a ledge
///      starts the fall in the same tick)
///   5. Vertical movement (truncated velocity.y, may reset velocity.y)
///   6. CollidedWithWorld = actual displacement != intended displacement
///
/// Entities never interact with each other here, so processing order does
/// not affect the outcome.

use tracing::{debug, trace};

use crate::domain::collision::CollisionOracle;
use crate::domain::entity::Entity;
use crate::domain::geometry::{to_world_space, Point};
use crate::domain::physics::{apply_horizontal_movement, apply_vertical_movement, GravityModel};
use super::world::WorldState;

/// Counts reported for one tick, for logging and the runner's summary.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StepSummary {
    pub simulated: usize,
    pub collided: usize,
}

#[derive(Clone, Debug, Default)]
pub struct PhysicsSystem {
    pub gravity: GravityModel,
}

impl PhysicsSystem {
    pub fn new(gravity: GravityModel) -> Self {
        PhysicsSystem { gravity }
    }

    /// Advance one tick for every entity carrying Physical, BoundingBox and
    /// Active. Mutates position and velocity.y, and recomputes the
    /// CollidedWithWorld marker.
    pub fn advance(&self, oracle: &impl CollisionOracle, entities: &mut [Entity]) -> StepSummary {
        let mut summary = StepSummary::default();

        for entity in entities.iter_mut() {
            if !entity.active { continue; }
            let Some(collided) = self.advance_entity(oracle, entity) else { continue };
            summary.simulated += 1;
            if collided { summary.collided += 1; }
        }

        summary
    }

    /// Returns `None` when the entity lacks a physics component.
    fn advance_entity(&self, oracle: &impl CollisionOracle, entity: &mut Entity) -> Option<bool> {
        let (Some(physical), Some(local_bbox)) = (entity.physical.as_mut(), entity.bbox.as_ref()) else {
            return None;
        };

        let original_position = entity.position;
        let mut position = entity.position;

        let movement_x = physical.velocity.x as i32;
        if movement_x != 0 {
            position = apply_horizontal_movement(
                oracle,
                &to_world_space(local_bbox, position),
                position,
                movement_x,
                physical.can_step_up_stairs,
            );
        }

        let bbox = to_world_space(local_bbox, position);

        if physical.gravity_affected {
            physical.velocity.y = self.gravity.apply(oracle, &bbox, physical.velocity.y);
        }

        let movement_y = physical.velocity.y as i32;
        if movement_y != 0 {
            (position, physical.velocity.y) = apply_vertical_movement(
                oracle,
                &bbox,
                position,
                physical.velocity.y,
                movement_y,
                physical.gravity_affected,
            );
        }

        let collided = position - original_position != Point::new(movement_x, movement_y);
        entity.position = position;
        entity.collided_with_world = collided;

        trace!(
            id = entity.id.0,
            from = ?original_position,
            to = ?position,
            velocity_y = physical.velocity.y,
            collided,
            "entity advanced"
        );

        Some(collided)
    }
}

/// Advance the whole world by one tick.
pub fn step(world: &mut WorldState, system: &PhysicsSystem) -> StepSummary {
    world.tick += 1;
    let summary = system.advance(&world.map, &mut world.entities);
    debug!(
        tick = world.tick,
        simulated = summary.simulated,
        collided = summary.collided,
        "physics step"
    );
    summary
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::collision::map_from;
    use crate::domain::entity::{EntityId, Physical, Vec2f};
    use crate::domain::geometry::{BoundingBox, Extents};

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Point::default(), Extents::new(1, 1))
    }

    fn body(x: i32, y: i32, velocity: Vec2f, gravity: bool) -> Entity {
        Entity::new(EntityId(0), Point::new(x, y))
            .with_bbox(unit_box())
            .with_physical(Physical::new(velocity, gravity))
    }

    fn velocity_y(e: &Entity) -> f32 {
        e.physical.as_ref().unwrap().velocity.y
    }

    /// 20 wide, floor at row 11; feet on row 10 are grounded.
    fn floor_map(wall_x: Option<usize>) -> crate::domain::collision::TileMap {
        let mut rows = vec![" ".repeat(20); 11];
        if let Some(x) = wall_x {
            rows[10].replace_range(x..x + 1, "#");
        }
        rows.push("#".repeat(20));
        let refs: Vec<&str> = rows.iter().map(|s| s.as_str()).collect();
        map_from(&refs)
    }

    #[test]
    fn resting_entity_stays_put() {
        let map = floor_map(None);
        let mut es = vec![body(10, 10, Vec2f::default(), true)];
        PhysicsSystem::default().advance(&map, &mut es);
        assert_eq!(es[0].position, Point::new(10, 10));
        assert_eq!(velocity_y(&es[0]), 0.0);
        assert!(!es[0].collided_with_world);
    }

    #[test]
    fn scenario_free_walk() {
        let map = floor_map(None);
        let mut es = vec![body(10, 10, Vec2f::new(3.0, 0.0), true)];
        PhysicsSystem::default().advance(&map, &mut es);
        assert_eq!(es[0].position, Point::new(13, 10));
        assert!(!es[0].collided_with_world);
    }

    #[test]
    fn scenario_wall_clips_movement() {
        // Wall at x=13: last clear pixel is x=12
        let map = floor_map(Some(13));
        let mut es = vec![body(10, 10, Vec2f::new(3.0, 0.0), true)];
        PhysicsSystem::default().advance(&map, &mut es);
        assert_eq!(es[0].position, Point::new(12, 10));
        assert!(es[0].collided_with_world);
    }

    #[test]
    fn scenario_airborne_starts_falling() {
        let map = map_from(&[" ", " ", " ", "#"]);
        let mut es = vec![body(0, 0, Vec2f::default(), true)];
        PhysicsSystem::default().advance(&map, &mut es);
        assert_eq!(velocity_y(&es[0]), 1.0);
        assert_eq!(es[0].position, Point::new(0, 1));
        assert!(!es[0].collided_with_world);
    }

    #[test]
    fn fractional_velocity_truncates() {
        let map = floor_map(None);
        let mut es = vec![body(10, 10, Vec2f::new(-2.9, 0.0), true)];
        PhysicsSystem::default().advance(&map, &mut es);
        assert_eq!(es[0].position, Point::new(8, 10));
        assert!(!es[0].collided_with_world);

        let mut es = vec![body(10, 10, Vec2f::new(0.7, 0.0), true)];
        PhysicsSystem::default().advance(&map, &mut es);
        assert_eq!(es[0].position, Point::new(10, 10));
    }

    #[test]
    fn walking_off_ledge_falls_same_tick() {
        let map = map_from(&[
            "     ",
            "     ",
            "##   ",
            "#####",
        ]);
        // Feet at (1,1) standing on (1,2); one step right leaves the ledge
        let mut es = vec![body(1, 1, Vec2f::new(1.0, 0.0), true)];
        PhysicsSystem::default().advance(&map, &mut es);
        assert_eq!(es[0].position, Point::new(2, 2));
        assert_eq!(velocity_y(&es[0]), 1.0);
        assert!(!es[0].collided_with_world);
    }

    #[test]
    fn landing_sets_flag_and_zeroes_velocity() {
        let map = map_from(&[" ", " ", "#"]);
        // Falling at 2.0 with only one pixel of room
        let mut es = vec![body(0, 0, Vec2f::new(0.0, 2.0), true)];
        PhysicsSystem::default().advance(&map, &mut es);
        assert_eq!(es[0].position, Point::new(0, 1));
        assert_eq!(velocity_y(&es[0]), 0.0);
        assert!(es[0].collided_with_world);
    }

    #[test]
    fn collision_flag_clears_next_tick() {
        let map = map_from(&[" ", " ", "#"]);
        let mut es = vec![body(0, 0, Vec2f::new(0.0, 2.0), true)];
        let system = PhysicsSystem::default();
        system.advance(&map, &mut es);
        assert!(es[0].collided_with_world);
        system.advance(&map, &mut es);
        assert!(!es[0].collided_with_world);
        assert_eq!(es[0].position, Point::new(0, 1));
    }

    #[test]
    fn jump_into_ceiling_begins_fall() {
        let map = map_from(&["#", " ", " ", " ", " ", "#"]);
        let mut es = vec![body(0, 4, Vec2f::new(0.0, -4.0), true)];
        PhysicsSystem::default().advance(&map, &mut es);
        // -4.0 + 0.56 = -3.44: three steps up end right under the ceiling
        assert_eq!(es[0].position, Point::new(0, 1));
        assert_eq!(velocity_y(&es[0]), -4.0f32 + 0.56f32);
        assert!(!es[0].collided_with_world);

        let mut es = vec![body(0, 4, Vec2f::new(0.0, -5.0), true)];
        PhysicsSystem::default().advance(&map, &mut es);
        assert_eq!(es[0].position, Point::new(0, 1));
        assert_eq!(velocity_y(&es[0]), 1.0);
        assert!(es[0].collided_with_world);
    }

    #[test]
    fn no_gravity_bonks_ceiling_to_zero() {
        let map = map_from(&["#", " ", " "]);
        let mut es = vec![body(0, 2, Vec2f::new(0.0, -2.0), false)];
        PhysicsSystem::default().advance(&map, &mut es);
        assert_eq!(es[0].position, Point::new(0, 1));
        assert_eq!(velocity_y(&es[0]), 0.0);
        assert!(es[0].collided_with_world);
    }

    #[test]
    fn floater_ignores_gravity() {
        let map = floor_map(None);
        let mut es = vec![body(5, 3, Vec2f::new(1.0, 0.0), false)];
        PhysicsSystem::default().advance(&map, &mut es);
        assert_eq!(es[0].position, Point::new(6, 3));
        assert_eq!(velocity_y(&es[0]), 0.0);
    }

    #[test]
    fn stair_step_counts_as_collision() {
        let map = map_from(&[
            "      ",
            "      ",
            "   ###",
            "######",
        ]);
        let mut player = body(2, 2, Vec2f::new(1.0, 0.0), true);
        player.physical.as_mut().unwrap().can_step_up_stairs = true;
        let mut es = vec![player];
        PhysicsSystem::default().advance(&map, &mut es);
        // Hop lands at (3,1): displacement (1,-1) vs intended (1,0)
        assert_eq!(es[0].position, Point::new(3, 1));
        assert!(es[0].collided_with_world);
    }

    #[test]
    fn skips_inactive_and_incomplete_entities() {
        let map = floor_map(None);
        let mut es = vec![
            body(10, 10, Vec2f::new(3.0, 0.0), true).inactive(),
            Entity::new(EntityId(1), Point::new(2, 2)).with_bbox(unit_box()),
        ];
        es[0].collided_with_world = true;
        let summary = PhysicsSystem::default().advance(&map, &mut es);
        assert_eq!(summary, StepSummary { simulated: 0, collided: 0 });
        assert_eq!(es[0].position, Point::new(10, 10));
        // Inactive entities keep whatever marker they had
        assert!(es[0].collided_with_world);
    }

    #[test]
    fn order_independent() {
        let map = floor_map(Some(13));
        let a = body(10, 10, Vec2f::new(3.0, 0.0), true);
        let b = body(4, 3, Vec2f::new(-2.0, 1.5), true);
        let mut forward = vec![a.clone(), b.clone()];
        let mut backward = vec![b, a];
        let system = PhysicsSystem::default();
        for _ in 0..5 {
            system.advance(&map, &mut forward);
            system.advance(&map, &mut backward);
        }
        assert_eq!(forward[0].position, backward[1].position);
        assert_eq!(forward[1].position, backward[0].position);
    }

    #[test]
    fn world_step_counts_tick() {
        let mut world = WorldState::new(floor_map(Some(13)));
        world.entities.push(body(10, 10, Vec2f::new(3.0, 0.0), true));
        let summary = step(&mut world, &PhysicsSystem::default());
        assert_eq!(world.tick, 1);
        assert_eq!(summary, StepSummary { simulated: 1, collided: 1 });
    }
}

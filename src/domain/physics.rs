/// Movement resolution against static world geometry.
///
/// ## Model
///
/// Everything works in whole pixels. Velocities are real numbers, but each
/// tick they are truncated toward zero into a signed step count, and the
/// resolvers walk that many single-pixel steps, asking the collision oracle
/// before every step.
///
///   1. HORIZONTAL: step along x until a wall is touched. An entity allowed
///      to climb stairs hops one pixel up over a ledge instead of stopping.
///   2. GRAVITY: pure velocity update: start falling when unsupported,
///      accelerate toward terminal velocity while moving.
///   3. VERTICAL: step along y until ground or ceiling is touched, then
///      reset the vertical velocity.
///
/// None of these hold state between calls. Clipped movement is not an
/// error: remaining steps are dropped and the caller compares intended
/// and actual displacement.

use super::collision::CollisionOracle;
use super::geometry::{BoundingBox, Point};

/// Per-tick downward acceleration while moving vertically.
pub const FALL_ACCELERATION: f32 = 0.56;
/// Vertical velocity given to an unsupported entity at rest.
pub const FALL_START_VELOCITY: f32 = 1.0;
/// Maximum downward velocity.
pub const TERMINAL_VELOCITY: f32 = 2.0;

// ══════════════════════════════════════════════════════════════
// Gravity
// ══════════════════════════════════════════════════════════════

/// Tuning for the gravity model. `Default` holds the shipped constants.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GravityModel {
    pub fall_acceleration: f32,
    pub fall_start_velocity: f32,
    pub terminal_velocity: f32,
}

impl Default for GravityModel {
    fn default() -> Self {
        GravityModel {
            fall_acceleration: FALL_ACCELERATION,
            fall_start_velocity: FALL_START_VELOCITY,
            terminal_velocity: TERMINAL_VELOCITY,
        }
    }
}

impl GravityModel {
    /// Next vertical velocity for an entity whose world box is `bbox`.
    ///
    /// Only an exact `0.0` counts as "at rest". Any other velocity, upward
    /// ones included, gets the same accelerate-or-clamp treatment.
    pub fn apply(&self, oracle: &impl CollisionOracle, bbox: &BoundingBox, current_velocity: f32) -> f32 {
        if current_velocity == 0.0 {
            if oracle.is_on_solid_ground(bbox) {
                return current_velocity;
            }
            // Floating: begin falling
            return self.fall_start_velocity;
        }

        if current_velocity < self.terminal_velocity {
            current_velocity + self.fall_acceleration
        } else {
            self.terminal_velocity
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Horizontal movement
// ══════════════════════════════════════════════════════════════

fn touching_leading_wall(oracle: &impl CollisionOracle, bbox: &BoundingBox, moving_right: bool) -> bool {
    if moving_right {
        oracle.is_touching_right_wall(bbox)
    } else {
        oracle.is_touching_left_wall(bbox)
    }
}

/// Walk `movement_x` pixels along x starting from `bbox` / `position`.
///
/// Returns the final position. With `allow_stair_stepping`, a blocked step
/// is retried one pixel higher; the hop is taken only if the raised box is
/// clear and the raised-and-advanced box stands on solid ground. A hop
/// consumes one step.
pub fn apply_horizontal_movement(
    oracle: &impl CollisionOracle,
    bbox: &BoundingBox,
    position: Point,
    movement_x: i32,
    allow_stair_stepping: bool,
) -> Point {
    let moving_right = movement_x > 0;
    let step = if moving_right { 1 } else { -1 };

    let mut new_position = position;
    let mut moving_bbox = *bbox;

    for _ in 0..movement_x.unsigned_abs() {
        if touching_leading_wall(oracle, &moving_bbox, moving_right) {
            if allow_stair_stepping {
                let mut step_up_bbox = moving_bbox;
                step_up_bbox.top_left.y -= 1;

                if !touching_leading_wall(oracle, &step_up_bbox, moving_right) {
                    step_up_bbox.top_left.x += step;
                    if oracle.is_on_solid_ground(&step_up_bbox) {
                        moving_bbox = step_up_bbox;
                        new_position += Point::new(step, -1);
                        continue;
                    }
                }
            }

            break;
        }

        moving_bbox.top_left.x += step;
        new_position.x += step;
    }

    new_position
}

// ══════════════════════════════════════════════════════════════
// Vertical movement
// ══════════════════════════════════════════════════════════════

/// Walk `movement_y` pixels along y (positive = down).
///
/// Returns the final position and the resulting velocity:
///   - ground contact while falling      → `0.0`
///   - ceiling contact while rising      → `0.0`, or `1.0` (start falling
///     immediately) with `begin_falling_on_ceiling`
///   - no contact over the whole walk    → `current_velocity` unchanged
pub fn apply_vertical_movement(
    oracle: &impl CollisionOracle,
    bbox: &BoundingBox,
    position: Point,
    current_velocity: f32,
    movement_y: i32,
    begin_falling_on_ceiling: bool,
) -> (Point, f32) {
    let moving_down = movement_y > 0;
    let step = if moving_down { 1 } else { -1 };

    let mut new_position = position;
    let mut moving_bbox = *bbox;

    for _ in 0..movement_y.unsigned_abs() {
        let touching = if moving_down {
            oracle.is_on_solid_ground(&moving_bbox)
        } else {
            oracle.is_touching_ceiling(&moving_bbox)
        };

        if touching {
            if moving_down || !begin_falling_on_ceiling {
                return (new_position, 0.0);
            }
            return (new_position, FALL_START_VELOCITY);
        }

        moving_bbox.top_left.y += step;
        new_position.y += step;
    }

    (new_position, current_velocity)
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

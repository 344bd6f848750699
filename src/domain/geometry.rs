/// Integer pixel geometry: points, extents and axis-aligned boxes.
///
/// World Y grows downward. An entity's Position is its "feet" anchor:
/// the bottom row of its world-space box sits on `position.y`.

use std::ops::{Add, AddAssign, Sub};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Extents {
    pub width: i32,
    pub height: i32,
}

impl Extents {
    pub const fn new(width: i32, height: i32) -> Self {
        Extents { width, height }
    }
}

/// Axis-aligned box. `right()` / `bottom()` are inclusive pixel coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BoundingBox {
    pub top_left: Point,
    pub size: Extents,
}

impl BoundingBox {
    pub const fn new(top_left: Point, size: Extents) -> Self {
        BoundingBox { top_left, size }
    }

    pub fn left(&self) -> i32 { self.top_left.x }
    pub fn top(&self) -> i32 { self.top_left.y }
    pub fn right(&self) -> i32 { self.top_left.x + self.size.width - 1 }
    pub fn bottom(&self) -> i32 { self.top_left.y + self.size.height - 1 }

    pub fn translated(&self, offset: Point) -> Self {
        BoundingBox::new(self.top_left + offset, self.size)
    }
}

/// Translate an entity-local box into world space.
/// The box's bottom row lands on `position.y`.
#[inline]
pub fn to_world_space(local: &BoundingBox, position: Point) -> BoundingBox {
    local.translated(Point::new(position.x, position.y - (local.size.height - 1)))
}

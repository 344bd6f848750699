/// Collision oracle: the four side-contact queries the movement
/// resolvers ask about a world-space box.
///
/// ## Contact rules
///
/// A box TOUCHES a side if any map cell directly adjacent to that side
/// (one pixel outside the box) is solid on the facing edge:
///   - Ground:     row below `bottom()`,  any cell with `solid_top`
///   - Ceiling:    row above `top()`,     any cell with `solid_bottom`
///   - Left wall:  column left of box,    any cell with `solid_right`
///   - Right wall: column right of box,   any cell with `solid_left`
///
/// Cells outside the map are solid on every edge, so entities can never
/// leave the map.

use super::geometry::BoundingBox;
use super::tile::Tile;

/// World-contact queries for a world-space box.
///
/// Implementations must be read-only for the duration of a tick.
pub trait CollisionOracle {
    fn is_touching_right_wall(&self, bbox: &BoundingBox) -> bool;
    fn is_touching_left_wall(&self, bbox: &BoundingBox) -> bool;
    fn is_touching_ceiling(&self, bbox: &BoundingBox) -> bool;
    fn is_on_solid_ground(&self, bbox: &BoundingBox) -> bool;
}

/// Static world geometry: one tile per world pixel, row-major.
#[derive(Clone, Debug)]
pub struct TileMap {
    pub width: usize,
    pub height: usize,
    tiles: Vec<Vec<Tile>>,
}

/// Edge-solidity outside the map.
const OUT_OF_BOUNDS: Tile = Tile::Solid;

impl TileMap {
    pub fn new(width: usize, height: usize) -> Self {
        TileMap { width, height, tiles: vec![vec![Tile::Empty; width]; height] }
    }

    /// Build from rows. All rows are expected to share one length.
    pub fn from_rows(tiles: Vec<Vec<Tile>>) -> Self {
        let height = tiles.len();
        let width = tiles.first().map_or(0, |r| r.len());
        TileMap { width, height, tiles }
    }

    #[inline]
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return OUT_OF_BOUNDS;
        }
        self.tiles[y as usize][x as usize]
    }

    pub fn set_tile(&mut self, x: usize, y: usize, tile: Tile) {
        if x < self.width && y < self.height {
            self.tiles[y][x] = tile;
        }
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    fn any_in_row(&self, y: i32, from_x: i32, to_x: i32, edge: fn(Tile) -> bool) -> bool {
        (from_x..=to_x).any(|x| edge(self.tile_at(x, y)))
    }

    fn any_in_column(&self, x: i32, from_y: i32, to_y: i32, edge: fn(Tile) -> bool) -> bool {
        (from_y..=to_y).any(|y| edge(self.tile_at(x, y)))
    }
}

impl CollisionOracle for TileMap {
    fn is_touching_right_wall(&self, bbox: &BoundingBox) -> bool {
        self.any_in_column(bbox.right() + 1, bbox.top(), bbox.bottom(), Tile::solid_left)
    }

    fn is_touching_left_wall(&self, bbox: &BoundingBox) -> bool {
        self.any_in_column(bbox.left() - 1, bbox.top(), bbox.bottom(), Tile::solid_right)
    }

    fn is_touching_ceiling(&self, bbox: &BoundingBox) -> bool {
        self.any_in_row(bbox.top() - 1, bbox.left(), bbox.right(), Tile::solid_bottom)
    }

    fn is_on_solid_ground(&self, bbox: &BoundingBox) -> bool {
        self.any_in_row(bbox.bottom() + 1, bbox.left(), bbox.right(), Tile::solid_top)
    }
}

/// Build a map from a row picture: '#' solid, '=' platform, '^' ceiling.
/// Anything else is empty.
#[cfg(test)]
pub(crate) fn map_from(rows: &[&str]) -> TileMap {
    let tiles = rows
        .iter()
        .map(|row| {
            row.chars()
                .map(|ch| match ch {
                    '#' => Tile::Solid,
                    '=' => Tile::Platform,
                    '^' => Tile::Ceiling,
                    _ => Tile::Empty,
                })
                .collect()
        })
        .collect();
    TileMap::from_rows(tiles)
}

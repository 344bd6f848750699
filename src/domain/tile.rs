/// Tile types and their per-edge solidity.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Tile {
    #[default]
    Empty,
    Solid,    // Blocks from every side
    Platform, // One-way floor: solid top only
    Ceiling,  // Solid bottom only (can be jumped into, walked through)
}

impl Tile {
    /// Can an entity stand on top of this tile?
    pub fn solid_top(self) -> bool {
        matches!(self, Tile::Solid | Tile::Platform)
    }

    /// Does this tile stop an entity moving up into it from below?
    pub fn solid_bottom(self) -> bool {
        matches!(self, Tile::Solid | Tile::Ceiling)
    }

    /// Does this tile block an entity approaching from the right?
    pub fn solid_right(self) -> bool {
        matches!(self, Tile::Solid)
    }

    /// Does this tile block an entity approaching from the left?
    pub fn solid_left(self) -> bool {
        matches!(self, Tile::Solid)
    }

    pub fn glyph(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Solid => '#',
            Tile::Platform => '=',
            Tile::Ceiling => '^',
        }
    }
}

/// Level loader and spawner.
///
/// ## Sources (priority order):
///   1. Path given on the command line
///   2. `level` in config.toml
///   3. Built-in embedded level
///
/// ## Format (`.txt`), one character per world pixel:
///   ```text
///   ; Level Name
///   ; any further ';' lines are comments
///   <map rows>
///   ```
///
/// Short rows are padded with empty cells to the widest row.
///
/// ## Tile legend:
///   '#' = Solid                  '=' = Platform (one-way floor)
///   '^' = Ceiling (solid bottom) ' ' / '.' = Empty
///   'P' = Player spawn           'E' = Walker spawn
///   'F' = Floater spawn
///
/// A spawn glyph marks the entity's feet; the cell itself is empty.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::SpawnConfig;
use crate::domain::collision::TileMap;
use crate::domain::entity::Archetype;
use crate::domain::geometry::Point;
use crate::domain::tile::Tile;
use super::world::WorldState;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("could not read level {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("level has no map rows")]
    Empty,

    #[error("unknown glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
}

/// Parsed level: geometry plus spawn markers.
#[derive(Clone, Debug)]
pub struct LevelDef {
    pub name: String,
    pub map: TileMap,
    pub spawns: Vec<(Archetype, Point)>,
}

pub const EMBEDDED_LEVEL: &str = "\
; Proving Ground
;
; P walks right and climbs the one-pixel steps.
; E walks left until the ledge wall stops it.
; F drifts right without gravity.
  ^^^^^^^^



                          =======

   P
                                   F

           ##
         ####                           E
       ######            #######   ###########
################################################
";

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

pub fn parse_level(text: &str) -> Result<LevelDef, LevelError> {
    let mut name = String::new();
    let mut rows: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some(comment) = line.strip_prefix(';') {
            if name.is_empty() && rows.is_empty() {
                name = comment.trim().to_string();
            }
            continue;
        }
        rows.push(line.trim_end_matches('\r'));
    }

    if rows.is_empty() {
        return Err(LevelError::Empty);
    }

    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let mut map = TileMap::new(width, rows.len());
    let mut spawns = Vec::new();

    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let tile = match ch {
                '#' => Tile::Solid,
                '=' => Tile::Platform,
                '^' => Tile::Ceiling,
                ' ' | '.' => Tile::Empty,
                other => match Archetype::from_glyph(other) {
                    Some(archetype) => {
                        spawns.push((archetype, Point::new(x as i32, y as i32)));
                        Tile::Empty
                    }
                    None => return Err(LevelError::UnknownGlyph { glyph: other, x, y }),
                },
            };
            map.set_tile(x, y, tile);
        }
    }

    debug!(name = %name, width, height = rows.len(), spawns = spawns.len(), "level parsed");
    Ok(LevelDef { name, map, spawns })
}

pub fn load_level_file(path: &Path) -> Result<LevelDef, LevelError> {
    let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut def = parse_level(&text)?;
    if def.name.is_empty() {
        def.name = path.file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
    }
    Ok(def)
}

/// Build a world from a level, spawning one entity per marker.
pub fn build_world(def: &LevelDef, spawn: &SpawnConfig) -> WorldState {
    let mut world = WorldState::new(def.map.clone());
    world.name = def.name.clone();

    for &(archetype, position) in &def.spawns {
        let speed = match archetype {
            Archetype::Player => spawn.player_speed,
            Archetype::Walker => spawn.walker_speed,
            Archetype::Floater => spawn.floater_speed,
        };
        world.spawn_archetype(archetype, position, speed);
    }

    info!(level = %world.name, entities = world.entities.len(), "world built");
    world
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

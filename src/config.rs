/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::domain::physics::{GravityModel, FALL_ACCELERATION, FALL_START_VELOCITY, TERMINAL_VELOCITY};

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct SimConfig {
    pub gravity: GravityModel,
    pub run: RunConfig,
    pub spawn: SpawnConfig,
    pub level: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub ticks: u64,
    pub tick_rate_ms: u64, // 0 = run as fast as possible
    pub frame_every: u64,  // print an ASCII frame every N ticks; 0 = final frame only
}

/// Initial horizontal velocity per archetype, in pixels per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnConfig {
    pub player_speed: f32,
    pub walker_speed: f32,
    pub floater_speed: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            player_speed: default_player_speed(),
            walker_speed: default_walker_speed(),
            floater_speed: default_floater_speed(),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    physics: TomlPhysics,
    #[serde(default)]
    sim: TomlSim,
    #[serde(default)]
    spawn: TomlSpawn,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlPhysics {
    #[serde(default = "default_fall_acceleration")]
    fall_acceleration: f32,
    #[serde(default = "default_fall_start")]
    fall_start_velocity: f32,
    #[serde(default = "default_terminal")]
    terminal_velocity: f32,
}

#[derive(Deserialize, Debug)]
struct TomlSim {
    #[serde(default = "default_ticks")]
    ticks: u64,
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default)]
    frame_every: u64,
}

#[derive(Deserialize, Debug)]
struct TomlSpawn {
    #[serde(default = "default_player_speed")]
    player_speed: f32,
    #[serde(default = "default_walker_speed")]
    walker_speed: f32,
    #[serde(default = "default_floater_speed")]
    floater_speed: f32,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    #[serde(default)]
    level: Option<String>,
}

// ── Defaults ──

fn default_fall_acceleration() -> f32 { FALL_ACCELERATION }
fn default_fall_start() -> f32 { FALL_START_VELOCITY }
fn default_terminal() -> f32 { TERMINAL_VELOCITY }
fn default_ticks() -> u64 { 120 }
fn default_tick_rate() -> u64 { 0 }
fn default_player_speed() -> f32 { 1.0 }
fn default_walker_speed() -> f32 { -1.0 }
fn default_floater_speed() -> f32 { 1.0 }

impl Default for TomlPhysics {
    fn default() -> Self {
        TomlPhysics {
            fall_acceleration: default_fall_acceleration(),
            fall_start_velocity: default_fall_start(),
            terminal_velocity: default_terminal(),
        }
    }
}

impl Default for TomlSim {
    fn default() -> Self {
        TomlSim {
            ticks: default_ticks(),
            tick_rate_ms: default_tick_rate(),
            frame_every: 0,
        }
    }
}

impl Default for TomlSpawn {
    fn default() -> Self {
        TomlSpawn {
            player_speed: default_player_speed(),
            walker_speed: default_walker_speed(),
            floater_speed: default_floater_speed(),
        }
    }
}

// ── Loading ──

impl SimConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        Self::from_toml(toml_cfg, &search_dirs)
    }

    /// Parse config text directly. Relative level paths stay relative.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let toml_cfg = toml::from_str::<TomlConfig>(text)?;
        Ok(Self::from_toml(toml_cfg, &[]))
    }

    fn from_toml(toml_cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        // Resolve level path against the candidate dirs, like config.toml itself
        let level = toml_cfg.general.level.map(|level_str| {
            let path = PathBuf::from(&level_str);
            if path.is_absolute() {
                return path;
            }
            search_dirs.iter()
                .map(|d| d.join(&level_str))
                .find(|p| p.is_file())
                .unwrap_or(path)
        });

        SimConfig {
            gravity: GravityModel {
                fall_acceleration: toml_cfg.physics.fall_acceleration,
                fall_start_velocity: toml_cfg.physics.fall_start_velocity,
                terminal_velocity: toml_cfg.physics.terminal_velocity,
            },
            run: RunConfig {
                ticks: toml_cfg.sim.ticks,
                tick_rate_ms: toml_cfg.sim.tick_rate_ms,
                frame_every: toml_cfg.sim.frame_every,
            },
            spawn: SpawnConfig {
                player_speed: toml_cfg.spawn.player_speed,
                walker_speed: toml_cfg.spawn.walker_speed,
                floater_speed: toml_cfg.spawn.floater_speed,
            },
            level,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), &[])
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() { continue; }
        match std::fs::read_to_string(&path) {
            Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                Ok(cfg) => {
                    debug!(path = %path.display(), "loaded config");
                    return cfg;
                }
                Err(e) => {
                    warn!("config.toml parse error: {e}");
                    warn!("using default settings");
                    return TomlConfig::default();
                }
            },
            Err(e) => {
                warn!("could not read {}: {e}", path.display());
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_tuning() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.gravity, GravityModel::default());
        assert_eq!(cfg.run.ticks, 120);
        assert_eq!(cfg.run.tick_rate_ms, 0);
        assert_eq!(cfg.spawn, SpawnConfig::default());
        assert!(cfg.level.is_none());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = SimConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.gravity, GravityModel::default());
        assert_eq!(cfg.spawn, SpawnConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = SimConfig::from_toml_str(
            "[physics]\nterminal_velocity = 3.0\n\n[sim]\nticks = 10\n",
        ).unwrap();
        assert_eq!(cfg.gravity.terminal_velocity, 3.0);
        assert_eq!(cfg.gravity.fall_acceleration, FALL_ACCELERATION);
        assert_eq!(cfg.run.ticks, 10);
        assert_eq!(cfg.run.frame_every, 0);
    }

    #[test]
    fn level_and_speeds() {
        let cfg = SimConfig::from_toml_str(
            "[general]\nlevel = \"levels/yard.txt\"\n[spawn]\nwalker_speed = 2.5\n",
        ).unwrap();
        assert_eq!(cfg.level, Some(PathBuf::from("levels/yard.txt")));
        assert_eq!(cfg.spawn.walker_speed, 2.5);
        assert_eq!(cfg.spawn.player_speed, 1.0);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(SimConfig::from_toml_str("[physics\n").is_err());
        assert!(SimConfig::from_toml_str("[sim]\nticks = \"many\"\n").is_err());
    }
}

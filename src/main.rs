/// Entry point: headless simulation runner.
///
/// Usage: `pixelstep [LEVEL]`
///
/// Loads config.toml and a level, then advances the physics step for the
/// configured number of ticks and prints the resulting frame.

mod logging;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use pixelstep::config::SimConfig;
use pixelstep::sim::level::{build_world, load_level_file, parse_level, LevelDef, EMBEDDED_LEVEL};
use pixelstep::sim::step::{step, PhysicsSystem};
use pixelstep::sim::world::WorldState;

fn main() {
    logging::init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = SimConfig::load();

    // Level source: CLI argument > config.toml > embedded
    let level_path = std::env::args().nth(1).map(PathBuf::from).or_else(|| config.level.clone());
    let def: LevelDef = match level_path {
        Some(path) => load_level_file(&path)
            .with_context(|| format!("loading level {}", path.display()))?,
        None => parse_level(EMBEDDED_LEVEL).context("parsing embedded level")?,
    };

    let mut world = build_world(&def, &config.spawn);
    let system = PhysicsSystem::new(config.gravity);
    let pacing = Duration::from_millis(config.run.tick_rate_ms);

    let mut collisions = 0usize;
    for _ in 0..config.run.ticks {
        let summary = step(&mut world, &system);
        collisions += summary.collided;

        if config.run.frame_every > 0 && world.tick % config.run.frame_every == 0 {
            print_frame(&world);
        }
        if !pacing.is_zero() {
            std::thread::sleep(pacing);
        }
    }

    info!(ticks = world.tick, collisions, "simulation finished");
    print_frame(&world);
    for (e, physical, _) in world.simulated() {
        let velocity = physical.velocity;
        println!(
            "{:>3} {:<8} pos=({:>3},{:>3}) vel=({:>5.2},{:>5.2}){}",
            e.id.0,
            e.archetype.map_or("-".to_string(), |a| format!("{a:?}")),
            e.position.x,
            e.position.y,
            velocity.x,
            velocity.y,
            if e.collided_with_world { " collided" } else { "" },
        );
    }

    Ok(())
}

fn print_frame(world: &WorldState) {
    println!("── {} · tick {} ──", world.name, world.tick);
    print!("{}", world.render_ascii());
}

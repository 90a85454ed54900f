//! Headless tile physics demo.
//!
//! Loads `physics.ini` (or the file given with `--config`), builds one of the
//! demo levels (or a level from a JSON tilemap), runs a fixed number of ticks
//! and logs where every body ended up.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --scenario slope-walk --ticks 240
//! ```

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use tilephysics::components::hitbox::Hitbox;
use tilephysics::components::signals::{SIGNAL_LANDINGS, Signals};
use tilephysics::demo::{self, CameraMode, Scenario};
use tilephysics::resources::camera::CameraController;
use tilephysics::resources::physicsconfig::PhysicsConfig;
use tilephysics::resources::tilegrid::{TileGrid, Tilemap};
use tilephysics::resources::worldtime::WorldTime;

/// Tile physics demo
#[derive(Parser)]
#[command(version, about = "Runs a headless tile-world physics scenario")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./physics.ini")]
    config: PathBuf,

    /// Number of fixed ticks to simulate.
    #[arg(long, default_value_t = 300)]
    ticks: u32,

    /// Demo scenario to spawn.
    #[arg(long, value_enum, default_value_t = Scenario::SlopeWalk)]
    scenario: Scenario,

    /// Camera strategy.
    #[arg(long, value_enum, default_value_t = CameraMode::Lerp)]
    camera: CameraMode,

    /// JSON tilemap replacing the scenario's level.
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,

    /// Tilemap layer holding collision tiles.
    #[arg(long, default_value = "collision")]
    layer: String,
}

fn load_map(path: &Path, layer: &str) -> Result<TileGrid, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read tilemap {}: {e}", path.display()))?;
    let tilemap: Tilemap = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse tilemap {}: {e}", path.display()))?;
    TileGrid::from_tilemap(&tilemap, layer).map_err(|e| e.to_string())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = PhysicsConfig::with_path(&cli.config);
    if cli.config.exists() {
        if let Err(e) = config.load_from_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    } else {
        warn!(
            "Config file {} not found, using defaults",
            cli.config.display()
        );
    }

    let (mut grid, registry) = match demo::build_level(cli.scenario, config.tile_size) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(path) = &cli.map {
        grid = match load_map(path, &cli.layer) {
            Ok(grid) => grid,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        };
        info!(
            "Loaded {}x{} tilemap from {}",
            grid.columns(),
            grid.rows(),
            path.display()
        );
    }

    let tick_ms = config.tick_ms;
    let mut world = demo::init_world(config, grid, registry);
    if let Err(e) = demo::spawn_scenario(&mut world, cli.scenario) {
        error!("Failed to spawn scenario: {e}");
        std::process::exit(1);
    }

    demo::set_camera_mode(&mut world, cli.camera);

    let mut update = demo::build_schedule();
    demo::run_ticks(&mut world, &mut update, cli.ticks, tick_ms);

    let time = *world.resource::<WorldTime>();
    info!(
        "Simulated {} ticks ({:.0} ms)",
        time.frame_count, time.elapsed
    );
    let mut bodies = world.query::<(Entity, &Hitbox, Option<&Signals>)>();
    let mut report: Vec<_> = bodies
        .iter(&world)
        .map(|(entity, hitbox, signals)| {
            let landings = signals
                .and_then(|s| s.get_integer(SIGNAL_LANDINGS))
                .unwrap_or(0);
            (entity, hitbox.position, hitbox.state(), landings)
        })
        .collect();
    report.sort_by_key(|(entity, ..)| *entity);
    if report.is_empty() {
        info!("No bodies left in the world");
    }
    for (entity, position, state, landings) in report {
        info!(
            "{:?}: position=({:.2}, {:.2}) state={:?} landings={}",
            entity, position.x, position.y, state, landings
        );
    }
    let camera = world.resource::<CameraController>();
    info!(
        "Camera centre ({:.2}, {:.2}), visible {:?}",
        camera.centre().x,
        camera.centre().y,
        camera.visible_region()
    );
}

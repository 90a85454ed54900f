//! Demo levels and world setup.
//!
//! Builds a ready-to-run ECS [`World`] and the per-tick [`Schedule`] for the
//! headless binary and the integration tests:
//!
//! - [`build_level`] creates the grid and registry for a [`Scenario`]
//! - [`init_world`] inserts resources and registers the stock observers
//! - [`spawn_body`] spawns a hitbox entity with the usual physics markers
//! - [`spawn_scenario`] populates a world for a scenario
//! - [`set_camera_mode`] swaps the camera strategy
//! - [`build_schedule`] chains update, camera and cleanup systems
//! - [`run_ticks`] drives the schedule with a fixed delta

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::ValueEnum;
use log::info;

use crate::components::behavior::{Behaviors, ConstantWalk, Patrol};
use crate::components::hitbox::Hitbox;
use crate::components::physicsflags::{FrictionAffected, GravityAffected, Movable};
use crate::components::signals::Signals;
use crate::error::PhysicsError;
use crate::events::hitbox::{observe_fallen_out_of_bounds, observe_landed};
use crate::physics::geometry::Rect;
use crate::physics::postprocess::slippery_slope;
use crate::physics::tile::{TileDef, TileType};
use crate::resources::camera::{CameraController, DeadZone, Lerp, Snap};
use crate::resources::physicsconfig::PhysicsConfig;
use crate::resources::tilegrid::TileGrid;
use crate::resources::tileregistry::TileRegistry;
use crate::resources::worldtime::WorldTime;
use crate::systems::camera::camera_follow;
use crate::systems::cleanup::despawn_marked_entities;
use crate::systems::time::update_world_time;
use crate::systems::update::update_entities;

/// Extra tile id used by the patrol level: a rising ramp nothing can rest on.
pub const TILE_SLIPPERY_RISING: u32 = 6;

/// Demo scenarios selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Walk over a hill made of two ramps and a flat top.
    SlopeWalk,
    /// Drop a body into a bottomless pit.
    Fall,
    /// Two patrollers bouncing between walls, one of them over a slippery ramp.
    Patrol,
}

/// Camera strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CameraMode {
    Snap,
    Lerp,
    /// Dead zone a quarter of the viewport wide and high.
    DeadZone,
}

const SLOPE_WALK_LEVEL: &[&str] = &[
    "................",
    "................",
    "................",
    "................",
    "......./##\\.....",
    "....../####\\....",
    "################",
];

const FALL_LEVEL: &[&str] = &[
    "....................",
    "....................",
    "....................",
    "#######......#######",
];

const PATROL_LEVEL: &[&str] = &[
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..../##\\......#",
    "################",
];

/// Grid and registry for `scenario`.
pub fn build_level(
    scenario: Scenario,
    tile_size: f32,
) -> Result<(TileGrid, TileRegistry), PhysicsError> {
    let mut registry = TileRegistry::with_defaults();
    let grid = match scenario {
        Scenario::SlopeWalk => TileGrid::from_ascii(tile_size, SLOPE_WALK_LEVEL)?,
        Scenario::Fall => TileGrid::from_ascii(tile_size, FALL_LEVEL)?,
        Scenario::Patrol => {
            registry.register(
                TILE_SLIPPERY_RISING,
                TileDef::new(TileType::SlopeFloorRising).with_post_process(slippery_slope),
            );
            let mut grid = TileGrid::from_ascii(tile_size, PATROL_LEVEL)?;
            grid.set(5, 4, TILE_SLIPPERY_RISING);
            grid
        }
    };
    Ok((grid, registry))
}

/// Insert the simulation resources and register the stock observers.
pub fn init_world(config: PhysicsConfig, grid: TileGrid, registry: TileRegistry) -> World {
    let mut world = World::new();
    let bounds = Rect::new(0.0, 0.0, grid.world_width(), grid.world_height());
    let camera = CameraController::new(config.viewport_width, config.viewport_height)
        .with_strategy(Lerp::new(config.lerp_rate))
        .with_bounds(bounds);

    world.insert_resource(WorldTime::default());
    world.insert_resource(camera);
    world.insert_resource(config);
    world.insert_resource(grid);
    world.insert_resource(registry);

    world.spawn(Observer::new(observe_landed));
    world.spawn(Observer::new(observe_fallen_out_of_bounds));
    // Observers must exist before any system triggers events.
    world.flush();
    world
}

/// Spawn a gravity-, friction- and collision-affected body.
pub fn spawn_body(world: &mut World, hitbox: Hitbox, behaviors: Behaviors) -> Entity {
    let entity = world
        .spawn((
            GravityAffected::default(),
            FrictionAffected::default(),
            Movable,
            Signals::default(),
            behaviors,
        ))
        .id();
    world.entity_mut(entity).insert(hitbox.with_owner(entity));
    entity
}

/// Populate `world` for `scenario`. Returns the entity the camera tracks.
pub fn spawn_scenario(world: &mut World, scenario: Scenario) -> Result<Entity, PhysicsError> {
    let t = world.resource::<TileGrid>().tile_size();
    let size = t * 0.5;
    let target = match scenario {
        Scenario::SlopeWalk => {
            let hitbox = Hitbox::new(t * 0.5, t * 6.0 - size, size, size)?.grounded();
            spawn_body(world, hitbox, Behaviors::new().with("walk", ConstantWalk::new(0.05)))
        }
        Scenario::Fall => {
            let hitbox = Hitbox::new(t * 9.0, -t, size, size)?;
            spawn_body(world, hitbox, Behaviors::new())
        }
        Scenario::Patrol => {
            let first = Hitbox::new(t * 2.0, t * 5.0 - size, size, size)?
                .grounded()
                .with_max_speed_x(0.1);
            let second = Hitbox::new(t * 12.0, t * 5.0 - size, size, size)?
                .grounded()
                .with_max_speed_x(0.1);
            let first = spawn_body(world, first, Behaviors::new().with("patrol", Patrol::new(0.06)));
            spawn_body(world, second, Behaviors::new().with("patrol", Patrol::new(-0.04)));
            first
        }
    };
    world.resource_mut::<CameraController>().track_entity(target);
    info!("Spawned {:?} scenario, camera on {:?}", scenario, target);
    Ok(target)
}

/// Replace the camera strategy. Lerp uses the configured rate.
pub fn set_camera_mode(world: &mut World, mode: CameraMode) {
    let rate = world.resource::<PhysicsConfig>().lerp_rate;
    let mut camera = world.resource_mut::<CameraController>();
    let viewport = camera.viewport();
    match mode {
        CameraMode::Snap => camera.set_strategy(Snap),
        CameraMode::Lerp => camera.set_strategy(Lerp::new(rate)),
        CameraMode::DeadZone => {
            camera.set_strategy(DeadZone::new(viewport.x * 0.25, viewport.y * 0.25))
        }
    }
}

/// Per-tick schedule: entity updates, then camera, then despawns.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems((update_entities, camera_follow, despawn_marked_entities).chain());
    update
}

/// Advance `world` by `ticks` fixed steps of `tick_ms`.
pub fn run_ticks(world: &mut World, schedule: &mut Schedule, ticks: u32, tick_ms: f32) {
    for _ in 0..ticks {
        update_world_time(world, tick_ms);
        schedule.run(world);
        world.clear_trackers();
    }
}

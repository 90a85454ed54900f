//! Tile-world physics library.
//!
//! Moves axis-aligned hitboxes through a grid of solid and 45 degree slope
//! tiles, one axis at a time, and reports landings, take-offs and falls out of
//! the world. The collision core lives in [`physics`]; the ECS components,
//! resources, systems and events wire it into a `bevy_ecs` world.

pub mod components;
pub mod demo;
pub mod error;
pub mod events;
pub mod physics;
pub mod resources;
pub mod systems;

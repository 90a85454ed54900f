//! Simulation systems.
//!
//! Submodules overview
//! - [`time`] – advance simulation time and delta
//! - [`update`] – per-entity behaviours, gravity, collision-resolved movement and friction
//! - [`camera`] – feed the tracked hitbox into the camera controller
//! - [`cleanup`] – despawn entities marked for deletion

pub mod camera;
pub mod cleanup;
pub mod time;
pub mod update;

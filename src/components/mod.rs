//! ECS components for simulated entities.
//!
//! Submodules overview:
//! - [`behavior`] – per-entity behaviour hooks run at the start of each update
//! - [`hitbox`] – the movable physical body and its lifecycle state
//! - [`physicsflags`] – opt-in gravity, movement and friction markers
//! - [`signals`] – per-entity signal storage for gameplay code

pub mod behavior;
pub mod hitbox;
pub mod physicsflags;
pub mod signals;

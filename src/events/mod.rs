//! Event types and observers used by the simulation.
//!
//! Events decouple gameplay reactions from the update system: the update
//! system only reports what happened to each hitbox, observers decide what
//! to do about it.
//!
//! Submodules:
//! - [`hitbox`] – movement and lifecycle transitions of hitboxes
pub mod hitbox;

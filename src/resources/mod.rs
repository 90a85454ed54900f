//! ECS resources made available to systems.
//!
//! Overview
//! - `camera` – camera controller following a tracked hitbox
//! - `physicsconfig` – INI-backed simulation settings
//! - `tilegrid` – the level's collision grid and tilemap data types
//! - `tileregistry` – tile id to tile definition mapping
//! - `worldtime` – simulation time and delta
pub mod camera;
pub mod physicsconfig;
pub mod tilegrid;
pub mod tileregistry;
pub mod worldtime;

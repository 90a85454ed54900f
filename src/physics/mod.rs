//! Tile-world collision core.
//!
//! Everything here is plain data and functions with no ECS dependency beyond
//! the [`Hitbox`](crate::components::hitbox::Hitbox) component type, so the
//! resolver can be driven directly from tests or from the update system.
//!
//! - [`geometry`] – rectangles, tile coordinates and span helpers
//! - [`tile`] – tile shapes and per-id definitions
//! - [`slope`] – 45 degree slope surface functions
//! - [`world`] – read-only grid + registry view
//! - [`result`] – collision results and post-processing payloads
//! - [`resolver`] – the per-step axis-separated resolver
//! - [`postprocess`] – stock post-processing hooks
//! - [`listener`] – movement notifications

pub mod geometry;
pub mod listener;
pub mod postprocess;
pub mod resolver;
pub mod result;
pub mod slope;
pub mod tile;
pub mod world;

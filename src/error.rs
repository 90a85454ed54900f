//! Error types.
//!
//! [`PhysicsError`] covers invalid input to the physics core (bad geometry,
//! bad timesteps, malformed grids). [`ConfigError`] covers loading and
//! validating [`PhysicsConfig`](crate::resources::physicsconfig::PhysicsConfig).

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the physics core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    /// A hitbox was constructed with a non-positive or non-finite size.
    #[error("invalid hitbox geometry {width}x{height}: width and height must be positive")]
    InvalidGeometry { width: f32, height: f32 },
    /// A negative (or NaN) timestep was passed to the resolver.
    #[error("invalid timestep {0}: delta must be zero or positive")]
    InvalidTimestep(f32),
    /// A tile grid violated its dimensional invariants.
    #[error("invalid tile grid: {0}")]
    InvalidGrid(String),
}

/// Errors produced while loading, saving or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("failed to save config file {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

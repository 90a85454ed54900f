//! Physics configuration resource.
//!
//! Simulation settings loaded from an INI file. Defaults are safe to run
//! without any file present; missing keys keep their current values.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! tile_size = 16
//!
//! [physics]
//! gravity = 0.0015
//! max_fall_speed = 0.6
//! ground_friction = 0.01
//! air_friction = 0.001
//!
//! [simulation]
//! tick_ms = 16
//!
//! [camera]
//! viewport_width = 320
//! viewport_height = 180
//! lerp_rate = 0.01
//! ```
//!
//! Units: world units and milliseconds. Gravity is in units/ms², speeds in
//! units/ms and friction/lerp rates per millisecond.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::ConfigError;

const DEFAULT_TILE_SIZE: f32 = 16.0;
const DEFAULT_GRAVITY: f32 = 0.0015;
const DEFAULT_MAX_FALL_SPEED: f32 = 0.6;
const DEFAULT_GROUND_FRICTION: f32 = 0.01;
const DEFAULT_AIR_FRICTION: f32 = 0.001;
const DEFAULT_TICK_MS: f32 = 16.0;
const DEFAULT_VIEWPORT_WIDTH: f32 = 320.0;
const DEFAULT_VIEWPORT_HEIGHT: f32 = 180.0;
const DEFAULT_LERP_RATE: f32 = 0.01;
const DEFAULT_CONFIG_PATH: &str = "./physics.ini";

/// Physics configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Edge length of a tile in world units.
    pub tile_size: f32,
    /// Downward acceleration in units/ms².
    pub gravity: f32,
    /// Terminal vertical speed in units/ms.
    pub max_fall_speed: f32,
    /// Horizontal velocity decay per ms while grounded.
    pub ground_friction: f32,
    /// Horizontal velocity decay per ms while airborne.
    pub air_friction: f32,
    /// Fixed simulation step in ms.
    pub tick_ms: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Fraction of the remaining camera distance covered per ms.
    pub lerp_rate: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            gravity: DEFAULT_GRAVITY,
            max_fall_speed: DEFAULT_MAX_FALL_SPEED,
            ground_friction: DEFAULT_GROUND_FRICTION,
            air_friction: DEFAULT_AIR_FRICTION,
            tick_ms: DEFAULT_TICK_MS,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            lerp_rate: DEFAULT_LERP_RATE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file and validate it.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(|reason| ConfigError::Load {
            path: self.config_path.clone(),
            reason,
        })?;

        let float = |section: &str, key: &str| -> Result<Option<f32>, ConfigError> {
            config
                .getfloat(section, key)
                .map(|v| v.map(|v| v as f32))
                .map_err(|reason| ConfigError::Load {
                    path: self.config_path.clone(),
                    reason: format!("[{section}] {key}: {reason}"),
                })
        };

        // [world] section
        if let Some(v) = float("world", "tile_size")? {
            self.tile_size = v;
        }

        // [physics] section
        if let Some(v) = float("physics", "gravity")? {
            self.gravity = v;
        }
        if let Some(v) = float("physics", "max_fall_speed")? {
            self.max_fall_speed = v;
        }
        if let Some(v) = float("physics", "ground_friction")? {
            self.ground_friction = v;
        }
        if let Some(v) = float("physics", "air_friction")? {
            self.air_friction = v;
        }

        // [simulation] section
        if let Some(v) = float("simulation", "tick_ms")? {
            self.tick_ms = v;
        }

        // [camera] section
        if let Some(v) = float("camera", "viewport_width")? {
            self.viewport_width = v;
        }
        if let Some(v) = float("camera", "viewport_height")? {
            self.viewport_height = v;
        }
        if let Some(v) = float("camera", "lerp_rate")? {
            self.lerp_rate = v;
        }

        self.validate()?;

        info!(
            "Loaded config: tile_size={}, gravity={}, max_fall_speed={}, friction={}/{}, tick={}ms, viewport={}x{}",
            self.tile_size,
            self.gravity,
            self.max_fall_speed,
            self.ground_friction,
            self.air_friction,
            self.tick_ms,
            self.viewport_width,
            self.viewport_height
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        config.set("world", "tile_size", Some(self.tile_size.to_string()));

        config.set("physics", "gravity", Some(self.gravity.to_string()));
        config.set(
            "physics",
            "max_fall_speed",
            Some(self.max_fall_speed.to_string()),
        );
        config.set(
            "physics",
            "ground_friction",
            Some(self.ground_friction.to_string()),
        );
        config.set("physics", "air_friction", Some(self.air_friction.to_string()));

        config.set("simulation", "tick_ms", Some(self.tick_ms.to_string()));

        config.set(
            "camera",
            "viewport_width",
            Some(self.viewport_width.to_string()),
        );
        config.set(
            "camera",
            "viewport_height",
            Some(self.viewport_height.to_string()),
        );
        config.set("camera", "lerp_rate", Some(self.lerp_rate.to_string()));

        config
            .write(&self.config_path)
            .map_err(|source| ConfigError::Save {
                path: self.config_path.clone(),
                source,
            })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(key: &'static str, value: f32, ok: bool) -> Result<(), ConfigError> {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    key,
                    value: value.to_string(),
                })
            }
        }
        check("world.tile_size", self.tile_size, self.tile_size > 0.0)?;
        check("physics.gravity", self.gravity, self.gravity >= 0.0)?;
        check(
            "physics.max_fall_speed",
            self.max_fall_speed,
            self.max_fall_speed > 0.0,
        )?;
        check(
            "physics.ground_friction",
            self.ground_friction,
            self.ground_friction >= 0.0,
        )?;
        check(
            "physics.air_friction",
            self.air_friction,
            self.air_friction >= 0.0,
        )?;
        check("simulation.tick_ms", self.tick_ms, self.tick_ms > 0.0)?;
        check(
            "camera.viewport_width",
            self.viewport_width,
            self.viewport_width > 0.0,
        )?;
        check(
            "camera.viewport_height",
            self.viewport_height,
            self.viewport_height > 0.0,
        )?;
        check("camera.lerp_rate", self.lerp_rate, self.lerp_rate >= 0.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = PhysicsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.config_path, PathBuf::from("./physics.ini"));
    }

    #[test]
    fn load_overrides_present_keys_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[world]\ntile_size = 32\n\n[physics]\ngravity = 0.002").unwrap();
        let mut config = PhysicsConfig::with_path(file.path());
        config.load_from_file().unwrap();
        assert_eq!(config.tile_size, 32.0);
        assert_eq!(config.gravity, 0.002);
        assert_eq!(config.tick_ms, DEFAULT_TICK_MS);
    }

    #[test]
    fn load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[world]\ntile_size = -4").unwrap();
        let mut config = PhysicsConfig::with_path(file.path());
        match config.load_from_file() {
            Err(ConfigError::Invalid { key, .. }) => assert_eq!(key, "world.tile_size"),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn load_rejects_unparsable_numbers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\ntick_ms = fast").unwrap();
        let mut config = PhysicsConfig::with_path(file.path());
        assert!(matches!(
            config.load_from_file(),
            Err(ConfigError::Load { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PhysicsConfig::with_path(dir.path().join("nope.ini"));
        assert!(matches!(
            config.load_from_file(),
            Err(ConfigError::Load { .. })
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("physics.ini");
        let mut saved = PhysicsConfig::with_path(&path);
        saved.gravity = 0.003;
        saved.viewport_width = 640.0;
        saved.save_to_file().unwrap();

        let mut loaded = PhysicsConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded, saved);
    }
}

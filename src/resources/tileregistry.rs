//! Tile id registry.
//!
//! Maps the integer ids stored in a [`TileGrid`](super::tilegrid::TileGrid) to
//! [`TileDef`]s. The physics core queries the registry but does not own it;
//! levels may register extra ids (for example a second rising slope carrying
//! a post-processing hook).
//!
//! Ids with no definition resolve to [`TileType::Solid`] so malformed level
//! data cannot make bodies tunnel. A warning is logged the first time each
//! unknown id is seen.

use std::sync::Mutex;

use bevy_ecs::prelude::Resource;
use log::warn;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::physics::tile::{TileDef, TileType};

pub const TILE_EMPTY: u32 = 0;
pub const TILE_SOLID: u32 = 1;
pub const TILE_FLOOR_RISING: u32 = 2;
pub const TILE_FLOOR_FALLING: u32 = 3;
pub const TILE_CEIL_FALLING: u32 = 4;
pub const TILE_CEIL_RISING: u32 = 5;

/// Registry of tile definitions by id.
#[derive(Resource, Debug)]
pub struct TileRegistry {
    defs: FxHashMap<u32, TileDef>,
    warned: Mutex<FxHashSet<u32>>,
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl TileRegistry {
    /// Create an empty registry. Every id resolves to Solid until registered.
    pub fn new() -> Self {
        Self {
            defs: FxHashMap::default(),
            warned: Mutex::new(FxHashSet::default()),
        }
    }

    /// Registry with the six standard ids (`0..=5`).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TILE_EMPTY, TileType::Empty);
        registry.register(TILE_SOLID, TileType::Solid);
        registry.register(TILE_FLOOR_RISING, TileType::SlopeFloorRising);
        registry.register(TILE_FLOOR_FALLING, TileType::SlopeFloorFalling);
        registry.register(TILE_CEIL_FALLING, TileType::SlopeCeilFalling);
        registry.register(TILE_CEIL_RISING, TileType::SlopeCeilRising);
        registry
    }

    /// Register or replace the definition for `id`.
    pub fn register(&mut self, id: u32, def: impl Into<TileDef>) {
        self.defs.insert(id, def.into());
    }

    /// Definition registered for `id`, if any.
    pub fn get(&self, id: u32) -> Option<&TileDef> {
        self.defs.get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.defs.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Definition for `id`, falling back to a plain Solid tile.
    pub fn resolve(&self, id: u32) -> TileDef {
        match self.defs.get(&id) {
            Some(def) => *def,
            None => {
                if let Ok(mut warned) = self.warned.lock() {
                    if warned.insert(id) {
                        warn!("Unknown tile id {id}, treating it as solid");
                    }
                }
                TileDef::new(TileType::Solid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::result::{CollisionResult, PostProcessCollision};

    fn hook(_: &CollisionResult, _: &mut PostProcessCollision) {}

    #[test]
    fn defaults_cover_all_shapes() {
        let registry = TileRegistry::default();
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.resolve(TILE_EMPTY).tile_type, TileType::Empty);
        assert_eq!(registry.resolve(TILE_SOLID).tile_type, TileType::Solid);
        assert_eq!(
            registry.resolve(TILE_FLOOR_RISING).tile_type,
            TileType::SlopeFloorRising
        );
        assert_eq!(
            registry.resolve(TILE_CEIL_RISING).tile_type,
            TileType::SlopeCeilRising
        );
    }

    #[test]
    fn unknown_ids_are_solid() {
        let registry = TileRegistry::default();
        assert!(!registry.contains(42));
        assert_eq!(registry.resolve(42).tile_type, TileType::Solid);
        // Second lookup is still solid (warning only once).
        assert_eq!(registry.resolve(42).tile_type, TileType::Solid);
    }

    #[test]
    fn custom_ids_keep_their_hook() {
        let mut registry = TileRegistry::new();
        assert!(registry.is_empty());
        registry.register(
            20,
            TileDef::new(TileType::SlopeFloorRising).with_post_process(hook),
        );
        let def = registry.resolve(20);
        assert_eq!(def.tile_type, TileType::SlopeFloorRising);
        assert!(def.post_process.is_some());
        assert!(registry.get(TILE_SOLID).is_none());
    }
}

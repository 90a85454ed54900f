//! Tile kinds and per-id tile definitions.

use serde::{Deserialize, Serialize};

use crate::physics::result::{CollisionResult, PostProcessCollision};

/// Post-processing hook attached to a concrete tile id.
///
/// Receives the tentative result and the pending value for the axis the tile
/// constrained. The hook may tighten `pending.value` and, on the vertical
/// axis, override `pending.grounded` / `pending.landed`. The resolver discards
/// any attempt to loosen the value.
pub type PostProcessFn = fn(result: &CollisionResult, pending: &mut PostProcessCollision);

/// Collision shape of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Empty,
    Solid,
    /// Floor ramp climbing from bottom-left to top-right.
    SlopeFloorRising,
    /// Floor ramp descending from top-left to bottom-right.
    SlopeFloorFalling,
    /// Ceiling ramp whose underside descends left to right.
    SlopeCeilFalling,
    /// Ceiling ramp whose underside climbs left to right.
    SlopeCeilRising,
}

impl TileType {
    /// Whether this tile stops horizontal motion. Slopes never do.
    pub fn blocks_horizontally(self) -> bool {
        self == TileType::Solid
    }
}

/// What a tile id means: its shape plus an optional post-processing hook.
#[derive(Debug, Clone, Copy)]
pub struct TileDef {
    pub tile_type: TileType,
    pub post_process: Option<PostProcessFn>,
}

impl TileDef {
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            post_process: None,
        }
    }

    /// Attach a post-processing hook to this tile.
    pub fn with_post_process(mut self, hook: PostProcessFn) -> Self {
        self.post_process = Some(hook);
        self
    }
}

impl From<TileType> for TileDef {
    fn from(tile_type: TileType) -> Self {
        Self::new(tile_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &CollisionResult, _: &mut PostProcessCollision) {}

    #[test]
    fn only_solid_blocks_horizontally() {
        assert!(TileType::Solid.blocks_horizontally());
        assert!(!TileType::Empty.blocks_horizontally());
        assert!(!TileType::SlopeFloorRising.blocks_horizontally());
        assert!(!TileType::SlopeCeilFalling.blocks_horizontally());
    }

    #[test]
    fn hook_is_attached_per_definition() {
        let plain = TileDef::new(TileType::SlopeFloorRising);
        let hooked = TileDef::new(TileType::SlopeFloorRising).with_post_process(noop);
        assert!(plain.post_process.is_none());
        assert!(hooked.post_process.is_some());
        assert_eq!(plain.tile_type, hooked.tile_type);
    }
}

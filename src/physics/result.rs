//! Per-step collision outcome and the pending adjustment handed to tile hooks.

use glam::Vec2;
use smallvec::SmallVec;

use crate::physics::geometry::{Rect, TileCoord};
use crate::physics::tile::TileType;

/// Tiles that constrained one axis of a move.
pub type ConstrainingTiles = SmallVec<[TileCoord; 4]>;

/// Movement axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Outcome of one resolved movement step.
///
/// Built fresh by every call to [`resolve`](crate::physics::resolver::resolve).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionResult {
    /// Displacement the velocity asked for (`velocity * delta`).
    pub requested: Vec2,
    /// Horizontal displacement actually applied.
    pub dx: f32,
    /// Vertical displacement actually applied. Negative when the hitbox was
    /// lifted out of a slope it walked into.
    pub dy: f32,
    pub collided_x: bool,
    pub collided_y: bool,
    /// Whether the hitbox rests on a surface after the move.
    pub grounded: bool,
    /// Airborne to grounded on this step.
    pub landed: bool,
    /// Grounded to airborne on this step.
    pub left_ground: bool,
    /// The bottom edge is below the grid. Stays true while out of bounds.
    pub fell_out_of_bounds_below: bool,
    /// Entered the falling-out-of-bounds state on this step.
    pub falling_out_of_bounds: bool,
    /// Entered the terminal fallen-out-of-bounds state on this step.
    pub fallen_out_of_bounds: bool,
    pub x_tiles: ConstrainingTiles,
    pub y_tiles: ConstrainingTiles,
}

impl CollisionResult {
    pub fn new(requested: Vec2) -> Self {
        Self {
            requested,
            ..Self::default()
        }
    }

    /// Applied displacement as a vector.
    pub fn displacement(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }

    /// True when any lifecycle transition happened on this step.
    pub fn has_transition(&self) -> bool {
        self.landed || self.left_ground || self.falling_out_of_bounds || self.fallen_out_of_bounds
    }
}

/// Pending, not yet committed, adjustment for one axis.
///
/// Passed to a tile's [`PostProcessFn`](crate::physics::tile::PostProcessFn).
#[derive(Debug, Clone, PartialEq)]
pub struct PostProcessCollision {
    pub axis: Axis,
    /// Proposed displacement for `axis`. Hooks may tighten it.
    pub value: f32,
    /// Tile whose hook is running.
    pub tile: TileCoord,
    pub tile_type: TileType,
    pub tile_size: f32,
    /// Hitbox before this axis was applied.
    pub origin: Rect,
    /// Tentative grounded flag. Only read back on the vertical axis.
    pub grounded: bool,
    /// Tentative landed flag. Only read back on the vertical axis.
    pub landed: bool,
}

impl PostProcessCollision {
    /// Hitbox as it would be placed with the current `value`.
    pub fn tentative(&self) -> Rect {
        match self.axis {
            Axis::X => self.origin.translated(self.value, 0.0),
            Axis::Y => self.origin.translated(0.0, self.value),
        }
    }

    /// World-space rectangle of the tile whose hook is running.
    pub fn tile_rect(&self) -> Rect {
        Rect::new(
            self.tile.col as f32 * self.tile_size,
            self.tile.row as f32 * self.tile_size,
            self.tile_size,
            self.tile_size,
        )
    }
}

/// Clamp a hook's answer so it never moves further along `requested` than
/// `proposed` did.
pub(crate) fn tighten(requested: f32, proposed: f32, answered: f32) -> f32 {
    if !answered.is_finite() {
        return proposed;
    }
    if requested >= 0.0 {
        answered.min(proposed)
    } else {
        answered.max(proposed)
    }
}

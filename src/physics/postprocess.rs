//! Stock post-processing hooks.
//!
//! Attach one to a tile id with
//! [`TileDef::with_post_process`](crate::physics::tile::TileDef::with_post_process).

use log::debug;

use crate::physics::result::{Axis, CollisionResult, PostProcessCollision};

/// Never lets a body rest on this tile: the body stays airborne and keeps
/// sliding under gravity.
pub fn slippery_slope(_result: &CollisionResult, pending: &mut PostProcessCollision) {
    if pending.axis != Axis::Y {
        return;
    }
    pending.grounded = false;
    pending.landed = false;
}

/// Treat the tile as a one-way platform along its top edge.
///
/// A body arriving from above stops on the tile's top edge regardless of the
/// tile's shape, which turns a slope into a flat ledge for landings.
pub fn land_on_tile_top(_result: &CollisionResult, pending: &mut PostProcessCollision) {
    if pending.axis != Axis::Y {
        return;
    }
    let top = pending.tile_rect().top();
    let bottom = pending.origin.bottom();
    if bottom <= top && pending.value > top - bottom {
        debug!("{:?}: landing clamped to tile top", pending.tile);
        pending.value = top - bottom;
        pending.grounded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::geometry::{Rect, TileCoord};
    use crate::physics::tile::TileType;

    fn pending(axis: Axis, value: f32, origin: Rect) -> PostProcessCollision {
        PostProcessCollision {
            axis,
            value,
            tile: TileCoord::new(1, 2),
            tile_type: TileType::SlopeFloorRising,
            tile_size: 16.0,
            origin,
            grounded: true,
            landed: true,
        }
    }

    #[test]
    fn slippery_clears_support_flags() {
        let mut p = pending(Axis::Y, 3.0, Rect::new(16.0, 20.0, 4.0, 4.0));
        slippery_slope(&CollisionResult::default(), &mut p);
        assert!(!p.grounded);
        assert!(!p.landed);
        assert_eq!(p.value, 3.0);
    }

    #[test]
    fn slippery_ignores_horizontal_axis() {
        let mut p = pending(Axis::X, 3.0, Rect::new(16.0, 20.0, 4.0, 4.0));
        slippery_slope(&CollisionResult::default(), &mut p);
        assert!(p.grounded);
    }

    #[test]
    fn tile_top_clamps_landings_from_above() {
        // Bottom at 30, tile top at 32: at most 2 units down.
        let mut p = pending(Axis::Y, 10.0, Rect::new(16.0, 26.0, 4.0, 4.0));
        land_on_tile_top(&CollisionResult::default(), &mut p);
        assert_eq!(p.value, 2.0);
    }

    #[test]
    fn tile_top_leaves_bodies_already_below_alone() {
        let mut p = pending(Axis::Y, 1.0, Rect::new(16.0, 30.0, 4.0, 4.0));
        land_on_tile_top(&CollisionResult::default(), &mut p);
        assert_eq!(p.value, 1.0);
    }
}

//! Slope geometry.
//!
//! All functions work in tile-local coordinates: `local_x` runs from the
//! tile's left edge (0) to its right edge (`tile_size`), depths are measured
//! downward from the tile's top edge. Inputs outside the tile are clamped, so
//! every function is total.
//!
//! Floor ramps are solid below their surface, ceiling ramps are solid above
//! their underside. "Rising" means the surface climbs as `x` grows.
//!
//! Resolution samples a hitbox footprint, not a single point: over the part
//! of the footprint that lies inside the tile the highest floor point and the
//! lowest ceiling point win. For a floor slope that is the uphill bottom
//! corner of the hitbox.

use crate::physics::tile::TileType;

/// Surface depth `h(local_x)` of a slope tile.
///
/// Floor slopes return the depth of the walkable surface, ceiling slopes the
/// depth of their underside. Non-slope tiles return `None`.
pub fn surface_depth(tile_type: TileType, local_x: f32, tile_size: f32) -> Option<f32> {
    let x = local_x.clamp(0.0, tile_size);
    match tile_type {
        TileType::SlopeFloorRising | TileType::SlopeCeilRising => Some(tile_size - x),
        TileType::SlopeFloorFalling | TileType::SlopeCeilFalling => Some(x),
        TileType::Empty | TileType::Solid => None,
    }
}

/// Depth of the highest supporting point across `[a, b]` (tile-local).
///
/// Solid tiles and ceiling slopes have a flat top. Empty tiles offer no
/// support.
pub fn floor_depth(tile_type: TileType, a: f32, b: f32, tile_size: f32) -> Option<f32> {
    let (a, b) = clamp_interval(a, b, tile_size);
    match tile_type {
        TileType::Empty => None,
        TileType::Solid | TileType::SlopeCeilFalling | TileType::SlopeCeilRising => Some(0.0),
        // Surface climbs to the right: the right end is highest.
        TileType::SlopeFloorRising => surface_depth(tile_type, b, tile_size),
        TileType::SlopeFloorFalling => surface_depth(tile_type, a, tile_size),
    }
}

/// Depth of the lowest underside point across `[a, b]` (tile-local).
///
/// Solid tiles and floor slopes have a flat underside at the tile's bottom.
pub fn ceiling_depth(tile_type: TileType, a: f32, b: f32, tile_size: f32) -> Option<f32> {
    let (a, b) = clamp_interval(a, b, tile_size);
    match tile_type {
        TileType::Empty => None,
        TileType::Solid | TileType::SlopeFloorRising | TileType::SlopeFloorFalling => {
            Some(tile_size)
        }
        // Underside climbs to the right: the left end hangs lowest.
        TileType::SlopeCeilRising => surface_depth(tile_type, a, tile_size),
        TileType::SlopeCeilFalling => surface_depth(tile_type, b, tile_size),
    }
}

fn clamp_interval(a: f32, b: f32, tile_size: f32) -> (f32, f32) {
    let a = a.clamp(0.0, tile_size);
    let b = b.clamp(0.0, tile_size);
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f32 = 16.0;

    #[test]
    fn rising_floor_surface() {
        assert_eq!(surface_depth(TileType::SlopeFloorRising, 0.0, T), Some(16.0));
        assert_eq!(surface_depth(TileType::SlopeFloorRising, 4.0, T), Some(12.0));
        assert_eq!(surface_depth(TileType::SlopeFloorRising, 16.0, T), Some(0.0));
    }

    #[test]
    fn falling_floor_surface() {
        assert_eq!(surface_depth(TileType::SlopeFloorFalling, 0.0, T), Some(0.0));
        assert_eq!(surface_depth(TileType::SlopeFloorFalling, 10.0, T), Some(10.0));
    }

    #[test]
    fn ceiling_variants_share_the_floor_functions() {
        for x in [0.0, 3.5, 8.0, 15.0] {
            assert_eq!(
                surface_depth(TileType::SlopeCeilRising, x, T),
                surface_depth(TileType::SlopeFloorRising, x, T)
            );
            assert_eq!(
                surface_depth(TileType::SlopeCeilFalling, x, T),
                surface_depth(TileType::SlopeFloorFalling, x, T)
            );
        }
    }

    #[test]
    fn surface_is_total_outside_tile() {
        assert_eq!(surface_depth(TileType::SlopeFloorRising, -5.0, T), Some(16.0));
        assert_eq!(surface_depth(TileType::SlopeFloorRising, 40.0, T), Some(0.0));
        assert_eq!(surface_depth(TileType::Solid, 4.0, T), None);
    }

    #[test]
    fn floor_depth_takes_highest_point() {
        assert_eq!(floor_depth(TileType::SlopeFloorRising, 2.0, 6.0, T), Some(10.0));
        assert_eq!(floor_depth(TileType::SlopeFloorFalling, 2.0, 6.0, T), Some(2.0));
        assert_eq!(floor_depth(TileType::Solid, 2.0, 6.0, T), Some(0.0));
        assert_eq!(floor_depth(TileType::SlopeCeilRising, 2.0, 6.0, T), Some(0.0));
        assert_eq!(floor_depth(TileType::Empty, 2.0, 6.0, T), None);
    }

    #[test]
    fn floor_depth_of_footprint_reaching_past_tile() {
        // Footprint extends beyond the right edge: clamps to the peak.
        assert_eq!(floor_depth(TileType::SlopeFloorRising, 10.0, 30.0, T), Some(0.0));
        // Footprint starts left of the tile: falling slope peaks at its left edge.
        assert_eq!(floor_depth(TileType::SlopeFloorFalling, -8.0, 4.0, T), Some(0.0));
    }

    #[test]
    fn ceiling_depth_takes_lowest_point() {
        assert_eq!(ceiling_depth(TileType::SlopeCeilRising, 2.0, 6.0, T), Some(14.0));
        assert_eq!(ceiling_depth(TileType::SlopeCeilFalling, 2.0, 6.0, T), Some(6.0));
        assert_eq!(ceiling_depth(TileType::Solid, 2.0, 6.0, T), Some(16.0));
        assert_eq!(ceiling_depth(TileType::SlopeFloorFalling, 2.0, 6.0, T), Some(16.0));
        assert_eq!(ceiling_depth(TileType::Empty, 2.0, 6.0, T), None);
    }

    #[test]
    fn reversed_interval_is_normalised() {
        assert_eq!(
            floor_depth(TileType::SlopeFloorRising, 6.0, 2.0, T),
            floor_depth(TileType::SlopeFloorRising, 2.0, 6.0, T)
        );
    }
}

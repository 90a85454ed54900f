//! Read-only view of the tile world used by the resolver.

use crate::physics::geometry::TileCoord;
use crate::physics::tile::{TileDef, TileType};
use crate::resources::tilegrid::TileGrid;
use crate::resources::tileregistry::TileRegistry;

/// What the resolver finds at a tile coordinate.
#[derive(Debug, Clone, Copy)]
pub enum TileSample {
    /// A tile inside the grid (possibly Empty).
    Tile(TileDef),
    /// Column outside the grid: a wall for horizontal sweeps, no support
    /// vertically.
    Boundary,
    /// Row outside the grid within a valid column: open space.
    Open,
}

/// Grid plus registry, borrowed for the duration of one resolve call.
#[derive(Debug, Clone, Copy)]
pub struct TileWorld<'a> {
    pub grid: &'a TileGrid,
    pub registry: &'a TileRegistry,
}

impl<'a> TileWorld<'a> {
    pub fn new(grid: &'a TileGrid, registry: &'a TileRegistry) -> Self {
        Self { grid, registry }
    }

    pub fn tile_size(&self) -> f32 {
        self.grid.tile_size()
    }

    pub fn sample(&self, col: i32, row: i32) -> TileSample {
        if !self.grid.column_in_range(col) {
            return TileSample::Boundary;
        }
        match self.grid.get(col, row) {
            Some(id) => TileSample::Tile(self.registry.resolve(id)),
            None => TileSample::Open,
        }
    }

    /// Shape-bearing definition at a coordinate, `None` for empty space,
    /// open rows and boundary columns.
    pub fn shape(&self, coord: TileCoord) -> Option<TileDef> {
        match self.sample(coord.col, coord.row) {
            TileSample::Tile(def) if def.tile_type != TileType::Empty => Some(def),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_and_open_samples() {
        let grid = TileGrid::from_ascii(16.0, &["..", "#/"]).unwrap();
        let registry = TileRegistry::default();
        let world = TileWorld::new(&grid, &registry);

        assert!(matches!(world.sample(-1, 0), TileSample::Boundary));
        assert!(matches!(world.sample(2, 1), TileSample::Boundary));
        assert!(matches!(world.sample(0, -1), TileSample::Open));
        assert!(matches!(world.sample(0, 2), TileSample::Open));
        assert!(world.shape(TileCoord::new(0, 0)).is_none());
        assert_eq!(
            world.shape(TileCoord::new(1, 1)).map(|d| d.tile_type),
            Some(TileType::SlopeFloorRising)
        );
    }
}

//! Tile grid resource and tilemap data types.
//!
//! [`TileGrid`] is the read-only collision map the resolver sweeps against: a
//! rectangular array of tile ids with a fixed tile size in world units. It is
//! owned by the level and never mutated by the physics core.
//!
//! [`Tilemap`] is the layered placement format used by tile editors. A grid
//! can be built from one of its layers with [`TileGrid::from_tilemap`].

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;
use crate::resources::tileregistry::{
    TILE_CEIL_FALLING, TILE_CEIL_RISING, TILE_EMPTY, TILE_FLOOR_FALLING, TILE_FLOOR_RISING,
    TILE_SOLID,
};

/// Single tile placement within a layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tileposition {
    /// X coordinate in tiles.
    pub x: u32,
    /// Y coordinate in tiles.
    pub y: u32,
    /// Tile identifier.
    pub id: u32,
}

/// A named tile layer containing positions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tilelayer {
    pub name: String,
    pub positions: Vec<Tileposition>,
}

/// Tilemap metadata and layers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tilemap {
    /// Size of a tile in world units.
    pub tile_size: u32,
    /// Map width in tiles.
    pub map_width: u32,
    /// Map height in tiles.
    pub map_height: u32,
    pub layers: Vec<Tilelayer>,
}

/// Rectangular `(column, row) -> tile id` map.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tile_size: f32,
    tiles: Vec<u32>,
}

impl TileGrid {
    /// Create a grid filled with [`TILE_EMPTY`].
    pub fn new(columns: u32, rows: u32, tile_size: f32) -> Result<Self, PhysicsError> {
        if columns == 0 || rows == 0 {
            return Err(PhysicsError::InvalidGrid(format!(
                "dimensions must be at least 1x1, got {columns}x{rows}"
            )));
        }
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(PhysicsError::InvalidGrid(format!(
                "tile size must be positive, got {tile_size}"
            )));
        }
        Ok(Self {
            columns,
            rows,
            tile_size,
            tiles: vec![TILE_EMPTY; (columns * rows) as usize],
        })
    }

    /// Build a grid from text art, one string per row.
    ///
    /// `.` empty, `#` solid, `/` rising floor, `\` falling floor,
    /// `F` falling ceiling, `R` rising ceiling. Ids follow the default
    /// [`TileRegistry`](crate::resources::tileregistry::TileRegistry).
    pub fn from_ascii(tile_size: f32, rows: &[&str]) -> Result<Self, PhysicsError> {
        let columns = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut grid = Self::new(columns as u32, rows.len() as u32, tile_size)?;
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != columns {
                return Err(PhysicsError::InvalidGrid(format!(
                    "row {row} has {} columns, expected {columns}",
                    line.chars().count()
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                let id = match ch {
                    '.' | ' ' => TILE_EMPTY,
                    '#' => TILE_SOLID,
                    '/' => TILE_FLOOR_RISING,
                    '\\' => TILE_FLOOR_FALLING,
                    'F' => TILE_CEIL_FALLING,
                    'R' => TILE_CEIL_RISING,
                    other => {
                        return Err(PhysicsError::InvalidGrid(format!(
                            "unknown tile character {other:?} at ({col}, {row})"
                        )));
                    }
                };
                grid.tiles[row * columns + col] = id;
            }
        }
        Ok(grid)
    }

    /// Build a grid from one layer of a [`Tilemap`].
    ///
    /// Placements outside the declared map size are dropped.
    pub fn from_tilemap(tilemap: &Tilemap, layer: &str) -> Result<Self, PhysicsError> {
        let layer = tilemap
            .layers
            .iter()
            .find(|l| l.name == layer)
            .ok_or_else(|| PhysicsError::InvalidGrid(format!("tilemap has no layer {layer:?}")))?;
        let mut grid = Self::new(
            tilemap.map_width,
            tilemap.map_height,
            tilemap.tile_size as f32,
        )?;
        for pos in &layer.positions {
            if !grid.set(pos.x as i32, pos.y as i32, pos.id) {
                log::warn!(
                    "Tile ({}, {}) in layer {:?} lies outside the {}x{} map, skipped",
                    pos.x,
                    pos.y,
                    layer.name,
                    tilemap.map_width,
                    tilemap.map_height
                );
            }
        }
        Ok(grid)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Width of the grid in world units.
    pub fn world_width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// Height of the grid in world units.
    pub fn world_height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    pub fn column_in_range(&self, col: i32) -> bool {
        col >= 0 && (col as u32) < self.columns
    }

    pub fn row_in_range(&self, row: i32) -> bool {
        row >= 0 && (row as u32) < self.rows
    }

    /// Tile id at `(col, row)`, `None` outside the grid.
    pub fn get(&self, col: i32, row: i32) -> Option<u32> {
        self.index(col, row).map(|i| self.tiles[i])
    }

    /// Set the tile id at `(col, row)`. Returns false outside the grid.
    pub fn set(&mut self, col: i32, row: i32, id: u32) -> bool {
        match self.index(col, row) {
            Some(i) => {
                self.tiles[i] = id;
                true
            }
            None => false,
        }
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if self.column_in_range(col) && self.row_in_range(row) {
            Some(row as usize * self.columns as usize + col as usize)
        } else {
            None
        }
    }
}

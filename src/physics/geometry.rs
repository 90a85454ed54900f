//! Axis-aligned rectangles and tile coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tolerance used by every geometric comparison in the physics core.
pub const EPSILON: f32 = 1e-4;

/// Axis-aligned rectangle anchored at its top-left corner. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centred on `centre`.
    pub fn centred(centre: Vec2, size: Vec2) -> Self {
        Self::new(
            centre.x - size.x * 0.5,
            centre.y - size.y * 0.5,
            size.x,
            size.y,
        )
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn centre(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Copy of this rectangle moved by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// How deep the two rectangles interpenetrate: the smaller of the two
    /// overlap extents, zero when they do not overlap.
    pub fn penetration(&self, other: &Rect) -> f32 {
        if !self.overlaps(other) {
            return 0.0;
        }
        let w = self.right().min(other.right()) - self.left().max(other.left());
        let h = self.bottom().min(other.bottom()) - self.top().max(other.top());
        w.min(h)
    }
}

/// Column/row address of a tile. May lie outside the grid when it names a
/// boundary constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub col: i32,
    pub row: i32,
}

impl TileCoord {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Inclusive range of tile indices covered by the open interval `(min, max)`.
///
/// Edges lying exactly on a tile boundary do not pull in the neighbouring
/// tile. The range is empty (`first > last`) for degenerate intervals.
pub fn tile_span(min: f32, max: f32, tile_size: f32) -> (i32, i32) {
    let first = ((min + EPSILON) / tile_size).floor() as i32;
    let last = ((max - EPSILON) / tile_size).floor() as i32;
    (first, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_centre() {
        let r = Rect::new(2.0, 3.0, 4.0, 6.0);
        assert_eq!(r.right(), 6.0);
        assert_eq!(r.bottom(), 9.0);
        assert_eq!(r.centre(), Vec2::new(4.0, 6.0));
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0, 0.0, 1.0, 1.0);
        assert!(!a.overlaps(&b));
        assert_eq!(a.penetration(&b), 0.0);
        assert!(a.overlaps(&b.translated(-0.5, 0.0)));
        assert!((a.penetration(&b.translated(-0.5, 0.25)) - 0.5).abs() < 1e-6);
        assert!((a.penetration(&b.translated(-0.75, 0.9)) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn span_ignores_boundary_edges() {
        assert_eq!(tile_span(0.0, 16.0, 16.0), (0, 0));
        assert_eq!(tile_span(8.0, 24.0, 16.0), (0, 1));
        assert_eq!(tile_span(16.0, 32.0, 16.0), (1, 1));
        assert_eq!(tile_span(-8.0, 8.0, 16.0), (-1, 0));
    }

    #[test]
    fn centred_rect() {
        let r = Rect::centred(Vec2::new(10.0, 10.0), Vec2::new(4.0, 2.0));
        assert_eq!(r, Rect::new(8.0, 9.0, 4.0, 2.0));
    }
}

//! Axis-separated collision resolver.
//!
//! [`resolve`] turns a hitbox's velocity into a displacement for one tick and
//! sweeps it against the tile world, horizontal axis first:
//!
//! 1. **Horizontal.** Every column the leading edge enters is checked over
//!    the rows the hitbox spans. Solid tiles and the grid's side boundaries
//!    stop the sweep at their near face. Slopes never block horizontally.
//!    A grounded body may step onto a solid tile whose top lies within `|dx|`
//!    of its bottom, which is how a 45 degree ramp hands over to the floor at
//!    its crest. The step stays below a full tile.
//! 2. **Vertical.** At the resolved x, a downward (or zero) move looks for the
//!    highest floor surface between `bottom - |dx|` and `bottom + dy`, plus a
//!    `|dx|` snap window for bodies that start grounded so they stay glued to
//!    a descending ramp. An upward move looks for the lowest underside. Slopes
//!    are sampled over the whole footprint (see [`crate::physics::slope`]).
//!    If the result would push the body into a ceiling, for instance a step
//!    or ramp lifting it under a low roof, `dx` is shortened until it fits
//!    and the move counts as blocked horizontally.
//! 3. **Post-processing.** Constraining tiles that carry a
//!    [`PostProcessFn`](crate::physics::tile::PostProcessFn) may tighten the
//!    pending value of their axis. Horizontal hooks run before the vertical
//!    pass reads the x position.
//! 4. **Commit** position, zero blocked velocity components and advance the
//!    lifecycle, including the out-of-bounds states below the grid.

use glam::Vec2;
use log::{debug, trace};

use crate::components::hitbox::{Hitbox, HitboxState};
use crate::error::PhysicsError;
use crate::physics::geometry::{EPSILON, Rect, TileCoord, tile_span};
use crate::physics::result::{
    Axis, CollisionResult, ConstrainingTiles, PostProcessCollision, tighten,
};
use crate::physics::slope;
use crate::physics::world::{TileSample, TileWorld};

/// Bisection steps when backing off a move that runs out of headroom.
const HEADROOM_STEPS: u32 = 12;

/// Outcome of a single-axis sweep.
#[derive(Debug, Clone)]
struct Sweep {
    value: f32,
    collided: bool,
    supported: bool,
    tiles: ConstrainingTiles,
}

impl Sweep {
    fn free(value: f32) -> Self {
        Self {
            value,
            collided: false,
            supported: false,
            tiles: ConstrainingTiles::new(),
        }
    }
}

/// Value and flags carried through a chain of post-processing hooks.
#[derive(Debug, Clone, Copy)]
struct Proposal {
    value: f32,
    grounded: bool,
    landed: bool,
}

/// Move `hitbox` by `velocity * delta` through `world`.
///
/// Only the hitbox is mutated. A zero `delta` is a no-op; a negative or NaN
/// `delta` is rejected with [`PhysicsError::InvalidTimestep`].
pub fn resolve(
    hitbox: &mut Hitbox,
    world: &TileWorld<'_>,
    delta: f32,
) -> Result<CollisionResult, PhysicsError> {
    if delta.is_nan() || delta < 0.0 {
        return Err(PhysicsError::InvalidTimestep(delta));
    }
    let prev_state = hitbox.state();
    if delta == 0.0 || prev_state == HitboxState::FallenOutOfBounds {
        return Ok(idle_result(hitbox));
    }

    if let Some(max) = hitbox.max_speed_x {
        hitbox.velocity.x = hitbox.velocity.x.clamp(-max, max);
    }
    let requested = hitbox.velocity * delta;
    let was_grounded = hitbox.is_grounded();
    let start = hitbox.rect();
    let mut result = CollisionResult::new(requested);

    // Horizontal pass.
    let sweep = sweep_horizontal(world, &start, requested.x, was_grounded);
    result.dx = sweep.value;
    result.collided_x = sweep.collided;
    result.x_tiles = sweep.tiles;
    let horizontal = post_process(
        world,
        &result,
        Axis::X,
        requested.x,
        start,
        Proposal {
            value: result.dx,
            grounded: was_grounded,
            landed: false,
        },
    );
    result.dx = horizontal.value;

    // Vertical pass at the resolved x.
    let mut sweep = vertical_pass(world, &start, result.dx, requested.y, was_grounded);
    if result.dx != 0.0 {
        let landed_at = start.translated(result.dx, sweep.value);
        if let Some((_, tiles)) = ceiling_overlap(world, &landed_at) {
            if let Some((dx, shorter)) =
                back_off(world, &start, result.dx, requested.y, was_grounded)
            {
                debug!(
                    "no headroom after moving {:.3}, backing off to {:.3}",
                    result.dx, dx
                );
                result.dx = dx;
                result.collided_x = true;
                result.x_tiles = tiles;
                sweep = shorter;
            }
        }
    }
    let moved = start.translated(result.dx, 0.0);
    result.dy = sweep.value;
    result.collided_y = sweep.collided;
    result.y_tiles = sweep.tiles;
    result.grounded = sweep.supported;
    result.landed = sweep.supported && !was_grounded;
    let vertical = post_process(
        world,
        &result,
        Axis::Y,
        requested.y,
        moved,
        Proposal {
            value: result.dy,
            grounded: result.grounded,
            landed: result.landed,
        },
    );
    result.dy = vertical.value;
    result.grounded = vertical.grounded;
    result.landed = vertical.landed && vertical.grounded && !was_grounded;

    // Commit.
    hitbox.position += Vec2::new(result.dx, result.dy);
    if result.collided_x {
        hitbox.velocity.x = 0.0;
    }
    if result.collided_y {
        hitbox.velocity.y = if requested.y < 0.0 {
            hitbox.velocity.y.max(0.0)
        } else {
            hitbox.velocity.y.min(0.0)
        };
    }

    let floor_line = world.grid.world_height();
    let below = hitbox.bottom() - floor_line;
    if below > EPSILON {
        result.grounded = false;
        result.landed = false;
        result.fell_out_of_bounds_below = true;
        let mut state = HitboxState::FallingOutOfBounds;
        if prev_state != HitboxState::FallingOutOfBounds {
            result.falling_out_of_bounds = true;
        }
        if below >= hitbox.height() - EPSILON {
            state = HitboxState::FallenOutOfBounds;
            result.fallen_out_of_bounds = true;
        }
        hitbox.set_state(state);
    } else if result.grounded {
        hitbox.set_state(HitboxState::Grounded);
    } else {
        hitbox.set_state(HitboxState::Airborne);
    }
    result.left_ground = was_grounded && !result.grounded;

    trace!(
        "resolved move requested=({:.3}, {:.3}) applied=({:.3}, {:.3}) state={:?}",
        requested.x,
        requested.y,
        result.dx,
        result.dy,
        hitbox.state()
    );
    Ok(result)
}

fn idle_result(hitbox: &Hitbox) -> CollisionResult {
    CollisionResult {
        grounded: hitbox.is_grounded(),
        fell_out_of_bounds_below: hitbox.is_out_of_bounds(),
        ..CollisionResult::default()
    }
}

fn sweep_horizontal(world: &TileWorld<'_>, rect: &Rect, dx: f32, grounded: bool) -> Sweep {
    let mut sweep = Sweep::free(dx);
    if dx == 0.0 {
        return sweep;
    }
    let t = world.tile_size();
    let (row_first, row_last) = tile_span(rect.top(), rect.bottom(), t);
    // A full tile is always a wall, however fast the body.
    let step = if grounded {
        (dx.abs() + EPSILON).min(t - 2.0 * EPSILON)
    } else {
        0.0
    };

    let blockers = |col: i32| -> ConstrainingTiles {
        let mut tiles = ConstrainingTiles::new();
        if !world.grid.column_in_range(col) {
            tiles.push(TileCoord::new(col, row_first));
            return tiles;
        }
        for row in row_first..=row_last {
            if let TileSample::Tile(def) = world.sample(col, row) {
                if !def.tile_type.blocks_horizontally() {
                    continue;
                }
                let depth = rect.bottom() - row as f32 * t;
                if depth > step {
                    tiles.push(TileCoord::new(col, row));
                }
            }
        }
        tiles
    };

    if dx > 0.0 {
        let from = ((rect.right() - EPSILON) / t).floor() as i32;
        let to = ((rect.right() + dx - EPSILON) / t).floor() as i32;
        for col in (from + 1)..=to {
            let tiles = blockers(col);
            if !tiles.is_empty() {
                sweep.value = (col as f32 * t - rect.right()).clamp(0.0, dx);
                sweep.collided = true;
                sweep.tiles = tiles;
                break;
            }
        }
    } else {
        let from = ((rect.left() + EPSILON) / t).floor() as i32;
        let to = ((rect.left() + dx + EPSILON) / t).floor() as i32;
        for col in (to..from).rev() {
            let tiles = blockers(col);
            if !tiles.is_empty() {
                sweep.value = ((col + 1) as f32 * t - rect.left()).clamp(dx, 0.0);
                sweep.collided = true;
                sweep.tiles = tiles;
                break;
            }
        }
    }
    sweep
}

fn vertical_pass(world: &TileWorld<'_>, start: &Rect, dx: f32, dy: f32, grounded: bool) -> Sweep {
    let moved = start.translated(dx, 0.0);
    if dy < 0.0 {
        sweep_up(world, &moved, dy, dx.abs())
    } else {
        sweep_down(world, &moved, dy, dx.abs(), grounded)
    }
}

/// Ceiling undersides strictly inside `rect`, lowest first.
fn ceiling_overlap(world: &TileWorld<'_>, rect: &Rect) -> Option<(f32, ConstrainingTiles)> {
    lowest_ceiling(world, rect, rect.top() + EPSILON, rect.bottom() - EPSILON)
}

/// Longest share of `dx` whose vertical pass leaves the body clear of every
/// ceiling. `None` when even standing still does not.
fn back_off(
    world: &TileWorld<'_>,
    start: &Rect,
    dx: f32,
    dy: f32,
    grounded: bool,
) -> Option<(f32, Sweep)> {
    let clear = |step: f32| {
        let sweep = vertical_pass(world, start, step, dy, grounded);
        let end = start.translated(step, sweep.value);
        ceiling_overlap(world, &end).is_none().then_some(sweep)
    };
    let mut best = (0.0, clear(0.0)?);
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..HEADROOM_STEPS {
        let mid = 0.5 * (lo + hi);
        match clear(dx * mid) {
            Some(sweep) => {
                lo = mid;
                best = (dx * mid, sweep);
            }
            None => hi = mid,
        }
    }
    Some(best)
}

fn sweep_down(world: &TileWorld<'_>, rect: &Rect, dy: f32, dx_abs: f32, grounded: bool) -> Sweep {
    let allowance = dx_abs + EPSILON;
    let snap = if grounded { dx_abs + EPSILON } else { 0.0 };
    let lo = rect.bottom() - allowance;
    let hi = rect.bottom() + dy + snap + EPSILON;
    match highest_floor(world, rect, lo, hi) {
        Some((surface, tiles)) => Sweep {
            value: surface - rect.bottom(),
            collided: true,
            supported: true,
            tiles,
        },
        None => Sweep::free(dy),
    }
}

fn sweep_up(world: &TileWorld<'_>, rect: &Rect, dy: f32, dx_abs: f32) -> Sweep {
    let allowance = dx_abs + EPSILON;
    let lo = rect.top() + dy - EPSILON;
    let hi = rect.top() + allowance;
    let mut sweep = match lowest_ceiling(world, rect, lo, hi) {
        Some((ceiling, tiles)) => Sweep {
            value: ceiling - rect.top(),
            collided: true,
            supported: false,
            tiles,
        },
        None => Sweep::free(dy),
    };

    // A body jumping while walking into a ramp must not stay buried in it.
    let risen = rect.translated(0.0, sweep.value);
    if let Some((surface, tiles)) =
        highest_floor(world, &risen, risen.bottom() - allowance, risen.bottom())
    {
        let lift = surface - risen.bottom();
        if lift < -EPSILON {
            debug!("lifting rising body {:.3} out of a floor", -lift);
            sweep.value += lift;
            sweep.tiles.extend(tiles);
        }
    }
    sweep
}

/// Highest floor surface (smallest y) in `[lo, hi]` under the footprint.
fn highest_floor(
    world: &TileWorld<'_>,
    rect: &Rect,
    lo: f32,
    hi: f32,
) -> Option<(f32, ConstrainingTiles)> {
    let t = world.tile_size();
    let (col_first, col_last) = tile_span(rect.left(), rect.right(), t);
    let row_first = (lo / t).floor() as i32 - 1;
    let row_last = (hi / t).floor() as i32;

    let mut best: Option<(f32, ConstrainingTiles)> = None;
    for col in col_first..=col_last {
        let a = rect.left() - col as f32 * t;
        let b = rect.right() - col as f32 * t;
        for row in row_first..=row_last {
            let coord = TileCoord::new(col, row);
            let Some(def) = world.shape(coord) else {
                continue;
            };
            let Some(depth) = slope::floor_depth(def.tile_type, a, b, t) else {
                continue;
            };
            let surface = row as f32 * t + depth;
            if surface < lo || surface > hi {
                continue;
            }
            keep_extreme(&mut best, surface, coord, |new, old| new < old);
        }
    }
    best
}

/// Lowest ceiling underside (largest y) in `[lo, hi]` over the footprint.
fn lowest_ceiling(
    world: &TileWorld<'_>,
    rect: &Rect,
    lo: f32,
    hi: f32,
) -> Option<(f32, ConstrainingTiles)> {
    let t = world.tile_size();
    let (col_first, col_last) = tile_span(rect.left(), rect.right(), t);
    let row_first = (lo / t).floor() as i32 - 1;
    let row_last = (hi / t).floor() as i32;

    let mut best: Option<(f32, ConstrainingTiles)> = None;
    for col in col_first..=col_last {
        let a = rect.left() - col as f32 * t;
        let b = rect.right() - col as f32 * t;
        for row in row_first..=row_last {
            let coord = TileCoord::new(col, row);
            let Some(def) = world.shape(coord) else {
                continue;
            };
            let Some(depth) = slope::ceiling_depth(def.tile_type, a, b, t) else {
                continue;
            };
            let underside = row as f32 * t + depth;
            if underside < lo || underside > hi {
                continue;
            }
            keep_extreme(&mut best, underside, coord, |new, old| new > old);
        }
    }
    best
}

/// Keep the most constraining surface; surfaces within [`EPSILON`] of it tie
/// and are all reported.
fn keep_extreme(
    best: &mut Option<(f32, ConstrainingTiles)>,
    surface: f32,
    coord: TileCoord,
    better: impl Fn(f32, f32) -> bool,
) {
    match best {
        Some((current, tiles)) if (surface - *current).abs() <= EPSILON => tiles.push(coord),
        Some((current, _)) if !better(surface, *current) => {}
        _ => {
            let mut tiles = ConstrainingTiles::new();
            tiles.push(coord);
            *best = Some((surface, tiles));
        }
    }
}

fn post_process(
    world: &TileWorld<'_>,
    result: &CollisionResult,
    axis: Axis,
    requested: f32,
    origin: Rect,
    mut proposal: Proposal,
) -> Proposal {
    let tiles = match axis {
        Axis::X => &result.x_tiles,
        Axis::Y => &result.y_tiles,
    };
    for &tile in tiles {
        let Some(def) = world.shape(tile) else {
            continue;
        };
        let Some(hook) = def.post_process else {
            continue;
        };
        let mut pending = PostProcessCollision {
            axis,
            value: proposal.value,
            tile,
            tile_type: def.tile_type,
            tile_size: world.tile_size(),
            origin,
            grounded: proposal.grounded,
            landed: proposal.landed,
        };
        hook(result, &mut pending);
        let value = tighten(requested, proposal.value, pending.value);
        if value != pending.value {
            debug!(
                "post-process hook on {:?} tried to loosen {:?} from {:.3} to {:.3}, ignored",
                tile, axis, proposal.value, pending.value
            );
        }
        proposal.value = value;
        if axis == Axis::Y {
            proposal.grounded = pending.grounded;
            proposal.landed = pending.landed;
        }
    }
    proposal
}

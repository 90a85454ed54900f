//! Camera controller resource.
//!
//! [`CameraController`] keeps a view centre that follows a tracked entity's
//! hitbox centre. How the centre approaches the target is decided by a
//! pluggable [`CameraStrategy`], which yields a per-tick delta and the
//! absolute destination used for teleports.
//!
//! The controller only reads positions. It never touches physics state and
//! the renderer (not part of this crate) is expected to consume
//! [`CameraController::visible_region`] for culling.

use bevy_ecs::prelude::{Entity, Resource};
use glam::Vec2;
use log::debug;

use crate::physics::geometry::Rect;

/// Decides how the camera moves toward its target.
pub trait CameraStrategy: Send + Sync {
    /// Centre offset to apply this tick.
    fn step(&mut self, centre: Vec2, target: Vec2, delta: f32) -> Vec2;

    /// Where the centre goes on a teleport.
    fn destination(&self, _centre: Vec2, target: Vec2) -> Vec2 {
        target
    }
}

/// Jumps to the target every tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Snap;

impl CameraStrategy for Snap {
    fn step(&mut self, centre: Vec2, target: Vec2, _delta: f32) -> Vec2 {
        target - centre
    }
}

/// Covers `rate` of the remaining distance per millisecond.
#[derive(Debug, Clone, Copy)]
pub struct Lerp {
    pub rate: f32,
}

impl Lerp {
    pub fn new(rate: f32) -> Self {
        Self { rate }
    }
}

impl CameraStrategy for Lerp {
    fn step(&mut self, centre: Vec2, target: Vec2, delta: f32) -> Vec2 {
        let t = (self.rate * delta).clamp(0.0, 1.0);
        (target - centre) * t
    }
}

/// Stays put while the target is inside a box around the centre and drags
/// the box edge along when it leaves.
#[derive(Debug, Clone, Copy)]
pub struct DeadZone {
    pub half_extent: Vec2,
}

impl DeadZone {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half_extent: Vec2::new(width * 0.5, height * 0.5),
        }
    }

    fn drag(&self, centre: Vec2, target: Vec2) -> Vec2 {
        let offset = target - centre;
        Vec2::new(
            Self::pull(offset.x, self.half_extent.x),
            Self::pull(offset.y, self.half_extent.y),
        )
    }

    fn pull(offset: f32, half: f32) -> f32 {
        if offset > half {
            offset - half
        } else if offset < -half {
            offset + half
        } else {
            0.0
        }
    }
}

impl CameraStrategy for DeadZone {
    fn step(&mut self, centre: Vec2, target: Vec2, _delta: f32) -> Vec2 {
        self.drag(centre, target)
    }

    /// Teleports only as far as needed to bring the target to the zone edge.
    fn destination(&self, centre: Vec2, target: Vec2) -> Vec2 {
        centre + self.drag(centre, target)
    }
}

/// Camera that follows an entity through the world.
#[derive(Resource)]
pub struct CameraController {
    centre: Vec2,
    viewport: Vec2,
    tracked: Option<Entity>,
    target: Option<Vec2>,
    bounds: Option<Rect>,
    strategy: Box<dyn CameraStrategy>,
}

impl std::fmt::Debug for CameraController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraController")
            .field("centre", &self.centre)
            .field("viewport", &self.viewport)
            .field("tracked", &self.tracked)
            .field("target", &self.target)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl CameraController {
    /// Camera at the origin with a [`Snap`] strategy.
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            centre: Vec2::ZERO,
            viewport: Vec2::new(viewport_width, viewport_height),
            tracked: None,
            target: None,
            bounds: None,
            strategy: Box::new(Snap),
        }
    }

    pub fn with_strategy(mut self, strategy: impl CameraStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Keep the visible region inside `bounds` (usually the grid's extent).
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self.centre = self.clamped(self.centre);
        self
    }

    pub fn set_strategy(&mut self, strategy: impl CameraStrategy + 'static) {
        self.strategy = Box::new(strategy);
    }

    pub fn centre(&self) -> Vec2 {
        self.centre
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn tracked(&self) -> Option<Entity> {
        self.tracked
    }

    /// Last target position seen by [`follow`](Self::follow).
    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    /// Follow `entity` from the next tick on.
    pub fn track_entity(&mut self, entity: Entity) {
        debug!("camera tracking {:?}", entity);
        self.tracked = Some(entity);
        self.target = None;
    }

    pub fn untrack(&mut self) {
        self.tracked = None;
        self.target = None;
    }

    /// Feed the tracked target's current position and step the strategy.
    pub fn follow(&mut self, target: Vec2, delta: f32) {
        self.target = Some(target);
        let step = self.strategy.step(self.centre, target, delta);
        self.centre = self.clamped(self.centre + step);
    }

    /// Jump straight to the strategy's destination for the last known target.
    ///
    /// Does nothing before the first [`follow`](Self::follow).
    pub fn teleport_to_destination(&mut self) {
        if let Some(target) = self.target {
            let destination = self.strategy.destination(self.centre, target);
            self.centre = self.clamped(destination);
        }
    }

    /// Place the centre directly, ignoring the strategy.
    pub fn set_centre(&mut self, centre: Vec2) {
        self.centre = self.clamped(centre);
    }

    /// World rectangle currently in view.
    pub fn visible_region(&self) -> Rect {
        Rect::centred(self.centre, self.viewport)
    }

    fn clamped(&self, centre: Vec2) -> Vec2 {
        let Some(bounds) = self.bounds else {
            return centre;
        };
        let half = self.viewport * 0.5;
        let axis = |c: f32, lo: f32, hi: f32, half: f32| {
            if hi - lo <= half * 2.0 {
                (lo + hi) * 0.5
            } else {
                c.clamp(lo + half, hi - half)
            }
        };
        Vec2::new(
            axis(centre.x, bounds.left(), bounds.right(), half.x),
            axis(centre.y, bounds.top(), bounds.bottom(), half.y),
        )
    }
}

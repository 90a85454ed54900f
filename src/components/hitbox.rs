//! Movable physical body of an entity.
//!
//! A [`Hitbox`] is an axis-aligned rectangle with a velocity and a lifecycle
//! state. It is created with its owning entity, mutated only during that
//! entity's update (by behaviours and by the resolver), and despawned with it.
//! Its size is fixed at construction.
//!
//! # Lifecycle
//!
//! ```text
//! Airborne --land--> Grounded --no support--> Airborne
//! Airborne --bottom below grid--> FallingOutOfBounds --clear by own height--> FallenOutOfBounds
//! ```
//!
//! `FallenOutOfBounds` is terminal until [`Hitbox::teleport`] moves the body
//! back.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;

use crate::error::PhysicsError;
use crate::physics::geometry::Rect;

/// Lifecycle state of a hitbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitboxState {
    Grounded,
    #[default]
    Airborne,
    FallingOutOfBounds,
    FallenOutOfBounds,
}

/// Axis-aligned physical presence of an entity.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Hitbox {
    /// Owning entity, if any. Not an ownership link.
    pub owner: Option<Entity>,
    /// Top-left corner in world units.
    pub position: Vec2,
    /// World units per millisecond.
    pub velocity: Vec2,
    /// Symmetric clamp applied to `velocity.x` before each move.
    pub max_speed_x: Option<f32>,
    size: Vec2,
    state: HitboxState,
}

impl Hitbox {
    /// Create an airborne hitbox at rest.
    ///
    /// Fails with [`PhysicsError::InvalidGeometry`] unless both dimensions are
    /// finite and positive.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, PhysicsError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(PhysicsError::InvalidGeometry { width, height });
        }
        Ok(Self {
            owner: None,
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            max_speed_x: None,
            size: Vec2::new(width, height),
            state: HitboxState::Airborne,
        })
    }

    pub fn with_owner(mut self, owner: Entity) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_max_speed_x(mut self, max_speed_x: f32) -> Self {
        self.max_speed_x = Some(max_speed_x.abs());
        self
    }

    /// Start in the grounded state (the caller vouches for the support).
    pub fn grounded(mut self) -> Self {
        self.state = HitboxState::Grounded;
        self
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn state(&self) -> HitboxState {
        self.state
    }

    pub fn is_grounded(&self) -> bool {
        self.state == HitboxState::Grounded
    }

    /// Whether the hitbox is falling or has fallen below the grid.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self.state,
            HitboxState::FallingOutOfBounds | HitboxState::FallenOutOfBounds
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    pub fn centre(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    /// Reposition the hitbox from outside the simulation.
    ///
    /// Resets the lifecycle to airborne, which is the only way out of
    /// [`HitboxState::FallenOutOfBounds`].
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.state = HitboxState::Airborne;
    }

    pub(crate) fn set_state(&mut self, state: HitboxState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_sizes() {
        assert_eq!(
            Hitbox::new(0.0, 0.0, 0.0, 1.0),
            Err(PhysicsError::InvalidGeometry {
                width: 0.0,
                height: 1.0
            })
        );
        assert!(Hitbox::new(0.0, 0.0, 1.0, -2.0).is_err());
        assert!(Hitbox::new(0.0, 0.0, f32::NAN, 1.0).is_err());
        assert!(Hitbox::new(0.0, 0.0, f32::INFINITY, 1.0).is_err());
    }

    #[test]
    fn starts_airborne_at_rest() {
        let hb = Hitbox::new(1.0, 2.0, 4.0, 8.0).unwrap();
        assert_eq!(hb.state(), HitboxState::Airborne);
        assert_eq!(hb.velocity, Vec2::ZERO);
        assert_eq!(hb.centre(), Vec2::new(3.0, 6.0));
        assert_eq!(hb.bottom(), 10.0);
        assert_eq!(hb.rect(), Rect::new(1.0, 2.0, 4.0, 8.0));
    }

    #[test]
    fn builder_options() {
        let hb = Hitbox::new(0.0, 0.0, 1.0, 1.0)
            .unwrap()
            .with_velocity(Vec2::new(0.5, 0.0))
            .with_max_speed_x(-0.25)
            .grounded();
        assert!(hb.is_grounded());
        assert_eq!(hb.max_speed_x, Some(0.25));
        assert_eq!(hb.velocity.x, 0.5);
    }

    #[test]
    fn teleport_resets_terminal_state() {
        let mut hb = Hitbox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        hb.set_state(HitboxState::FallenOutOfBounds);
        assert!(hb.is_out_of_bounds());
        hb.teleport(Vec2::new(5.0, 5.0));
        assert_eq!(hb.state(), HitboxState::Airborne);
        assert_eq!(hb.position, Vec2::new(5.0, 5.0));
    }
}

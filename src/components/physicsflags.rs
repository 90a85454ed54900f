//! Opt-in physics markers for entities that own a [`Hitbox`](super::hitbox::Hitbox).
//!
//! The update system applies the per-entity steps only when the matching
//! component is present:
//!
//! - [`GravityAffected`] adds gravity to the vertical velocity before the move.
//! - [`Movable`] runs the collision resolver on the hitbox.
//! - [`FrictionAffected`] decays horizontal velocity after the move.
//!
//! [`LastCollision`] keeps the most recent resolver output for gameplay code
//! and [`MarkedForDeletion`] flags entities the cleanup system will despawn.

use bevy_ecs::prelude::Component;

use crate::physics::result::CollisionResult;

/// Gravity multiplier for this entity. `1.0` means the configured gravity.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct GravityAffected {
    pub scale: f32,
}

impl Default for GravityAffected {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl GravityAffected {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

/// Friction multipliers applied to the configured ground and air friction.
///
/// Applied as `vx *= (1 - friction * delta)`, clamped so velocity never
/// reverses direction.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct FrictionAffected {
    pub ground: f32,
    pub air: f32,
}

impl Default for FrictionAffected {
    fn default() -> Self {
        Self {
            ground: 1.0,
            air: 1.0,
        }
    }
}

impl FrictionAffected {
    pub fn new(ground: f32, air: f32) -> Self {
        Self { ground, air }
    }

    /// Velocity multiplier for one step.
    pub fn factor(&self, friction: f32, grounded: bool, delta: f32) -> f32 {
        let scale = if grounded { self.ground } else { self.air };
        (1.0 - friction * scale * delta).clamp(0.0, 1.0)
    }
}

/// Marker: the entity's hitbox is moved through the tile world each tick.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Movable;

/// Result of the entity's most recent resolver step.
#[derive(Component, Clone, Debug, Default)]
pub struct LastCollision(pub CollisionResult);

/// Marker for entities to be despawned at the end of the tick.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct MarkedForDeletion;

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    // ==================== GRAVITY TESTS ====================

    #[test]
    fn test_gravity_default_scale() {
        assert!(approx_eq(GravityAffected::default().scale, 1.0));
        assert!(approx_eq(GravityAffected::new(0.5).scale, 0.5));
    }

    // ==================== FRICTION TESTS ====================

    #[test]
    fn test_friction_picks_coefficient_by_support() {
        let f = FrictionAffected::new(2.0, 0.5);
        assert!(approx_eq(f.factor(0.01, true, 10.0), 0.8));
        assert!(approx_eq(f.factor(0.01, false, 10.0), 0.95));
    }

    #[test]
    fn test_friction_never_reverses() {
        let f = FrictionAffected::default();
        assert!(approx_eq(f.factor(1.0, true, 100.0), 0.0));
    }

    #[test]
    fn test_zero_friction_keeps_velocity() {
        let f = FrictionAffected::default();
        assert!(approx_eq(f.factor(0.0, true, 16.0), 1.0));
    }
}

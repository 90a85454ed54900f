//! Listener contract for hitbox movement.
//!
//! Transition callbacks fire on the step where the transition happens, in the
//! order left-ground, landed, falling out of bounds, fallen out of bounds.
//! `on_moved` follows on every successful step.

use crate::components::hitbox::Hitbox;
use crate::error::PhysicsError;
use crate::physics::resolver::resolve;
use crate::physics::result::CollisionResult;
use crate::physics::world::TileWorld;

/// Receiver of hitbox movement notifications. All methods default to no-ops.
pub trait HitboxListener {
    fn on_moved(&mut self, _result: &CollisionResult) {}
    fn on_landed(&mut self) {}
    fn on_left_ground(&mut self) {}
    fn on_falling_out_of_bounds(&mut self) {}
    fn on_fallen_out_of_bounds(&mut self) {}
}

/// Listener that ignores everything.
impl HitboxListener for () {}

/// Deliver the notifications carried by `result`.
pub fn dispatch(result: &CollisionResult, listener: &mut dyn HitboxListener) {
    if result.left_ground {
        listener.on_left_ground();
    }
    if result.landed {
        listener.on_landed();
    }
    if result.falling_out_of_bounds {
        listener.on_falling_out_of_bounds();
    }
    if result.fallen_out_of_bounds {
        listener.on_fallen_out_of_bounds();
    }
    listener.on_moved(result);
}

/// Resolve one step and notify `listener`.
///
/// Nothing is dispatched when the step is rejected.
pub fn move_hitbox(
    hitbox: &mut Hitbox,
    world: &TileWorld<'_>,
    delta: f32,
    listener: &mut dyn HitboxListener,
) -> Result<CollisionResult, PhysicsError> {
    let result = resolve(hitbox, world, delta)?;
    dispatch(&result, listener);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tilegrid::TileGrid;
    use crate::resources::tileregistry::TileRegistry;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl HitboxListener for Recorder {
        fn on_moved(&mut self, _result: &CollisionResult) {
            self.calls.push("moved");
        }
        fn on_landed(&mut self) {
            self.calls.push("landed");
        }
        fn on_left_ground(&mut self) {
            self.calls.push("left_ground");
        }
        fn on_falling_out_of_bounds(&mut self) {
            self.calls.push("falling");
        }
        fn on_fallen_out_of_bounds(&mut self) {
            self.calls.push("fallen");
        }
    }

    #[test]
    fn dispatch_order() {
        let result = CollisionResult {
            left_ground: true,
            falling_out_of_bounds: true,
            fallen_out_of_bounds: true,
            ..CollisionResult::default()
        };
        let mut rec = Recorder::default();
        dispatch(&result, &mut rec);
        assert_eq!(rec.calls, vec!["left_ground", "falling", "fallen", "moved"]);
    }

    #[test]
    fn rejected_step_dispatches_nothing() {
        let grid = TileGrid::new(2, 2, 16.0).unwrap();
        let registry = TileRegistry::default();
        let world = TileWorld::new(&grid, &registry);
        let mut hb = Hitbox::new(0.0, 0.0, 4.0, 4.0).unwrap();
        let mut rec = Recorder::default();
        assert!(move_hitbox(&mut hb, &world, -5.0, &mut rec).is_err());
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn landing_fires_once() {
        let grid = TileGrid::from_ascii(16.0, &["..", "..", "##"]).unwrap();
        let registry = TileRegistry::default();
        let world = TileWorld::new(&grid, &registry);
        let mut hb = Hitbox::new(4.0, 0.0, 8.0, 8.0)
            .unwrap()
            .with_velocity(Vec2::new(0.0, 0.5));
        let mut rec = Recorder::default();
        for _ in 0..10 {
            hb.velocity.y = 0.5;
            move_hitbox(&mut hb, &world, 16.0, &mut rec).unwrap();
        }
        assert_eq!(rec.calls.iter().filter(|c| **c == "landed").count(), 1);
        assert_eq!(rec.calls.iter().filter(|c| **c == "moved").count(), 10);
        assert!(!rec.calls.contains(&"left_ground"));
    }
}

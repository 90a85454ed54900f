//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance the `WorldTime` resource by `dt` unscaled milliseconds.
///
/// Run once before each pass of the update schedule.
pub fn update_world_time(world: &mut World, dt: f32) {
    world.resource_mut::<WorldTime>().advance(dt);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_and_accumulates() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.5));
        update_world_time(&mut world, 16.0);
        update_world_time(&mut world, 16.0);
        let wt = world.resource::<WorldTime>();
        assert_eq!(wt.delta, 8.0);
        assert_eq!(wt.elapsed, 16.0);
        assert_eq!(wt.frame_count, 2);
    }

    #[test]
    fn bad_deltas_become_zero() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        update_world_time(&mut world, -3.0);
        assert_eq!(world.resource::<WorldTime>().delta, 0.0);
        update_world_time(&mut world, f32::NAN);
        assert_eq!(world.resource::<WorldTime>().delta, 0.0);
    }
}

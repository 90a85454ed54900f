use bevy_ecs::prelude::Resource;
use log::warn;

/// Simulation clock. All values are in milliseconds.
///
/// `delta` is the scaled length of the current tick and is what every
/// physics step consumes.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Start a new tick of `dt` unscaled milliseconds.
    ///
    /// Negative or non-finite input counts as an empty tick and is logged.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("Invalid tick length {dt} ms, advancing by 0");
            0.0
        };
        self.delta = dt * self.time_scale;
        self.elapsed += self.delta;
        self.frame_count += 1;
    }
}

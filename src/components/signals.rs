// Per-entity signals published by the update system for gameplay code

use bevy_ecs::prelude::Component;
use rustc_hash::{FxHashMap, FxHashSet};

/// Flag set while the entity's hitbox is grounded.
pub const SIGNAL_GROUNDED: &str = "grounded";
/// Scalar holding the hitbox's horizontal velocity after the last step.
pub const SIGNAL_SPEED_X: &str = "speed_x";
/// Integer counting landings since the entity spawned.
pub const SIGNAL_LANDINGS: &str = "landings";

#[derive(Debug, Clone, Default, Component)]
pub struct Signals {
    pub scalars: FxHashMap<String, f32>,
    pub integers: FxHashMap<String, i32>,
    pub flags: FxHashSet<String>,
}

impl Signals {
    pub fn set_scalar(&mut self, key: impl Into<String>, value: f32) {
        self.scalars.insert(key.into(), value);
    }
    pub fn get_scalar(&self, key: &str) -> Option<f32> {
        self.scalars.get(key).copied()
    }
    pub fn get_integer(&self, key: &str) -> Option<i32> {
        self.integers.get(key).copied()
    }
    pub fn increment(&mut self, key: impl Into<String>) -> i32 {
        let slot = self.integers.entry(key.into()).or_insert(0);
        *slot += 1;
        *slot
    }
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }
    pub fn clear_flag(&mut self, key: &str) {
        self.flags.remove(key);
    }
    pub fn put_flag(&mut self, key: &str, on: bool) {
        if on {
            self.set_flag(key);
        } else {
            self.clear_flag(key);
        }
    }
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_and_counters() {
        let mut s = Signals::default();
        s.put_flag(SIGNAL_GROUNDED, true);
        assert!(s.has_flag(SIGNAL_GROUNDED));
        s.put_flag(SIGNAL_GROUNDED, false);
        assert!(!s.has_flag(SIGNAL_GROUNDED));

        assert_eq!(s.increment(SIGNAL_LANDINGS), 1);
        assert_eq!(s.increment(SIGNAL_LANDINGS), 2);
        assert_eq!(s.get_integer(SIGNAL_LANDINGS), Some(2));

        s.set_scalar(SIGNAL_SPEED_X, -0.5);
        assert_eq!(s.get_scalar(SIGNAL_SPEED_X), Some(-0.5));
        assert_eq!(s.get_scalar("missing"), None);
    }
}

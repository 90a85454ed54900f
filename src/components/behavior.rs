//! Per-entity behaviour hooks.
//!
//! A [`Behaviors`] component holds named [`Behavior`] implementations that
//! run at the start of the entity's update, before gravity and collision.
//! Behaviours steer the hitbox by writing its velocity; they never move it
//! directly.
//!
//! # Lifecycle
//!
//! - `on_attach` – once, on the first update after the behaviour was added
//! - `update` – every tick, in insertion order
//! - `destroy` – once, when the entity is despawned by the cleanup system
//!
//! # Example
//!
//! ```ignore
//! commands.spawn((
//!     hitbox,
//!     Movable,
//!     Behaviors::new().with("walk", Patrol::new(0.08)),
//! ));
//! ```

use bevy_ecs::prelude::{Component, Entity};
use log::debug;

use crate::components::hitbox::Hitbox;
use crate::components::signals::Signals;
use crate::physics::result::CollisionResult;

/// Data a behaviour may read or steer during its update.
pub struct BehaviorContext<'a> {
    pub entity: Entity,
    /// Milliseconds in this tick.
    pub delta: f32,
    pub hitbox: &'a mut Hitbox,
    /// Resolver output of the entity's previous tick, if it moved.
    pub last_collision: Option<&'a CollisionResult>,
    pub signals: Option<&'a mut Signals>,
}

/// Per-entity logic hook.
pub trait Behavior: Send + Sync {
    fn on_attach(&mut self, _entity: Entity) {}
    fn update(&mut self, ctx: &mut BehaviorContext<'_>);
    fn destroy(&mut self, _entity: Entity) {}
}

struct Slot {
    name: String,
    behavior: Box<dyn Behavior>,
    attached: bool,
}

/// Named behaviours of one entity, run in insertion order.
#[derive(Component, Default)]
pub struct Behaviors {
    slots: Vec<Slot>,
}

impl std::fmt::Debug for Behaviors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.slots.iter().map(|s| &s.name))
            .finish()
    }
}

impl Behaviors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, behavior: impl Behavior + 'static) -> Self {
        self.insert(name, behavior);
        self
    }

    /// Add a behaviour, replacing (without destroying) any behaviour with the
    /// same name.
    pub fn insert(&mut self, name: impl Into<String>, behavior: impl Behavior + 'static) {
        let name = name.into();
        let slot = Slot {
            name: name.clone(),
            behavior: Box::new(behavior),
            attached: false,
        };
        match self.slots.iter_mut().find(|s| s.name == name) {
            Some(existing) => *existing = slot,
            None => self.slots.push(slot),
        }
    }

    /// Remove a behaviour by name, running its `destroy` hook.
    pub fn remove(&mut self, name: &str, entity: Entity) -> bool {
        match self.slots.iter().position(|s| s.name == name) {
            Some(index) => {
                let mut slot = self.slots.remove(index);
                slot.behavior.destroy(entity);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.iter().any(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Run every behaviour for one tick.
    pub fn run(&mut self, ctx: &mut BehaviorContext<'_>) {
        for slot in &mut self.slots {
            if !slot.attached {
                debug!("attaching behaviour {:?} to {:?}", slot.name, ctx.entity);
                slot.behavior.on_attach(ctx.entity);
                slot.attached = true;
            }
            slot.behavior.update(ctx);
        }
    }

    /// Run every `destroy` hook and drop the behaviours.
    pub fn destroy_all(&mut self, entity: Entity) {
        for mut slot in self.slots.drain(..) {
            slot.behavior.destroy(entity);
        }
    }
}

/// Keeps the horizontal velocity at a fixed value.
#[derive(Debug, Clone, Copy)]
pub struct ConstantWalk {
    pub speed: f32,
}

impl ConstantWalk {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}

impl Behavior for ConstantWalk {
    fn update(&mut self, ctx: &mut BehaviorContext<'_>) {
        ctx.hitbox.velocity.x = self.speed;
    }
}

/// Walks at a fixed speed and turns around after bumping into a wall.
#[derive(Debug, Clone, Copy)]
pub struct Patrol {
    pub speed: f32,
    direction: f32,
}

impl Patrol {
    /// Patrol starting to the right when `speed` is positive.
    pub fn new(speed: f32) -> Self {
        Self {
            speed: speed.abs(),
            direction: if speed < 0.0 { -1.0 } else { 1.0 },
        }
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }
}

impl Behavior for Patrol {
    fn update(&mut self, ctx: &mut BehaviorContext<'_>) {
        if let Some(last) = ctx.last_collision {
            let pushing = last.requested.x * self.direction > 0.0;
            if last.collided_x && pushing {
                self.direction = -self.direction;
                debug!("{:?} patrol turned, now heading {}", ctx.entity, self.direction);
            }
        }
        ctx.hitbox.velocity.x = self.speed * self.direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        attached: Arc<AtomicUsize>,
        updated: Arc<AtomicUsize>,
        destroyed: Arc<AtomicUsize>,
    }

    impl Behavior for Counting {
        fn on_attach(&mut self, _entity: Entity) {
            self.attached.fetch_add(1, Ordering::SeqCst);
        }
        fn update(&mut self, _ctx: &mut BehaviorContext<'_>) {
            self.updated.fetch_add(1, Ordering::SeqCst);
        }
        fn destroy(&mut self, _entity: Entity) {
            self.destroyed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn ctx<'a>(hitbox: &'a mut Hitbox, last: Option<&'a CollisionResult>) -> BehaviorContext<'a> {
        BehaviorContext {
            entity: Entity::PLACEHOLDER,
            delta: 16.0,
            hitbox,
            last_collision: last,
            signals: None,
        }
    }

    #[test]
    fn lifecycle_hooks_fire_once() {
        let attached = Arc::new(AtomicUsize::new(0));
        let updated = Arc::new(AtomicUsize::new(0));
        let destroyed = Arc::new(AtomicUsize::new(0));
        let mut behaviors = Behaviors::new().with(
            "count",
            Counting {
                attached: attached.clone(),
                updated: updated.clone(),
                destroyed: destroyed.clone(),
            },
        );
        let mut hb = Hitbox::new(0.0, 0.0, 4.0, 4.0).unwrap();
        for _ in 0..3 {
            behaviors.run(&mut ctx(&mut hb, None));
        }
        behaviors.destroy_all(Entity::PLACEHOLDER);
        assert_eq!(attached.load(Ordering::SeqCst), 1);
        assert_eq!(updated.load(Ordering::SeqCst), 3);
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
        assert!(behaviors.is_empty());
    }

    #[test]
    fn insert_replaces_by_name() {
        let mut behaviors = Behaviors::new()
            .with("walk", ConstantWalk::new(1.0))
            .with("walk", ConstantWalk::new(2.0));
        assert_eq!(behaviors.len(), 1);
        let mut hb = Hitbox::new(0.0, 0.0, 4.0, 4.0).unwrap();
        behaviors.run(&mut ctx(&mut hb, None));
        assert_eq!(hb.velocity.x, 2.0);
        assert!(behaviors.remove("walk", Entity::PLACEHOLDER));
        assert!(!behaviors.contains("walk"));
    }

    #[test]
    fn patrol_turns_after_wall() {
        let mut patrol = Patrol::new(0.5);
        let mut hb = Hitbox::new(0.0, 0.0, 4.0, 4.0).unwrap();
        patrol.update(&mut ctx(&mut hb, None));
        assert_eq!(hb.velocity.x, 0.5);

        let bumped = CollisionResult {
            requested: glam::Vec2::new(8.0, 0.0),
            collided_x: true,
            ..CollisionResult::default()
        };
        patrol.update(&mut ctx(&mut hb, Some(&bumped)));
        assert_eq!(hb.velocity.x, -0.5);
        assert_eq!(patrol.direction(), -1.0);

        // Same stale result does not flip it back.
        patrol.update(&mut ctx(&mut hb, Some(&bumped)));
        assert_eq!(hb.velocity.x, -0.5);
    }
}

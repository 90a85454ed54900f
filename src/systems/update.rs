//! Per-entity update system.
//!
//! [`update_entities`] walks every live entity with a [`Hitbox`] in ascending
//! [`Entity`] order and runs its whole update before moving on to the next:
//!
//! 1. behaviours ([`Behaviors`])
//! 2. gravity, for [`GravityAffected`] entities
//! 3. collision-resolved move, for [`Movable`] entities, firing the hitbox
//!    events through `Commands`
//! 4. friction, for [`FrictionAffected`] entities
//!
//! Gravity runs before the move so a falling body lands on the tick it reaches
//! the floor. Friction runs after the move so it decays the velocity the
//! resolver left, not a velocity a wall already cancelled.
//!
//! Every entity's move is committed before the next entity starts. The grid
//! and the registry are read-only here.

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::behavior::{BehaviorContext, Behaviors};
use crate::components::hitbox::Hitbox;
use crate::components::physicsflags::{
    FrictionAffected, GravityAffected, LastCollision, MarkedForDeletion, Movable,
};
use crate::components::signals::{SIGNAL_GROUNDED, SIGNAL_SPEED_X, Signals};
use crate::events::hitbox::{
    FallenOutOfBoundsEvent, FallingOutOfBoundsEvent, HitboxMovedEvent, LandedEvent,
    LeftGroundEvent,
};
use crate::physics::listener::{HitboxListener, move_hitbox};
use crate::physics::result::CollisionResult;
use crate::physics::world::TileWorld;
use crate::resources::physicsconfig::PhysicsConfig;
use crate::resources::tilegrid::TileGrid;
use crate::resources::tileregistry::TileRegistry;
use crate::resources::worldtime::WorldTime;

/// Listener that turns hitbox callbacks into triggered events.
struct EventTrigger<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    entity: Entity,
}

impl HitboxListener for EventTrigger<'_, '_, '_> {
    fn on_moved(&mut self, result: &CollisionResult) {
        self.commands.trigger(HitboxMovedEvent {
            entity: self.entity,
            result: result.clone(),
        });
    }

    fn on_landed(&mut self) {
        self.commands.trigger(LandedEvent {
            entity: self.entity,
        });
    }

    fn on_left_ground(&mut self) {
        self.commands.trigger(LeftGroundEvent {
            entity: self.entity,
        });
    }

    fn on_falling_out_of_bounds(&mut self) {
        self.commands.trigger(FallingOutOfBoundsEvent {
            entity: self.entity,
        });
    }

    fn on_fallen_out_of_bounds(&mut self) {
        self.commands.trigger(FallenOutOfBoundsEvent {
            entity: self.entity,
        });
    }
}

type BodyQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut Hitbox,
        Option<&'static mut Behaviors>,
        Option<&'static GravityAffected>,
        Has<Movable>,
        Option<&'static FrictionAffected>,
        Option<&'static mut LastCollision>,
        Option<&'static mut Signals>,
    ),
    Without<MarkedForDeletion>,
>;

/// Run one tick for every live hitbox entity.
///
/// A tick with a negative or NaN delta is skipped for every entity, before
/// any velocity changes. A resolver error skips that entity's move (it is
/// logged) and leaves every other entity untouched.
pub fn update_entities(
    mut commands: Commands,
    time: Res<WorldTime>,
    config: Res<PhysicsConfig>,
    grid: Res<TileGrid>,
    registry: Res<TileRegistry>,
    mut bodies: BodyQuery,
) {
    let delta = time.delta;
    if delta.is_nan() || delta < 0.0 {
        warn!("Skipping tick with invalid delta {delta} ms");
        return;
    }
    let world = TileWorld::new(&grid, &registry);

    let mut order: Vec<Entity> = bodies.iter().map(|(entity, ..)| entity).collect();
    order.sort();

    for entity in order {
        let Ok((_, mut hitbox, behaviors, gravity, movable, friction, mut last, mut signals)) =
            bodies.get_mut(entity)
        else {
            continue;
        };

        // (a) behaviours
        if let Some(mut behaviors) = behaviors {
            let mut ctx = BehaviorContext {
                entity,
                delta,
                hitbox: &mut *hitbox,
                last_collision: last.as_deref().map(|l| &l.0),
                signals: signals.as_deref_mut(),
            };
            behaviors.run(&mut ctx);
        }

        // (b) gravity
        if let Some(gravity) = gravity {
            let vy = hitbox.velocity.y + config.gravity * gravity.scale * delta;
            hitbox.velocity.y = vy.min(config.max_fall_speed);
        }

        // (c) collision-resolved move
        if movable {
            let mut listener = EventTrigger {
                commands: &mut commands,
                entity,
            };
            match move_hitbox(&mut hitbox, &world, delta, &mut listener) {
                Ok(result) => match last.as_deref_mut() {
                    Some(slot) => slot.0 = result,
                    None => {
                        commands.entity(entity).try_insert(LastCollision(result));
                    }
                },
                Err(err) => warn!("{:?}: move skipped: {}", entity, err),
            }
        }

        // (d) friction
        if let Some(friction) = friction {
            let grounded = hitbox.is_grounded();
            let coefficient = if grounded {
                config.ground_friction
            } else {
                config.air_friction
            };
            hitbox.velocity.x *= friction.factor(coefficient, grounded, delta);
        }

        if let Some(signals) = signals.as_deref_mut() {
            signals.put_flag(SIGNAL_GROUNDED, hitbox.is_grounded());
            signals.set_scalar(SIGNAL_SPEED_X, hitbox.velocity.x);
        }
    }
}

//! Hitbox movement events and stock observers.
//!
//! The update system triggers these through `Commands` after each entity's
//! resolved move, in the same order as the
//! [`HitboxListener`](crate::physics::listener::HitboxListener) callbacks:
//! left-ground, landed, falling out of bounds, fallen out of bounds, then
//! [`HitboxMovedEvent`] for every step.
//!
//! Register the observers with `world.add_observer(...)`:
//!
//! - [`observe_landed`] counts landings in the entity's
//!   [`Signals`](crate::components::signals::Signals)
//! - [`observe_fallen_out_of_bounds`] marks the entity for deletion
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::physicsflags::MarkedForDeletion;
use crate::components::signals::{SIGNAL_LANDINGS, Signals};
use crate::physics::result::CollisionResult;

/// Fired after every resolved move.
#[derive(Event, Debug, Clone)]
pub struct HitboxMovedEvent {
    pub entity: Entity,
    pub result: CollisionResult,
}

/// Fired when an airborne hitbox comes to rest on a surface.
#[derive(Event, Debug, Clone, Copy)]
pub struct LandedEvent {
    pub entity: Entity,
}

/// Fired when a grounded hitbox loses its support.
#[derive(Event, Debug, Clone, Copy)]
pub struct LeftGroundEvent {
    pub entity: Entity,
}

/// Fired on the first step the hitbox's bottom edge is below the grid.
#[derive(Event, Debug, Clone, Copy)]
pub struct FallingOutOfBoundsEvent {
    pub entity: Entity,
}

/// Fired once, when the hitbox has cleared the grid by its own height.
#[derive(Event, Debug, Clone, Copy)]
pub struct FallenOutOfBoundsEvent {
    pub entity: Entity,
}

/// Count the landing on the entity's signals, if it has any.
pub fn observe_landed(trigger: On<LandedEvent>, mut signals: Query<&mut Signals>) {
    let entity = trigger.event().entity;
    if let Ok(mut signals) = signals.get_mut(entity) {
        signals.increment(SIGNAL_LANDINGS);
    }
}

/// Mark an entity that fell out of the world for deletion.
///
/// The despawn itself happens in
/// [`despawn_marked_entities`](crate::systems::cleanup::despawn_marked_entities)
/// so the rest of the tick still sees the entity.
pub fn observe_fallen_out_of_bounds(trigger: On<FallenOutOfBoundsEvent>, mut commands: Commands) {
    let entity = trigger.event().entity;
    info!("{:?} fell out of the world, marking for deletion", entity);
    commands.entity(entity).try_insert(MarkedForDeletion);
}

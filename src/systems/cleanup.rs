//! End-of-tick despawning.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::behavior::Behaviors;
use crate::components::physicsflags::MarkedForDeletion;

/// Despawn every entity carrying [`MarkedForDeletion`], running its
/// behaviours' `destroy` hooks first.
pub fn despawn_marked_entities(
    mut commands: Commands,
    mut marked: Query<(Entity, Option<&mut Behaviors>), With<MarkedForDeletion>>,
) {
    for (entity, behaviors) in marked.iter_mut() {
        if let Some(mut behaviors) = behaviors {
            behaviors.destroy_all(entity);
        }
        debug!("despawning {:?}", entity);
        commands.entity(entity).despawn();
    }
}

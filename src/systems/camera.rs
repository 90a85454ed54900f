//! Camera follow system.
//!
//! Feeds the tracked entity's hitbox centre into the
//! [`CameraController`] once per tick. A tracked entity that no longer has a
//! hitbox (despawned, or marked for deletion) is dropped.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::hitbox::Hitbox;
use crate::components::physicsflags::MarkedForDeletion;
use crate::resources::camera::CameraController;
use crate::resources::worldtime::WorldTime;

pub fn camera_follow(
    camera: Option<ResMut<CameraController>>,
    time: Res<WorldTime>,
    hitboxes: Query<&Hitbox, Without<MarkedForDeletion>>,
) {
    let Some(mut camera) = camera else {
        return;
    };
    let Some(entity) = camera.tracked() else {
        return;
    };
    match hitboxes.get(entity) {
        Ok(hitbox) => camera.follow(hitbox.centre(), time.delta),
        Err(_) => {
            debug!("camera target {:?} is gone, untracking", entity);
            camera.untrack();
        }
    }
}

//! Camera easing system.
//!
//! Advances the [`Camera`] once per frame and triggers
//! [`CameraSettledEvent`] when a cinematic move completes. A settled camera
//! is left untouched so `Res<Camera>::is_changed()` only reports frames in
//! which the view actually moved; the render sync relies on that.

use bevy_ecs::prelude::*;
use log::trace;

use crate::events::camera::CameraSettledEvent;
use crate::resources::camera::Camera;
use crate::resources::worldtime::WorldTime;

pub fn camera_system(
    mut commands: Commands,
    world_time: Res<WorldTime>,
    mut camera: ResMut<Camera>,
) {
    if camera.is_settled() {
        return;
    }
    if let Some(ticket) = camera.tick(world_time.delta) {
        trace!(
            "camera settled at scale {} position {:?} (ticket {})",
            camera.scale(),
            camera.position(),
            ticket
        );
        commands.trigger(CameraSettledEvent { ticket });
    }
}

//! Cinematic camera completion event.
//!
//! [`camera_system`](crate::systems::camera::camera_system) triggers
//! [`CameraSettledEvent`] on the frame a move started with
//! [`Camera::animate_to`](crate::resources::camera::Camera::animate_to)
//! reaches its destination. The `ticket` is whatever the caller passed to
//! `animate_to`; the focus observers pass the session generation so late
//! completions can be told apart from current ones.

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraSettledEvent {
    pub ticket: u64,
}

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Visual state recorded when a group is activated, re-applied on Escape.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct RestorePoint {
    pub pos: Vec2,
    pub opacity: f32,
    pub z_index: i32,
}

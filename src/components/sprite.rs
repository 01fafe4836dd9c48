use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::resources::backend::BackendHandle;

/// Visual of a gallery item as created by the render backend.
///
/// `width`/`height` are the source asset size in pixels; `base_scale` brings
/// the asset to the configured on-screen width at camera scale 1.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub handle: BackendHandle,
    pub source: String,
    pub width: f32,
    pub height: f32,
    pub base_scale: f32,
}

impl Sprite {
    pub fn new(
        handle: BackendHandle,
        source: impl Into<String>,
        width: f32,
        height: f32,
        desired_width: f32,
    ) -> Self {
        let base_scale = if width > 0.0 { desired_width / width } else { 1.0 };
        Self {
            handle,
            source: source.into(),
            width,
            height,
            base_scale,
        }
    }

    /// Half extents in world units.
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * self.base_scale * 0.5
    }

    /// Radius of the bounding circle in world units.
    pub fn radius(&self) -> f32 {
        self.half_extents().length()
    }

    /// Whether `world_point` falls inside the item centered at `center`.
    pub fn contains(&self, center: Vec2, world_point: Vec2) -> bool {
        let d = (world_point - center).abs();
        let half = self.half_extents();
        d.x <= half.x && d.y <= half.y
    }
}

//! Backend synchronisation.
//!
//! The engine owns every visual value; the backend only mirrors them.
//! [`render_sync_system`] runs last in the frame and pushes what changed:
//! screen-space position and scale when the item moved or the camera did,
//! opacity and z-index when those components changed. Newly spawned items
//! get a full update on their first frame.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::opacity::Opacity;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::backend::RenderBackendRes;
use crate::resources::camera::Camera;

pub fn render_sync_system(
    camera: Res<Camera>,
    mut backend: NonSendMut<RenderBackendRes>,
    mut last_scale: Local<Option<f32>>,
    items: Query<(Ref<Sprite>, Ref<MapPosition>, Ref<Opacity>, Ref<ZIndex>)>,
) {
    let camera_moved = camera.is_changed();
    let scale_changed = *last_scale != Some(camera.scale());
    *last_scale = Some(camera.scale());

    for (sprite, pos, opacity, z) in items.iter() {
        let added = sprite.is_added();
        if added || camera_moved || pos.is_changed() {
            let screen = camera.world_to_screen(pos.pos);
            backend.0.set_position(sprite.handle, screen.x, screen.y);
        }
        if added || scale_changed {
            backend
                .0
                .set_scale(sprite.handle, camera.scale() * sprite.base_scale);
        }
        if added || opacity.is_changed() {
            backend.0.set_opacity(sprite.handle, opacity.get());
        }
        if added || z.is_changed() {
            backend.0.set_z_index(sprite.handle, z.0);
        }
    }
}

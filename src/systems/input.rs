//! Input routing.
//!
//! [`input_router_system`] drains the [`InputQueue`] once per frame and turns
//! each event into an intent:
//! - wheel: anchor-preserving zoom, unless a group is focused
//! - press while no group is focused: camera pan; a press and release on an
//!   item within `click_slop` pixels triggers [`ActivateGroupEvent`]
//! - press on a member of the focused group once the transition finished:
//!   drag, which locks the item on release
//! - Escape: [`RestoreFocusEvent`] and any gesture is dropped
//!
//! The router never integrates motion. It only writes camera targets, drag
//! positions and motion states.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;
use smallvec::SmallVec;

use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::motionstate::MotionState;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::events::focus::{ActivateGroupEvent, RestoreFocusEvent};
use crate::events::input::{InputEvent, KeyCode};
use crate::resources::camera::{Camera, ZoomDirection};
use crate::resources::focus::{FocusPhase, FocusSession};
use crate::resources::input::{DragSession, Gesture, InputQueue, InputRouter};
use crate::resources::viewportconfig::ViewportConfig;

type ItemQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut MapPosition,
        &'static Sprite,
        &'static ZIndex,
        &'static Group,
        &'static mut MotionState,
    ),
>;

/// Topmost item under `world_point`, by z-index then spawn order.
pub fn topmost_hit<'a>(
    items: impl IntoIterator<Item = (Entity, Vec2, &'a Sprite, ZIndex)>,
    world_point: Vec2,
) -> Option<Entity> {
    let hits: SmallVec<[(ZIndex, Entity); 8]> = items
        .into_iter()
        .filter(|(_, pos, sprite, _)| sprite.contains(*pos, world_point))
        .map(|(entity, _, _, z)| (z, entity))
        .collect();
    hits.into_iter().max().map(|(_, entity)| entity)
}

fn hit_at(items: &ItemQuery, camera: &Camera, screen: Vec2) -> Option<Entity> {
    let world_point = camera.screen_to_world(screen);
    topmost_hit(
        items
            .iter()
            .map(|(entity, pos, sprite, z, _, _)| (entity, pos.pos, sprite, *z)),
        world_point,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn input_router_system(
    mut commands: Commands,
    queue: Res<InputQueue>,
    mut router: ResMut<InputRouter>,
    mut camera: ResMut<Camera>,
    session: Res<FocusSession>,
    config: Res<ViewportConfig>,
    mut items: ItemQuery,
) {
    for event in queue.drain() {
        match event {
            InputEvent::Wheel { x, y, delta_y } => {
                router.pointer = Vec2::new(x, y);
                if session.is_active() {
                    debug!("wheel ignored while group is focused");
                    continue;
                }
                camera.set_zoom_intent(Vec2::new(x, y), ZoomDirection::from_wheel(delta_y));
            }
            InputEvent::PointerDown { x, y } => {
                let screen = Vec2::new(x, y);
                router.pointer = screen;
                if router.gesture != Gesture::Idle {
                    debug!("pointer-down during gesture ignored");
                    continue;
                }
                let hit = hit_at(&items, &camera, screen);
                if !session.is_active() {
                    router.gesture = Gesture::Pan {
                        anchor: camera.begin_pan(screen),
                        origin: screen,
                        travel: 0.0,
                        pressed: hit,
                    };
                    continue;
                }
                let Some(entity) = hit else {
                    continue;
                };
                let Ok((_, pos, _, _, group, _)) = items.get(entity) else {
                    continue;
                };
                if session.phase == FocusPhase::Focused && session.is_active_group(group.name()) {
                    debug!("drag started on {:?}", entity);
                    router.gesture = Gesture::Drag(DragSession {
                        entity,
                        start_screen: screen,
                        start_world: pos.pos,
                    });
                } else {
                    debug!("press on {:?} ignored while group is focused", entity);
                }
            }
            InputEvent::PointerMove { x, y } => {
                let screen = Vec2::new(x, y);
                router.pointer = screen;
                match router.gesture {
                    Gesture::Idle => {}
                    Gesture::Pan {
                        anchor,
                        origin,
                        travel,
                        pressed,
                    } => {
                        router.gesture = Gesture::Pan {
                            anchor,
                            origin,
                            travel: travel.max(screen.distance(origin)),
                            pressed,
                        };
                        camera.set_pan_intent(screen, anchor);
                    }
                    Gesture::Drag(drag) => {
                        let world = drag.world_position(screen, camera.scale());
                        if let Ok((_, mut pos, _, _, _, _)) = items.get_mut(drag.entity) {
                            pos.pos = world;
                        }
                    }
                }
            }
            InputEvent::PointerUp { x, y } => {
                let screen = Vec2::new(x, y);
                router.pointer = screen;
                match router.gesture {
                    Gesture::Idle => {}
                    Gesture::Pan {
                        origin,
                        travel,
                        pressed,
                        ..
                    } => {
                        let travel = travel.max(screen.distance(origin));
                        if let Some(entity) = pressed
                            && travel < config.click_slop
                        {
                            commands.trigger(ActivateGroupEvent { entity });
                        }
                    }
                    Gesture::Drag(drag) => {
                        let world = drag.world_position(screen, camera.scale());
                        if let Ok((_, mut pos, _, _, _, mut state)) = items.get_mut(drag.entity) {
                            pos.pos = world;
                            *state = MotionState::Locked;
                            debug!("{:?} locked at {:?}", drag.entity, world);
                        }
                    }
                }
                router.cancel_gesture();
            }
            InputEvent::Key {
                code: KeyCode::Escape,
            } => {
                router.cancel_gesture();
                commands.trigger(RestoreFocusEvent);
            }
            InputEvent::Key { .. } => {}
        }
    }
}

//! Input queue and per-gesture router state.
//!
//! The host delivers normalized [`InputEvent`]s through the sender returned
//! by [`InputQueue::new`]; the
//! [`input_router_system`](crate::systems::input::input_router_system)
//! drains the queue once per frame. Gesture state lives in [`InputRouter`]
//! so a drag or pan survives across frames without closures capturing it.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, TryIter, unbounded};
use glam::Vec2;

use crate::events::input::InputEvent;
use crate::resources::camera::PanAnchor;

/// Receiving end of the host's input channel.
#[derive(Resource, Debug)]
pub struct InputQueue {
    rx: Receiver<InputEvent>,
}

impl InputQueue {
    /// Create a queue and the sender the host pushes events into.
    pub fn new() -> (Sender<InputEvent>, Self) {
        let (tx, rx) = unbounded();
        (tx, Self { rx })
    }

    /// Events received since the last drain.
    pub fn drain(&self) -> TryIter<'_, InputEvent> {
        self.rx.try_iter()
    }
}

/// An in-progress drag of one focused item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub entity: Entity,
    /// Pointer position at pointer-down, screen space.
    pub start_screen: Vec2,
    /// Item position at pointer-down, world space.
    pub start_world: Vec2,
}

impl DragSession {
    /// World position for the item with the pointer at `screen`.
    pub fn world_position(&self, screen: Vec2, camera_scale: f32) -> Vec2 {
        self.start_world + (screen - self.start_screen) / camera_scale
    }
}

/// Current pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Panning the camera; `pressed` is the item under the pointer at
    /// pointer-down, which becomes a click if the pointer barely moves.
    Pan {
        anchor: PanAnchor,
        origin: Vec2,
        travel: f32,
        pressed: Option<Entity>,
    },
    Drag(DragSession),
}

#[derive(Resource, Debug, Clone, Default)]
pub struct InputRouter {
    pub gesture: Gesture,
    /// Last known pointer position, screen space.
    pub pointer: Vec2,
}

impl InputRouter {
    pub fn cancel_gesture(&mut self) {
        self.gesture = Gesture::Idle;
    }
}

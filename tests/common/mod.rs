//! Shared harness for integration tests: a world wired like the binary,
//! with recording backend and panel.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use bevy_ecs::prelude::*;
use crossbeam_channel::Sender;
use glam::Vec2;

use driftfocus::components::drift::Drift;
use driftfocus::components::mapposition::MapPosition;
use driftfocus::events::input::{InputEvent, KeyCode};
use driftfocus::gallery::{build_schedule, init_world, run_frame, spawn_gallery};
use driftfocus::resources::backend::{BackendHandle, DetailPanel, RenderBackend};
use driftfocus::resources::camera::Camera;
use driftfocus::resources::focus::{FocusPhase, FocusSession};
use driftfocus::resources::manifest::{GalleryManifest, ManifestItem};
use driftfocus::resources::viewportconfig::ViewportConfig;

pub const DT: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Create(String),
    Position(u32, f32, f32),
    Scale(u32, f32),
    Opacity(u32, f32),
    Z(u32, i32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelCall {
    Show(String),
    Hide,
}

pub struct RecordingBackend {
    next: u32,
    calls: Rc<RefCell<Vec<BackendCall>>>,
}

impl RenderBackend for RecordingBackend {
    fn create_entity(&mut self, source: &str) -> BackendHandle {
        self.calls
            .borrow_mut()
            .push(BackendCall::Create(source.to_string()));
        let handle = BackendHandle(self.next);
        self.next += 1;
        handle
    }
    fn set_position(&mut self, handle: BackendHandle, x: f32, y: f32) {
        self.calls
            .borrow_mut()
            .push(BackendCall::Position(handle.0, x, y));
    }
    fn set_scale(&mut self, handle: BackendHandle, scale: f32) {
        self.calls.borrow_mut().push(BackendCall::Scale(handle.0, scale));
    }
    fn set_opacity(&mut self, handle: BackendHandle, opacity: f32) {
        self.calls
            .borrow_mut()
            .push(BackendCall::Opacity(handle.0, opacity));
    }
    fn set_z_index(&mut self, handle: BackendHandle, z: i32) {
        self.calls.borrow_mut().push(BackendCall::Z(handle.0, z));
    }
}

pub struct RecordingPanel(Rc<RefCell<Vec<PanelCall>>>);

impl DetailPanel for RecordingPanel {
    fn show_panel(&mut self, tag: &str) {
        self.0.borrow_mut().push(PanelCall::Show(tag.to_string()));
    }
    fn hide_panel(&mut self) {
        self.0.borrow_mut().push(PanelCall::Hide);
    }
}

/// Config with drift frozen so item positions are deterministic.
pub fn still_config() -> ViewportConfig {
    ViewportConfig {
        max_speed: 0.0,
        ..ViewportConfig::new()
    }
}

/// Square 100x100 items, one per `(source, project)` pair.
pub fn manifest(items: &[(&str, &str)]) -> GalleryManifest {
    GalleryManifest {
        items: items
            .iter()
            .map(|(source, project)| ManifestItem {
                source: source.to_string(),
                project: project.to_string(),
                width: Some(100.0),
                height: Some(100.0),
            })
            .collect(),
    }
}

pub struct Harness {
    pub world: World,
    pub schedule: Schedule,
    pub input: Sender<InputEvent>,
    pub backend_calls: Rc<RefCell<Vec<BackendCall>>>,
    pub panel_calls: Rc<RefCell<Vec<PanelCall>>>,
    pub items: Vec<Entity>,
}

impl Harness {
    pub fn new(config: ViewportConfig, manifest: &GalleryManifest) -> Self {
        let backend_calls = Rc::new(RefCell::new(Vec::new()));
        let panel_calls = Rc::new(RefCell::new(Vec::new()));
        let mut world = World::new();
        let input = init_world(
            &mut world,
            config,
            Box::new(RecordingBackend {
                next: 0,
                calls: backend_calls.clone(),
            }),
            Box::new(RecordingPanel(panel_calls.clone())),
        );
        let items = spawn_gallery(&mut world, manifest);
        Self {
            world,
            schedule: build_schedule(),
            input,
            backend_calls,
            panel_calls,
            items,
        }
    }

    pub fn frame(&mut self) {
        run_frame(&mut self.world, &mut self.schedule, DT);
    }

    pub fn frames(&mut self, n: usize) {
        for _ in 0..n {
            self.frame();
        }
    }

    /// Run frames until `done` holds; false if it never did within `max`.
    pub fn run_until(&mut self, max: usize, done: impl Fn(&World) -> bool) -> bool {
        for _ in 0..max {
            if done(&self.world) {
                return true;
            }
            self.frame();
        }
        done(&self.world)
    }

    pub fn send(&self, event: InputEvent) {
        self.input.send(event).unwrap();
    }

    /// Press and release at a screen point, then run one frame.
    pub fn click(&mut self, screen: Vec2) {
        self.send(InputEvent::PointerDown {
            x: screen.x,
            y: screen.y,
        });
        self.send(InputEvent::PointerUp {
            x: screen.x,
            y: screen.y,
        });
        self.frame();
    }

    pub fn escape(&mut self) {
        self.send(InputEvent::Key {
            code: KeyCode::Escape,
        });
        self.frame();
    }

    /// Move an item and its drift target.
    pub fn place(&mut self, entity: Entity, pos: Vec2) {
        self.world.get_mut::<MapPosition>(entity).unwrap().pos = pos;
        self.world.get_mut::<Drift>(entity).unwrap().reset_target(pos);
    }

    pub fn pos(&self, entity: Entity) -> Vec2 {
        self.world.get::<MapPosition>(entity).unwrap().pos
    }

    pub fn screen_of(&self, entity: Entity) -> Vec2 {
        self.world
            .resource::<Camera>()
            .world_to_screen(self.pos(entity))
    }

    pub fn session(&self) -> &FocusSession {
        self.world.resource::<FocusSession>()
    }

    pub fn phase(&self) -> FocusPhase {
        self.session().phase
    }

    pub fn run_until_phase(&mut self, phase: FocusPhase) -> bool {
        self.run_until(600, |w| w.resource::<FocusSession>().phase == phase)
    }
}

//! Gallery setup and frame driver.
//!
//! This is the wiring layer between the host and the ECS world:
//! - [`init_world`] inserts every resource, registers the observers and
//!   returns the sender the host pushes input through
//! - [`spawn_gallery`] creates one item per manifest entry
//! - [`build_schedule`] assembles the per-frame systems in order: input
//!   routing, camera easing, phase checks, drift, tweens, backend sync
//! - [`run_frame`] advances time and runs one frame
//!
//! [`load_script`] reads a scripted input session for headless runs.

use bevy_ecs::prelude::*;
use crossbeam_channel::Sender;
use glam::Vec2;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::components::drift::{Drift, sample_velocity};
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::motionstate::MotionState;
use crate::components::opacity::Opacity;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::events::input::InputEvent;
use crate::resources::backend::{DetailPanel, DetailPanelRes, RenderBackend, RenderBackendRes};
use crate::resources::camera::Camera;
use crate::resources::focus::FocusSession;
use crate::resources::input::{InputQueue, InputRouter};
use crate::resources::manifest::GalleryManifest;
use crate::resources::random::RandomSource;
use crate::resources::viewportconfig::ViewportConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::camera::camera_system;
use crate::systems::drift::drift_system;
use crate::systems::focus::{
    activate_group_observer, camera_settled_observer, focus_inactive, focus_phase_system,
    restore_focus_observer,
};
use crate::systems::input::input_router_system;
use crate::systems::render::render_sync_system;
use crate::systems::time::update_world_time;
use crate::systems::tween::{tween_mapposition_system, tween_opacity_system};

/// One input event delivered at the start of `frame`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ScriptedInput {
    pub frame: u64,
    pub event: InputEvent,
}

/// Loads a scripted input session from a JSON array of [`ScriptedInput`].
pub fn load_script(path: &str) -> Result<Vec<ScriptedInput>, Box<dyn std::error::Error>> {
    let file_content = std::fs::read_to_string(path)?;
    let mut script: Vec<ScriptedInput> = serde_json::from_str(&file_content)?;
    script.sort_by_key(|s| s.frame);
    Ok(script)
}

/// Insert all resources and observers; returns the input sender.
pub fn init_world(
    world: &mut World,
    config: ViewportConfig,
    render: Box<dyn RenderBackend>,
    panel: Box<dyn DetailPanel>,
) -> Sender<InputEvent> {
    let (tx, queue) = InputQueue::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(Camera::new(config.camera_settings()));
    world.insert_resource(FocusSession::default());
    world.insert_resource(InputRouter::default());
    world.insert_resource(queue);
    world.insert_resource(RandomSource::with_seed(config.seed));
    world.insert_resource(config);
    world.insert_non_send_resource(RenderBackendRes(render));
    world.insert_non_send_resource(DetailPanelRes(panel));
    register_observers(world);
    tx
}

pub fn register_observers(world: &mut World) {
    world.spawn(Observer::new(activate_group_observer));
    world.spawn(Observer::new(camera_settled_observer));
    world.spawn(Observer::new(restore_focus_observer));
    // Ensure the observers are registered before any system can trigger.
    world.flush();
}

/// Spawn one floating item per manifest entry at a random position.
pub fn spawn_gallery(world: &mut World, manifest: &GalleryManifest) -> Vec<Entity> {
    let config = world.resource::<ViewportConfig>().clone();
    world.resource_scope(|world, mut rng: Mut<RandomSource>| {
        manifest
            .items
            .iter()
            .map(|item| {
                let pos = Vec2::new(
                    rng.0.f32() * config.viewport_width,
                    rng.0.f32() * config.viewport_height,
                );
                let velocity = sample_velocity(&mut rng.0, config.max_speed);
                let width = item.width.unwrap_or(config.desired_width);
                let height = item.height.unwrap_or(width);
                let handle = world
                    .non_send_resource_mut::<RenderBackendRes>()
                    .0
                    .create_entity(&item.source);
                let entity = world
                    .spawn((
                        Group::new(item.project.clone()),
                        MapPosition { pos },
                        Drift::new(velocity, pos),
                        MotionState::Floating,
                        Sprite::new(handle, item.source.clone(), width, height, config.desired_width),
                        Opacity::default(),
                        ZIndex(0),
                    ))
                    .id();
                debug!("spawned {:?} '{}' at {:?}", entity, item.project, pos);
                entity
            })
            .collect::<Vec<_>>()
    })
}

pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            input_router_system,
            camera_system,
            focus_phase_system,
            drift_system.run_if(focus_inactive),
            tween_mapposition_system,
            tween_opacity_system,
            render_sync_system,
        )
            .chain(),
    );
    schedule
}

/// Advance time by `dt` and run one frame.
pub fn run_frame(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers(); // Clear changed components for next frame
}

/// Log a one-line summary of the session state.
pub fn log_summary(world: &World) {
    let session = world.resource::<FocusSession>();
    let camera = world.resource::<Camera>();
    let time = world.resource::<WorldTime>();
    info!(
        "frame {}: phase {}, group {:?}, camera scale {:.3} at {:?}",
        time.frame_count,
        session.phase,
        session.active_group,
        camera.scale(),
        camera.position()
    );
}

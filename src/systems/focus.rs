//! Group focus choreography.
//!
//! Observers:
//! - [`activate_group_observer`] – records restore points, dims non-members
//!   and pulls the camera back to the overview
//! - [`camera_settled_observer`] – advances `ZoomingOut` and `ZoomingIn` when
//!   the camera move issued for the current generation completes
//! - [`restore_focus_observer`] – Escape: snaps everything back
//!
//! Systems:
//! - [`focus_phase_system`] – polls the conditions that have no event:
//!   member tweens finished (`Regrouping`) and camera settled (`Restoring`)
//! - [`focus_inactive`] – run condition gating the drift system
//!
//! Every camera move and every transition is tagged with
//! [`FocusSession::generation`]. Escape bumps the generation, so a camera
//! move that completes afterwards is logged and ignored.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info, warn};

use crate::components::drift::Drift;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::motionstate::MotionState;
use crate::components::opacity::Opacity;
use crate::components::restorepoint::RestorePoint;
use crate::components::sprite::Sprite;
use crate::components::tween::{Easing, TweenOpacity, TweenPosition};
use crate::components::zindex::ZIndex;
use crate::events::camera::CameraSettledEvent;
use crate::events::focus::{ActivateGroupEvent, FocusPhaseChangedEvent, RestoreFocusEvent};
use crate::layout::{Rect, compute_layout};
use crate::resources::backend::DetailPanelRes;
use crate::resources::camera::Camera;
use crate::resources::focus::{FocusPhase, FocusSession};
use crate::resources::random::RandomSource;
use crate::resources::viewportconfig::ViewportConfig;

/// Run condition: no group is focused.
pub fn focus_inactive(session: Res<FocusSession>) -> bool {
    !session.is_active()
}

fn enter_phase(commands: &mut Commands, session: &mut FocusSession, to: FocusPhase) {
    let from = session.phase;
    session.phase = to;
    info!(
        "focus {} -> {} (generation {})",
        from, to, session.generation
    );
    commands.trigger(FocusPhaseChangedEvent { from, to });
}

/// Safe sub-rectangle of the viewport for the focused layout.
pub fn safe_region(config: &ViewportConfig) -> Rect {
    let size = Vec2::new(config.viewport_width, config.viewport_height);
    Rect::new(
        Vec2::new(config.safe_left, config.safe_top) * size,
        Vec2::new(config.safe_right, config.safe_bottom) * size,
    )
}

/// Start focusing the group of the clicked item.
///
/// Ignored while any group is active.
#[allow(clippy::too_many_arguments)]
pub fn activate_group_observer(
    trigger: On<ActivateGroupEvent>,
    mut commands: Commands,
    mut session: ResMut<FocusSession>,
    mut camera: ResMut<Camera>,
    config: Res<ViewportConfig>,
    groups: Query<&Group>,
    mut items: Query<(
        Entity,
        &MapPosition,
        &Opacity,
        &mut ZIndex,
        &Group,
        &mut MotionState,
    )>,
) {
    let clicked = trigger.event().entity;
    if let Some(active) = session.active_group.as_deref() {
        debug!("activation of {:?} ignored, '{}' is active", clicked, active);
        return;
    }
    let Ok(tag) = groups.get(clicked).map(|g| g.name().to_string()) else {
        warn!("activation requested for {:?} without a group", clicked);
        return;
    };

    let generation = session.next_generation();
    session.stored_camera = Some(camera.snapshot());

    let mut members = 0usize;
    for (entity, pos, opacity, mut z, group, mut state) in items.iter_mut() {
        commands.entity(entity).insert(RestorePoint {
            pos: pos.pos,
            opacity: opacity.get(),
            z_index: z.0,
        });
        if group.name() == tag {
            *state = MotionState::GroupMember;
            z.0 = config.focus_z;
            members += 1;
        } else {
            commands.entity(entity).insert(
                TweenOpacity::new(opacity.get(), config.dim_opacity, config.fade_duration)
                    .with_easing(Easing::QuadOut),
            );
        }
    }
    info!("activating '{}' with {} members", tag, members);
    session.active_group = Some(tag);

    let size = Vec2::new(config.viewport_width, config.viewport_height);
    camera.animate_to(
        config.overview_scale,
        size * config.overview_offset,
        config.zoom_out_duration,
        generation,
    );
    enter_phase(&mut commands, &mut session, FocusPhase::ZoomingOut);
}

/// Advance the choreography when the current camera move completes.
#[allow(clippy::too_many_arguments)]
pub fn camera_settled_observer(
    trigger: On<CameraSettledEvent>,
    mut commands: Commands,
    mut session: ResMut<FocusSession>,
    config: Res<ViewportConfig>,
    mut rng: ResMut<RandomSource>,
    mut panel: NonSendMut<DetailPanelRes>,
    members: Query<(Entity, &MapPosition, &Sprite, &Group)>,
) {
    let ticket = trigger.event().ticket;
    if !session.is_current(ticket) {
        debug!(
            "stale camera completion {} (generation {})",
            ticket, session.generation
        );
        return;
    }
    let Some(tag) = session.active_group.clone() else {
        return;
    };
    match session.phase {
        FocusPhase::ZoomingOut => {
            let mut group: Vec<(Entity, Vec2, f32)> = members
                .iter()
                .filter(|(_, _, _, g)| g.name() == tag)
                .map(|(e, pos, sprite, _)| (e, pos.pos, sprite.radius()))
                .collect();
            group.sort_by_key(|(e, _, _)| *e);
            let largest = group.iter().map(|(_, _, r)| *r).fold(0.0_f32, f32::max);
            let spacing = config.min_distance.max(largest * 2.0);
            let region = safe_region(&config).inset(largest);
            let layout = compute_layout(config.layout, group.len(), region, spacing, &mut rng.0);
            debug!(
                "{} layout for '{}' ({} slots, overflowed: {})",
                layout.kind,
                tag,
                layout.slots.len(),
                layout.overflowed
            );
            for ((entity, from, _), slot) in group.iter().zip(layout.slots.iter()) {
                commands.entity(*entity).insert(
                    TweenPosition::new(*from, *slot, config.regroup_duration)
                        .with_easing(Easing::CubicInOut),
                );
            }
            enter_phase(&mut commands, &mut session, FocusPhase::Regrouping);
        }
        FocusPhase::ZoomingIn => {
            panel.0.show_panel(&tag);
            session.panel_visible = true;
            enter_phase(&mut commands, &mut session, FocusPhase::Focused);
        }
        other => debug!("camera settled during {}, nothing to do", other),
    }
}

/// Poll completion conditions that have no event of their own.
pub fn focus_phase_system(
    mut commands: Commands,
    mut session: ResMut<FocusSession>,
    mut camera: ResMut<Camera>,
    config: Res<ViewportConfig>,
    members: Query<(&Group, Option<&TweenPosition>)>,
) {
    match session.phase {
        FocusPhase::Regrouping => {
            let Some(tag) = session.active_group.as_deref() else {
                return;
            };
            let done = members
                .iter()
                .filter(|(g, _)| g.name() == tag)
                .all(|(_, tween)| tween.is_none_or(|t| t.is_finished()));
            if !done {
                return;
            }
            let generation = session.generation;
            camera.animate_to(1.0, Vec2::ZERO, config.zoom_in_duration, generation);
            enter_phase(&mut commands, &mut session, FocusPhase::ZoomingIn);
        }
        FocusPhase::Restoring => {
            if camera.is_settled() {
                enter_phase(&mut commands, &mut session, FocusPhase::Idle);
            }
        }
        _ => {}
    }
}

/// Escape: put every item back where it was and release the camera.
///
/// A no-op when no group is active.
#[allow(clippy::type_complexity)]
pub fn restore_focus_observer(
    _trigger: On<RestoreFocusEvent>,
    mut commands: Commands,
    mut session: ResMut<FocusSession>,
    mut camera: ResMut<Camera>,
    mut panel: NonSendMut<DetailPanelRes>,
    mut items: Query<(
        Entity,
        &mut MapPosition,
        &mut Opacity,
        &mut ZIndex,
        &mut MotionState,
        Option<&RestorePoint>,
        Option<&mut Drift>,
        Option<&mut TweenPosition>,
        Option<&mut TweenOpacity>,
    )>,
) {
    let Some(tag) = session.active_group.take() else {
        debug!("escape with no active group");
        return;
    };
    session.next_generation();
    if camera.cancel_animation().is_some() {
        debug!("camera move cancelled by escape");
    }
    if let Some(snapshot) = session.stored_camera.take() {
        camera.restore(snapshot);
    }

    for (entity, mut pos, mut opacity, mut z, mut state, restore, drift, tween_pos, tween_op) in
        items.iter_mut()
    {
        if let Some(mut tw) = tween_pos {
            tw.playing = false;
        }
        if let Some(mut tw) = tween_op {
            tw.playing = false;
        }
        if let Some(rp) = restore {
            pos.pos = rp.pos;
            opacity.set(rp.opacity);
            z.0 = rp.z_index;
            if let Some(mut drift) = drift {
                drift.reset_target(rp.pos);
            }
        }
        if !state.is_floating() {
            *state = MotionState::Floating;
        }
        commands
            .entity(entity)
            .remove::<(RestorePoint, TweenPosition, TweenOpacity)>();
    }

    panel.0.hide_panel();
    session.panel_visible = false;
    info!("restored from '{}'", tag);
    enter_phase(&mut commands, &mut session, FocusPhase::Restoring);
}

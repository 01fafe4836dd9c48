//! Group focus choreography driven through the real schedule.

mod common;

use bevy_ecs::prelude::*;
use glam::Vec2;

use common::{Harness, PanelCall, manifest, still_config};
use driftfocus::components::motionstate::MotionState;
use driftfocus::components::opacity::Opacity;
use driftfocus::components::restorepoint::RestorePoint;
use driftfocus::components::tween::TweenPosition;
use driftfocus::components::zindex::ZIndex;
use driftfocus::events::camera::CameraSettledEvent;
use driftfocus::events::input::InputEvent;
use driftfocus::layout::min_pairwise_distance;
use driftfocus::resources::camera::Camera;
use driftfocus::resources::focus::FocusPhase;
use driftfocus::resources::viewportconfig::ViewportConfig;
use driftfocus::systems::focus::safe_region;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn opacity(h: &Harness, e: Entity) -> f32 {
    h.world.get::<Opacity>(e).unwrap().get()
}

/// Two items, A in "x" and B in "y", at known positions.
fn two_items() -> (Harness, Entity, Entity) {
    let mut h = Harness::new(still_config(), &manifest(&[("a.png", "x"), ("b.png", "y")]));
    let (a, b) = (h.items[0], h.items[1]);
    h.place(a, Vec2::new(300.0, 300.0));
    h.place(b, Vec2::new(900.0, 500.0));
    h.frame();
    (h, a, b)
}

#[test]
fn test_click_focuses_group_and_escape_restores() {
    let (mut h, a, b) = two_items();

    h.click(Vec2::new(300.0, 300.0));
    assert_eq!(h.session().active_group.as_deref(), Some("x"));
    assert_eq!(h.phase(), FocusPhase::ZoomingOut);

    assert!(h.run_until_phase(FocusPhase::Focused));
    assert!(approx_eq(opacity(&h, b), 0.15));
    assert!(approx_eq(opacity(&h, a), 1.0));
    assert_eq!(*h.world.get::<MotionState>(a).unwrap(), MotionState::GroupMember);
    assert_eq!(h.world.get::<ZIndex>(a).unwrap().0, 100);
    assert_eq!(
        h.panel_calls.borrow().as_slice(),
        &[PanelCall::Show("x".to_string())]
    );
    let camera = h.world.resource::<Camera>();
    assert_eq!(camera.scale(), 1.0);
    assert_eq!(camera.position(), Vec2::ZERO);

    h.escape();
    assert_eq!(h.session().active_group, None);
    assert_eq!(h.pos(a), Vec2::new(300.0, 300.0));
    assert_eq!(h.pos(b), Vec2::new(900.0, 500.0));
    assert_eq!(opacity(&h, a), 1.0);
    assert_eq!(opacity(&h, b), 1.0);
    assert_eq!(h.world.get::<ZIndex>(a).unwrap().0, 0);
    assert_eq!(*h.world.get::<MotionState>(a).unwrap(), MotionState::Floating);
    assert!(h.world.get::<RestorePoint>(a).is_none());
    assert_eq!(h.panel_calls.borrow().last(), Some(&PanelCall::Hide));
    assert!(h.run_until_phase(FocusPhase::Idle));
}

#[test]
fn test_phases_run_in_order() {
    let (mut h, _, _) = two_items();
    h.click(Vec2::new(300.0, 300.0));
    let mut seen = vec![h.phase()];
    for _ in 0..600 {
        h.frame();
        if seen.last() != Some(&h.phase()) {
            seen.push(h.phase());
        }
        if h.phase() == FocusPhase::Focused {
            break;
        }
    }
    assert_eq!(
        seen,
        vec![
            FocusPhase::ZoomingOut,
            FocusPhase::Regrouping,
            FocusPhase::ZoomingIn,
            FocusPhase::Focused
        ]
    );
}

#[test]
fn test_escape_restores_camera_target() {
    let (mut h, _, _) = two_items();
    // pan away first so the snapshot is not the origin
    h.send(InputEvent::PointerDown { x: 600.0, y: 100.0 });
    h.send(InputEvent::PointerMove { x: 640.0, y: 130.0 });
    h.send(InputEvent::PointerUp { x: 640.0, y: 130.0 });
    h.frames(120);
    let before = h.world.resource::<Camera>().snapshot();
    assert_eq!(before.target_position, Vec2::new(40.0, 30.0));

    let a = h.items[0];
    let target = h.screen_of(a);
    h.click(target);
    assert!(h.run_until_phase(FocusPhase::Focused));
    h.escape();
    let camera = h.world.resource::<Camera>();
    assert_eq!(camera.target_position(), before.target_position);
    assert_eq!(camera.target_scale(), before.target_scale);
    assert!(h.run_until_phase(FocusPhase::Idle));
    assert_eq!(h.world.resource::<Camera>().position(), Vec2::new(40.0, 30.0));
}

#[test]
fn test_click_on_other_group_while_focused_changes_nothing() {
    let (mut h, a, b) = two_items();
    h.click(Vec2::new(300.0, 300.0));
    assert!(h.run_until_phase(FocusPhase::Focused));
    let pos_a = h.pos(a);
    let generation = h.session().generation;

    h.click(h.screen_of(b));
    h.frames(30);
    assert_eq!(h.session().active_group.as_deref(), Some("x"));
    assert_eq!(h.session().generation, generation);
    assert_eq!(h.phase(), FocusPhase::Focused);
    assert_eq!(h.pos(a), pos_a);
    assert!(approx_eq(opacity(&h, b), 0.15));
    assert_eq!(h.panel_calls.borrow().len(), 1);
}

#[test]
fn test_click_during_transition_is_ignored() {
    let (mut h, _, b) = two_items();
    h.click(Vec2::new(300.0, 300.0));
    let generation = h.session().generation;
    h.click(h.screen_of(b));
    assert_eq!(h.session().active_group.as_deref(), Some("x"));
    assert_eq!(h.session().generation, generation);
}

#[test]
fn test_escape_when_idle_is_noop() {
    let (mut h, a, _) = two_items();
    h.escape();
    h.escape();
    assert_eq!(h.phase(), FocusPhase::Idle);
    assert_eq!(h.session().generation, 0);
    assert!(h.panel_calls.borrow().is_empty());
    assert_eq!(h.pos(a), Vec2::new(300.0, 300.0));
}

#[test]
fn test_escape_mid_regroup_restores_exactly() {
    let (mut h, a, b) = two_items();
    h.click(Vec2::new(300.0, 300.0));
    assert!(h.run_until_phase(FocusPhase::Regrouping));
    h.frames(10);
    assert_ne!(h.pos(a), Vec2::new(300.0, 300.0));

    h.escape();
    assert_eq!(h.pos(a), Vec2::new(300.0, 300.0));
    assert!(h.world.get::<TweenPosition>(a).is_none());
    assert!(h.run_until_phase(FocusPhase::Idle));
    assert_eq!(h.pos(a), Vec2::new(300.0, 300.0));
    assert_eq!(opacity(&h, b), 1.0);
}

#[test]
fn test_escape_from_every_active_phase_restores_exactly() {
    for phase in [
        FocusPhase::ZoomingOut,
        FocusPhase::Regrouping,
        FocusPhase::ZoomingIn,
        FocusPhase::Focused,
    ] {
        let (mut h, a, b) = two_items();
        let before = h.world.resource::<Camera>().snapshot();

        h.click(Vec2::new(300.0, 300.0));
        assert!(h.run_until_phase(phase), "never reached {}", phase);
        h.frames(3);
        assert!(h.session().is_active(), "left the session before Escape in {}", phase);

        h.escape();
        assert_eq!(h.session().active_group, None, "{}", phase);
        assert_eq!(h.pos(a), Vec2::new(300.0, 300.0), "{}", phase);
        assert_eq!(h.pos(b), Vec2::new(900.0, 500.0), "{}", phase);
        assert_eq!(opacity(&h, a), 1.0, "{}", phase);
        assert_eq!(opacity(&h, b), 1.0, "{}", phase);
        assert_eq!(h.world.get::<ZIndex>(a).unwrap().0, 0, "{}", phase);
        assert!(h.world.get::<TweenPosition>(a).is_none(), "{}", phase);
        {
            let camera = h.world.resource::<Camera>();
            assert_eq!(camera.target_position(), before.target_position, "{}", phase);
            assert_eq!(camera.target_scale(), before.target_scale, "{}", phase);
        }

        assert!(h.run_until_phase(FocusPhase::Idle), "{}", phase);
        assert_eq!(h.pos(a), Vec2::new(300.0, 300.0), "{}", phase);
        assert_eq!(h.pos(b), Vec2::new(900.0, 500.0), "{}", phase);
        assert!(approx_eq(h.world.resource::<Camera>().scale(), before.target_scale), "{}", phase);
    }
}

#[test]
fn test_stale_camera_completion_is_ignored() {
    let (mut h, a, _) = two_items();
    h.click(Vec2::new(300.0, 300.0));
    let stale = h.session().generation;
    h.frames(5);
    h.escape();
    assert!(h.run_until_phase(FocusPhase::Idle));

    h.world.trigger(CameraSettledEvent { ticket: stale });
    h.world.flush();
    assert_eq!(h.phase(), FocusPhase::Idle);
    assert!(h.world.get::<TweenPosition>(a).is_none());
    assert!(h.panel_calls.borrow().iter().all(|c| *c != PanelCall::Show("x".into())));
}

#[test]
fn test_can_refocus_after_restore() {
    let (mut h, _, b) = two_items();
    h.click(Vec2::new(300.0, 300.0));
    assert!(h.run_until_phase(FocusPhase::Focused));
    h.escape();
    assert!(h.run_until_phase(FocusPhase::Idle));

    h.click(Vec2::new(900.0, 500.0));
    assert_eq!(h.session().active_group.as_deref(), Some("y"));
    assert!(h.run_until_phase(FocusPhase::Focused));
    assert!(approx_eq(opacity(&h, b), 1.0));
    assert_eq!(
        h.panel_calls.borrow().last(),
        Some(&PanelCall::Show("y".to_string()))
    );
}

#[test]
fn test_layout_separates_members_inside_safe_region() {
    let items: Vec<(String, &str)> = (0..6)
        .map(|i| (format!("m{}.png", i), "x"))
        .chain((0..4).map(|i| (format!("o{}.png", i), "y")))
        .collect();
    let refs: Vec<(&str, &str)> = items.iter().map(|(s, p)| (s.as_str(), *p)).collect();
    let mut h = Harness::new(still_config(), &manifest(&refs));
    let members: Vec<Entity> = h.items[..6].to_vec();
    for (i, e) in members.iter().enumerate() {
        // stack them on top of each other
        h.place(*e, Vec2::new(640.0 + i as f32, 360.0));
    }
    let others: Vec<Entity> = h.items[6..].to_vec();
    for (i, e) in others.iter().enumerate() {
        h.place(*e, Vec2::new(1100.0, 150.0 + 120.0 * i as f32));
    }
    h.frame();

    h.click(Vec2::new(640.0, 360.0));
    assert_eq!(h.session().active_group.as_deref(), Some("x"));
    assert!(h.run_until_phase(FocusPhase::Focused));

    let slots: Vec<Vec2> = members.iter().map(|e| h.pos(*e)).collect();
    // 100x100 items: the bounding diameter exceeds the configured minimum
    let diameter = Vec2::new(100.0, 100.0).length();
    assert!(min_pairwise_distance(&slots) >= diameter - 0.01);
    let region = safe_region(h.world.resource::<ViewportConfig>());
    for slot in slots {
        assert!(region.contains(slot), "{:?} outside {:?}", slot, region);
    }
}

#[test]
fn test_drift_is_suspended_while_focused() {
    let mut config = still_config();
    config.max_speed = 30.0;
    let mut h = Harness::new(config, &manifest(&[("a.png", "x"), ("b.png", "y")]));
    let (a, b) = (h.items[0], h.items[1]);
    h.place(a, Vec2::new(300.0, 300.0));
    h.place(b, Vec2::new(900.0, 500.0));
    h.frame();
    let click_at = h.screen_of(a);
    h.click(click_at);
    assert!(h.run_until_phase(FocusPhase::Focused));
    let parked = h.pos(b);
    h.frames(60);
    assert_eq!(h.pos(b), parked);
}

//! Drift integration for floating items.
//!
//! Each frame the soft target of every `Floating` item moves by its velocity
//! and bounces off the margin rectangle; the visible position then follows
//! the target with exponential smoothing. Items that are `Locked` or
//! `GroupMember` are skipped. The schedule only runs this system while no
//! group is focused (see [`focus_inactive`](crate::systems::focus::focus_inactive)).

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::drift::Drift;
use crate::components::mapposition::MapPosition;
use crate::components::motionstate::MotionState;
use crate::layout::Rect;
use crate::resources::camera::smoothing_factor;
use crate::resources::viewportconfig::ViewportConfig;
use crate::resources::worldtime::WorldTime;

/// Viewport rectangle inset by `margin`.
pub fn margin_rect(config: &ViewportConfig) -> Rect {
    Rect::new(
        Vec2::ZERO,
        Vec2::new(config.viewport_width, config.viewport_height),
    )
    .inset(config.margin)
}

/// Reflect velocity components that point out of `bounds` and clamp the
/// target back onto the edge it crossed.
pub(crate) fn bounce(drift: &mut Drift, bounds: &Rect) {
    if drift.target.x < bounds.min.x {
        drift.target.x = bounds.min.x;
        drift.velocity.x = drift.velocity.x.abs();
    } else if drift.target.x > bounds.max.x {
        drift.target.x = bounds.max.x;
        drift.velocity.x = -drift.velocity.x.abs();
    }
    if drift.target.y < bounds.min.y {
        drift.target.y = bounds.min.y;
        drift.velocity.y = drift.velocity.y.abs();
    } else if drift.target.y > bounds.max.y {
        drift.target.y = bounds.max.y;
        drift.velocity.y = -drift.velocity.y.abs();
    }
}

pub fn drift_system(
    time: Res<WorldTime>,
    config: Res<ViewportConfig>,
    mut query: Query<(&mut MapPosition, &mut Drift, &MotionState)>,
) {
    let dt = time.delta;
    if dt <= 0.0 {
        return;
    }
    let bounds = margin_rect(&config);
    let k = if config.smoothing {
        smoothing_factor(dt, config.follow_time_constant)
    } else {
        1.0
    };
    for (mut position, mut drift, state) in query.iter_mut() {
        if !state.is_floating() {
            continue;
        }
        let target = drift.target + drift.velocity * dt;
        drift.target = target;
        bounce(&mut drift, &bounds);
        let next = position.pos + (drift.target - position.pos) * k;
        if next != position.pos {
            position.pos = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_world(delta: f32, smoothing: bool) -> World {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta,
            ..Default::default()
        });
        let config = ViewportConfig {
            smoothing,
            ..ViewportConfig::new()
        };
        world.insert_resource(config);
        world
    }

    fn run(world: &mut World, frames: usize) {
        let mut schedule = Schedule::default();
        schedule.add_systems(drift_system);
        for _ in 0..frames {
            schedule.run(world);
        }
    }

    #[test]
    fn test_bounce_reflects_and_clamps() {
        let bounds = Rect::new(Vec2::new(120.0, 120.0), Vec2::new(1160.0, 600.0));
        let mut drift = Drift::new(Vec2::new(5.0, -3.0), Vec2::new(1163.0, 119.0));
        bounce(&mut drift, &bounds);
        assert_eq!(drift.target, Vec2::new(1160.0, 120.0));
        assert_eq!(drift.velocity, Vec2::new(-5.0, 3.0));
    }

    #[test]
    fn test_bounce_keeps_inward_velocity() {
        let bounds = Rect::new(Vec2::new(120.0, 120.0), Vec2::new(1160.0, 600.0));
        // already heading back in; must not flip outward again
        let mut drift = Drift::new(Vec2::new(-5.0, 0.0), Vec2::new(1161.0, 300.0));
        bounce(&mut drift, &bounds);
        assert_eq!(drift.velocity.x, -5.0);
    }

    #[test]
    fn test_unsmoothed_position_equals_target() {
        let mut world = make_world(0.5, false);
        let e = world
            .spawn((
                MapPosition::new(300.0, 300.0),
                Drift::new(Vec2::new(4.0, 2.0), Vec2::new(300.0, 300.0)),
                MotionState::Floating,
            ))
            .id();
        run(&mut world, 2);
        assert_eq!(world.get::<MapPosition>(e).unwrap().pos, Vec2::new(304.0, 302.0));
    }

    #[test]
    fn test_smoothed_position_trails_target() {
        let mut world = make_world(1.0 / 60.0, true);
        let e = world
            .spawn((
                MapPosition::new(300.0, 300.0),
                Drift::new(Vec2::new(9.0, 0.0), Vec2::new(300.0, 300.0)),
                MotionState::Floating,
            ))
            .id();
        run(&mut world, 60);
        let pos = world.get::<MapPosition>(e).unwrap().pos;
        let target = world.get::<Drift>(e).unwrap().target;
        assert!((target.x - 309.0).abs() < 1e-3);
        assert!(pos.x > 300.0 && pos.x < target.x);
    }

    #[test]
    fn test_items_stay_inside_margin_over_time() {
        let mut world = make_world(0.1, false);
        let mut rng = fastrand::Rng::with_seed(3);
        let ids: Vec<Entity> = (0..20)
            .map(|_| {
                let p = Vec2::new(rng.f32() * 1040.0 + 120.0, rng.f32() * 480.0 + 120.0);
                world
                    .spawn((
                        MapPosition { pos: p },
                        Drift::new(
                            crate::components::drift::sample_velocity(&mut rng, 200.0),
                            p,
                        ),
                        MotionState::Floating,
                    ))
                    .id()
            })
            .collect();
        run(&mut world, 500);
        let bounds = margin_rect(world.resource::<ViewportConfig>());
        for e in ids {
            assert!(bounds.contains(world.get::<MapPosition>(e).unwrap().pos));
        }
    }

    #[test]
    fn test_non_floating_items_are_skipped() {
        let mut world = make_world(0.5, false);
        let locked = world
            .spawn((
                MapPosition::new(300.0, 300.0),
                Drift::new(Vec2::new(4.0, 2.0), Vec2::new(300.0, 300.0)),
                MotionState::Locked,
            ))
            .id();
        let member = world
            .spawn((
                MapPosition::new(400.0, 300.0),
                Drift::new(Vec2::new(4.0, 2.0), Vec2::new(400.0, 300.0)),
                MotionState::GroupMember,
            ))
            .id();
        run(&mut world, 3);
        assert_eq!(world.get::<MapPosition>(locked).unwrap().pos, Vec2::new(300.0, 300.0));
        assert_eq!(world.get::<MapPosition>(member).unwrap().pos, Vec2::new(400.0, 300.0));
        assert_eq!(world.get::<Drift>(locked).unwrap().target, Vec2::new(300.0, 300.0));
    }
}

//! Cosmetic drift of floating gallery items.
//!
//! The [`Drift`] component stores a constant velocity and a soft target. The
//! [`drift_system`](crate::systems::drift::drift_system) moves the target by
//! the velocity, bounces it off the margin rectangle and lets the visible
//! position follow it, which hides the velocity flip on a bounce.
//!
//! This is not a physics body: there is no acceleration, friction or
//! collision between items.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Fraction of `max_speed` under which a velocity component counts as zero.
const STALL_FRACTION: f32 = 0.05;

/// Drift velocity and soft target of a floating item.
///
/// # Fields
/// - `velocity` - world units per second
/// - `target` - point the visible position eases toward
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Drift {
    pub velocity: Vec2,
    pub target: Vec2,
}

impl Drift {
    /// Create a drift anchored at `pos`.
    pub fn new(velocity: Vec2, pos: Vec2) -> Self {
        Self {
            velocity,
            target: pos,
        }
    }

    /// Re-anchor the soft target, e.g. after a snap back to a restore point.
    pub fn reset_target(&mut self, pos: Vec2) {
        self.target = pos;
    }
}

/// Draw a calm random velocity with components in `[-max_speed, max_speed]`.
///
/// Samples where both components are near zero are redrawn so no item stalls.
/// A zero or non-finite `max_speed` yields a still item.
pub fn sample_velocity(rng: &mut fastrand::Rng, max_speed: f32) -> Vec2 {
    let max_speed = max_speed.abs();
    if !max_speed.is_finite() || max_speed == 0.0 {
        return Vec2::ZERO;
    }
    let stall = max_speed * STALL_FRACTION;
    loop {
        let v = Vec2::new(
            (rng.f32() - 0.5) * 2.0 * max_speed,
            (rng.f32() - 0.5) * 2.0 * max_speed,
        );
        if v.x.abs() >= stall || v.y.abs() >= stall {
            return v;
        }
    }
}

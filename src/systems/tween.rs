//! Tween animation systems.
//!
//! These systems update item properties over time based on tween components:
//! - [`tween_mapposition_system`] – animates [`MapPosition`](crate::components::mapposition::MapPosition)
//! - [`tween_opacity_system`] – animates [`Opacity`](crate::components::opacity::Opacity)
//!
//! Tweens run once. When a tween reaches its duration the property is set to
//! exactly `to` and `playing` becomes false; the component stays on the item
//! so the focus choreography can poll for completion. The systems read delta
//! time from [`WorldTime`](crate::resources::worldtime::WorldTime).

use crate::components::mapposition::MapPosition;
use crate::components::opacity::Opacity;
use crate::components::tween::{Easing, TweenOpacity, TweenPosition};
use crate::resources::worldtime::WorldTime;
use bevy_ecs::prelude::*;
use glam::Vec2;

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve.
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
    }
}

/// Linearly interpolate between two 2D vectors.
pub fn lerp_v2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Linearly interpolate between two floats.
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Advance tween time and return normalized progress in [0, 1].
///
/// Stops the tween once `time` reaches `duration`. A zero or negative
/// duration finishes on the first advance.
pub(crate) fn advance(time: &mut f32, duration: f32, playing: &mut bool, dt: f32) -> f32 {
    *time += dt;
    if duration <= 0.0 || *time >= duration {
        *playing = false;
        *time = duration.max(0.0);
        return 1.0;
    }
    *time / duration
}

/// Animate item positions based on [`TweenPosition`] components.
pub fn tween_mapposition_system(
    world_time: Res<WorldTime>,
    mut query: Query<(&mut MapPosition, &mut TweenPosition)>,
) {
    let dt = world_time.delta.max(0.0);
    for (mut mp, mut tw) in query.iter_mut() {
        if !tw.playing {
            continue;
        }
        let duration = tw.duration;
        let mut t = tw.time;
        let mut playing = tw.playing;
        let progress = advance(&mut t, duration, &mut playing, dt);
        tw.time = t;
        tw.playing = playing;
        mp.pos = if playing {
            lerp_v2(tw.from, tw.to, ease(tw.easing, progress))
        } else {
            tw.to
        };
    }
}

/// Animate item opacity based on [`TweenOpacity`] components.
pub fn tween_opacity_system(
    world_time: Res<WorldTime>,
    mut query: Query<(&mut Opacity, &mut TweenOpacity)>,
) {
    let dt = world_time.delta.max(0.0);
    for (mut opacity, mut tw) in query.iter_mut() {
        if !tw.playing {
            continue;
        }
        let duration = tw.duration;
        let mut t = tw.time;
        let mut playing = tw.playing;
        let progress = advance(&mut t, duration, &mut playing, dt);
        tw.time = t;
        tw.playing = playing;
        let value = if playing {
            lerp_f32(tw.from, tw.to, ease(tw.easing, progress))
        } else {
            tw.to
        };
        opacity.set(value);
    }
}

//! Tween components for animated interpolation.
//!
//! This module provides one-shot animations of item properties:
//! - [`TweenPosition`] – animate [`MapPosition`](super::mapposition::MapPosition)
//! - [`TweenOpacity`] – animate [`Opacity`](super::opacity::Opacity)
//!
//! Both support the [`Easing`] curves. See [`crate::systems::tween`] for the
//! update systems; the camera's cinematic moves reuse the same curves.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts fast, decelerates (quadratic). Used for dimming.
    QuadOut,
    /// Slow start and end (cubic). Used for regrouping and camera moves.
    CubicInOut,
}

/// Moves an item's [`MapPosition`](super::mapposition::MapPosition) from `from` to `to`.
#[derive(Component, Clone, Debug)]
pub struct TweenPosition {
    /// Starting position.
    pub from: Vec2,
    /// Ending position.
    pub to: Vec2,
    /// Duration in seconds.
    pub duration: f32,
    /// Easing function to use.
    pub easing: Easing,
    /// Whether the tween is still running.
    pub playing: bool,
    /// Current time within the tween.
    pub time: f32,
}

impl TweenPosition {
    pub fn new(from: Vec2, to: Vec2, duration: f32) -> Self {
        TweenPosition {
            from,
            to,
            duration,
            easing: Easing::Linear,
            playing: true,
            time: 0.0,
        }
    }
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
    pub fn is_finished(&self) -> bool {
        !self.playing
    }
}

/// Fades an item's [`Opacity`](super::opacity::Opacity) from `from` to `to`.
#[derive(Component, Clone, Debug)]
pub struct TweenOpacity {
    /// Starting opacity.
    pub from: f32,
    /// Ending opacity.
    pub to: f32,
    /// Duration in seconds.
    pub duration: f32,
    /// Easing function to use.
    pub easing: Easing,
    /// Whether the tween is still running.
    pub playing: bool,
    /// Current time within the tween.
    pub time: f32,
}

impl TweenOpacity {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        TweenOpacity {
            from,
            to,
            duration,
            easing: Easing::Linear,
            playing: true,
            time: 0.0,
        }
    }
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

//! Pan/zoom camera resource.
//!
//! The [`Camera`] maps world coordinates to screen coordinates with
//! `screen = world * scale + position`. User intents only move the
//! *targets*; [`Camera::tick`] eases the live values toward them once per
//! frame using exponential smoothing with real time constants, so the feel
//! does not depend on the frame rate.
//!
//! Focus transitions use [`Camera::animate_to`] instead: a cinematic move
//! with cubic ease-in-out over a fixed duration. While it runs, zoom and pan
//! intents are dropped, and `tick` returns the animation's ticket on the
//! frame it completes so the caller can advance without guessing delays.
//!
//! Scale is clamped to `[min_scale, max_scale]` on every write, including
//! target writes, so the eased value never leaves that range.

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::{debug, warn};

use crate::components::tween::Easing;
use crate::systems::tween::{ease, lerp_f32, lerp_v2};

/// Camera tunables, see [`ViewportConfig`](crate::resources::viewportconfig::ViewportConfig).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub min_scale: f32,
    pub max_scale: f32,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    /// Seconds for the position to cover ~63% of the remaining distance.
    pub pan_time_constant: f32,
    /// Seconds for the scale to cover ~63% of the remaining distance.
    pub zoom_time_constant: f32,
    pub position_epsilon: f32,
    pub scale_epsilon: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            min_scale: 0.6,
            max_scale: 1.8,
            zoom_in_factor: 1.12,
            zoom_out_factor: 0.88,
            pan_time_constant: 0.2,
            zoom_time_constant: 0.27,
            position_epsilon: 0.01,
            scale_epsilon: 0.0001,
        }
    }
}

/// Direction of a wheel zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel convention: negative `delta_y` (scrolling up) zooms in.
    pub fn from_wheel(delta_y: f32) -> Self {
        if delta_y < 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        }
    }
}

/// Offset between the pointer and the camera target when a pan started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanAnchor(pub Vec2);

/// Camera targets captured before a focus transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSnapshot {
    pub target_position: Vec2,
    pub target_scale: f32,
}

/// A running cinematic move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraAnimation {
    pub from_position: Vec2,
    pub from_scale: f32,
    pub to_position: Vec2,
    pub to_scale: f32,
    pub duration: f32,
    pub elapsed: f32,
    /// Returned by [`Camera::tick`] when the move completes.
    pub ticket: u64,
}

#[derive(Resource, Debug, Clone)]
pub struct Camera {
    position: Vec2,
    scale: f32,
    target_position: Vec2,
    target_scale: f32,
    animation: Option<CameraAnimation>,
    settings: CameraSettings,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl Camera {
    /// Camera at the origin with scale 1 (clamped into the configured range).
    pub fn new(settings: CameraSettings) -> Self {
        let scale = 1.0_f32.clamp(settings.min_scale, settings.max_scale);
        Self {
            position: Vec2::ZERO,
            scale,
            target_position: Vec2::ZERO,
            target_scale: scale,
            animation: None,
            settings,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn target_position(&self) -> Vec2 {
        self.target_position
    }

    pub fn target_scale(&self) -> f32 {
        self.target_scale
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn animation(&self) -> Option<&CameraAnimation> {
        self.animation.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// No cinematic running and live values equal their targets.
    pub fn is_settled(&self) -> bool {
        self.animation.is_none()
            && self.position == self.target_position
            && self.scale == self.target_scale
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.position) / self.scale
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * self.scale + self.position
    }

    fn clamp_scale(&self, scale: f32) -> f32 {
        if scale.is_nan() {
            warn!("rejecting NaN camera scale");
            return self.target_scale;
        }
        scale.clamp(self.settings.min_scale, self.settings.max_scale)
    }

    fn write_scale(&mut self, scale: f32) {
        self.scale = self.clamp_scale(scale);
    }

    fn write_target_scale(&mut self, scale: f32) {
        self.target_scale = self.clamp_scale(scale);
    }

    fn write_position(&mut self, pos: Vec2) {
        if pos.is_finite() {
            self.position = pos;
        } else {
            warn!("rejecting non-finite camera position {:?}", pos);
        }
    }

    fn write_target_position(&mut self, pos: Vec2) {
        if pos.is_finite() {
            self.target_position = pos;
        } else {
            warn!("rejecting non-finite camera target {:?}", pos);
        }
    }

    /// Zoom around `screen_point`, keeping the world point under it fixed.
    ///
    /// Returns `false` when the intent was dropped because a cinematic move
    /// is running.
    pub fn set_zoom_intent(&mut self, screen_point: Vec2, direction: ZoomDirection) -> bool {
        if self.animation.is_some() {
            debug!("zoom intent dropped during camera animation");
            return false;
        }
        assert!(self.scale > 0.0, "camera scale must stay positive");

        let world = self.screen_to_world(screen_point);
        let factor = match direction {
            ZoomDirection::In => self.settings.zoom_in_factor,
            ZoomDirection::Out => self.settings.zoom_out_factor,
        };
        self.write_target_scale(self.target_scale * factor);
        self.write_target_position(screen_point - world * self.target_scale);
        true
    }

    /// Start a pan gesture at `screen_point`.
    pub fn begin_pan(&self, screen_point: Vec2) -> PanAnchor {
        PanAnchor(screen_point - self.target_position)
    }

    /// Drag the view so the anchor stays under `screen_point`. Never touches scale.
    ///
    /// Returns `false` when the intent was dropped because a cinematic move
    /// is running.
    pub fn set_pan_intent(&mut self, screen_point: Vec2, anchor: PanAnchor) -> bool {
        if self.animation.is_some() {
            debug!("pan intent dropped during camera animation");
            return false;
        }
        self.write_target_position(screen_point - anchor.0);
        true
    }

    /// Start a cinematic move to `scale`/`position` over `duration` seconds.
    ///
    /// Replaces any running move. The targets are set to the destination so
    /// the camera stays there once the move completes.
    pub fn animate_to(&mut self, scale: f32, position: Vec2, duration: f32, ticket: u64) {
        let to_scale = self.clamp_scale(scale);
        let to_position = if position.is_finite() {
            position
        } else {
            warn!("non-finite animation target {:?}, holding position", position);
            self.target_position
        };
        self.animation = Some(CameraAnimation {
            from_position: self.position,
            from_scale: self.scale,
            to_position,
            to_scale,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ticket,
        });
        self.write_target_scale(to_scale);
        self.write_target_position(to_position);
    }

    /// Drop a running cinematic move, leaving the camera where it is.
    ///
    /// Returns the ticket of the cancelled move, if any.
    pub fn cancel_animation(&mut self) -> Option<u64> {
        let anim = self.animation.take()?;
        self.target_position = self.position;
        self.target_scale = self.scale;
        Some(anim.ticket)
    }

    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            target_position: self.target_position,
            target_scale: self.target_scale,
        }
    }

    /// Cancel any cinematic and ease back toward the snapshot's targets.
    pub fn restore(&mut self, snapshot: CameraSnapshot) {
        self.animation = None;
        self.write_target_scale(snapshot.target_scale);
        self.write_target_position(snapshot.target_position);
    }

    /// Advance the camera by `dt` seconds.
    ///
    /// Returns the ticket of a cinematic move that completed this frame.
    pub fn tick(&mut self, dt: f32) -> Option<u64> {
        let dt = dt.max(0.0);
        if let Some(mut anim) = self.animation {
            anim.elapsed += dt;
            if anim.elapsed >= anim.duration {
                self.animation = None;
                self.write_position(anim.to_position);
                self.write_scale(anim.to_scale);
                self.write_target_position(anim.to_position);
                self.write_target_scale(anim.to_scale);
                return Some(anim.ticket);
            }
            let t = ease(Easing::CubicInOut, anim.elapsed / anim.duration);
            self.write_position(lerp_v2(anim.from_position, anim.to_position, t));
            self.write_scale(lerp_f32(anim.from_scale, anim.to_scale, t));
            self.animation = Some(anim);
            return None;
        }

        let k_pan = smoothing_factor(dt, self.settings.pan_time_constant);
        let k_zoom = smoothing_factor(dt, self.settings.zoom_time_constant);

        let pos = self.position + (self.target_position - self.position) * k_pan;
        if (self.target_position - pos).length() < self.settings.position_epsilon {
            self.position = self.target_position;
        } else {
            self.write_position(pos);
        }

        let scale = self.scale + (self.target_scale - self.scale) * k_zoom;
        if (self.target_scale - scale).abs() < self.settings.scale_epsilon {
            self.scale = self.target_scale;
        } else {
            self.write_scale(scale);
        }
        None
    }
}

/// Fraction of the remaining distance covered in `dt` for time constant `tau`.
///
/// A non-positive `tau` snaps immediately.
pub fn smoothing_factor(dt: f32, tau: f32) -> f32 {
    if tau <= 0.0 {
        1.0
    } else {
        1.0 - (-dt / tau).exp()
    }
}

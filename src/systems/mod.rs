//! Viewport systems.
//!
//! This module groups all ECS systems and observers that advance input,
//! camera, motion and backend sync.
//!
//! Submodules overview
//! - [`camera`] – ease the camera and report completed cinematic moves
//! - [`drift`] – integrate drift of floating items with wall bounce
//! - [`focus`] – group focus observers, phase polling and run conditions
//! - [`input`] – route pointer, wheel and key events to intents
//! - [`render`] – push changed visual values to the render backend
//! - [`time`] – update simulation time and delta
//! - [`tween`] – animate position and opacity over time

pub mod camera;
pub mod drift;
pub mod focus;
pub mod input;
pub mod render;
pub mod time;
pub mod tween;

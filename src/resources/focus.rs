//! Group focus session resource.
//!
//! [`FocusSession`] is the single source of truth for which project group is
//! focused and how far the choreographed transition has progressed. It is
//! written only by the focus observers and
//! [`focus_phase_system`](crate::systems::focus::focus_phase_system).
//!
//! # Phases
//!
//! ```text
//! Idle -> ZoomingOut -> Regrouping -> ZoomingIn -> Focused
//!                                                    |
//! Idle <----------------- Restoring <----------------+   (Escape from any phase)
//! ```
//!
//! `generation` changes on every activation and every restore. Completion
//! signals carry the generation they were issued for, so a signal that
//! arrives after Escape is recognised as stale and ignored.

use bevy_ecs::prelude::*;
use std::fmt;

use crate::resources::camera::CameraSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusPhase {
    #[default]
    Idle,
    /// Fading non-members and pulling the camera back to the overview.
    ZoomingOut,
    /// Members travelling to their layout slots.
    Regrouping,
    /// Camera returning to scale 1 at the origin.
    ZoomingIn,
    /// Panel visible, members draggable.
    Focused,
    /// Entities restored; waiting for the camera to settle.
    Restoring,
}

impl fmt::Display for FocusPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FocusPhase::Idle => "idle",
            FocusPhase::ZoomingOut => "zooming-out",
            FocusPhase::Regrouping => "regrouping",
            FocusPhase::ZoomingIn => "zooming-in",
            FocusPhase::Focused => "focused",
            FocusPhase::Restoring => "restoring",
        };
        f.write_str(s)
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct FocusSession {
    /// Tag of the focused group; `None` means no group is active.
    pub active_group: Option<String>,
    /// Camera targets from before the activation.
    pub stored_camera: Option<CameraSnapshot>,
    pub phase: FocusPhase,
    /// Identifies the current transition for completion signals.
    pub generation: u64,
    pub panel_visible: bool,
}

impl FocusSession {
    pub fn is_active(&self) -> bool {
        self.active_group.is_some()
    }

    pub fn is_active_group(&self, tag: &str) -> bool {
        self.active_group.as_deref() == Some(tag)
    }

    /// Start a new transition and return its generation.
    pub fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Whether a completion signal issued with `ticket` is still current.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation == ticket
    }
}

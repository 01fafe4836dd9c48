//! Explicit motion ownership of a gallery item.
//!
//! Exactly one owner writes an item's [`MapPosition`](super::mapposition::MapPosition)
//! at a time:
//! - [`MotionState::Floating`] – the drift system
//! - [`MotionState::GroupMember`] – the focus layout tweens
//! - [`MotionState::Locked`] – nobody; the user placed it by hand
//!
//! Escape returns every item to `Floating`.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionState {
    #[default]
    Floating,
    /// Placed by a manual drag.
    Locked,
    /// Member of the active group, owned by the focus layout.
    GroupMember,
}

impl MotionState {
    pub fn is_floating(&self) -> bool {
        matches!(self, MotionState::Floating)
    }
}

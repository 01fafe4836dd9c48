//! Z-index component for render ordering.
//!
//! The [`ZIndex`] component controls the stacking order the backend applies
//! to an item. Focused group members are raised above everything else and
//! hit-testing prefers the topmost item.

use bevy_ecs::prelude::Component;

/// Rendering order hint for 2D drawing.
///
/// Higher values are drawn later (on top).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);

//! Group activation events.
//!
//! - [`ActivateGroupEvent`] is triggered by the input router when an
//!   eligible item is clicked. Handled by
//!   [`activate_group_observer`](crate::systems::focus::activate_group_observer).
//! - [`RestoreFocusEvent`] is triggered by Escape. Handled by
//!   [`restore_focus_observer`](crate::systems::focus::restore_focus_observer).
//! - [`FocusPhaseChangedEvent`] is emitted after every phase transition so
//!   hosts and tests can follow the choreography.

use bevy_ecs::prelude::*;

use crate::resources::focus::FocusPhase;

/// Request to focus the group of `entity`.
#[derive(Event, Debug, Clone, Copy)]
pub struct ActivateGroupEvent {
    pub entity: Entity,
}

/// Request to leave the focused group and restore the viewport.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RestoreFocusEvent;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusPhaseChangedEvent {
    pub from: FocusPhase,
    pub to: FocusPhase,
}

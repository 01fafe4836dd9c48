//! driftfocus library.
//!
//! An interactive 2D viewport engine built on `bevy_ecs`: a pan/zoom camera
//! with frame-rate independent easing, drifting gallery items, an input
//! router and a group focus choreography. Rendering and the detail panel
//! are external collaborators reached through traits in
//! [`resources::backend`].

pub mod components;
pub mod events;
pub mod gallery;
pub mod layout;
pub mod resources;
pub mod systems;

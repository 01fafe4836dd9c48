//! ECS components for gallery items.
//!
//! Every item spawned from the asset manifest carries a position, a drift,
//! a motion state, a project group and its visual state. Focus transitions
//! add restore points and tweens on top.
//!
//! Submodules overview:
//! - [`drift`] – constant-velocity drift with a soft target
//! - [`group`] – project tag shared by items focused together
//! - [`mapposition`] – world-space position (pivot) for an item
//! - [`motionstate`] – which system owns an item's position
//! - [`opacity`] – clamped opacity value
//! - [`restorepoint`] – visual state recorded before a focus transition
//! - [`sprite`] – backend handle and visual size
//! - [`tween`] – eased animation of position and opacity
//! - [`zindex`] – rendering order hint

pub mod drift;
pub mod group;
pub mod mapposition;
pub mod motionstate;
pub mod opacity;
pub mod restorepoint;
pub mod sprite;
pub mod tween;
pub mod zindex;

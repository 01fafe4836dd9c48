//! Event types exchanged between systems and observers.
//!
//! Submodules:
//! - [`camera`] – completion of a cinematic camera move
//! - [`focus`] – group activation, restore, and phase change notifications
//! - [`input`] – normalized input events delivered by the host
//!
//! `input` events travel through a channel; the others are triggered with
//! `Commands::trigger` and handled by observers in
//! [`crate::systems::focus`].
pub mod camera;
pub mod focus;
pub mod input;

//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution.
//!
//! Overview
//! - `backend` – render backend and detail panel traits (non-send)
//! - `camera` – pan/zoom camera with eased targets and cinematic moves
//! - `focus` – active group, transition phase and generation
//! - `input` – input channel receiver and gesture state
//! - `manifest` – JSON list of gallery assets
//! - `random` – seeded random source
//! - `viewportconfig` – INI-backed tunables
//! - `worldtime` – simulation time and delta
pub mod backend;
pub mod camera;
pub mod focus;
pub mod input;
pub mod manifest;
pub mod random;
pub mod viewportconfig;
pub mod worldtime;

//! Corridor Simulation Library
//!
//! A drivable street corridor with ambient traffic and pedestrians that can
//! run headless or with a Bevy UI.

pub mod logging;
pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;

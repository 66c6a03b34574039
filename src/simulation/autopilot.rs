//! Scripted driver for headless runs
//!
//! Produces the same key state a human would, steering toward the active
//! waypoint and holding the throttle. With no waypoint it keeps straight.

use super::navigation::NavigationTracker;
use super::vehicle::{DriveInput, VehicleState};

/// Heading error (radians) tolerated before steering
pub const STEER_DEADBAND: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Speed the autopilot will not exceed; it lifts off above it
    pub cruise_speed: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { cruise_speed: 20.0 }
    }
}

impl Autopilot {
    pub fn input(&self, state: &VehicleState, navigation: &NavigationTracker) -> DriveInput {
        let relative = navigation
            .relative_bearing(&state.position, state.heading)
            .unwrap_or(0.0);

        DriveInput {
            forward: state.speed < self.cruise_speed,
            backward: false,
            // Positive relative bearing lies to the left
            left: relative > STEER_DEADBAND,
            right: relative < -STEER_DEADBAND,
            brake: false,
        }
    }
}

//! Driver-facing readouts derived from the vehicle state

use std::fmt;

use super::layout::WorldLayout;
use super::vehicle::{DriveInput, VehicleState};

/// Display conversion from world speed to miles per hour
pub const MPH_PER_UNIT: f64 = 2.5;

/// Speeds inside this band show as parked
pub const GEAR_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gear {
    Park,
    Drive,
    Reverse,
}

impl Gear {
    pub fn from_speed(speed: f64) -> Self {
        if speed > GEAR_THRESHOLD {
            Gear::Drive
        } else if speed < -GEAR_THRESHOLD {
            Gear::Reverse
        } else {
            Gear::Park
        }
    }
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Gear::Park => "P",
            Gear::Drive => "D",
            Gear::Reverse => "R",
        };
        f.write_str(letter)
    }
}

/// One frame of dashboard values
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub mph: f64,
    pub gear: Gear,
    /// Power bar fill in percent
    pub power_percent: f64,
    pub street: &'static str,
}

impl Dashboard {
    /// Read the dashboard for a vehicle state and the keys currently held.
    ///
    /// The power bar fills to 100% with forward throttle at top speed and
    /// to 50% in reverse at top reverse speed; it reads 0 while coasting.
    pub fn read(state: &VehicleState, input: &DriveInput, max_speed: f64) -> Self {
        let speed = state.speed.abs();
        let power_percent = if input.forward {
            (speed / max_speed * 100.0).min(100.0)
        } else if input.backward {
            (speed / (max_speed * 0.5) * 50.0).min(50.0)
        } else {
            0.0
        };

        Self {
            mph: speed * MPH_PER_UNIT,
            gear: Gear::from_speed(state.speed),
            power_percent,
            street: WorldLayout::street_name_at(state.position.z),
        }
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3.0} MPH [{}] power {:>3.0}% | {}",
            self.mph.round(),
            self.gear,
            self.power_percent,
            self.street
        )
    }
}

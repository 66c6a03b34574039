//! Player vehicle motion model
//!
//! Standalone implementation that doesn't depend on Bevy. Friction,
//! braking and steering are applied per tick rather than per second, so
//! the handling depends on the frame rate the caller drives it at.

use log::debug;

use super::config::DriveParams;
use super::types::{Obstacle, Position};

/// Which view owns the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveMode {
    /// Vehicle is on display; the motion model is inactive
    #[default]
    Showroom,
    /// Vehicle responds to input
    Drive,
}

/// Debounced key state supplied by the input collaborator each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub brake: bool,
}

/// Axis form of the driver's intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlInput {
    /// 1 accelerate, -1 reverse, 0 coast
    pub throttle: i8,
    /// 1 right, -1 left, 0 straight
    pub steer: i8,
    pub brake: bool,
}

impl From<DriveInput> for ControlInput {
    fn from(input: DriveInput) -> Self {
        Self {
            throttle: input.forward as i8 - input.backward as i8,
            steer: input.right as i8 - input.left as i8,
            brake: input.brake,
        }
    }
}

/// Kinematic state of the player vehicle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VehicleState {
    pub position: Position,
    /// Radians; 0 faces +Z and positive values turn toward +X
    pub heading: f64,
    /// Signed speed along the heading, negative when reversing
    pub speed: f64,
}

/// What happened during one motion step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// The candidate position overlapped an obstacle and was rejected
    pub blocked: bool,
}

/// The player's vehicle and its handling parameters
#[derive(Debug, Clone)]
pub struct VehicleModel {
    params: DriveParams,
    state: VehicleState,
    mode: DriveMode,
}

impl VehicleModel {
    /// New model resting at the origin pose in showroom mode
    pub fn new(params: DriveParams) -> Self {
        Self {
            params,
            state: VehicleState::default(),
            mode: DriveMode::Showroom,
        }
    }

    pub fn params(&self) -> &DriveParams {
        &self.params
    }

    pub fn state(&self) -> VehicleState {
        self.state
    }

    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    /// Place the vehicle at an explicit pose
    pub fn set_state(&mut self, state: VehicleState) {
        self.state = state;
    }

    /// Scale the current speed, snapping to rest below the stop epsilon
    pub fn damp_speed(&mut self, factor: f64) {
        self.state.speed *= factor;
        if self.state.speed.abs() < self.params.stop_epsilon {
            self.state.speed = 0.0;
        }
    }

    /// Switch modes. Entering drive places the vehicle at the drive start
    /// pose; returning to the showroom resets it to the origin.
    pub fn set_mode(&mut self, mode: DriveMode) {
        self.mode = mode;
        self.state = match mode {
            DriveMode::Showroom => VehicleState::default(),
            DriveMode::Drive => VehicleState {
                position: self.params.drive_start,
                heading: self.params.drive_start_heading,
                speed: 0.0,
            },
        };
        debug!("Vehicle mode set to {:?}", mode);
    }

    /// Advance one tick. Does nothing outside drive mode.
    pub fn step(
        &mut self,
        delta_secs: f64,
        input: ControlInput,
        obstacles: &[Obstacle],
    ) -> StepOutcome {
        if self.mode != DriveMode::Drive {
            return StepOutcome::default();
        }

        let p = &self.params;
        let mut speed = self.state.speed;

        // Longitudinal
        if input.throttle > 0 {
            speed += p.acceleration * delta_secs;
        } else if input.throttle < 0 {
            speed -= p.acceleration * delta_secs * p.reverse_factor;
        } else {
            speed *= p.friction;
        }
        if input.brake {
            speed *= p.brake_friction;
        }
        speed = speed.clamp(-p.max_speed * p.reverse_ratio, p.max_speed);

        // Lateral: no turning at a standstill, and the turn flips in reverse
        let mut heading = self.state.heading;
        if speed.abs() > p.turn_gate_speed {
            let authority = speed.abs() / p.max_speed;
            heading -= f64::from(input.steer) * p.turn_per_tick * authority * speed.signum();
        }

        let candidate = self.state.position.advanced(heading, speed * delta_secs);

        let blocked = obstacles
            .iter()
            .any(|obstacle| obstacle.overlaps(&candidate, p.vehicle_radius));

        if blocked {
            speed *= p.collision_damping;
        } else {
            self.state.position = candidate;
            self.state.heading = heading;
        }

        // Coasting drift only; a held throttle must be able to leave rest
        if input.throttle == 0 && speed.abs() < p.stop_epsilon {
            speed = 0.0;
        }
        self.state.speed = speed;

        StepOutcome { blocked }
    }
}

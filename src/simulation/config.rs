//! Tunable parameters for every simulation component
//!
//! Defaults reproduce the stock corridor experience. A `SimConfig` is
//! validated once when a world is built from it.

use anyhow::{ensure, Result};

use super::types::{Position, TravelDirection};

/// Player vehicle handling
#[derive(Debug, Clone, PartialEq)]
pub struct DriveParams {
    /// Forward acceleration in units/s²
    pub acceleration: f64,
    pub max_speed: f64,
    /// Heading change per tick at full speed, in radians
    pub turn_per_tick: f64,
    /// Speed multiplier applied each tick with no throttle
    pub friction: f64,
    /// Speed multiplier applied each tick while braking
    pub brake_friction: f64,
    /// Reverse acceleration as a fraction of `acceleration`
    pub reverse_factor: f64,
    /// Top reverse speed as a fraction of `max_speed`
    pub reverse_ratio: f64,
    pub vehicle_radius: f64,
    /// Speed multiplier when a move is blocked by an obstacle
    pub collision_damping: f64,
    /// Speed multiplier when the vehicle overlaps a traffic agent
    pub traffic_hit_damping: f64,
    /// Steering has no effect below this absolute speed
    pub turn_gate_speed: f64,
    /// Speeds below this snap to zero
    pub stop_epsilon: f64,
    /// Pose the vehicle takes when drive mode starts
    pub drive_start: Position,
    pub drive_start_heading: f64,
}

impl Default for DriveParams {
    fn default() -> Self {
        Self {
            acceleration: 1.2,
            max_speed: 50.0,
            turn_per_tick: 0.025,
            friction: 0.96,
            brake_friction: 0.85,
            reverse_factor: 0.6,
            reverse_ratio: 0.5,
            vehicle_radius: 3.0,
            collision_damping: 0.5,
            traffic_hit_damping: 0.3,
            turn_gate_speed: 0.1,
            stop_epsilon: 0.05,
            // Starbucks plaza parking lot, facing up the corridor
            drive_start: Position::new(-50.0, 845.0),
            drive_start_heading: 0.0,
        }
    }
}

/// A lane definition before ids are assigned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneSpec {
    pub center_x: f64,
    pub direction: TravelDirection,
}

/// Autonomous traffic behaviour
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficConfig {
    pub max_vehicles: usize,
    /// Seconds between spawn attempts
    pub spawn_interval: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Gap below which a follower slows for its leader
    pub braking_distance: f64,
    /// Fraction of the leader's speed a braking follower targets
    pub follow_factor: f64,
    /// Rate (per second) at which speed converges on the target speed
    pub speed_smoothing: f64,
    /// No spawn if a same-lane agent is closer than this to the spawn point
    pub spawn_clearance: f64,
    /// Spawn point for northbound lanes, behind the corridor start
    pub north_spawn_z: f64,
    /// Spawn point for southbound lanes, beyond the corridor end
    pub south_spawn_z: f64,
    /// Northbound agents are removed once past this Z
    pub north_despawn_z: f64,
    /// Southbound agents are removed once below this Z
    pub south_despawn_z: f64,
    /// Collision radius of a traffic vehicle
    pub vehicle_radius: f64,
    pub lanes: Vec<LaneSpec>,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            max_vehicles: 15,
            spawn_interval: 3.0,
            min_speed: 15.0,
            max_speed: 30.0,
            braking_distance: 15.0,
            follow_factor: 0.8,
            speed_smoothing: 2.0,
            spawn_clearance: 30.0,
            north_spawn_z: -100.0,
            south_spawn_z: 1600.0,
            north_despawn_z: 1700.0,
            south_despawn_z: -200.0,
            vehicle_radius: 2.0,
            lanes: vec![
                LaneSpec { center_x: -10.0, direction: TravelDirection::North },
                LaneSpec { center_x: -6.0, direction: TravelDirection::North },
                LaneSpec { center_x: 6.0, direction: TravelDirection::South },
                LaneSpec { center_x: 10.0, direction: TravelDirection::South },
            ],
        }
    }
}

/// A sidewalk path definition before ids are assigned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidewalkSpec {
    pub x: f64,
    pub direction: TravelDirection,
}

/// Pedestrian behaviour
#[derive(Debug, Clone, PartialEq)]
pub struct PedestrianConfig {
    pub max_pedestrians: usize,
    /// Seconds between steady-state spawns
    pub spawn_interval: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Number of corridor segments seeded at start-up
    pub initial_segments: usize,
    pub min_per_segment: usize,
    pub max_per_segment: usize,
    /// Steady-state spawns land this far ahead of or behind the player...
    pub spawn_window_near: f64,
    /// ...plus up to this much extra
    pub spawn_window_depth: f64,
    /// Walkers farther than this from the player (along Z) are culled
    pub cull_distance: f64,
    pub min_z: f64,
    pub max_z: f64,
    /// Gait phase advance per unit of distance walked
    pub gait_rate: f64,
    pub paths: Vec<SidewalkSpec>,
}

impl Default for PedestrianConfig {
    fn default() -> Self {
        Self {
            max_pedestrians: 25,
            spawn_interval: 4.0,
            min_speed: 1.5,
            max_speed: 2.5,
            initial_segments: 8,
            min_per_segment: 2,
            max_per_segment: 4,
            spawn_window_near: 100.0,
            spawn_window_depth: 100.0,
            cull_distance: 300.0,
            min_z: -50.0,
            max_z: 1550.0,
            gait_rate: 3.0,
            paths: vec![
                SidewalkSpec { x: -22.0, direction: TravelDirection::North },
                SidewalkSpec { x: -22.0, direction: TravelDirection::South },
                SidewalkSpec { x: 22.0, direction: TravelDirection::North },
                SidewalkSpec { x: 22.0, direction: TravelDirection::South },
            ],
        }
    }
}

/// Waypoint tracking
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationConfig {
    pub arrival_threshold: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            arrival_threshold: 20.0,
        }
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimConfig {
    pub drive: DriveParams,
    pub traffic: TrafficConfig,
    pub pedestrians: PedestrianConfig,
    pub navigation: NavigationConfig,
}

fn is_factor(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

impl SimConfig {
    /// Check that every parameter is inside the range the simulation expects
    pub fn validate(&self) -> Result<()> {
        let drive = &self.drive;
        ensure!(drive.acceleration > 0.0, "drive acceleration must be positive");
        ensure!(drive.max_speed > 0.0, "drive max speed must be positive");
        ensure!(drive.turn_per_tick >= 0.0, "turn rate must not be negative");
        ensure!(is_factor(drive.friction), "friction must be in (0, 1]");
        ensure!(is_factor(drive.brake_friction), "brake friction must be in (0, 1]");
        ensure!(is_factor(drive.reverse_ratio), "reverse ratio must be in (0, 1]");
        ensure!(drive.reverse_factor > 0.0, "reverse factor must be positive");
        ensure!(drive.vehicle_radius > 0.0, "vehicle radius must be positive");
        ensure!(is_factor(drive.collision_damping), "collision damping must be in (0, 1]");
        ensure!(is_factor(drive.traffic_hit_damping), "traffic hit damping must be in (0, 1]");
        ensure!(drive.stop_epsilon >= 0.0, "stop epsilon must not be negative");

        let traffic = &self.traffic;
        ensure!(!traffic.lanes.is_empty(), "traffic needs at least one lane");
        ensure!(
            traffic.min_speed > 0.0 && traffic.min_speed <= traffic.max_speed,
            "traffic speeds must satisfy 0 < min ({}) <= max ({})",
            traffic.min_speed,
            traffic.max_speed
        );
        ensure!(traffic.spawn_interval > 0.0, "traffic spawn interval must be positive");
        ensure!(traffic.braking_distance > 0.0, "braking distance must be positive");
        ensure!(is_factor(traffic.follow_factor), "follow factor must be in (0, 1]");
        ensure!(traffic.speed_smoothing > 0.0, "speed smoothing must be positive");
        ensure!(traffic.spawn_clearance >= 0.0, "spawn clearance must not be negative");
        ensure!(traffic.vehicle_radius > 0.0, "traffic vehicle radius must be positive");
        ensure!(
            traffic.north_despawn_z > traffic.north_spawn_z,
            "northbound despawn point must lie beyond the spawn point"
        );
        ensure!(
            traffic.south_despawn_z < traffic.south_spawn_z,
            "southbound despawn point must lie beyond the spawn point"
        );

        let peds = &self.pedestrians;
        ensure!(!peds.paths.is_empty(), "pedestrians need at least one sidewalk path");
        ensure!(
            peds.min_speed > 0.0 && peds.min_speed <= peds.max_speed,
            "pedestrian speeds must satisfy 0 < min ({}) <= max ({})",
            peds.min_speed,
            peds.max_speed
        );
        ensure!(peds.spawn_interval > 0.0, "pedestrian spawn interval must be positive");
        ensure!(
            peds.min_per_segment <= peds.max_per_segment,
            "pedestrian segment counts must satisfy min <= max"
        );
        ensure!(peds.min_z < peds.max_z, "pedestrian bounds are inverted");
        ensure!(peds.cull_distance > 0.0, "cull distance must be positive");

        ensure!(
            self.navigation.arrival_threshold > 0.0,
            "arrival threshold must be positive"
        );
        Ok(())
    }
}

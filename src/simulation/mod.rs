//! Standalone corridor simulation module
//!
//! This module contains all the core simulation logic that can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full game.

mod autopilot;
mod config;
mod dashboard;
mod layout;
mod minimap;
mod navigation;
mod pedestrian;
mod random;
mod stats;
mod traffic;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use autopilot::{Autopilot, STEER_DEADBAND};
#[allow(unused_imports)]
pub use config::{
    DriveParams, LaneSpec, NavigationConfig, PedestrianConfig, SidewalkSpec, SimConfig,
    TrafficConfig,
};
#[allow(unused_imports)]
pub use dashboard::{Dashboard, Gear, GEAR_THRESHOLD, MPH_PER_UNIT};
#[allow(unused_imports)]
pub use layout::{Building, BuildingStyle, Prop, PropKind, Surface, SurfaceKind, WorldLayout};
#[allow(unused_imports)]
pub use minimap::MinimapProjector;
#[allow(unused_imports)]
pub use navigation::{NavigationTracker, Waypoint, WaypointInfo, UNITS_PER_MILE};
#[allow(unused_imports)]
pub use pedestrian::{GaitPose, PedestrianAgent, PedestrianSimulation};
#[allow(unused_imports)]
pub use random::SimRng;
#[allow(unused_imports)]
pub use stats::DriveStats;
#[allow(unused_imports)]
pub use traffic::{TrafficAgent, TrafficSimulation};
#[allow(unused_imports)]
pub use types::{
    wrap_angle, Intersection, Landmark, LandmarkKind, Lane, LaneId, Obstacle, PedestrianId,
    Position, SidewalkPath, SidewalkPathId, SimId, TrafficAgentId, TravelDirection,
    CORRIDOR_LENGTH, ROAD_WIDTH, SIDEWALK_WIDTH,
};
#[allow(unused_imports)]
pub use vehicle::{ControlInput, DriveInput, DriveMode, StepOutcome, VehicleModel, VehicleState};
pub use world::{SimWorld, TickReport};

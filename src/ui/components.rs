//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{DriveInput, PedestrianId, SimWorld, TrafficAgentId};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

impl Default for SimWorldResource {
    fn default() -> Self {
        Self(SimWorld::new())
    }
}

/// Key state gathered each frame and consumed by the fixed-step tick
#[derive(Resource, Default)]
pub struct PlayerInput(pub DriveInput);

/// Marker component for ground plane
#[derive(Component)]
pub struct Ground;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Camera rig settings for both modes
#[derive(Resource)]
pub struct CameraSettings {
    /// Chase camera distance behind the vehicle
    pub chase_distance: f32,
    pub chase_height: f32,
    /// Fraction of the remaining offset covered each frame
    pub chase_follow: f32,
    pub orbit_distance: f32,
    pub orbit_height: f32,
    /// Radians per second
    pub orbit_speed: f32,
    pub orbit_angle: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            chase_distance: 12.0,
            chase_height: 4.0,
            chase_follow: 0.1,
            orbit_distance: 15.0,
            orbit_height: 5.0,
            orbit_speed: 0.3,
            orbit_angle: 0.0,
        }
    }
}

/// Marker for entities synced from simulation
#[derive(Component)]
pub struct SimSynced;

/// The player's vehicle root
#[derive(Component)]
pub struct PlayerVehicle;

/// Primitive body shown until the vehicle model finishes loading
#[derive(Component)]
pub struct PlayerPlaceholder;

/// Vehicle model being loaded in the background
#[derive(Component)]
pub struct PendingModel(pub Handle<Scene>);

/// Links a Bevy entity to a simulation traffic agent
#[derive(Component)]
pub struct TrafficLink(pub TrafficAgentId);

/// Links a Bevy entity to a simulation pedestrian
#[derive(Component)]
pub struct PedestrianLink(pub PedestrianId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimbKind {
    LeftLeg,
    RightLeg,
    LeftArm,
    RightArm,
}

/// A pedestrian limb animated from the walker's gait
#[derive(Component)]
pub struct Limb {
    pub owner: PedestrianId,
    pub kind: LimbKind,
}

/// The waypoint beacon column
#[derive(Component)]
pub struct WaypointBeacon;

/// Marker for HUD text lines
#[derive(Component)]
pub enum HudText {
    Mode,
    Dashboard,
    Navigation,
    Session,
}

/// Resource to track Bevy entities mapped to simulation entities
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub traffic: HashMap<TrafficAgentId, Entity>,
    pub pedestrians: HashMap<PedestrianId, Entity>,
}

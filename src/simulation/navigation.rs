//! Waypoint tracking toward named landmarks

use log::{info, warn};

use super::config::NavigationConfig;
use super::types::{wrap_angle, Landmark, Position};

/// Scale from world units to the miles shown to the driver
pub const UNITS_PER_MILE: f64 = 100.0;

/// The destination currently being tracked
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub landmark: Landmark,
    /// Tracker clock (seconds) when the waypoint was set
    pub created_at: f64,
}

/// Distance and direction from the player to the waypoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointInfo {
    pub distance: f64,
    /// Absolute bearing, measured like a heading
    pub bearing: f64,
    pub distance_miles: f64,
}

#[derive(Debug, Clone)]
pub struct NavigationTracker {
    landmarks: Vec<Landmark>,
    config: NavigationConfig,
    active: Option<Waypoint>,
    clock: f64,
}

impl NavigationTracker {
    pub fn new(landmarks: Vec<Landmark>, config: NavigationConfig) -> Self {
        Self {
            landmarks,
            config,
            active: None,
            clock: 0.0,
        }
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn arrival_threshold(&self) -> f64 {
        self.config.arrival_threshold
    }

    /// Advance the tracker clock used to stamp new waypoints
    pub fn advance(&mut self, delta_secs: f64) {
        self.clock += delta_secs;
    }

    /// Track the first landmark whose name contains `name`, ignoring case.
    ///
    /// Replaces any active waypoint. Returns false and leaves the current
    /// waypoint untouched when nothing matches.
    pub fn set_destination(&mut self, name: &str) -> bool {
        let needle = name.to_lowercase();
        let Some(landmark) = self
            .landmarks
            .iter()
            .find(|landmark| landmark.name.to_lowercase().contains(&needle))
        else {
            warn!("Landmark not found: {}", name);
            return false;
        };

        info!(
            "Navigation set to: {} at ({:.0}, {:.0})",
            landmark.name, landmark.position.x, landmark.position.z
        );
        self.active = Some(Waypoint {
            landmark: landmark.clone(),
            created_at: self.clock,
        });
        true
    }

    pub fn active_waypoint(&self) -> Option<&Waypoint> {
        self.active.as_ref()
    }

    pub fn clear_waypoint(&mut self) {
        self.active = None;
    }

    pub fn distance_to(&self, player: &Position) -> Option<WaypointInfo> {
        let target = self.active.as_ref()?.landmark.position;
        let distance = player.distance(&target);
        Some(WaypointInfo {
            distance,
            bearing: player.bearing_to(&target),
            distance_miles: distance / UNITS_PER_MILE,
        })
    }

    /// Bearing to the waypoint relative to `heading`, in (-PI, PI].
    /// Positive means the waypoint lies to the left.
    pub fn relative_bearing(&self, player: &Position, heading: f64) -> Option<f64> {
        self.distance_to(player)
            .map(|info| wrap_angle(info.bearing - heading))
    }

    /// Arrival check against the configured threshold
    pub fn check_arrival(&mut self, player: &Position) -> bool {
        self.check_arrival_within(player, self.config.arrival_threshold)
    }

    /// Clear the waypoint and report true once the player is strictly
    /// within `threshold`. Always false while no waypoint is active.
    pub fn check_arrival_within(&mut self, player: &Position, threshold: f64) -> bool {
        let Some(info) = self.distance_to(player) else {
            return false;
        };
        if info.distance >= threshold {
            return false;
        }
        if let Some(waypoint) = self.active.take() {
            info!("Arrived at: {}", waypoint.landmark.name);
        }
        true
    }
}

//! Core types for the corridor simulation
//!
//! These are standalone types that don't depend on Bevy.

use std::f64::consts::PI;

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimId(pub usize);

/// A wrapper type for traffic agent IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrafficAgentId(pub SimId);

impl TrafficAgentId {
    pub const MIN: TrafficAgentId = TrafficAgentId(SimId(usize::MIN));
    pub const MAX: TrafficAgentId = TrafficAgentId(SimId(usize::MAX));
}

/// A wrapper type for pedestrian agent IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PedestrianId(pub SimId);

/// Index of a lane in the world's lane table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LaneId(pub usize);

/// Index of a sidewalk path in the world's path table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SidewalkPathId(pub usize);

/// A position on the ground plane (X lateral, Z along the corridor)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, z: 0.0 };

    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Bearing from this position to another, measured like a heading:
    /// 0 faces +Z and positive angles turn toward +X.
    pub fn bearing_to(&self, other: &Position) -> f64 {
        (other.x - self.x).atan2(other.z - self.z)
    }

    /// Move `distance` units along `heading`
    pub fn advanced(&self, heading: f64, distance: f64) -> Position {
        Position {
            x: self.x + heading.sin() * distance,
            z: self.z + heading.cos() * distance,
        }
    }
}

/// Direction of travel along the corridor's Z axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelDirection {
    /// Toward increasing Z
    North,
    /// Toward decreasing Z
    South,
}

impl TravelDirection {
    /// +1.0 for northbound, -1.0 for southbound
    pub fn sign(self) -> f64 {
        match self {
            TravelDirection::North => 1.0,
            TravelDirection::South => -1.0,
        }
    }

    /// Heading an agent travelling this way faces
    pub fn heading(self) -> f64 {
        match self {
            TravelDirection::North => 0.0,
            TravelDirection::South => PI,
        }
    }

    /// Signed distance from `from` to `to` measured in this direction of travel
    pub fn signed_gap(self, from: f64, to: f64) -> f64 {
        (to - from) * self.sign()
    }
}

/// A traffic lane: fixed lateral offset plus direction of travel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lane {
    pub id: LaneId,
    pub center_x: f64,
    pub direction: TravelDirection,
}

/// A sidewalk path pedestrians walk along
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidewalkPath {
    pub id: SidewalkPathId,
    pub x: f64,
    pub direction: TravelDirection,
}

/// A circular collision obstacle on the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub z: f64,
    pub radius: f64,
}

impl Obstacle {
    pub fn new(x: f64, z: f64, radius: f64) -> Self {
        debug_assert!(radius > 0.0, "obstacle radius must be positive");
        Self { x, z, radius }
    }

    pub fn center(&self) -> Position {
        Position::new(self.x, self.z)
    }

    /// Whether a circle of `radius` centred at `position` overlaps this obstacle
    pub fn overlaps(&self, position: &Position, radius: f64) -> bool {
        self.center().distance(position) < radius + self.radius
    }
}

/// Category of a landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkKind {
    Walmart,
    Starbucks,
    Shopping,
    Gas,
    FastFood,
}

impl LandmarkKind {
    /// Single character used on the ASCII map
    pub fn glyph(self) -> char {
        match self {
            LandmarkKind::Walmart => 'W',
            LandmarkKind::Starbucks => 'S',
            LandmarkKind::Shopping => 'M',
            LandmarkKind::Gas => 'G',
            LandmarkKind::FastFood => 'F',
        }
    }
}

/// A named destination in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    pub name: String,
    pub kind: LandmarkKind,
    pub position: Position,
    /// Collision radius of the landmark's building, 0 if it has none
    pub footprint_radius: f64,
}

/// A cross street meeting the corridor
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub name: String,
    pub position: Position,
}

/// Wrap an angle into (-PI, PI]
pub fn wrap_angle(angle: f64) -> f64 {
    let mut wrapped = angle % (2.0 * PI);
    if wrapped <= -PI {
        wrapped += 2.0 * PI;
    } else if wrapped > PI {
        wrapped -= 2.0 * PI;
    }
    wrapped
}

/// Length of the drivable corridor along Z
pub const CORRIDOR_LENGTH: f64 = 1500.0;

/// Width of the main road (4 lanes plus a centre turn lane)
pub const ROAD_WIDTH: f64 = 35.0;

/// Width of each sidewalk strip
pub const SIDEWALK_WIDTH: f64 = 3.0;

//! World layout generator for the corridor
//!
//! Builds the static tables the rest of the simulation reads: collision
//! obstacles, landmarks, lanes, sidewalk paths and intersections, plus the
//! plain-data ground surfaces, building footprints and props a presentation
//! layer turns into geometry. Only prop placement is random.

use log::info;

use super::config::SimConfig;
use super::random::SimRng;
use super::types::{
    Intersection, Landmark, LandmarkKind, Lane, LaneId, Obstacle, Position, SidewalkPath,
    SidewalkPathId, CORRIDOR_LENGTH, ROAD_WIDTH, SIDEWALK_WIDTH,
};

/// Kind of flat ground surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Road,
    CrossStreet,
    Sidewalk,
    ParkingLot,
}

/// A flat rectangle on the ground (width along X, length along Z)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub center: Position,
    pub width: f64,
    pub length: f64,
}

/// Visual style of a building box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingStyle {
    Walmart,
    Starbucks,
    Generic,
    Target,
    BestBuy,
    Kohls,
    Canopy,
    McDonalds,
    Wendys,
    ChickFilA,
}

/// An axis-aligned building box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Building {
    pub style: BuildingStyle,
    pub center: Position,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    /// Height of the box's underside above the ground
    pub elevation: f64,
}

/// Kind of decorative prop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    StreetLight,
    PowerPole,
    Tree,
    TrafficLight,
}

/// A decorative prop; props never collide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prop {
    pub kind: PropKind,
    pub position: Position,
}

const STREET_LIGHT_SPACING: f64 = 40.0;
const POWER_POLE_SPACING: f64 = 60.0;
const TREE_SPACING: f64 = 25.0;
const TREE_KEEP_PROBABILITY: f64 = 0.7;

/// The generated corridor
#[derive(Debug, Clone)]
pub struct WorldLayout {
    pub obstacles: Vec<Obstacle>,
    pub landmarks: Vec<Landmark>,
    pub lanes: Vec<Lane>,
    pub sidewalk_paths: Vec<SidewalkPath>,
    pub intersections: Vec<Intersection>,
    pub surfaces: Vec<Surface>,
    pub buildings: Vec<Building>,
    pub props: Vec<Prop>,
}

impl WorldLayout {
    /// Build the stock corridor with default lanes and unseeded prop placement
    pub fn build() -> Self {
        Self::build_with(&SimConfig::default(), &mut SimRng::new())
    }

    /// Build the corridor using the lane and sidewalk tables from `config`
    pub fn build_with(config: &SimConfig, rng: &mut SimRng) -> Self {
        let mut layout = WorldLayout {
            obstacles: Vec::new(),
            landmarks: Vec::new(),
            lanes: config
                .traffic
                .lanes
                .iter()
                .enumerate()
                .map(|(index, lane)| Lane {
                    id: LaneId(index),
                    center_x: lane.center_x,
                    direction: lane.direction,
                })
                .collect(),
            sidewalk_paths: config
                .pedestrians
                .paths
                .iter()
                .enumerate()
                .map(|(index, path)| SidewalkPath {
                    id: SidewalkPathId(index),
                    x: path.x,
                    direction: path.direction,
                })
                .collect(),
            intersections: Vec::new(),
            surfaces: Vec::new(),
            buildings: Vec::new(),
            props: Vec::new(),
        };

        layout.add_main_road();

        // Landmarks, south to north along the corridor
        layout.add_walmart_complex(0.0, 1200.0);
        layout.add_starbucks_plaza(0.0, 800.0);
        layout.add_shopping_center(-150.0, 400.0);
        layout.add_gas_station(120.0, 600.0);
        layout.add_fast_food_row(-100.0, 200.0);

        layout.add_intersection("Kiln Creek Pkwy", 0.0, 50.0);
        layout.add_intersection("Warwick Blvd", 0.0, 400.0);
        layout.add_intersection("City Center Blvd", 0.0, 800.0);
        layout.add_intersection("Walmart Way", 0.0, 1200.0);

        layout.add_street_infrastructure();
        layout.add_vegetation(rng);

        info!(
            "Corridor built: {} landmarks, {} obstacles, {} lanes, {} props",
            layout.landmarks.len(),
            layout.obstacles.len(),
            layout.lanes.len(),
            layout.props.len()
        );

        layout
    }

    /// Lane with the given id
    pub fn lane(&self, id: LaneId) -> Option<&Lane> {
        self.lanes.get(id.0)
    }

    /// Sidewalk path with the given id
    pub fn sidewalk_path(&self, id: SidewalkPathId) -> Option<&SidewalkPath> {
        self.sidewalk_paths.get(id.0)
    }

    /// Street segment name displayed for a corridor position
    pub fn street_name_at(z: f64) -> &'static str {
        if z < 200.0 {
            "Jefferson Ave (Kiln Creek)"
        } else if z < 600.0 {
            "Jefferson Ave"
        } else if z < 900.0 {
            "Jefferson Ave (City Center)"
        } else if z < 1400.0 {
            "Jefferson Ave (Walmart Area)"
        } else {
            "Jefferson Ave"
        }
    }

    /// Whether a circle at `position` overlaps any obstacle
    pub fn is_blocked(&self, position: &Position, radius: f64) -> bool {
        self.obstacles.iter().any(|o| o.overlaps(position, radius))
    }

    fn add_main_road(&mut self) {
        let center_z = CORRIDOR_LENGTH / 2.0;
        self.surfaces.push(Surface {
            kind: SurfaceKind::Road,
            center: Position::new(0.0, center_z),
            width: ROAD_WIDTH,
            length: CORRIDOR_LENGTH,
        });

        let sidewalk_x = ROAD_WIDTH / 2.0 + SIDEWALK_WIDTH / 2.0;
        for x in [-sidewalk_x, sidewalk_x] {
            self.surfaces.push(Surface {
                kind: SurfaceKind::Sidewalk,
                center: Position::new(x, center_z),
                width: SIDEWALK_WIDTH,
                length: CORRIDOR_LENGTH,
            });
            // A single marker circle per sidewalk, not a continuous kerb
            self.obstacles
                .push(Obstacle::new(x, center_z, SIDEWALK_WIDTH));
        }
    }

    fn add_parking_lot(&mut self, x: f64, z: f64, width: f64, depth: f64) {
        self.surfaces.push(Surface {
            kind: SurfaceKind::ParkingLot,
            center: Position::new(x, z),
            width,
            length: depth,
        });
    }

    fn add_building(
        &mut self,
        style: BuildingStyle,
        x: f64,
        z: f64,
        (width, height, depth): (f64, f64, f64),
    ) {
        self.buildings.push(Building {
            style,
            center: Position::new(x, z),
            width,
            height,
            depth,
            elevation: 0.0,
        });
    }

    fn add_landmark(&mut self, name: &str, kind: LandmarkKind, x: f64, z: f64, footprint: f64) {
        self.landmarks.push(Landmark {
            name: name.to_string(),
            kind,
            position: Position::new(x, z),
            footprint_radius: footprint,
        });
    }

    fn add_walmart_complex(&mut self, x: f64, z: f64) {
        let (width, height, depth) = (80.0, 12.0, 60.0);
        self.add_building(BuildingStyle::Walmart, x + 60.0, z, (width, height, depth));
        // Garden centre annex
        self.add_building(BuildingStyle::Walmart, x + 110.0, z, (20.0, 8.0, 30.0));
        self.add_parking_lot(x + 60.0, z + 40.0, 120.0, 80.0);

        let footprint = 50.0;
        self.obstacles.push(Obstacle::new(x + 60.0, z, footprint));
        self.add_landmark("Walmart Supercenter", LandmarkKind::Walmart, x + 60.0, z, footprint);
    }

    fn add_starbucks_plaza(&mut self, x: f64, z: f64) {
        let (width, height, depth) = (60.0, 8.0, 25.0);
        self.add_building(BuildingStyle::Generic, x - 50.0, z, (width, height, depth));
        // Corner unit
        self.add_building(
            BuildingStyle::Starbucks,
            x - 50.0 - width / 2.0 + 6.0,
            z,
            (12.0, height + 1.0, depth),
        );
        self.add_parking_lot(x - 50.0, z + 35.0, 70.0, 40.0);

        let footprint = 35.0;
        self.obstacles.push(Obstacle::new(x - 50.0, z, footprint));
        self.add_landmark("Starbucks Coffee", LandmarkKind::Starbucks, x - 50.0, z, footprint);
    }

    fn add_shopping_center(&mut self, x: f64, z: f64) {
        let (width, height, depth) = (50.0, 9.0, 20.0);
        self.add_building(BuildingStyle::Generic, x, z, (width, height, depth));
        for (style, offset) in [
            (BuildingStyle::Target, -15.0),
            (BuildingStyle::BestBuy, 0.0),
            (BuildingStyle::Kohls, 15.0),
        ] {
            self.add_building(style, x + offset, z, (12.0, height, depth + 0.5));
        }
        self.add_parking_lot(x, z + 30.0, 70.0, 35.0);

        let footprint = 30.0;
        self.obstacles.push(Obstacle::new(x, z, footprint));
        self.add_landmark("City Center Shops", LandmarkKind::Shopping, x, z, footprint);
    }

    fn add_gas_station(&mut self, x: f64, z: f64) {
        self.buildings.push(Building {
            style: BuildingStyle::Canopy,
            center: Position::new(x, z),
            width: 20.0,
            height: 0.5,
            depth: 15.0,
            elevation: 4.75,
        });
        self.add_building(BuildingStyle::Generic, x + 15.0, z, (12.0, 6.0, 10.0));

        let footprint = 15.0;
        self.obstacles.push(Obstacle::new(x, z, footprint));
        self.add_landmark("Gas Station", LandmarkKind::Gas, x, z, footprint);
    }

    fn add_fast_food_row(&mut self, x: f64, z: f64) {
        let footprint = 12.0;
        for (style, offset) in [
            (BuildingStyle::McDonalds, -30.0),
            (BuildingStyle::Wendys, 0.0),
            (BuildingStyle::ChickFilA, 30.0),
        ] {
            self.add_building(style, x + offset, z, (15.0, 7.0, 12.0));
            self.add_parking_lot(x + offset, z + 20.0, 25.0, 20.0);
            self.obstacles.push(Obstacle::new(x + offset, z, footprint));
        }
        self.add_landmark("Fast Food Row", LandmarkKind::FastFood, x, z, footprint);
    }

    fn add_intersection(&mut self, name: &str, x: f64, z: f64) {
        for offset in [-15.0, 15.0] {
            self.props.push(Prop {
                kind: PropKind::TrafficLight,
                position: Position::new(x + offset, z),
            });
        }
        self.surfaces.push(Surface {
            kind: SurfaceKind::CrossStreet,
            center: Position::new(x, z),
            width: 80.0,
            length: 25.0,
        });
        self.intersections.push(Intersection {
            name: name.to_string(),
            position: Position::new(x, z),
        });
    }

    fn add_street_infrastructure(&mut self) {
        let mut z = 0.0;
        while z < CORRIDOR_LENGTH {
            for x in [-20.0, 20.0] {
                self.props.push(Prop {
                    kind: PropKind::StreetLight,
                    position: Position::new(x, z),
                });
            }
            z += STREET_LIGHT_SPACING;
        }

        let mut z = 0.0;
        while z < CORRIDOR_LENGTH {
            self.props.push(Prop {
                kind: PropKind::PowerPole,
                position: Position::new(25.0, z),
            });
            z += POWER_POLE_SPACING;
        }
    }

    fn add_vegetation(&mut self, rng: &mut SimRng) {
        let mut z = 0.0;
        while z < CORRIDOR_LENGTH {
            if rng.unit() < TREE_KEEP_PROBABILITY {
                for x in [-25.0, 30.0] {
                    self.props.push(Prop {
                        kind: PropKind::Tree,
                        position: Position::new(x, z),
                    });
                }
            }
            z += TREE_SPACING;
        }
    }
}

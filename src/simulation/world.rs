//! Main simulation world that ties everything together
//!
//! This is the entry point for running the corridor simulation without any
//! Bevy dependencies. `SimWorld::tick` is the frame scheduler: every
//! component is updated once per call in a fixed order.

use anyhow::{Context, Result};
use log::debug;

use super::config::SimConfig;
use super::dashboard::Dashboard;
use super::layout::{SurfaceKind, WorldLayout};
use super::minimap::MinimapProjector;
use super::navigation::NavigationTracker;
use super::pedestrian::PedestrianSimulation;
use super::random::SimRng;
use super::stats::DriveStats;
use super::traffic::TrafficSimulation;
use super::types::{Position, TrafficAgentId, TravelDirection};
use super::vehicle::{DriveInput, DriveMode, VehicleModel};

/// Events produced by one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// The vehicle's move was rejected by a static obstacle
    pub blocked: bool,
    /// Traffic agent the vehicle ran into, if any
    pub traffic_hit: Option<TrafficAgentId>,
    /// Name of the landmark reached this tick
    pub arrived_at: Option<String>,
}

/// The main simulation world
pub struct SimWorld {
    /// Static corridor geometry
    pub layout: WorldLayout,

    /// The player's vehicle
    pub vehicle: VehicleModel,

    pub traffic: TrafficSimulation,

    pub pedestrians: PedestrianSimulation,

    pub navigation: NavigationTracker,

    /// Stats for the current drive session
    pub stats: DriveStats,

    /// Simulation time
    pub time: f64,

    config: SimConfig,

    minimap: MinimapProjector,

    /// Key state from the latest tick, for the dashboard
    last_input: DriveInput,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimWorld {
    /// Create the stock corridor with unseeded randomness
    pub fn new() -> Self {
        Self::build(SimConfig::default(), SimRng::new())
    }

    /// Create the stock corridor with a seeded RNG for reproducible simulations
    pub fn with_seed(seed: u64) -> Self {
        Self::build(SimConfig::default(), SimRng::with_seed(seed))
    }

    /// Create a world from a custom configuration
    pub fn with_config(config: SimConfig, seed: Option<u64>) -> Result<Self> {
        config
            .validate()
            .context("invalid simulation configuration")?;
        let rng = match seed {
            Some(seed) => SimRng::with_seed(seed),
            None => SimRng::new(),
        };
        Ok(Self::build(config, rng))
    }

    fn build(config: SimConfig, mut rng: SimRng) -> Self {
        let layout = WorldLayout::build_with(&config, &mut rng.fork());
        let traffic =
            TrafficSimulation::new(config.traffic.clone(), layout.lanes.clone(), rng.fork());
        let pedestrians = PedestrianSimulation::new(
            config.pedestrians.clone(),
            layout.sidewalk_paths.clone(),
            rng.fork(),
        );
        let navigation =
            NavigationTracker::new(layout.landmarks.clone(), config.navigation.clone());

        Self {
            vehicle: VehicleModel::new(config.drive.clone()),
            layout,
            traffic,
            pedestrians,
            navigation,
            stats: DriveStats::new(),
            time: 0.0,
            config,
            minimap: MinimapProjector::default(),
            last_input: DriveInput::default(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn mode(&self) -> DriveMode {
        self.vehicle.mode()
    }

    /// Switch modes. Always legal; starting a drive also starts a fresh
    /// stats session.
    pub fn set_mode(&mut self, mode: DriveMode) {
        self.vehicle.set_mode(mode);
        if mode == DriveMode::Drive {
            self.stats = DriveStats::new();
        }
        self.last_input = DriveInput::default();
    }

    pub fn toggle_mode(&mut self) -> DriveMode {
        let next = match self.mode() {
            DriveMode::Showroom => DriveMode::Drive,
            DriveMode::Drive => DriveMode::Showroom,
        };
        self.set_mode(next);
        next
    }

    pub fn set_destination(&mut self, name: &str) -> bool {
        self.navigation.set_destination(name)
    }

    pub fn clear_destination(&mut self) {
        self.navigation.clear_waypoint();
    }

    /// Distance at which the active waypoint counts as reached.
    ///
    /// Measured from the landmark's centre, so the building's footprint and
    /// the vehicle's own radius are added to the configured threshold.
    pub fn arrival_distance(&self) -> Option<f64> {
        self.navigation.active_waypoint().map(|waypoint| {
            self.navigation.arrival_threshold()
                + waypoint.landmark.footprint_radius
                + self.config.drive.vehicle_radius
        })
    }

    /// Advance the world by `delta_secs`, which the caller has already
    /// clamped to a sane maximum.
    ///
    /// Arrival is checked against [`SimWorld::arrival_distance`], not the bare
    /// navigation threshold: a waypoint counts as reached once the vehicle is
    /// within the threshold of the building's edge (73 units from Walmart's
    /// centre with the default configuration).
    pub fn tick(&mut self, delta_secs: f64, input: DriveInput) -> TickReport {
        let mut report = TickReport::default();
        self.time += delta_secs;
        self.last_input = input;

        // Agents see where the player was at the end of the previous frame
        let previous = self.vehicle.state();
        self.traffic.update(delta_secs);
        self.pedestrians.update(delta_secs, &previous.position);

        let outcome = self
            .vehicle
            .step(delta_secs, input.into(), &self.layout.obstacles);
        report.blocked = outcome.blocked;

        self.navigation.advance(delta_secs);

        if self.vehicle.mode() != DriveMode::Drive {
            return report;
        }

        let state = self.vehicle.state();
        if let Some(agent) = self
            .traffic
            .check_collision(&state.position, self.config.drive.vehicle_radius)
        {
            debug!("Vehicle hit traffic agent {:?}", agent.id);
            report.traffic_hit = Some(agent.id);
            self.vehicle.damp_speed(self.config.drive.traffic_hit_damping);
            self.stats.record_traffic_hit();
        }

        if let Some(threshold) = self.arrival_distance() {
            let name = self
                .navigation
                .active_waypoint()
                .map(|waypoint| waypoint.landmark.name.clone());
            if self.navigation.check_arrival_within(&state.position, threshold) {
                report.arrived_at = name;
                self.stats.record_arrival();
            }
        }

        if outcome.blocked {
            self.stats.record_bump();
        }
        let state = self.vehicle.state();
        self.stats.record_step(
            delta_secs,
            previous.position.distance(&state.position),
            state.speed,
        );

        report
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::read(
            &self.vehicle.state(),
            &self.last_input,
            self.config.drive.max_speed,
        )
    }

    pub fn minimap(&self) -> &MinimapProjector {
        &self.minimap
    }

    /// Print a summary of the current state
    pub fn print_summary(&self) {
        let state = self.vehicle.state();
        println!("=== Corridor Simulation Summary ===");
        println!("Time: {:.2}s, Mode: {:?}", self.time, self.mode());
        println!(
            "Vehicle: pos=({:.1}, {:.1}), heading={:.1}°, speed={:.2}",
            state.position.x,
            state.position.z,
            state.heading.to_degrees(),
            state.speed
        );
        println!("Dashboard: {}", self.dashboard());
        println!(
            "Traffic: {} vehicles (spawned {}, despawned {})",
            self.traffic.len(),
            self.traffic.spawned_total(),
            self.traffic.despawned_total()
        );
        println!("Pedestrians: {}", self.pedestrians.len());

        match (
            self.navigation.active_waypoint(),
            self.navigation.distance_to(&state.position),
        ) {
            (Some(waypoint), Some(info)) => println!(
                "Waypoint: {} - {:.2} mi, bearing {:.0}°",
                waypoint.landmark.name,
                info.distance_miles,
                info.bearing.to_degrees()
            ),
            _ => println!("Waypoint: none"),
        }

        if self.mode() == DriveMode::Drive {
            let stats = &self.stats;
            println!("--- Session ---");
            println!(
                "  distance={:.1}, avg speed={:.2}, peak speed={:.2}",
                stats.distance,
                stats.average_speed(),
                stats.peak_speed
            );
            println!(
                "  bumps={}, traffic hits={}, arrivals={}",
                stats.obstacle_bumps, stats.traffic_hits, stats.arrivals
            );
        }
    }

    /// Print the ASCII minimap
    pub fn draw_map(&self) {
        println!("{}", self.render_map());
    }

    /// Render a player-centred ASCII map.
    ///
    /// North is up. `.` road, `#` obstacle, landmark letters, `^`/`v`
    /// traffic by direction, `*` pedestrian, `+` waypoint, `@` player.
    pub fn render_map(&self) -> String {
        const COLS: usize = 50;
        const ROWS: usize = 25;

        let center = self.vehicle.state().position;
        let projector = &self.minimap;
        let cell_w = projector.size / COLS as f64;
        let cell_h = projector.size / ROWS as f64;
        let half = projector.size / 2.0;

        // World position at the middle of a cell
        let cell_center = |row: usize, col: usize| -> Position {
            let map_x = (col as f64 + 0.5) * cell_w;
            let map_y = (ROWS - 1 - row) as f64 * cell_h + cell_h / 2.0;
            Position::new(
                center.x + (map_x - half) * projector.scale,
                center.z + (map_y - half) * projector.scale,
            )
        };

        let to_cell = |world: &Position| -> Option<(usize, usize)> {
            let (x, y) = projector.world_to_minimap(world, &center);
            if !projector.is_visible(x, y, 0.0, 0.0) {
                return None;
            }
            let col = ((x / cell_w) as usize).min(COLS - 1);
            let row = ROWS - 1 - ((y / cell_h) as usize).min(ROWS - 1);
            Some((row, col))
        };

        let roads: Vec<_> = self
            .layout
            .surfaces
            .iter()
            .filter(|surface| surface.kind == SurfaceKind::Road)
            .collect();

        let mut grid = vec![vec![' '; COLS]; ROWS];
        for (row, line) in grid.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                let world = cell_center(row, col);
                if self.layout.is_blocked(&world, 0.0) {
                    *cell = '#';
                } else if roads.iter().any(|road| {
                    (world.x - road.center.x).abs() <= road.width / 2.0
                        && (world.z - road.center.z).abs() <= road.length / 2.0
                }) {
                    *cell = '.';
                }
            }
        }

        let mut plot = |world: &Position, glyph: char| {
            if let Some((row, col)) = to_cell(world) {
                grid[row][col] = glyph;
            }
        };

        for landmark in &self.layout.landmarks {
            plot(&landmark.position, landmark.kind.glyph());
        }
        for walker in self.pedestrians.agents() {
            plot(&walker.position(), '*');
        }
        for agent in self.traffic.agents() {
            let glyph = match agent.direction() {
                TravelDirection::North => '^',
                TravelDirection::South => 'v',
            };
            plot(&agent.position(), glyph);
        }
        if let Some(waypoint) = self.navigation.active_waypoint() {
            plot(&waypoint.landmark.position, '+');
        }
        plot(&center, '@');

        let border = format!("+{}+", "-".repeat(COLS));
        let mut out = String::with_capacity((COLS + 3) * (ROWS + 2));
        out.push_str(&border);
        out.push('\n');
        for line in grid {
            out.push('|');
            out.extend(line);
            out.push_str("|\n");
        }
        out.push_str(&border);
        out
    }
}

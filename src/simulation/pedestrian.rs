//! Pedestrians walking the sidewalks
//!
//! Walkers never interact with each other or with vehicles. The corridor
//! is seeded with a crowd at start-up, after which new walkers appear near
//! the player and are culled once they drift out of view.

use log::debug;
use std::collections::HashMap;

use super::config::PedestrianConfig;
use super::random::SimRng;
use super::types::{PedestrianId, Position, SidewalkPath, SimId, CORRIDOR_LENGTH};

/// Limb angles and body bob for one frame of the walk cycle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GaitPose {
    /// Left leg pitch; the right leg mirrors it
    pub leg_swing: f64,
    /// Right arm pitch; the left arm mirrors it
    pub arm_swing: f64,
    /// Vertical body offset
    pub bob: f64,
}

impl GaitPose {
    pub fn at_phase(phase: f64) -> Self {
        Self {
            leg_swing: phase.sin() * 0.4,
            arm_swing: phase.sin() * 0.3,
            bob: (phase * 2.0).sin().abs() * 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PedestrianAgent {
    pub id: PedestrianId,
    pub path: SidewalkPath,
    pub position_z: f64,
    /// Walking speed, fixed at spawn
    pub speed: f64,
    /// Walk-cycle phase in radians
    pub walk_phase: f64,
}

impl PedestrianAgent {
    pub fn position(&self) -> Position {
        Position::new(self.path.x, self.position_z)
    }

    pub fn heading(&self) -> f64 {
        self.path.direction.heading()
    }

    pub fn gait(&self) -> GaitPose {
        GaitPose::at_phase(self.walk_phase)
    }
}

/// Owns every pedestrian
#[derive(Debug, Clone)]
pub struct PedestrianSimulation {
    config: PedestrianConfig,
    paths: Vec<SidewalkPath>,
    agents: HashMap<PedestrianId, PedestrianAgent>,
    next_id: usize,
    since_spawn: f64,
    rng: SimRng,
}

impl PedestrianSimulation {
    /// Create the simulation and seed the corridor with its initial crowd
    pub fn new(config: PedestrianConfig, paths: Vec<SidewalkPath>, rng: SimRng) -> Self {
        let since_spawn = config.spawn_interval;
        let mut sim = Self {
            config,
            paths,
            agents: HashMap::new(),
            next_id: 0,
            since_spawn,
            rng,
        };
        sim.spawn_initial();
        sim
    }

    pub fn config(&self) -> &PedestrianConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: PedestrianId) -> Option<&PedestrianAgent> {
        self.agents.get(&id)
    }

    /// All walkers, ordered by id
    pub fn agents(&self) -> Vec<&PedestrianAgent> {
        let mut agents: Vec<&PedestrianAgent> = self.agents.values().collect();
        agents.sort_by_key(|agent| agent.id);
        agents
    }

    /// Spread walkers over equal corridor segments, clustered around each
    /// segment's centre
    fn spawn_initial(&mut self) {
        let segments = self.config.initial_segments;
        if segments == 0 {
            return;
        }
        let segment_length = CORRIDOR_LENGTH / segments as f64;

        for segment in 0..segments {
            let center = segment as f64 * segment_length + segment_length / 2.0;
            let count = self
                .rng
                .random_count(self.config.min_per_segment..=self.config.max_per_segment);
            for _ in 0..count {
                let offset = (self.rng.unit() - 0.5) * segment_length * 0.8;
                self.spawn_at(center + offset);
            }
        }
        debug!("Seeded {} pedestrians", self.agents.len());
    }

    /// Spawn a walker at `position_z` on a random sidewalk path.
    /// Returns `None` once the population cap is reached.
    pub fn spawn_at(&mut self, position_z: f64) -> Option<PedestrianId> {
        if self.agents.len() >= self.config.max_pedestrians {
            return None;
        }
        let path = *self.rng.choose(&self.paths)?;

        let id = PedestrianId(SimId(self.next_id));
        self.next_id += 1;
        let speed = self
            .rng
            .random_range(self.config.min_speed..self.config.max_speed);
        let walk_phase = self.rng.random_range(0.0..std::f64::consts::TAU);

        self.agents.insert(
            id,
            PedestrianAgent {
                id,
                path,
                position_z,
                speed,
                walk_phase,
            },
        );
        Some(id)
    }

    fn should_cull(&self, agent: &PedestrianAgent, player_z: f64) -> bool {
        let out_of_bounds =
            agent.position_z < self.config.min_z || agent.position_z > self.config.max_z;
        out_of_bounds || (agent.position_z - player_z).abs() > self.config.cull_distance
    }

    /// Walk everyone forward, cull, then maybe spawn near the player.
    ///
    /// `player` is the player position from the previous frame.
    pub fn update(&mut self, delta_secs: f64, player: &Position) {
        let gait_rate = self.config.gait_rate;
        for agent in self.agents.values_mut() {
            agent.position_z += agent.path.direction.sign() * agent.speed * delta_secs;
            agent.walk_phase += agent.speed * delta_secs * gait_rate;
        }

        let culled: Vec<PedestrianId> = self
            .agents
            .values()
            .filter(|agent| self.should_cull(agent, player.z))
            .map(|agent| agent.id)
            .collect();
        for id in culled {
            self.agents.remove(&id);
            debug!("Pedestrian culled | Total: {}", self.agents.len());
        }

        self.since_spawn += delta_secs;
        if self.since_spawn >= self.config.spawn_interval {
            self.spawn_near(player.z);
            self.since_spawn = 0.0;
        }
    }

    /// Spawn ahead of or behind the player, skipping points off the corridor
    fn spawn_near(&mut self, player_z: f64) -> Option<PedestrianId> {
        let near = self.config.spawn_window_near;
        let depth = self.config.spawn_window_depth;
        let ahead = player_z + near + self.rng.random_range(0.0..depth);
        let behind = player_z - near - self.rng.random_range(0.0..depth);

        if self.rng.unit() > 0.5 && ahead < CORRIDOR_LENGTH {
            self.spawn_at(ahead)
        } else if behind > 0.0 {
            self.spawn_at(behind)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.agents.clear();
    }
}

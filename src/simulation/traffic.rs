//! Autonomous traffic for the corridor
//!
//! Vehicles are bound to one lane for their whole life. They spawn past
//! one end of the corridor, follow the vehicle ahead with a simple
//! slow-down rule and are removed once they leave the far end.

use log::debug;
use ordered_float::OrderedFloat;
use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;

use super::config::TrafficConfig;
use super::random::SimRng;
use super::types::{Lane, LaneId, Position, SimId, TrafficAgentId, TravelDirection};

/// A traffic vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficAgent {
    pub id: TrafficAgentId,
    pub lane: Lane,
    /// Position along the corridor
    pub position_z: f64,
    pub speed: f64,
    pub target_speed: f64,
    /// Gap below which this vehicle slows for its leader
    pub braking_distance: f64,
}

impl TrafficAgent {
    pub fn position(&self) -> Position {
        Position::new(self.lane.center_x, self.position_z)
    }

    pub fn heading(&self) -> f64 {
        self.lane.direction.heading()
    }

    pub fn direction(&self) -> TravelDirection {
        self.lane.direction
    }
}

/// Occupancy key: position first, id second so ties order by id
type LaneKey = (OrderedFloat<f64>, TrafficAgentId);

/// Owns every traffic agent
#[derive(Debug, Clone)]
pub struct TrafficSimulation {
    config: TrafficConfig,
    lanes: Vec<Lane>,
    agents: HashMap<TrafficAgentId, TrafficAgent>,
    /// Agents per lane ordered along Z
    occupancy: HashMap<LaneId, BTreeSet<LaneKey>>,
    next_id: usize,
    /// Seconds since the last spawn attempt
    since_spawn: f64,
    rng: SimRng,
    spawned_total: usize,
    despawned_total: usize,
}

impl TrafficSimulation {
    pub fn new(config: TrafficConfig, lanes: Vec<Lane>, rng: SimRng) -> Self {
        let since_spawn = config.spawn_interval;
        Self {
            config,
            lanes,
            agents: HashMap::new(),
            occupancy: HashMap::new(),
            next_id: 0,
            since_spawn,
            rng,
            spawned_total: 0,
            despawned_total: 0,
        }
    }

    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: TrafficAgentId) -> Option<&TrafficAgent> {
        self.agents.get(&id)
    }

    /// All agents, ordered by id
    pub fn agents(&self) -> Vec<&TrafficAgent> {
        let mut agents: Vec<&TrafficAgent> = self.agents.values().collect();
        agents.sort_by_key(|agent| agent.id);
        agents
    }

    pub fn spawned_total(&self) -> usize {
        self.spawned_total
    }

    pub fn despawned_total(&self) -> usize {
        self.despawned_total
    }

    fn next_agent_id(&mut self) -> TrafficAgentId {
        let id = TrafficAgentId(SimId(self.next_id));
        self.next_id += 1;
        id
    }

    fn random_speed(&mut self) -> f64 {
        self.rng
            .random_range(self.config.min_speed..self.config.max_speed)
    }

    /// Spawn point for a lane: behind the corridor start for northbound
    /// lanes, beyond its end for southbound ones
    pub fn spawn_point(&self, lane: &Lane) -> f64 {
        match lane.direction {
            TravelDirection::North => self.config.north_spawn_z,
            TravelDirection::South => self.config.south_spawn_z,
        }
    }

    /// Try to spawn in a uniformly random lane.
    /// No-op if the population cap is reached or the spawn point is occupied.
    pub fn spawn(&mut self) -> Option<TrafficAgentId> {
        if self.agents.len() >= self.config.max_vehicles {
            return None;
        }
        let lane = *self.rng.choose(&self.lanes)?;
        self.spawn_in_lane(lane.id)
    }

    /// Try to spawn at the spawn point of a given lane
    pub fn spawn_in_lane(&mut self, lane_id: LaneId) -> Option<TrafficAgentId> {
        let lane = *self.lanes.get(lane_id.0)?;
        let position_z = self.spawn_point(&lane);
        self.try_spawn_at(lane_id, position_z)
    }

    /// Whether no agent in the lane is within the spawn clearance of `position_z`
    pub fn is_spawn_clear(&self, lane_id: LaneId, position_z: f64) -> bool {
        let clearance = self.config.spawn_clearance;
        if clearance <= 0.0 {
            return true;
        }
        match self.occupancy.get(&lane_id) {
            Some(keys) => keys
                .range((
                    Bound::Excluded((OrderedFloat(position_z - clearance), TrafficAgentId::MAX)),
                    Bound::Excluded((OrderedFloat(position_z + clearance), TrafficAgentId::MIN)),
                ))
                .next()
                .is_none(),
            None => true,
        }
    }

    /// Spawn an agent at an explicit point in a lane, subject to the
    /// population cap and the spawn clearance
    pub fn try_spawn_at(&mut self, lane_id: LaneId, position_z: f64) -> Option<TrafficAgentId> {
        if self.agents.len() >= self.config.max_vehicles {
            debug!("Traffic spawn skipped: population cap {} reached", self.config.max_vehicles);
            return None;
        }
        let lane = *self.lanes.get(lane_id.0)?;
        if !self.is_spawn_clear(lane_id, position_z) {
            debug!(
                "Traffic spawn skipped: lane x={} not clear at z={:.1}",
                lane.center_x, position_z
            );
            return None;
        }

        let id = self.next_agent_id();
        let speed = self.random_speed();
        let target_speed = self.random_speed();
        let agent = TrafficAgent {
            id,
            lane,
            position_z,
            speed,
            target_speed,
            braking_distance: self.config.braking_distance,
        };
        self.occupancy
            .entry(lane_id)
            .or_default()
            .insert((OrderedFloat(position_z), id));
        self.agents.insert(id, agent);
        self.spawned_total += 1;

        debug!(
            "Vehicle spawned in lane x={} | Total: {}",
            lane.center_x,
            self.agents.len()
        );
        Some(id)
    }

    /// Nearest same-lane agent strictly ahead in the direction of travel.
    /// Leaders at exactly the same distance resolve to the smallest id.
    pub fn find_ahead(&self, id: TrafficAgentId) -> Option<&TrafficAgent> {
        let agent = self.agents.get(&id)?;
        let keys = self.occupancy.get(&agent.lane.id)?;
        let here = OrderedFloat(agent.position_z);

        let leader = match agent.lane.direction {
            TravelDirection::North => keys
                .range((Bound::Excluded((here, TrafficAgentId::MAX)), Bound::Unbounded))
                .next()
                .map(|(_, leader)| *leader),
            TravelDirection::South => {
                let (position, _) = keys
                    .range((Bound::Unbounded, Bound::Excluded((here, TrafficAgentId::MIN))))
                    .next_back()?;
                keys.range((*position, TrafficAgentId::MIN)..=(*position, TrafficAgentId::MAX))
                    .next()
                    .map(|(_, leader)| *leader)
            }
        };

        leader.and_then(|leader| self.agents.get(&leader))
    }

    /// Advance every agent by `delta_secs`.
    ///
    /// Leader lookups all read the positions from before this update.
    pub fn update(&mut self, delta_secs: f64) {
        self.since_spawn += delta_secs;
        if self.since_spawn >= self.config.spawn_interval {
            self.spawn();
            self.since_spawn = 0.0;
        }

        let mut ids: Vec<TrafficAgentId> = self.agents.keys().copied().collect();
        ids.sort();

        // Decide target speeds against the previous tick's state
        let mut decisions = Vec::with_capacity(ids.len());
        for id in &ids {
            let Some(agent) = self.agents.get(id) else {
                continue;
            };
            let leader = self
                .find_ahead(*id)
                .map(|leader| (leader.position_z, leader.speed));
            decisions.push((*id, agent.position_z, agent.speed, agent.braking_distance, leader));
        }

        for (id, position_z, speed, braking_distance, leader) in decisions {
            let target = match leader {
                Some((leader_z, leader_speed))
                    if (leader_z - position_z).abs() < braking_distance =>
                {
                    // Never speed up to pass
                    (leader_speed * self.config.follow_factor).min(speed)
                }
                // Open road: wander inside the speed band
                _ => self.random_speed(),
            };

            let smoothing = self.config.speed_smoothing;
            if let Some(agent) = self.agents.get_mut(&id) {
                agent.target_speed = target;
                agent.speed += (agent.target_speed - agent.speed) * delta_secs * smoothing;
                agent.position_z += agent.lane.direction.sign() * agent.speed * delta_secs;
            }
        }

        self.despawn_out_of_bounds();
        self.rebuild_occupancy();
    }

    fn is_out_of_bounds(&self, agent: &TrafficAgent) -> bool {
        match agent.lane.direction {
            TravelDirection::North => agent.position_z > self.config.north_despawn_z,
            TravelDirection::South => agent.position_z < self.config.south_despawn_z,
        }
    }

    fn despawn_out_of_bounds(&mut self) {
        let exited: Vec<TrafficAgentId> = self
            .agents
            .values()
            .filter(|agent| self.is_out_of_bounds(agent))
            .map(|agent| agent.id)
            .collect();

        for id in exited {
            self.agents.remove(&id);
            self.despawned_total += 1;
            debug!("Vehicle despawned | Total: {}", self.agents.len());
        }
    }

    fn rebuild_occupancy(&mut self) {
        self.occupancy.clear();
        for agent in self.agents.values() {
            self.occupancy
                .entry(agent.lane.id)
                .or_default()
                .insert((OrderedFloat(agent.position_z), agent.id));
        }
    }

    /// First agent (by id) whose footprint overlaps a circle at `position`
    pub fn check_collision(&self, position: &Position, radius: f64) -> Option<&TrafficAgent> {
        let reach = radius + self.config.vehicle_radius;
        self.agents()
            .into_iter()
            .find(|agent| agent.position().distance(position) < reach)
    }

    /// Remove every agent
    pub fn clear(&mut self) {
        self.agents.clear();
        self.occupancy.clear();
        debug!("Traffic cleared");
    }
}

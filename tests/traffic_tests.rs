//! Traffic simulation tests

use corridor_sim::simulation::{
    Lane, LaneId, Position, SimRng, TrafficConfig, TrafficSimulation, TravelDirection,
};

fn test_lanes() -> Vec<Lane> {
    vec![
        Lane {
            id: LaneId(0),
            center_x: -10.0,
            direction: TravelDirection::North,
        },
        Lane {
            id: LaneId(1),
            center_x: -6.0,
            direction: TravelDirection::North,
        },
        Lane {
            id: LaneId(2),
            center_x: 6.0,
            direction: TravelDirection::South,
        },
    ]
}

fn traffic_with(config: TrafficConfig, seed: u64) -> TrafficSimulation {
    TrafficSimulation::new(config, test_lanes(), SimRng::with_seed(seed))
}

/// No spacing rule, so tests can place agents freely
fn packed_config() -> TrafficConfig {
    TrafficConfig {
        spawn_clearance: 0.0,
        ..Default::default()
    }
}

#[test]
fn test_spawn_rejected_inside_clearance() {
    let mut traffic = traffic_with(TrafficConfig::default(), 1);

    assert!(traffic.try_spawn_at(LaneId(0), -110.0).is_some());
    assert_eq!(traffic.len(), 1);

    // 10 units away, clearance is 30
    assert!(traffic.try_spawn_at(LaneId(0), -100.0).is_none());
    assert_eq!(traffic.len(), 1);

    // Other lanes are unaffected
    assert!(traffic.try_spawn_at(LaneId(1), -100.0).is_some());
    assert_eq!(traffic.len(), 2);

    // Exactly at the clearance is allowed
    assert!(traffic.try_spawn_at(LaneId(0), -80.0).is_some());
    assert_eq!(traffic.len(), 3);
}

#[test]
fn test_spawn_in_lane_uses_direction_spawn_point() {
    let mut traffic = traffic_with(TrafficConfig::default(), 2);
    let config = traffic.config().clone();

    let north = traffic.spawn_in_lane(LaneId(0)).expect("northbound spawn");
    let south = traffic.spawn_in_lane(LaneId(2)).expect("southbound spawn");

    assert_eq!(traffic.get(north).unwrap().position_z, config.north_spawn_z);
    assert_eq!(traffic.get(south).unwrap().position_z, config.south_spawn_z);

    // Second attempt on the same spawn point is blocked
    assert!(traffic.spawn_in_lane(LaneId(0)).is_none());
}

#[test]
fn test_spawned_speeds_within_band() {
    let mut traffic = traffic_with(packed_config(), 3);
    for i in 0..10 {
        traffic.try_spawn_at(LaneId(i % 3), i as f64 * 40.0);
    }

    let config = traffic.config();
    for agent in traffic.agents() {
        assert!(agent.speed >= config.min_speed && agent.speed < config.max_speed);
        assert!(agent.target_speed >= config.min_speed && agent.target_speed < config.max_speed);
        assert_eq!(agent.braking_distance, config.braking_distance);
    }
}

#[test]
fn test_population_never_exceeds_cap() {
    let config = TrafficConfig {
        max_vehicles: 3,
        spawn_interval: 0.01,
        ..Default::default()
    };
    let mut traffic = traffic_with(config, 4);

    for _ in 0..500 {
        traffic.spawn();
        traffic.update(0.05);
        assert!(traffic.len() <= 3, "population {} over cap", traffic.len());
    }

    let mut full = traffic_with(packed_config(), 5);
    let cap = full.config().max_vehicles;
    for i in 0..cap {
        assert!(full.try_spawn_at(LaneId(0), i as f64 * 50.0).is_some());
    }
    assert!(full.try_spawn_at(LaneId(1), 0.0).is_none());
    assert_eq!(full.len(), cap);
}

#[test]
fn test_find_ahead_picks_nearest_leader_in_lane() {
    let mut traffic = traffic_with(packed_config(), 6);
    let a = traffic.try_spawn_at(LaneId(0), 0.0).unwrap();
    let b = traffic.try_spawn_at(LaneId(0), 50.0).unwrap();
    let c = traffic.try_spawn_at(LaneId(0), 20.0).unwrap();
    let d = traffic.try_spawn_at(LaneId(1), 10.0).unwrap();

    assert_eq!(traffic.find_ahead(a).map(|agent| agent.id), Some(c));
    assert_eq!(traffic.find_ahead(c).map(|agent| agent.id), Some(b));
    assert!(traffic.find_ahead(b).is_none());
    // d's lane has nobody else
    assert!(traffic.find_ahead(d).is_none());
}

#[test]
fn test_find_ahead_southbound() {
    let mut traffic = traffic_with(packed_config(), 7);
    let s = traffic.try_spawn_at(LaneId(2), 100.0).unwrap();
    let t = traffic.try_spawn_at(LaneId(2), 60.0).unwrap();
    let u = traffic.try_spawn_at(LaneId(2), 140.0).unwrap();

    assert_eq!(traffic.find_ahead(s).map(|agent| agent.id), Some(t));
    assert_eq!(traffic.find_ahead(u).map(|agent| agent.id), Some(s));
    assert!(traffic.find_ahead(t).is_none());
}

#[test]
fn test_find_ahead_breaks_ties_by_smallest_id() {
    let mut traffic = traffic_with(packed_config(), 8);
    let a = traffic.try_spawn_at(LaneId(0), 0.0).unwrap();
    let twin = traffic.try_spawn_at(LaneId(0), 0.0).unwrap();
    let first = traffic.try_spawn_at(LaneId(0), 10.0).unwrap();
    let second = traffic.try_spawn_at(LaneId(0), 10.0).unwrap();
    assert!(first < second);

    // Zero gap never counts as ahead
    let leader = traffic.find_ahead(a).unwrap();
    assert_eq!(leader.id, first);
    assert_ne!(leader.id, twin);
    assert_eq!(traffic.find_ahead(twin).map(|agent| agent.id), Some(first));

    let mut south = traffic_with(packed_config(), 9);
    let back = south.try_spawn_at(LaneId(2), 100.0).unwrap();
    let low = south.try_spawn_at(LaneId(2), 80.0).unwrap();
    let high = south.try_spawn_at(LaneId(2), 80.0).unwrap();
    assert!(low < high);
    assert_eq!(south.find_ahead(back).map(|agent| agent.id), Some(low));
}

#[test]
fn test_find_ahead_never_returns_self_or_other_lane() {
    let mut traffic = traffic_with(packed_config(), 10);
    for i in 0..12 {
        traffic.try_spawn_at(LaneId(i % 3), (i * 7 % 11) as f64 * 13.0);
    }

    for agent in traffic.agents() {
        if let Some(leader) = traffic.find_ahead(agent.id) {
            assert_ne!(leader.id, agent.id);
            assert_eq!(leader.lane.id, agent.lane.id);
            let gap = agent
                .direction()
                .signed_gap(agent.position_z, leader.position_z);
            assert!(gap > 0.0);
        }
    }
}

#[test]
fn test_follower_never_speeds_up_to_pass() {
    let config = TrafficConfig {
        max_vehicles: 2,
        ..packed_config()
    };
    let mut traffic = traffic_with(config, 11);
    let follower = traffic.try_spawn_at(LaneId(0), 0.0).unwrap();
    let leader = traffic.try_spawn_at(LaneId(0), 10.0).unwrap();

    let follower_speed = traffic.get(follower).unwrap().speed;
    let leader_speed = traffic.get(leader).unwrap().speed;

    traffic.update(0.01);

    let after = traffic.get(follower).unwrap();
    let expected = (leader_speed * 0.8).min(follower_speed);
    assert!((after.target_speed - expected).abs() < 1e-9);
    assert!(after.target_speed <= follower_speed);
    assert!(after.speed <= follower_speed);
}

#[test]
fn test_speed_converges_smoothly() {
    let config = TrafficConfig {
        max_vehicles: 1,
        ..packed_config()
    };
    let mut traffic = traffic_with(config, 12);
    let id = traffic.try_spawn_at(LaneId(0), 0.0).unwrap();
    let (min, max) = (traffic.config().min_speed, traffic.config().max_speed);

    for _ in 0..200 {
        let before = traffic.get(id).unwrap().position_z;
        traffic.update(0.05);
        let agent = traffic.get(id).unwrap();
        assert!(agent.speed >= min && agent.speed <= max);
        assert!(agent.position_z > before, "northbound agent moved backwards");
    }
}

#[test]
fn test_agents_despawn_past_bounds() {
    let config = TrafficConfig {
        max_vehicles: 2,
        ..packed_config()
    };
    let mut traffic = traffic_with(config, 13);
    let north = traffic.try_spawn_at(LaneId(0), 1690.0).unwrap();
    let south = traffic.try_spawn_at(LaneId(2), -190.0).unwrap();

    for _ in 0..100 {
        traffic.update(0.1);
    }

    assert!(traffic.get(north).is_none());
    assert!(traffic.get(south).is_none());
    assert!(traffic.despawned_total() >= 2);
}

#[test]
fn test_check_collision_radius_overlap() {
    let mut traffic = traffic_with(packed_config(), 14);
    let id = traffic.try_spawn_at(LaneId(0), 50.0).unwrap();

    // Traffic radius 2 plus player radius 3
    let hit = traffic.check_collision(&Position::new(-10.0, 53.0), 3.0);
    assert_eq!(hit.map(|agent| agent.id), Some(id));

    assert!(traffic
        .check_collision(&Position::new(-10.0, 56.0), 3.0)
        .is_none());
    assert!(traffic
        .check_collision(&Position::new(0.0, 50.0), 3.0)
        .is_none());
}

#[test]
fn test_clear_removes_everything() {
    let mut traffic = traffic_with(packed_config(), 15);
    traffic.try_spawn_at(LaneId(0), 0.0);
    traffic.try_spawn_at(LaneId(2), 100.0);
    assert_eq!(traffic.len(), 2);

    traffic.clear();
    assert!(traffic.is_empty());
    assert!(traffic.try_spawn_at(LaneId(0), 0.0).is_some());
}

#[test]
fn test_seeded_traffic_is_reproducible() {
    let mut first = traffic_with(TrafficConfig::default(), 42);
    let mut second = traffic_with(TrafficConfig::default(), 42);

    for _ in 0..600 {
        first.update(1.0 / 30.0);
        second.update(1.0 / 30.0);
    }

    let a: Vec<_> = first.agents().into_iter().cloned().collect();
    let b: Vec<_> = second.agents().into_iter().cloned().collect();
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn test_open_road_target_is_redrawn_each_tick() {
    let config = TrafficConfig {
        max_vehicles: 1,
        ..packed_config()
    };
    let mut traffic = traffic_with(config, 16);
    let id = traffic.try_spawn_at(LaneId(0), 0.0).unwrap();
    let (min, max) = (traffic.config().min_speed, traffic.config().max_speed);

    let mut targets = Vec::new();
    for _ in 0..5 {
        traffic.update(0.01);
        let target = traffic.get(id).unwrap().target_speed;
        assert!(target >= min && target < max, "target {} outside band", target);
        targets.push(target);
    }
    targets.dedup();
    assert!(targets.len() > 1, "target never redrawn: {:?}", targets);
}

#[test]
fn test_leader_beyond_braking_distance_is_ignored() {
    let config = TrafficConfig {
        max_vehicles: 2,
        ..packed_config()
    };
    let mut traffic = traffic_with(config, 17);
    let follower = traffic.try_spawn_at(LaneId(0), 0.0).unwrap();
    let leader = traffic.try_spawn_at(LaneId(0), 40.0).unwrap();
    assert!(40.0 > traffic.get(follower).unwrap().braking_distance);
    let (min, max) = (traffic.config().min_speed, traffic.config().max_speed);

    let mut targets = Vec::new();
    for _ in 0..5 {
        let ahead = traffic.find_ahead(follower).map(|agent| agent.id);
        assert_eq!(ahead, Some(leader));
        traffic.update(0.01);
        let target = traffic.get(follower).unwrap().target_speed;
        assert!(target >= min && target < max, "target {} outside band", target);
        targets.push(target);
    }
    targets.dedup();
    assert!(targets.len() > 1, "follower target never redrawn: {:?}", targets);
}

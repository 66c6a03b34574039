//! Pedestrian simulation tests

use std::collections::HashMap;
use std::f64::consts::PI;

use corridor_sim::simulation::{
    GaitPose, PedestrianConfig, PedestrianSimulation, Position, SidewalkPath, SimRng,
    TravelDirection, WorldLayout, CORRIDOR_LENGTH,
};

fn pedestrians_with(config: PedestrianConfig, seed: u64) -> PedestrianSimulation {
    let paths = WorldLayout::build().sidewalk_paths;
    PedestrianSimulation::new(config, paths, SimRng::with_seed(seed))
}

#[test]
fn test_initial_population_spread_over_corridor() {
    let sim = pedestrians_with(PedestrianConfig::default(), 1);
    let config = sim.config();

    // 8 segments of 2-4 walkers, capped
    assert!(sim.len() >= config.initial_segments * config.min_per_segment);
    assert!(sim.len() <= config.max_pedestrians);

    for walker in sim.agents() {
        assert!(walker.position_z >= 0.0 && walker.position_z <= CORRIDOR_LENGTH);
        assert!(walker.speed >= config.min_speed && walker.speed < config.max_speed);
        assert!(walker.path.x.abs() == 22.0);
    }
}

#[test]
fn test_walkers_keep_their_path() {
    let mut sim = pedestrians_with(PedestrianConfig::default(), 2);
    let before: HashMap<_, _> = sim
        .agents()
        .into_iter()
        .map(|walker| (walker.id, walker.clone()))
        .collect();

    let dt = 0.1;
    sim.update(dt, &Position::new(0.0, 750.0));

    for walker in sim.agents() {
        let Some(old) = before.get(&walker.id) else {
            continue;
        };
        assert_eq!(walker.path, old.path);
        assert_eq!(walker.speed, old.speed);
        let expected = old.position_z + old.path.direction.sign() * old.speed * dt;
        assert!((walker.position_z - expected).abs() < 1e-9);
        let phase = old.walk_phase + old.speed * dt * 3.0;
        assert!((walker.walk_phase - phase).abs() < 1e-9);
    }
}

#[test]
fn test_walkers_far_from_player_are_culled() {
    let mut sim = pedestrians_with(PedestrianConfig::default(), 3);
    let player = Position::new(0.0, 0.0);
    let cull = sim.config().cull_distance;

    sim.update(0.1, &player);

    assert!(!sim.is_empty());
    for walker in sim.agents() {
        assert!((walker.position_z - player.z).abs() <= cull);
        assert!(walker.position_z >= sim.config().min_z);
    }
}

#[test]
fn test_population_cap_holds() {
    let config = PedestrianConfig {
        max_pedestrians: 5,
        spawn_interval: 0.05,
        ..Default::default()
    };
    let mut sim = pedestrians_with(config, 4);
    assert_eq!(sim.len(), 5);

    for _ in 0..400 {
        sim.update(0.1, &Position::new(0.0, 750.0));
        assert!(sim.len() <= 5);
    }
}

#[test]
fn test_steady_spawns_land_near_player() {
    let config = PedestrianConfig {
        initial_segments: 0,
        spawn_interval: 1.0,
        ..Default::default()
    };
    let mut sim = pedestrians_with(config, 5);
    assert!(sim.is_empty());

    // First update spawns straight away, then the interval applies
    let player = Position::new(0.0, 750.0);
    sim.update(0.5, &player);
    assert_eq!(sim.len(), 1);
    sim.update(0.4, &player);
    assert_eq!(sim.len(), 1);
    sim.update(0.7, &player);
    assert_eq!(sim.len(), 2);

    for walker in sim.agents() {
        let offset = (walker.position_z - player.z).abs();
        assert!((95.0..=205.0).contains(&offset), "spawned {} from player", offset);
    }
}

#[test]
fn test_walkers_leaving_bounds_are_culled_near_player() {
    let layout_paths = WorldLayout::build().sidewalk_paths;
    let config = PedestrianConfig {
        initial_segments: 0,
        ..Default::default()
    };
    let (max_z, min_z) = (config.max_z, config.min_z);

    let north: Vec<SidewalkPath> = layout_paths
        .iter()
        .copied()
        .filter(|path| path.direction == TravelDirection::North)
        .collect();
    let mut sim = PedestrianSimulation::new(config.clone(), north, SimRng::with_seed(9));
    let walker = sim.spawn_at(max_z - 1.0).expect("below cap");
    sim.update(1.0, &Position::new(0.0, max_z - 50.0));
    assert!(sim.get(walker).is_none());

    let south: Vec<SidewalkPath> = layout_paths
        .iter()
        .copied()
        .filter(|path| path.direction == TravelDirection::South)
        .collect();
    let mut sim = PedestrianSimulation::new(config, south, SimRng::with_seed(10));
    let walker = sim.spawn_at(min_z + 1.0).expect("below cap");
    sim.update(1.0, &Position::new(0.0, min_z + 50.0));
    assert!(sim.get(walker).is_none());
}

#[test]
fn test_no_steady_spawn_off_the_corridor() {
    let config = PedestrianConfig {
        initial_segments: 0,
        spawn_interval: 0.5,
        ..Default::default()
    };
    let mut sim = pedestrians_with(config, 6);

    // Ahead is past the corridor end and behind is below zero
    let player = Position::new(0.0, 0.0);
    let mut far = pedestrians_with(
        PedestrianConfig {
            initial_segments: 0,
            spawn_interval: 0.5,
            ..Default::default()
        },
        7,
    );
    for _ in 0..50 {
        sim.update(0.1, &player);
        far.update(0.1, &Position::new(0.0, 1450.0));
    }
    for walker in sim.agents().into_iter().chain(far.agents()) {
        assert!(walker.position_z > 0.0 && walker.position_z < CORRIDOR_LENGTH);
    }
}

#[test]
fn test_gait_pose_follows_phase() {
    let pose = GaitPose::at_phase(PI / 2.0);
    assert!((pose.leg_swing - 0.4).abs() < 1e-12);
    assert!((pose.arm_swing - 0.3).abs() < 1e-12);
    assert!(pose.bob.abs() < 1e-12);

    let pose = GaitPose::at_phase(PI / 4.0);
    assert!((pose.bob - 0.05).abs() < 1e-12);
    assert!(pose.bob >= 0.0);
}

#[test]
fn test_clear_removes_walkers() {
    let mut sim = pedestrians_with(PedestrianConfig::default(), 8);
    assert!(!sim.is_empty());
    sim.clear();
    assert!(sim.is_empty());
}

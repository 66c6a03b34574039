//! Player vehicle motion tests

use corridor_sim::simulation::{
    ControlInput, DriveInput, DriveMode, DriveParams, Obstacle, Position, VehicleModel,
    VehicleState, WorldLayout,
};

const DT: f64 = 1.0 / 60.0;

fn driving_model() -> VehicleModel {
    let mut model = VehicleModel::new(DriveParams::default());
    model.set_mode(DriveMode::Drive);
    model
}

fn throttle() -> ControlInput {
    ControlInput {
        throttle: 1,
        ..Default::default()
    }
}

#[test]
fn test_throttle_approaches_max_speed_without_exceeding_it() {
    let mut model = driving_model();
    let max_speed = model.params().max_speed;
    let mut previous = model.state().speed;

    for _ in 0..5000 {
        model.step(DT, throttle(), &[]);
        let speed = model.state().speed;
        assert!(speed >= previous, "speed dropped from {} to {}", previous, speed);
        assert!(speed <= max_speed, "speed {} exceeded max {}", speed, max_speed);
        previous = speed;
    }

    assert!((model.state().speed - max_speed).abs() < 1e-9);
}

#[test]
fn test_throttle_leaves_rest_at_fixed_timestep() {
    for dt in [1.0 / 64.0, 1.0 / 60.0, 0.033, 1.0 / 30.0] {
        let mut model = driving_model();
        let start = model.state().position;

        model.step(dt, throttle(), &[]);
        assert!(model.state().speed > 0.0, "stuck at rest with dt {}", dt);

        for _ in 0..600 {
            model.step(dt, throttle(), &[]);
        }
        assert!(model.state().speed > 5.0, "dt {} reached {}", dt, model.state().speed);
        assert!(model.state().position.distance(&start) > 10.0);
    }
}

#[test]
fn test_reverse_speed_is_clamped() {
    let mut model = driving_model();
    let params = model.params().clone();
    let reverse = ControlInput {
        throttle: -1,
        ..Default::default()
    };

    for _ in 0..4000 {
        model.step(DT, reverse, &[]);
        assert!(model.state().speed >= -params.max_speed * params.reverse_ratio);
    }
    assert!((model.state().speed + params.max_speed * params.reverse_ratio).abs() < 1e-9);
}

#[test]
fn test_blocked_step_keeps_position_and_slows() {
    let mut model = driving_model();
    let start = VehicleState {
        position: Position::new(0.0, 2.5),
        heading: 0.0,
        speed: 10.0,
    };
    model.set_state(start);

    // Candidate lands 7.33 from the centre, inside 3 + 5
    let obstacles = [Obstacle::new(0.0, 10.0, 5.0)];
    let input = ControlInput {
        throttle: 1,
        steer: 1,
        brake: false,
    };
    let outcome = model.step(DT, input, &obstacles);

    assert!(outcome.blocked);
    assert_eq!(model.state().position, start.position);
    assert_eq!(model.state().heading, start.heading);
    assert!(model.state().speed < start.speed);
}

#[test]
fn test_clear_step_commits_position() {
    let mut model = driving_model();
    model.set_state(VehicleState {
        position: Position::new(0.0, 0.0),
        heading: 0.0,
        speed: 10.0,
    });

    let obstacles = [Obstacle::new(100.0, 100.0, 5.0)];
    let outcome = model.step(DT, throttle(), &obstacles);

    assert!(!outcome.blocked);
    let state = model.state();
    assert!(state.position.z > 0.0);
    assert!(state.position.x.abs() < 1e-12);
}

#[test]
fn test_stationary_vehicle_does_not_turn() {
    let mut model = driving_model();
    let before = model.state().heading;

    let input = ControlInput {
        throttle: 0,
        steer: 1,
        brake: false,
    };
    model.step(DT, input, &[]);

    assert_eq!(model.state().heading, before);
    assert_eq!(model.state().speed, 0.0);
}

#[test]
fn test_steering_flips_in_reverse() {
    let right = ControlInput {
        throttle: 0,
        steer: 1,
        brake: false,
    };

    let mut forward = driving_model();
    forward.set_state(VehicleState {
        speed: 10.0,
        ..Default::default()
    });
    forward.step(DT, right, &[]);
    assert!(forward.state().heading < 0.0);

    let mut backward = driving_model();
    backward.set_state(VehicleState {
        speed: -10.0,
        ..Default::default()
    });
    backward.step(DT, right, &[]);
    assert!(backward.state().heading > 0.0);
}

#[test]
fn test_left_key_turns_toward_positive_x() {
    let mut model = driving_model();
    model.set_state(VehicleState {
        speed: 20.0,
        ..Default::default()
    });
    let input = ControlInput::from(DriveInput {
        forward: true,
        left: true,
        ..Default::default()
    });

    for _ in 0..30 {
        model.step(DT, input, &[]);
    }
    assert!(model.state().heading > 0.0);
    assert!(model.state().position.x > 0.0);
}

#[test]
fn test_small_speed_snaps_to_zero() {
    let mut model = driving_model();
    model.set_state(VehicleState {
        speed: 0.05,
        ..Default::default()
    });

    model.step(DT, ControlInput::default(), &[]);
    assert_eq!(model.state().speed, 0.0);
}

#[test]
fn test_brake_slows_faster_than_coasting() {
    let moving = VehicleState {
        speed: 30.0,
        ..Default::default()
    };

    let mut coasting = driving_model();
    coasting.set_state(moving);
    coasting.step(DT, ControlInput::default(), &[]);

    let mut braking = driving_model();
    braking.set_state(moving);
    braking.step(
        DT,
        ControlInput {
            brake: true,
            ..Default::default()
        },
        &[],
    );

    assert!(braking.state().speed < coasting.state().speed);
}

#[test]
fn test_showroom_ignores_input() {
    let mut model = VehicleModel::new(DriveParams::default());
    assert_eq!(model.mode(), DriveMode::Showroom);

    let outcome = model.step(DT, throttle(), &[]);
    assert!(!outcome.blocked);
    assert_eq!(model.state(), VehicleState::default());
}

#[test]
fn test_mode_switch_resets_pose() {
    let mut model = driving_model();
    let params = model.params().clone();
    assert_eq!(model.state().position, params.drive_start);
    assert_eq!(model.state().heading, params.drive_start_heading);

    for _ in 0..120 {
        model.step(DT, throttle(), &[]);
    }
    assert_ne!(model.state().position, params.drive_start);

    model.set_mode(DriveMode::Showroom);
    assert_eq!(model.state(), VehicleState::default());
}

#[test]
fn test_drive_start_is_clear_of_obstacles() {
    let layout = WorldLayout::build();
    let params = DriveParams::default();
    assert!(!layout.is_blocked(&params.drive_start, params.vehicle_radius));
}

#[test]
fn test_damp_speed() {
    let mut model = driving_model();
    model.set_state(VehicleState {
        speed: 10.0,
        ..Default::default()
    });
    model.damp_speed(0.3);
    assert!((model.state().speed - 3.0).abs() < 1e-9);

    model.set_state(VehicleState {
        speed: 0.1,
        ..Default::default()
    });
    model.damp_speed(0.3);
    assert_eq!(model.state().speed, 0.0);
}

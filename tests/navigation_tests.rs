//! Navigation and waypoint tracking tests

use std::f64::consts::PI;

use corridor_sim::simulation::{
    Autopilot, NavigationConfig, NavigationTracker, Position, VehicleState, WorldLayout,
};

fn tracker() -> NavigationTracker {
    NavigationTracker::new(WorldLayout::build().landmarks, NavigationConfig::default())
}

#[test]
fn test_set_destination_walmart() {
    let mut nav = tracker();
    assert!(nav.active_waypoint().is_none());

    assert!(nav.set_destination("walmart"));
    let waypoint = nav.active_waypoint().expect("waypoint set");
    assert_eq!(waypoint.landmark.name, "Walmart Supercenter");
    assert_eq!(waypoint.landmark.position, Position::new(60.0, 1200.0));
}

#[test]
fn test_destination_match_ignores_case() {
    let mut nav = tracker();
    assert!(nav.set_destination("STARBUCKS"));
    assert_eq!(
        nav.active_waypoint().unwrap().landmark.name,
        "Starbucks Coffee"
    );
    assert!(nav.set_destination("center sh"));
    assert_eq!(
        nav.active_waypoint().unwrap().landmark.name,
        "City Center Shops"
    );
}

#[test]
fn test_unknown_destination_keeps_current_waypoint() {
    let mut nav = tracker();
    assert!(nav.set_destination("starbucks"));

    assert!(!nav.set_destination("airport"));
    assert_eq!(
        nav.active_waypoint().unwrap().landmark.name,
        "Starbucks Coffee"
    );

    let mut empty = tracker();
    assert!(!empty.set_destination("airport"));
    assert!(empty.active_waypoint().is_none());
}

#[test]
fn test_new_destination_replaces_waypoint() {
    let mut nav = tracker();
    nav.set_destination("walmart");
    nav.advance(5.0);
    nav.set_destination("gas");

    let waypoint = nav.active_waypoint().unwrap();
    assert_eq!(waypoint.landmark.name, "Gas Station");
    assert_eq!(waypoint.created_at, 5.0);
}

#[test]
fn test_distance_and_bearing() {
    let mut nav = tracker();
    assert!(nav.distance_to(&Position::ORIGIN).is_none());

    nav.set_destination("walmart");

    let info = nav.distance_to(&Position::new(60.0, 1100.0)).unwrap();
    assert!((info.distance - 100.0).abs() < 1e-9);
    assert!(info.bearing.abs() < 1e-12);
    assert!((info.distance_miles - 1.0).abs() < 1e-9);

    // Waypoint due +X
    let info = nav.distance_to(&Position::new(0.0, 1200.0)).unwrap();
    assert!((info.bearing - PI / 2.0).abs() < 1e-12);
}

#[test]
fn test_relative_bearing_wraps() {
    let mut nav = tracker();
    nav.set_destination("walmart");

    // Waypoint straight behind a vehicle facing +Z
    let behind = nav
        .relative_bearing(&Position::new(60.0, 1300.0), 0.0)
        .unwrap();
    assert!((behind.abs() - PI).abs() < 1e-9);

    // Facing almost due -Z with the waypoint just to the left
    let relative = nav
        .relative_bearing(&Position::new(60.0, 1300.0), PI - 0.1)
        .unwrap();
    assert!((relative - 0.1).abs() < 1e-9);
}

#[test]
fn test_arrival_reported_exactly_once() {
    let mut nav = tracker();
    nav.set_destination("walmart");

    let far = Position::new(60.0, 1150.0);
    assert!(!nav.check_arrival(&far));
    assert!(nav.active_waypoint().is_some());

    let near = Position::new(60.0, 1185.0);
    assert!(nav.check_arrival(&near));
    assert!(nav.active_waypoint().is_none());

    assert!(!nav.check_arrival(&near));
    assert!(!nav.check_arrival(&near));
}

#[test]
fn test_arrival_threshold_is_strict() {
    let mut nav = tracker();
    nav.set_destination("walmart");

    assert!(!nav.check_arrival_within(&Position::new(60.0, 1180.0), 20.0));
    assert!(nav.check_arrival_within(&Position::new(60.0, 1180.5), 20.0));
}

#[test]
fn test_clear_waypoint() {
    let mut nav = tracker();
    nav.set_destination("fast food");
    nav.clear_waypoint();
    assert!(nav.active_waypoint().is_none());
    assert!(!nav.check_arrival(&Position::new(-100.0, 200.0)));
}

#[test]
fn test_autopilot_steers_toward_waypoint() {
    let mut nav = tracker();
    let autopilot = Autopilot::default();
    let state = VehicleState {
        position: Position::new(0.0, 1000.0),
        heading: 0.0,
        speed: 5.0,
    };

    // No waypoint: straight ahead
    let input = autopilot.input(&state, &nav);
    assert!(input.forward && !input.left && !input.right);

    // Walmart lies ahead and to +X, which is left
    nav.set_destination("walmart");
    let input = autopilot.input(&state, &nav);
    assert!(input.left && !input.right);

    // Starbucks is behind and to -X
    nav.set_destination("starbucks");
    let input = autopilot.input(&state, &nav);
    assert!(input.right && !input.left);

    // Lifts off above cruise speed
    let fast = VehicleState {
        speed: autopilot.cruise_speed + 1.0,
        ..state
    };
    assert!(!autopilot.input(&fast, &nav).forward);
}

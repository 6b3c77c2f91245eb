//! End-to-end tests of the pose -> localize -> window -> brake pipeline.

use assert_approx_eq::assert_approx_eq;
use waypoint_horizon::math::Point3d;
use waypoint_horizon::{Engine, HorizonConfig, PathPoint, Pose};

fn collinear_points(count: usize, speed: f64) -> Vec<PathPoint> {
    (0..count)
        .map(|i| PathPoint::new(Point3d::new(i as f64, 0.0, 0.0), speed))
        .collect()
}

/// The reference scenario: five collinear points at 10 m/s, a three-point
/// window, a stop line at index 3 and no buffer. The published speeds
/// must be [sqrt(2), 0, 0], each capped at the nominal 10 m/s.
#[test]
fn brakes_to_rest_at_the_stop_line() {
    let engine = Engine::new(HorizonConfig {
        lookahead: 3,
        stop_buffer: 0,
        max_decel: 0.5,
        ..HorizonConfig::default()
    });
    engine.set_global_path("map", collinear_points(5, 10.0));
    engine.update_pose(Pose::new(Point3d::new(1.0, 0.0, 0.0), 0.0));
    engine.set_stop_line(3);

    let horizon = engine.tick().expect("both inputs are present");
    assert_eq!(horizon.frame, "map");
    assert_eq!(horizon.start_index, 1);
    assert_eq!(horizon.points.len(), 3);

    let speeds: Vec<f64> = horizon.points.iter().map(|p| p.speed).collect();
    assert_approx_eq!(speeds[0], 2.0_f64.sqrt());
    assert_approx_eq!(speeds[1], 0.0);
    assert_approx_eq!(speeds[2], 0.0);
}

/// Drive the pose along the route and check that the published window
/// start never falls behind the vehicle and the window stays bounded.
#[test]
fn horizon_rolls_forward_with_the_vehicle() {
    let engine = Engine::new(HorizonConfig {
        lookahead: 20,
        ..HorizonConfig::default()
    });
    engine.set_global_path("map", collinear_points(100, 15.0));

    let mut last_start = 0;
    for step in 0..160 {
        let x = 0.5 * step as f64;
        engine.update_pose(Pose::new(Point3d::new(x, 0.3, 0.0), 0.0));
        let horizon = engine.tick().unwrap();

        assert!(horizon.start_index >= last_start);
        assert!(horizon.points.len() <= 20);
        assert!(horizon.start_index as f64 + 1.0 >= x);
        last_start = horizon.start_index;
    }

    // Near the path end the window truncates rather than wrapping.
    engine.update_pose(Pose::new(Point3d::new(95.2, 0.0, 0.0), 0.0));
    let horizon = engine.tick().unwrap();
    assert_eq!(horizon.start_index, 96);
    assert_eq!(horizon.points.len(), 4);
}

/// Clearing the stop line restores the nominal path speeds unchanged.
#[test]
fn green_light_restores_nominal_speeds() {
    let engine = Engine::new(HorizonConfig {
        lookahead: 50,
        ..HorizonConfig::default()
    });
    engine.set_global_path("map", collinear_points(100, 12.0));
    engine.update_pose(Pose::new(Point3d::new(10.0, 0.0, 0.0), 0.0));

    engine.set_stop_line(40);
    let braking = engine.tick().unwrap();
    assert!(braking.points.iter().any(|p| p.speed < 12.0));
    let mut prev = f64::INFINITY;
    for point in &braking.points {
        assert!(point.speed <= 12.0);
        assert!(point.speed <= prev);
        prev = point.speed;
    }

    engine.set_stop_line(-1);
    let cruising = engine.tick().unwrap();
    assert!(cruising.points.iter().all(|p| p.speed == 12.0));
}

/// The obstacle channel is reserved and must not disturb the output.
#[test]
fn obstacle_updates_are_ignored() {
    let engine = Engine::new(HorizonConfig::default());
    engine.set_global_path("map", collinear_points(10, 10.0));
    engine.update_pose(Pose::new(Point3d::new(2.0, 0.0, 0.0), 0.0));

    engine.set_obstacle(5);
    let horizon = engine.tick().unwrap();
    assert!(horizon.points.iter().all(|p| p.speed == 10.0));
}

//! Test tracks and snapshot builders

use crate::geometry::Point;
use crate::params::Params;

/// 10x10 counter-clockwise square with unit spacing, starting mid-way along
/// the bottom edge. Forty waypoints; every corner is a 90 degree left turn,
/// reached at segments (5, 6), (15, 16), (25, 26) and (35, 36).
pub fn square_loop() -> Vec<Point> {
    let mut points = Vec::with_capacity(40);
    points.extend((5..=10).map(|x| Point::new(x as f64, 0.0)));
    points.extend((1..=10).map(|y| Point::new(10.0, y as f64)));
    points.extend((0..=9).rev().map(|x| Point::new(x as f64, 10.0)));
    points.extend((0..=9).rev().map(|y| Point::new(0.0, y as f64)));
    points.extend((1..=4).map(|x| Point::new(x as f64, 0.0)));
    points
}

/// Convert integer pairs into waypoints
pub fn path(points: &[(i32, i32)]) -> Vec<Point> {
    points
        .iter()
        .map(|&(x, y)| Point::new(x as f64, y as f64))
        .collect()
}

/// Car sitting on the previous closest waypoint, centred, stationary
pub fn params(waypoints: Vec<Point>, closest: [i64; 2]) -> Params {
    let start = waypoints[closest[0] as usize];
    Params {
        waypoints,
        closest_waypoints: closest,
        x: start.x,
        y: start.y,
        heading: 0.0,
        steering_angle: 0.0,
        speed: 0.0,
        track_width: 2.0,
        distance_from_center: 0.0,
        is_left_of_center: true,
        track_name: None,
        all_wheels_on_track: true,
        is_offtrack: false,
        progress: 0.0,
        steps: 0,
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

//! Planar geometry over waypoint paths
//!
//! Angles are in degrees, measured counter-clockwise from the positive x-axis,
//! and always reported in the half-open range (-180, 180].

use serde::{Deserialize, Serialize};

/// A 2D point on the track plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Wrap an arbitrary (possibly negative) index onto `0..len`.
///
/// `len` must be non-zero.
pub fn circular_index(i: i64, len: usize) -> usize {
    i.rem_euclid(len as i64) as usize
}

/// Wrap an angle into (-180, 180]. Non-finite input maps to 0.
pub fn normalize_angle(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let mut a = degrees % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Direction of the vector `a -> b` in degrees
pub fn heading(a: Point, b: Point) -> f64 {
    normalize_angle((b.y - a.y).atan2(b.x - a.x).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_index_wraps_both_ways() {
        assert_eq!(circular_index(0, 4), 0);
        assert_eq!(circular_index(4, 4), 0);
        assert_eq!(circular_index(9, 4), 1);
        assert_eq!(circular_index(-1, 4), 3);
        assert_eq!(circular_index(-4, 4), 0);
        assert_eq!(circular_index(-9, 4), 3);
        assert_eq!(circular_index(i64::MIN, 3), i64::MIN.rem_euclid(3) as usize);
    }

    #[test]
    fn test_normalize_angle_domain() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(180.0), 180.0);
        assert_eq!(normalize_angle(-180.0), 180.0);
        assert_eq!(normalize_angle(190.0), -170.0);
        assert_eq!(normalize_angle(-190.0), 170.0);
        assert_eq!(normalize_angle(540.0), 180.0);
        assert_eq!(normalize_angle(-720.0), 0.0);
        assert_eq!(normalize_angle(f64::NAN), 0.0);
        assert_eq!(normalize_angle(f64::INFINITY), 0.0);
        // in-range values pass through untouched
        assert_eq!(normalize_angle(-81.86989764584403), -81.86989764584403);
    }

    #[test]
    fn test_distance_symmetric_and_triangle() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(-2.5, 7.0),
            Point::new(10.0, -1.0),
        ];
        for &a in &pts {
            for &b in &pts {
                assert_eq!(distance(a, b), distance(b, a));
                for &c in &pts {
                    assert!(distance(a, c) <= distance(a, b) + distance(b, c) + 1e-12);
                }
            }
        }
        assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_point_serde_as_pair() {
        let p: Point = serde_json::from_str("[1.5, -2.0]").unwrap();
        assert_eq!(p, Point::new(1.5, -2.0));
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1.5,-2.0]");
    }
}

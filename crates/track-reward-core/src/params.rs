//! Per-step input snapshot supplied by the training harness

use serde::{Deserialize, Serialize};

use crate::error::{Result, RewardError};
use crate::geometry::{Point, circular_index};

/// Everything the harness knows about the car for one simulation step.
///
/// Field names match the keys of the harness's parameter mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Centerline waypoints of the closed-loop track
    pub waypoints: Vec<Point>,
    /// Indices of the waypoints behind and ahead of the car
    pub closest_waypoints: [i64; 2],
    /// Car position
    pub x: f64,
    pub y: f64,
    /// Car heading in degrees
    pub heading: f64,
    /// Steering command in degrees, positive turns left
    pub steering_angle: f64,
    /// Current speed
    pub speed: f64,
    /// Lane width
    pub track_width: f64,
    /// Perpendicular distance from the centerline
    pub distance_from_center: f64,
    /// Which side of the centerline the car is on
    pub is_left_of_center: bool,

    /// Track identifier, only used to pick reward constants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(default = "default_true")]
    pub all_wheels_on_track: bool,
    #[serde(default)]
    pub is_offtrack: bool,
    /// Lap completion percentage
    #[serde(default)]
    pub progress: f64,
    /// Steps taken in the current episode
    #[serde(default)]
    pub steps: u64,
}

fn default_true() -> bool {
    true
}

impl Params {
    /// Check the structural invariants the evaluator relies on
    pub fn validate(&self) -> Result<()> {
        let n = self.waypoints.len();
        if n < 3 {
            return Err(RewardError::InvalidParams(format!(
                "need at least 3 waypoints, got {}",
                n
            )));
        }
        if let Some(i) = self.waypoints.iter().position(|p| !p.is_finite()) {
            return Err(RewardError::InvalidParams(format!(
                "waypoint {} is not finite",
                i
            )));
        }
        for index in self.closest_waypoints {
            if index < 0 || index >= n as i64 {
                return Err(RewardError::InvalidParams(format!(
                    "closest waypoint index {} outside 0..{}",
                    index, n
                )));
            }
        }
        let [prev, next] = self.closest_waypoints;
        if circular_index(prev + 1, n) != next as usize {
            return Err(RewardError::InvalidParams(format!(
                "closest waypoints [{}, {}] are not consecutive",
                prev, next
            )));
        }

        let finite = [
            ("x", self.x),
            ("y", self.y),
            ("heading", self.heading),
            ("steering_angle", self.steering_angle),
            ("progress", self.progress),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(RewardError::InvalidParams(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("speed", self.speed),
            ("track_width", self.track_width),
            ("distance_from_center", self.distance_from_center),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(RewardError::InvalidParams(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

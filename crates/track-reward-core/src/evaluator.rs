//! Reward evaluator
//!
//! A [`RewardEvaluator`] borrows one [`Params`] snapshot and one
//! [`RewardConfig`] and answers geometric queries about the car's position on
//! the closed-loop track. Every query is a pure function of those two inputs
//! and runs in constant time: waypoint lookups wrap with [`circular_index`]
//! and lookahead windows are bounded by configuration, never by track length.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::RewardConfig;
use crate::error::Result;
use crate::geometry::{self, Point, circular_index, normalize_angle};
use crate::params::Params;
use crate::reward::{self, Reward, RewardComponents};

/// Direction of the track ahead
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    Left,
    Right,
    Straight,
}

/// A turn detected some segments ahead of the car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turn {
    pub direction: TurnDirection,
    /// Signed heading change in degrees
    pub angle: f64,
    /// Segments between the car and the turn
    pub offset: usize,
}

/// Largest allowed `distance_from_center` on each side of the centerline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorridorBounds {
    pub left: f64,
    pub right: f64,
}

/// Scores one snapshot of the car on the track
#[derive(Debug, Clone, Copy)]
pub struct RewardEvaluator<'a> {
    params: &'a Params,
    config: &'a RewardConfig,
}

impl<'a> RewardEvaluator<'a> {
    /// Validate the snapshot and build an evaluator over it
    pub fn new(params: &'a Params, config: &'a RewardConfig) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, config })
    }

    /// Waypoint at `index`, wrapping around the loop in both directions
    pub fn way_point(&self, index: i64) -> Point {
        let waypoints = &self.params.waypoints;
        waypoints[circular_index(index, waypoints.len())]
    }

    /// Euclidean distance between two points
    pub fn waypoints_distance(a: Point, b: Point) -> f64 {
        geometry::distance(a, b)
    }

    /// Heading of the vector `a -> b` in degrees, (-180, 180]
    pub fn heading_between_waypoints(a: Point, b: Point) -> f64 {
        geometry::heading(a, b)
    }

    fn prev_index(&self) -> i64 {
        self.params.closest_waypoints[0]
    }

    fn next_index(&self) -> i64 {
        self.params.closest_waypoints[1]
    }

    fn segment_heading(&self, from: i64, to: i64) -> f64 {
        Self::heading_between_waypoints(self.way_point(from), self.way_point(to))
    }

    /// Heading of the track segment the car is on
    pub fn track_heading(&self) -> f64 {
        self.segment_heading(self.prev_index(), self.next_index())
    }

    /// Angle from the car heading to the track heading.
    ///
    /// Positive when the track points counter-clockwise of the car.
    pub fn car_heading_error(&self) -> f64 {
        normalize_angle(self.track_heading() - self.params.heading)
    }

    /// Heading change from the segment ending at `prev` to the segment
    /// `prev -> next`
    fn turn_angle_at(&self, prev: i64, next: i64) -> f64 {
        normalize_angle(self.segment_heading(prev, next) - self.segment_heading(prev - 1, prev))
    }

    /// Signed heading change entering the current segment, positive = left
    pub fn turn_angle(&self) -> f64 {
        self.turn_angle_at(self.prev_index(), self.next_index())
    }

    pub fn is_in_turn(&self) -> bool {
        self.turn_angle().abs() > self.config.turn_threshold
    }

    fn direction_of(&self, angle: f64) -> TurnDirection {
        if angle > self.config.turn_threshold {
            TurnDirection::Left
        } else if angle < -self.config.turn_threshold {
            TurnDirection::Right
        } else {
            TurnDirection::Straight
        }
    }

    pub fn expected_turn_direction(&self) -> TurnDirection {
        self.direction_of(self.turn_angle())
    }

    /// First turn within `corridor_lookahead` segments ahead of the current one
    pub fn upcoming_turn(&self) -> Option<Turn> {
        let (prev, next) = (self.prev_index(), self.next_index());
        (1..=self.config.corridor_lookahead).find_map(|offset| {
            let angle = self.turn_angle_at(prev + offset as i64, next + offset as i64);
            match self.direction_of(angle) {
                TurnDirection::Straight => None,
                direction => Some(Turn {
                    direction,
                    angle,
                    offset,
                }),
            }
        })
    }

    /// How sharp a heading change is: 0 at or below the turn threshold,
    /// rising linearly to 1 at `sharp_turn_angle`
    pub fn turn_severity(&self, angle: f64) -> f64 {
        let magnitude = angle.abs();
        let threshold = self.config.turn_threshold;
        let span = self.config.sharp_turn_angle - threshold;
        if !(span > 0.0) {
            return if magnitude > threshold { 1.0 } else { 0.0 };
        }
        ((magnitude - threshold) / span).clamp(0.0, 1.0)
    }

    /// Fraction of top speed the car should be targeting
    pub fn optimum_speed_ratio(&self) -> f64 {
        let ratio = self
            .steering_speed_ratio()
            .min(self.curvature_speed_ratio());
        ratio.max(self.config.min_speed_ratio).min(1.0)
    }

    /// Speed limit imposed by how hard the car is steering or how far it is
    /// pointing off the track direction
    fn steering_speed_ratio(&self) -> f64 {
        let config = self.config;
        if !(config.max_steering_angle > 0.0) {
            return 1.0;
        }
        let aggressiveness = self
            .params
            .steering_angle
            .abs()
            .max(self.car_heading_error().abs())
            / config.max_steering_angle;

        let (start, end) = (config.steering_slowdown_start, config.steering_slowdown_end);
        let floor = config.steering_floor_ratio;
        if aggressiveness <= start {
            1.0
        } else if aggressiveness >= end {
            floor
        } else {
            1.0 - (1.0 - floor) * ((aggressiveness - start) / (end - start))
        }
    }

    /// Speed limit imposed by the sharpest heading change within
    /// `speed_lookahead` segments
    fn curvature_speed_ratio(&self) -> f64 {
        let current = self.track_heading();
        let next = self.next_index();
        let sharpest = (1..=self.config.speed_lookahead as i64)
            .map(|k| {
                let ahead = self.segment_heading(next + k - 1, next + k);
                normalize_angle(ahead - current).abs()
            })
            .fold(self.turn_angle().abs(), f64::max);

        1.0 - self.turn_severity(sharpest) * (1.0 - self.config.min_speed_ratio)
    }

    /// Allowed distance from the centerline on each side.
    ///
    /// Straight track gets a symmetric band. Approaching a turn the band
    /// shifts to the outside so the car can take a wide entry; inside a turn
    /// it shifts to the inside.
    pub fn corridor_bounds(&self) -> CorridorBounds {
        let band = self.config.corridor_ratio * self.params.track_width;

        let (direction, shift) = if self.is_in_turn() {
            let angle = self.turn_angle();
            (
                self.direction_of(angle),
                self.config.corridor_shift * self.turn_severity(angle),
            )
        } else if let Some(turn) = self.upcoming_turn() {
            (
                turn.direction,
                -self.config.corridor_shift * self.turn_severity(turn.angle),
            )
        } else {
            (TurnDirection::Straight, 0.0)
        };

        // positive shift widens the inside of the turn
        let (left, right) = match direction {
            TurnDirection::Left => (1.0 + shift, 1.0 - shift),
            TurnDirection::Right => (1.0 - shift, 1.0 + shift),
            TurnDirection::Straight => (1.0, 1.0),
        };
        CorridorBounds {
            left: band * left,
            right: band * right,
        }
    }

    pub fn is_in_optimized_corridor(&self) -> bool {
        let bounds = self.corridor_bounds();
        let bound = if self.params.is_left_of_center {
            bounds.left
        } else {
            bounds.right
        };
        self.params.distance_from_center <= bound
    }

    /// Car is on the final segment of the track
    pub fn reached_target(&self) -> bool {
        let n = self.params.waypoints.len();
        circular_index(self.next_index(), n) == n - 1
    }

    /// Scalar reward for this snapshot
    pub fn evaluate(&self) -> f64 {
        self.score().value
    }

    /// Reward with terminal flag and per-component breakdown.
    ///
    /// `(alive + w_speed * speed + w_heading * heading) * corridor + target`,
    /// floored at `min_reward`. Off-track snapshots score `min_reward`.
    pub fn score(&self) -> Reward {
        let config = self.config;
        let params = self.params;
        let floor = config.min_reward.max(0.0);
        let mut components = RewardComponents::new();

        if params.is_offtrack || !params.all_wheels_on_track {
            for name in [
                reward::ALIVE,
                reward::SPEED,
                reward::HEADING,
                reward::CORRIDOR,
                reward::TARGET,
            ] {
                components.insert(name.to_string(), 0.0);
            }
            trace!(offtrack = params.is_offtrack, "car off track, minimum reward");
            return Reward {
                value: floor,
                done: params.is_offtrack,
                components,
            };
        }

        let speed_ratio = if config.max_speed > 0.0 {
            params.speed / config.max_speed
        } else {
            0.0
        };
        let optimum = self.optimum_speed_ratio();
        let speed = 1.0 - (speed_ratio - optimum).abs().min(1.0);

        let heading_error = self.car_heading_error();
        let heading = if config.heading_error_limit > 0.0 {
            1.0 - (heading_error.abs() / config.heading_error_limit).min(1.0)
        } else {
            1.0
        };

        let in_corridor = self.is_in_optimized_corridor();
        let corridor = if in_corridor {
            1.0
        } else {
            config.corridor_penalty
        };

        let done = self.reached_target();
        let target = if done { config.target_bonus } else { 0.0 };

        let shaped = (config.alive_reward
            + config.speed_weight * speed
            + config.heading_weight * heading)
            * corridor
            + target;
        let value = if shaped.is_finite() {
            shaped.max(floor)
        } else {
            floor
        };

        trace!(
            value,
            speed_ratio,
            optimum,
            heading_error,
            in_corridor,
            done,
            "evaluated snapshot"
        );

        components.insert(reward::ALIVE.to_string(), config.alive_reward);
        components.insert(reward::SPEED.to_string(), speed);
        components.insert(reward::HEADING.to_string(), heading);
        components.insert(reward::CORRIDOR.to_string(), corridor);
        components.insert(reward::TARGET.to_string(), target);

        Reward {
            value,
            done,
            components,
        }
    }
}

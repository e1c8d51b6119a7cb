//! Reward shaping constants and per-track profiles

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, RewardError};

/// Upper bound for `corridor_lookahead` and `speed_lookahead`
pub const MAX_LOOKAHEAD: usize = 32;

/// Tunable constants consumed by the reward evaluator.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Maximum steering magnitude of the car in degrees
    pub max_steering_angle: f64,
    /// Heading change (degrees) above which a segment counts as a turn
    pub turn_threshold: f64,
    /// Heading change (degrees) at which turn severity saturates
    pub sharp_turn_angle: f64,
    /// Half-width of the straight-line corridor as a fraction of track width
    pub corridor_ratio: f64,
    /// Largest fractional widening/narrowing of the corridor in turns
    pub corridor_shift: f64,
    /// Waypoints ahead inspected for an approaching turn
    pub corridor_lookahead: usize,
    /// Waypoints ahead inspected when estimating the optimum speed
    pub speed_lookahead: usize,
    /// Steering aggressiveness (fraction of max steering) where slowing starts
    pub steering_slowdown_start: f64,
    /// Steering aggressiveness where the steering speed limit bottoms out
    pub steering_slowdown_end: f64,
    /// Speed ratio reached at `steering_slowdown_end`
    pub steering_floor_ratio: f64,
    /// Lowest speed ratio the evaluator will ever ask for
    pub min_speed_ratio: f64,
    /// Top speed of the car, used to turn `speed` into a ratio
    pub max_speed: f64,
    /// Reward for every step the car stays on track
    pub alive_reward: f64,
    /// Weight of the speed-match score
    pub speed_weight: f64,
    /// Weight of the heading-alignment score
    pub heading_weight: f64,
    /// Heading error (degrees) at which the heading score reaches zero
    pub heading_error_limit: f64,
    /// Multiplier applied when the car is outside the corridor
    pub corridor_penalty: f64,
    /// Bonus added when the car reaches the final segment
    pub target_bonus: f64,
    /// Floor for every returned reward
    pub min_reward: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            max_steering_angle: 30.0,
            turn_threshold: 10.0,
            sharp_turn_angle: 45.0,
            corridor_ratio: 0.1,
            corridor_shift: 0.5,
            corridor_lookahead: 3,
            speed_lookahead: 4,
            steering_slowdown_start: 0.55,
            steering_slowdown_end: 1.1,
            steering_floor_ratio: 0.34,
            min_speed_ratio: 0.33,
            max_speed: 4.0,
            alive_reward: 1.0,
            speed_weight: 1.0,
            heading_weight: 1.0,
            heading_error_limit: 60.0,
            corridor_penalty: 0.5,
            target_bonus: 100.0,
            min_reward: 1e-3,
        }
    }
}

impl RewardConfig {
    /// Reject constants that would make the evaluator's arithmetic meaningless
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("max_steering_angle", self.max_steering_angle),
            ("turn_threshold", self.turn_threshold),
            ("corridor_ratio", self.corridor_ratio),
            ("corridor_shift", self.corridor_shift),
            ("steering_slowdown_start", self.steering_slowdown_start),
            ("max_speed", self.max_speed),
            ("alive_reward", self.alive_reward),
            ("speed_weight", self.speed_weight),
            ("heading_weight", self.heading_weight),
            ("heading_error_limit", self.heading_error_limit),
            ("corridor_penalty", self.corridor_penalty),
            ("target_bonus", self.target_bonus),
            ("min_reward", self.min_reward),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(RewardError::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if !(self.sharp_turn_angle > self.turn_threshold) {
            return Err(RewardError::InvalidConfig(format!(
                "sharp_turn_angle ({}) must exceed turn_threshold ({})",
                self.sharp_turn_angle, self.turn_threshold
            )));
        }
        if !(self.steering_slowdown_end > self.steering_slowdown_start) {
            return Err(RewardError::InvalidConfig(format!(
                "steering_slowdown_end ({}) must exceed steering_slowdown_start ({})",
                self.steering_slowdown_end, self.steering_slowdown_start
            )));
        }
        for (name, value) in [
            ("min_speed_ratio", self.min_speed_ratio),
            ("steering_floor_ratio", self.steering_floor_ratio),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(RewardError::InvalidConfig(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        for (name, value) in [
            ("corridor_lookahead", self.corridor_lookahead),
            ("speed_lookahead", self.speed_lookahead),
        ] {
            if value > MAX_LOOKAHEAD {
                return Err(RewardError::InvalidConfig(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_LOOKAHEAD, value
                )));
            }
        }
        if self.corridor_penalty > 1.0 {
            return Err(RewardError::InvalidConfig(format!(
                "corridor_penalty must be at most 1, got {}",
                self.corridor_penalty
            )));
        }
        if self.corridor_shift > 1.0 {
            return Err(RewardError::InvalidConfig(format!(
                "corridor_shift must be at most 1, got {}",
                self.corridor_shift
            )));
        }
        Ok(())
    }
}

/// Reward constants keyed by track name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackProfiles {
    /// Constants used when no track-specific profile applies
    #[serde(default)]
    pub default: RewardConfig,
    /// Per-track overrides
    #[serde(default)]
    pub tracks: HashMap<String, RewardConfig>,
}

impl TrackProfiles {
    /// Parse profiles from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let profiles: TrackProfiles = serde_json::from_str(text)?;
        profiles.validate()?;
        Ok(profiles)
    }

    /// Load profiles from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| RewardError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    /// Validate the default profile and every track profile
    pub fn validate(&self) -> Result<()> {
        self.default.validate()?;
        for (name, config) in &self.tracks {
            config
                .validate()
                .map_err(|e| RewardError::InvalidConfig(format!("track {}: {}", name, e)))?;
        }
        Ok(())
    }

    /// Constants for the named track, falling back to the default profile
    pub fn resolve(&self, track_name: Option<&str>) -> &RewardConfig {
        track_name
            .and_then(|name| self.tracks.get(name))
            .unwrap_or(&self.default)
    }

    /// Names of all track-specific profiles, sorted
    pub fn track_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tracks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

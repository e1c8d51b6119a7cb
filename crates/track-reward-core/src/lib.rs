//! # track-reward-core
//!
//! Reward evaluation for a car driving a closed-loop waypoint track.
//!
//! This crate provides:
//! - Waypoint geometry with circular indexing and angle normalisation
//! - The per-step input snapshot and its validation
//! - Reward constants and per-track profiles
//! - The reward evaluator: heading error, turn detection, optimum speed,
//!   corridor positioning and the composite reward

pub mod config;
pub mod error;
pub mod evaluator;
pub mod geometry;
pub mod params;
pub mod reward;

#[cfg(test)]
mod fixtures;

pub use config::{MAX_LOOKAHEAD, RewardConfig, TrackProfiles};
pub use error::{Result, RewardError, error_codes};
pub use evaluator::{CorridorBounds, RewardEvaluator, Turn, TurnDirection};
pub use geometry::{Point, circular_index, normalize_angle};
pub use params::Params;
pub use reward::{Reward, RewardComponentDef, RewardComponents, component_defs};

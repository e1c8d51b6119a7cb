//! Reward value and its decomposition

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scalar reward with terminal flag and decomposition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    /// Total scalar reward
    pub value: f64,
    /// Episode terminated (car reached the final segment or left the track)
    pub done: bool,
    /// Decomposed components for analysis
    #[serde(default)]
    pub components: RewardComponents,
}

/// Decomposed reward components
pub type RewardComponents = HashMap<String, f64>;

pub const ALIVE: &str = "alive";
pub const SPEED: &str = "speed";
pub const HEADING: &str = "heading";
pub const CORRIDOR: &str = "corridor";
pub const TARGET: &str = "target";

/// Definition of a reward component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardComponentDef {
    /// Component name
    pub name: String,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expected range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

impl RewardComponentDef {
    fn new(name: &str, description: &str, range: [f64; 2]) -> Self {
        Self {
            name: name.to_string(),
            description: Some(description.to_string()),
            range: Some(range),
        }
    }
}

/// Components reported in every [`Reward`]
pub fn component_defs() -> Vec<RewardComponentDef> {
    vec![
        RewardComponentDef::new(ALIVE, "Base reward for staying on track", [0.0, f64::MAX]),
        RewardComponentDef::new(
            SPEED,
            "Match between speed ratio and optimum speed ratio",
            [0.0, 1.0],
        ),
        RewardComponentDef::new(
            HEADING,
            "Alignment of car heading with the track segment",
            [0.0, 1.0],
        ),
        RewardComponentDef::new(
            CORRIDOR,
            "Multiplier, 1 inside the optimized corridor",
            [0.0, 1.0],
        ),
        RewardComponentDef::new(TARGET, "Bonus for reaching the final segment", [0.0, f64::MAX]),
    ]
}

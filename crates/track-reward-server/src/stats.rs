//! Running totals across evaluation requests

use serde::Serialize;
use std::collections::HashMap;
use track_reward_core::Reward;

/// Counters kept by the server. The evaluator itself holds no state between
/// calls; these only describe traffic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvaluationStats {
    /// Snapshots scored
    pub evaluations: u64,
    /// Snapshots rejected by validation
    pub rejected: u64,
    /// Scored snapshots that ended the episode
    pub terminal: u64,
    /// Sum of all returned rewards
    pub total_reward: f64,
    /// Scored snapshots per track name
    pub per_track: HashMap<String, u64>,
}

impl EvaluationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scored snapshot
    pub fn record(&mut self, track_name: Option<&str>, reward: &Reward) {
        self.evaluations += 1;
        self.total_reward += reward.value;
        if reward.done {
            self.terminal += 1;
        }
        if let Some(name) = track_name {
            *self.per_track.entry(name.to_string()).or_default() += 1;
        }
    }

    /// Record a snapshot that failed validation
    pub fn record_rejected(&mut self) {
        self.rejected += 1;
    }

    /// Mean reward over scored snapshots
    pub fn mean_reward(&self) -> Option<f64> {
        (self.evaluations > 0).then(|| self.total_reward / self.evaluations as f64)
    }
}

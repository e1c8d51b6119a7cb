//! # track-reward-server
//!
//! JSON-RPC server exposing the track reward evaluator to an out-of-process
//! training harness.
//!
//! This crate provides:
//! - JSON-RPC message types
//! - Method handlers (initialize, evaluate, config, stats)
//! - Running evaluation statistics
//! - Line-delimited stdio transport

pub mod methods;
pub mod rpc;
pub mod stats;
pub mod transport;

pub use methods::handle_request;
pub use stats::EvaluationStats;

use tokio::sync::Mutex;
use track_reward_core::{Result, TrackProfiles};

/// Track reward JSON-RPC server
pub struct RewardServer {
    /// Reward constants per track
    profiles: TrackProfiles,
    /// Traffic counters
    stats: Mutex<EvaluationStats>,
}

impl RewardServer {
    /// Create a new server with the given profiles
    pub fn new(profiles: TrackProfiles) -> Self {
        Self {
            profiles,
            stats: Mutex::new(EvaluationStats::new()),
        }
    }

    /// Run the server on stdio transport
    pub async fn run_stdio(self) -> Result<()> {
        transport::stdio::run(self).await
    }

    /// Get the reward profiles
    pub fn profiles(&self) -> &TrackProfiles {
        &self.profiles
    }

    /// Snapshot of the evaluation counters
    pub async fn stats(&self) -> EvaluationStats {
        self.stats.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::{Request, RequestId};
    use track_reward_core::RewardConfig;

    #[test]
    fn test_server_keeps_profiles_and_counts_across_requests() {
        let mut profiles = TrackProfiles::default();
        profiles.tracks.insert("oval".into(), RewardConfig::default());
        let server = RewardServer::new(profiles);
        assert_eq!(server.profiles().track_names(), vec!["oval"]);

        let request = Request {
            jsonrpc: "2.0".into(),
            id: RequestId::Number(7),
            method: "evaluate".into(),
            params: serde_json::json!({
                "waypoints": [[0, 0], [1, 0], [1, 1], [0, 1]],
                "closest_waypoints": [0, 1],
                "x": 0.0, "y": 0.0,
                "heading": 0.0,
                "steering_angle": 0.0,
                "speed": 1.0,
                "track_width": 1.0,
                "distance_from_center": 0.0,
                "is_left_of_center": true,
                "track_name": "oval"
            }),
        };
        for _ in 0..3 {
            let resp = tokio_test::block_on(handle_request(&request, &server));
            assert!(resp.error.is_none());
        }

        let stats = tokio_test::block_on(server.stats());
        assert_eq!(stats.evaluations, 3);
        assert_eq!(stats.per_track.get("oval").copied(), Some(3));
    }
}

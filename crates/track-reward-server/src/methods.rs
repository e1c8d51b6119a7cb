//! JSON-RPC method handlers

use serde::Deserialize;
use tracing::{debug, warn};
use track_reward_core::{Params, RewardError, RewardEvaluator, component_defs, error_codes};

use crate::RewardServer;
use crate::rpc::{Request, Response, ServerInfo};

/// Dispatch one request to its handler
pub async fn handle_request(request: &Request, server: &RewardServer) -> Response {
    match request.method.as_str() {
        "initialize" => handle_initialize(request, server),
        "evaluate" => handle_evaluate(request, server).await,
        "config" => handle_config(request, server),
        "stats" => handle_stats(request, server).await,
        _ => Response::error(
            request.id.clone(),
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    }
}

fn handle_initialize(request: &Request, server: &RewardServer) -> Response {
    let info = ServerInfo {
        name: "track-reward".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Response::success(
        request.id.clone(),
        serde_json::json!({
            "serverInfo": info,
            "tracks": server.profiles().track_names(),
            "rewardComponents": component_defs(),
        }),
    )
}

async fn handle_evaluate(request: &Request, server: &RewardServer) -> Response {
    let params: Params = match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            server.stats.lock().await.record_rejected();
            return Response::error(
                request.id.clone(),
                error_codes::INVALID_PARAMS,
                format!("Invalid evaluate params: {}", e),
            );
        }
    };

    let config = server.profiles().resolve(params.track_name.as_deref());
    let reward = match RewardEvaluator::new(&params, config) {
        Ok(evaluator) => evaluator.score(),
        Err(e) => {
            warn!("Rejected snapshot: {}", e);
            server.stats.lock().await.record_rejected();
            let code = match e {
                RewardError::InvalidParams(_) => error_codes::INVALID_SNAPSHOT,
                _ => error_codes::INVALID_PARAMS,
            };
            return Response::error(request.id.clone(), code, e.to_string());
        }
    };

    debug!(value = reward.value, done = reward.done, "Scored snapshot");
    server
        .stats
        .lock()
        .await
        .record(params.track_name.as_deref(), &reward);

    match serde_json::to_value(&reward) {
        Ok(value) => Response::success(request.id.clone(), value),
        Err(e) => Response::error(
            request.id.clone(),
            error_codes::INVALID_PARAMS,
            format!("Failed to serialize reward: {}", e),
        ),
    }
}

fn handle_config(request: &Request, server: &RewardServer) -> Response {
    #[derive(Deserialize, Default)]
    struct ConfigParams {
        #[serde(default)]
        track_name: Option<String>,
    }

    let params: ConfigParams = if request.params.is_null() {
        ConfigParams::default()
    } else {
        match serde_json::from_value(request.params.clone()) {
            Ok(p) => p,
            Err(e) => {
                return Response::error(
                    request.id.clone(),
                    error_codes::INVALID_PARAMS,
                    format!("Invalid config params: {}", e),
                );
            }
        }
    };

    let config = server.profiles().resolve(params.track_name.as_deref());
    match serde_json::to_value(config) {
        Ok(value) => Response::success(request.id.clone(), value),
        Err(e) => Response::error(
            request.id.clone(),
            error_codes::INVALID_PARAMS,
            format!("Failed to serialize config: {}", e),
        ),
    }
}

async fn handle_stats(request: &Request, server: &RewardServer) -> Response {
    let stats = server.stats().await;
    Response::success(
        request.id.clone(),
        serde_json::json!({
            "evaluations": stats.evaluations,
            "rejected": stats.rejected,
            "terminal": stats.terminal,
            "total_reward": stats.total_reward,
            "mean_reward": stats.mean_reward(),
            "per_track": stats.per_track,
        }),
    )
}

//! Track reward server
//!
//! Usage: `track-reward [CONFIG] [--score SNAPSHOT]`
//!
//! - `CONFIG` (or `TRACK_REWARD_CONFIG`): JSON file of reward profiles;
//!   built-in defaults when absent
//! - `--score SNAPSHOT`: score one snapshot JSON file and print the reward
//! - otherwise: serve line-delimited JSON-RPC on stdin/stdout

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use track_reward_core::{Params, RewardEvaluator, TrackProfiles};
use track_reward_server::RewardServer;

/// Command-line arguments for the track reward binary
#[derive(Parser, Debug)]
#[command(name = "track-reward", version, about)]
struct Cli {
    /// JSON file of reward profiles; built-in defaults when absent
    #[arg(env = "TRACK_REWARD_CONFIG")]
    config: Option<PathBuf>,

    /// Score one snapshot JSON file, print the reward and exit
    #[arg(long)]
    score: Option<PathBuf>,
}

fn load_profiles(path: Option<&Path>) -> Result<TrackProfiles> {
    match path {
        Some(path) => {
            let profiles = TrackProfiles::load(path)
                .with_context(|| format!("loading reward config {}", path.display()))?;
            info!(
                "Loaded reward config {} ({} track profiles)",
                path.display(),
                profiles.tracks.len()
            );
            Ok(profiles)
        }
        None => {
            info!("No reward config given, using defaults");
            Ok(TrackProfiles::default())
        }
    }
}

fn score_file(profiles: &TrackProfiles, path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let params: Params = serde_json::from_str(&text)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;

    let config = profiles.resolve(params.track_name.as_deref());
    let reward = RewardEvaluator::new(&params, config)?.score();
    println!("{}", serde_json::to_string_pretty(&reward)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries protocol responses
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Cli::parse();
    let profiles = load_profiles(args.config.as_deref())?;

    if let Some(path) = args.score {
        return score_file(&profiles, &path);
    }

    let server = RewardServer::new(profiles);
    server.run_stdio().await?;
    Ok(())
}

//! Console logging backend.

use super::{EpisodeLogger, EpisodeSummary};
use crate::env::AgentMap;

/// Logger that reports episodes via tracing.
#[derive(Default)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }
}

fn format_returns<T: std::fmt::Display>(returns: &AgentMap<T>) -> String {
    returns
        .iter()
        .map(|(agent, ret)| format!("{}={:.4}", agent, ret))
        .collect::<Vec<_>>()
        .join(", ")
}

impl EpisodeLogger for ConsoleLogger {
    fn log_episode(&self, episode: u64, length: u32, returns: &AgentMap<f32>) {
        tracing::info!(
            episode,
            length,
            "Episode {}: {}",
            episode,
            format_returns(returns)
        );
    }

    fn log_summary(&self, summary: &EpisodeSummary) {
        tracing::info!(
            episodes = summary.episodes,
            mean_length = summary.mean_length(),
            "Mean returns: {}",
            format_returns(&summary.mean_returns())
        );
    }
}

//! Episode logger trait and summary accumulation.

use crate::env::AgentMap;

/// Trait for reporting finished episodes to a backend.
pub trait EpisodeLogger {
    /// Log one finished episode.
    fn log_episode(&self, episode: u64, length: u32, returns: &AgentMap<f32>);

    /// Log the aggregate over a run.
    fn log_summary(&self, summary: &EpisodeSummary);
}

/// A logger that does nothing.
pub struct NoOpLogger;

impl EpisodeLogger for NoOpLogger {
    fn log_episode(&self, _episode: u64, _length: u32, _returns: &AgentMap<f32>) {}
    fn log_summary(&self, _summary: &EpisodeSummary) {}
}

/// Running totals over finished episodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeSummary {
    pub episodes: u64,
    pub total_length: u64,
    pub total_returns: AgentMap<f64>,
}

impl EpisodeSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, length: u32, returns: &AgentMap<f32>) {
        self.episodes += 1;
        self.total_length += length as u64;
        for (&agent, &ret) in returns {
            *self.total_returns.entry(agent).or_insert(0.0) += ret as f64;
        }
    }

    pub fn mean_length(&self) -> f64 {
        if self.episodes == 0 {
            return 0.0;
        }
        self.total_length as f64 / self.episodes as f64
    }

    pub fn mean_returns(&self) -> AgentMap<f64> {
        let n = self.episodes.max(1) as f64;
        self.total_returns
            .iter()
            .map(|(&agent, &total)| (agent, total / n))
            .collect()
    }
}

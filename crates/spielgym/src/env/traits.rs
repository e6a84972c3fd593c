//! Core environment trait definitions.

use crate::game::{Action, AgentId};
use crate::spaces::Dict;
use crate::{Result, SpielError};
use ndarray::ArrayD;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Per-agent payload keyed by agent id
pub type AgentMap<T> = BTreeMap<AgentId, T>;

/// Free-form reset options. Accepted for interface parity; the game adapter
/// ignores them.
pub type ResetOptions = HashMap<String, String>;

/// Reserved key carrying the aggregate flag in serialized payloads
pub const ALL_AGENTS_KEY: &str = "__all__";

/// Key into a [`DoneFlags`] mapping
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentKey {
    Agent(AgentId),
    /// The `"__all__"` aggregate
    All,
}

impl fmt::Display for AgentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKey::Agent(id) => write!(f, "{}", id),
            AgentKey::All => f.write_str(ALL_AGENTS_KEY),
        }
    }
}

/// Per-agent terminated or truncated flags plus the `"__all__"` aggregate
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DoneFlags {
    #[serde(flatten)]
    pub agents: AgentMap<bool>,
    #[serde(rename = "__all__")]
    pub all: bool,
}

impl DoneFlags {
    /// Every agent and the aggregate set to `value`
    pub fn uniform(agents: &[AgentId], value: bool) -> Self {
        Self {
            agents: agents.iter().map(|&id| (id, value)).collect(),
            all: value,
        }
    }

    pub fn get(&self, key: AgentKey) -> Option<bool> {
        match key {
            AgentKey::Agent(id) => self.agents.get(&id).copied(),
            AgentKey::All => Some(self.all),
        }
    }
}

/// Information returned from environment steps
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EnvInfo {
    /// Final per-agent returns (if done)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_returns: Option<AgentMap<f32>>,
    /// Episode length in steps (if done)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_length: Option<u32>,
    /// Custom metrics (kept minimal)
    #[serde(skip_serializing_if = "smallvec::SmallVec::is_empty")]
    pub extra: smallvec::SmallVec<[(&'static str, f32); 4]>,
}

impl EnvInfo {
    /// Create empty info
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_episode_stats(mut self, returns: AgentMap<f32>, len: u32) -> Self {
        self.episode_returns = Some(returns);
        self.episode_length = Some(len);
        self
    }

    /// Add a custom metric (use rarely)
    pub fn with_extra(mut self, key: &'static str, value: f32) -> Self {
        self.extra.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<f32> {
        match key {
            "episode_length" => self.episode_length.map(|l| l as f32),
            _ => self.extra.iter().find(|(k, _)| *k == key).map(|(_, v)| *v),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.episode_returns.is_none() && self.episode_length.is_none() && self.extra.is_empty()
    }
}

/// Result from a multi-agent environment step
#[derive(Clone, Debug, Serialize)]
pub struct MultiAgentStepResult {
    /// Observations for the agents expected to act next
    pub observations: AgentMap<ArrayD<f32>>,
    /// Rewards for every agent
    pub rewards: AgentMap<f32>,
    pub terminated: DoneFlags,
    pub truncated: DoneFlags,
    pub info: EnvInfo,
}

impl MultiAgentStepResult {
    /// Whether the whole episode is over
    pub fn done(&self) -> bool {
        self.terminated.all || self.truncated.all
    }
}

/// How `render` presents the state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Print to stdout
    Human,
    /// Return the text
    Ansi,
}

impl FromStr for RenderMode {
    type Err = SpielError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "human" => Ok(RenderMode::Human),
            "ansi" => Ok(RenderMode::Ansi),
            other => Err(SpielError::Config(format!("unknown render mode '{}'", other))),
        }
    }
}

/// Core trait for multi-agent environments.
///
/// Agents are identified by the fixed ids in `possible_agents`. Every
/// payload is keyed by agent id; only the agents expected to act next
/// receive an observation.
///
/// # Example
///
/// ```rust,ignore
/// let mut env = SpielEnv::new(TicTacToe::new());
/// let (obs, _) = env.reset(Some(42), None)?;
/// let acting = *obs.keys().next().unwrap();
/// let result = env.step(&AgentMap::from([(acting, 4)]))?;
/// ```
pub trait MultiAgentEnv {
    /// All agent ids, fixed for the lifetime of the environment
    fn possible_agents(&self) -> &[AgentId];

    /// Per-agent observation spaces
    fn observation_space(&self) -> &Dict;

    /// Per-agent action spaces
    fn action_space(&self) -> &Dict;

    /// Start a new episode
    ///
    /// # Returns
    /// Observations of the agents to act first, and an info record
    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&ResetOptions>,
    ) -> Result<(AgentMap<ArrayD<f32>>, EnvInfo)>;

    /// Apply the actions of the acting agents
    fn step(&mut self, actions: &AgentMap<Action>) -> Result<MultiAgentStepResult>;

    /// Optional: Render the environment
    fn render(&self, _mode: Option<RenderMode>) -> Option<String> {
        None
    }

    fn num_agents(&self) -> usize {
        self.possible_agents().len()
    }
}

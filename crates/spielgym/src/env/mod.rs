//! Multi-agent environment interface and the game adapter.
//!
//! [`MultiAgentEnv`] is the contract a training loop drives. [`SpielEnv`]
//! implements it on top of any [`Game`](crate::game::Game), draining chance
//! nodes internally and translating per-agent actions into engine calls.

mod chance;
mod config;
mod recovery;
mod spiel;
mod traits;
mod wrappers;

pub use chance::solve_chance_nodes;
pub use config::SpielEnvConfig;
pub use recovery::{RecoveryPolicy, DEFAULT_ILLEGAL_ACTION_PENALTY};
pub use spiel::SpielEnv;
pub use traits::{
    AgentKey, AgentMap, DoneFlags, EnvInfo, MultiAgentEnv, MultiAgentStepResult, RenderMode,
    ResetOptions, ALL_AGENTS_KEY,
};
pub use wrappers::EpisodeStats;

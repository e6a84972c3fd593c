//! # spielgym
//!
//! Multi-agent reinforcement-learning environments over game-theory engines.
//!
//! ## Overview
//!
//! spielgym provides:
//! - The `Game` / `State` capability an engine implements
//! - Gymnasium-style observation and action spaces
//! - `SpielEnv`, which turns any `Game` into a `MultiAgentEnv`: chance
//!   nodes are sampled away, observations are flattened per agent, and
//!   illegal sequential actions go through a configurable recovery policy
//! - Episode statistics and logging helpers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spielgym::prelude::*;
//! use spielgym_games::KuhnPoker;
//!
//! let mut env = SpielEnv::new(KuhnPoker::new());
//! let (obs, _) = env.reset(Some(42), None)?;
//!
//! // Player 0 acts first and bets
//! let result = env.step(&AgentMap::from([(0, 1)]))?;
//! ```

pub mod env;
pub mod game;
pub mod log;
pub mod spaces;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::env::{
        AgentKey, AgentMap, DoneFlags, EnvInfo, EpisodeStats, MultiAgentEnv,
        MultiAgentStepResult, RecoveryPolicy, RenderMode, SpielEnv, SpielEnvConfig,
    };
    pub use crate::game::{Action, AgentId, Dynamics, Game, GameError, Player, State};
    pub use crate::log::{ConsoleLogger, EpisodeLogger, EpisodeSummary, NoOpLogger};
    pub use crate::spaces::*;
    pub use crate::{Result, SpielError};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

use crate::game::{AgentId, GameError, Player};

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum SpielError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Environment stepped before reset")]
    NotReset,

    #[error("Episode already finished; call reset")]
    EpisodeFinished,

    #[error("No action submitted for acting agent {0}")]
    MissingAction(AgentId),

    #[error("Expected a simultaneous-move node, found {0}")]
    NotSimultaneous(Player),

    #[error("Unexpected node for this game's dynamics: {0}")]
    UnexpectedNode(Player),

    #[error("No legal actions for agent {0}")]
    NoLegalActions(AgentId),

    #[error("Invalid chance outcomes: {0}")]
    ChanceOutcomes(String),

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, SpielError>;

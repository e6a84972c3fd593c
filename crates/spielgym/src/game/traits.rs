//! Core game and state trait definitions.

use super::{Action, AgentId, GameError, Player};
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How agents take turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dynamics {
    /// One agent acts at each decision node.
    Sequential,
    /// All agents act together at each decision node.
    Simultaneous,
}

impl fmt::Display for Dynamics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamics::Sequential => write!(f, "sequential"),
            Dynamics::Simultaneous => write!(f, "simultaneous"),
        }
    }
}

/// Immutable description of a game.
///
/// # Example
///
/// ```rust,ignore
/// let game = KuhnPoker::new();
/// let mut state = game.new_initial_state();
/// assert!(state.is_chance_node());
/// ```
pub trait Game {
    /// The per-playthrough cursor type.
    type State: State;

    /// Short name used in logs and listings.
    fn name(&self) -> &str;

    /// Number of players (agents), fixed for the game.
    fn num_players(&self) -> usize;

    /// Turn structure at decision nodes.
    fn dynamics(&self) -> Dynamics;

    /// Number of elements in every observation tensor.
    fn observation_tensor_size(&self) -> usize;

    /// Size of the action range `0..num_distinct_actions`.
    fn num_distinct_actions(&self) -> usize;

    /// Create a state positioned at the root of the game tree.
    fn new_initial_state(&self) -> Self::State;

    /// Sum of all players' returns at every terminal, if constant.
    fn utility_sum(&self) -> Option<f32> {
        None
    }
}

/// Mutable cursor into one playthrough.
///
/// `Display` gives the human-readable dump used for rendering.
pub trait State: fmt::Display {
    /// Who acts at the current node.
    fn current_player(&self) -> Player;

    /// Legal actions for the agent to act. Empty at chance, simultaneous
    /// and terminal nodes.
    fn legal_actions(&self) -> Vec<Action>;

    /// `(outcome, probability)` pairs at a chance node; empty elsewhere.
    fn chance_outcomes(&self) -> Vec<(Action, f64)>;

    /// Apply one action at a chance or sequential decision node.
    fn apply_action(&mut self, action: Action) -> Result<(), GameError>;

    /// Apply one action per player, in agent-index order, at a
    /// simultaneous node.
    fn apply_actions(&mut self, actions: &[Action]) -> Result<(), GameError>;

    /// Cumulative return of every player so far.
    fn returns(&self) -> Vec<f32>;

    /// Whether the playthrough has ended.
    fn is_terminal(&self) -> bool;

    /// Observation of the current state from `player`'s point of view.
    fn observation_tensor(&self, player: AgentId) -> ArrayD<f32>;

    fn is_chance_node(&self) -> bool {
        self.current_player() == Player::Chance
    }

    fn is_simultaneous_node(&self) -> bool {
        self.current_player() == Player::Simultaneous
    }
}

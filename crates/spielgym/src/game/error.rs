//! Failure signal raised by game engines.

use super::{Action, Player};

/// Domain error returned by a [`State`](super::State) when asked to do
/// something the rules forbid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("Illegal action {action} for {player}")]
    IllegalAction { player: Player, action: Action },

    #[error("Expected a {expected} node, found {found}")]
    WrongNode {
        expected: &'static str,
        found: Player,
    },

    #[error("Expected {expected} actions, got {found}")]
    ActionCount { expected: usize, found: usize },
}

//! Whose turn it is.

use super::AgentId;
use std::fmt;

/// The entity acting at the current node.
///
/// Engines traditionally encode the non-agent cases as negative sentinels;
/// [`Player::from_raw`] and [`Player::raw`] convert to and from that form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// A decision node owned by one agent.
    Agent(AgentId),
    /// A node resolved by sampling the engine's outcome distribution.
    Chance,
    /// A node where every agent submits an action at once.
    Simultaneous,
    /// No further actions are possible.
    Terminal,
}

impl Player {
    pub const CHANCE_ID: i32 = -1;
    pub const SIMULTANEOUS_ID: i32 = -2;
    pub const INVALID_ID: i32 = -3;
    pub const TERMINAL_ID: i32 = -4;

    /// Decode an engine player id. Returns `None` for the invalid sentinel
    /// and any other unknown negative value.
    pub fn from_raw(id: i32) -> Option<Self> {
        match id {
            Self::CHANCE_ID => Some(Self::Chance),
            Self::SIMULTANEOUS_ID => Some(Self::Simultaneous),
            Self::TERMINAL_ID => Some(Self::Terminal),
            id if id >= 0 => Some(Self::Agent(id as AgentId)),
            _ => None,
        }
    }

    /// Encode as an engine player id.
    pub fn raw(&self) -> i32 {
        match self {
            Self::Agent(id) => *id as i32,
            Self::Chance => Self::CHANCE_ID,
            Self::Simultaneous => Self::SIMULTANEOUS_ID,
            Self::Terminal => Self::TERMINAL_ID,
        }
    }

    /// The agent id, if this is a decision node for a single agent.
    pub fn agent(&self) -> Option<AgentId> {
        match self {
            Self::Agent(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Agent(id) => write!(f, "player {}", id),
            Self::Chance => write!(f, "chance"),
            Self::Simultaneous => write!(f, "simultaneous"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}

//! Game/state capability consumed by the environment adapter.
//!
//! A `Game` is an immutable description (player count, dynamics, tensor and
//! action sizes) and a factory for `State`s. A `State` is a mutable cursor
//! into one playthrough. Engines implement both traits; the adapter in
//! [`crate::env`] only talks to them through this interface.

mod error;
mod player;
mod traits;

pub use error::GameError;
pub use player::Player;
pub use traits::{Dynamics, Game, State};

/// Agent identifier, `0..num_players`.
pub type AgentId = u32;

/// Index into the game's distinct action range.
pub type Action = usize;

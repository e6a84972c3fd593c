//! Reference games for spielgym.
//!
//! Small engines implementing the `Game` / `State` capability, used for
//! testing the adapter and for the CLI:
//! - `KuhnPoker` - sequential, chained chance deals, zero-sum
//! - `TicTacToe` - sequential, illegal moves possible, zero-sum
//! - `RepeatedRps` - simultaneous rock-paper-scissors over fixed rounds

mod kuhn_poker;
mod repeated_rps;
mod tic_tac_toe;

pub use kuhn_poker::{KuhnPoker, KuhnPokerState};
pub use repeated_rps::{RepeatedRps, RepeatedRpsState};
pub use tic_tac_toe::{TicTacToe, TicTacToeState};

/// Names accepted by the CLI
pub const GAME_NAMES: &[&str] = &["kuhn_poker", "tic_tac_toe", "repeated_rps"];

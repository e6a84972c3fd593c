//! Repeated rock-paper-scissors.

use ndarray::{Array1, ArrayD};
use spielgym::game::{Action, AgentId, Dynamics, Game, GameError, Player, State};
use std::fmt;

const MOVES: usize = 3;
const NAMES: [&str; MOVES] = ["rock", "paper", "scissors"];

/// Rock (0), paper (1), scissors (2) played simultaneously for a fixed
/// number of rounds. A round win scores +1 and a loss -1; returns are
/// cumulative over rounds.
///
/// Observation: [own last move one-hot (3), opponent last move one-hot (3),
/// fraction of rounds remaining (1)]
#[derive(Clone, Debug)]
pub struct RepeatedRps {
    rounds: usize,
}

impl RepeatedRps {
    pub fn new(rounds: usize) -> Self {
        assert!(rounds > 0, "RepeatedRps needs at least one round");
        Self { rounds }
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

impl Default for RepeatedRps {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Game for RepeatedRps {
    type State = RepeatedRpsState;

    fn name(&self) -> &str {
        "repeated_rps"
    }

    fn num_players(&self) -> usize {
        2
    }

    fn dynamics(&self) -> Dynamics {
        Dynamics::Simultaneous
    }

    fn observation_tensor_size(&self) -> usize {
        2 * MOVES + 1
    }

    fn num_distinct_actions(&self) -> usize {
        MOVES
    }

    fn new_initial_state(&self) -> RepeatedRpsState {
        RepeatedRpsState {
            rounds: self.rounds,
            history: Vec::with_capacity(self.rounds),
            returns: [0.0; 2],
        }
    }

    fn utility_sum(&self) -> Option<f32> {
        Some(0.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RepeatedRpsState {
    rounds: usize,
    history: Vec<[Action; 2]>,
    returns: [f32; 2],
}

impl RepeatedRpsState {
    /// Joint moves played so far
    pub fn history(&self) -> &[[Action; 2]] {
        &self.history
    }
}

/// +1 if `a` beats `b`, -1 if it loses, 0 on a tie.
fn score(a: Action, b: Action) -> f32 {
    match (MOVES + a - b) % MOVES {
        0 => 0.0,
        1 => 1.0,
        _ => -1.0,
    }
}

impl State for RepeatedRpsState {
    fn current_player(&self) -> Player {
        if self.is_terminal() {
            Player::Terminal
        } else {
            Player::Simultaneous
        }
    }

    /// Every move is always available; there is no single acting player.
    fn legal_actions(&self) -> Vec<Action> {
        Vec::new()
    }

    fn chance_outcomes(&self) -> Vec<(Action, f64)> {
        Vec::new()
    }

    fn apply_action(&mut self, _action: Action) -> Result<(), GameError> {
        Err(GameError::WrongNode {
            expected: "sequential",
            found: self.current_player(),
        })
    }

    fn apply_actions(&mut self, actions: &[Action]) -> Result<(), GameError> {
        if self.is_terminal() {
            return Err(GameError::WrongNode {
                expected: "simultaneous",
                found: Player::Terminal,
            });
        }
        let &[a, b] = actions else {
            return Err(GameError::ActionCount {
                expected: 2,
                found: actions.len(),
            });
        };
        for (id, &action) in actions.iter().enumerate() {
            if action >= MOVES {
                return Err(GameError::IllegalAction {
                    player: Player::Agent(id as AgentId),
                    action,
                });
            }
        }

        let s = score(a, b);
        self.returns[0] += s;
        self.returns[1] -= s;
        self.history.push([a, b]);
        Ok(())
    }

    fn returns(&self) -> Vec<f32> {
        self.returns.to_vec()
    }

    fn is_terminal(&self) -> bool {
        self.history.len() >= self.rounds
    }

    fn observation_tensor(&self, player: AgentId) -> ArrayD<f32> {
        let mut obs = vec![0.0; 2 * MOVES + 1];
        if let Some(last) = self.history.last() {
            let me = player as usize;
            obs[last[me]] = 1.0;
            obs[MOVES + last[1 - me]] = 1.0;
        }
        obs[2 * MOVES] = (self.rounds - self.history.len()) as f32 / self.rounds as f32;
        Array1::from(obs).into_dyn()
    }
}

impl fmt::Display for RepeatedRpsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Round {}/{} | Score: {} {}",
            self.history.len(),
            self.rounds,
            self.returns[0],
            self.returns[1]
        )?;
        if let Some(&[a, b]) = self.history.last() {
            write!(f, " | Last: {} vs {}", NAMES[a], NAMES[b])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_cycle() {
        assert_eq!(score(1, 0), 1.0);
        assert_eq!(score(2, 1), 1.0);
        assert_eq!(score(0, 2), 1.0);
        assert_eq!(score(0, 1), -1.0);
        assert_eq!(score(2, 2), 0.0);
    }

    #[test]
    fn test_rounds_accumulate() {
        let mut state = RepeatedRps::new(2).new_initial_state();
        assert_eq!(state.current_player(), Player::Simultaneous);

        state.apply_actions(&[1, 0]).unwrap();
        assert_eq!(state.returns(), vec![1.0, -1.0]);
        assert!(!state.is_terminal());

        state.apply_actions(&[1, 0]).unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.returns(), vec![2.0, -2.0]);
        assert_eq!(state.to_string(), "Round 2/2 | Score: 2 -2 | Last: paper vs rock");
    }

    #[test]
    fn test_rejects_bad_joint_actions() {
        let mut state = RepeatedRps::new(1).new_initial_state();

        assert_eq!(
            state.apply_actions(&[0]).unwrap_err(),
            GameError::ActionCount {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            state.apply_actions(&[0, 3]).unwrap_err(),
            GameError::IllegalAction {
                player: Player::Agent(1),
                action: 3
            }
        );
        assert!(state.apply_action(0).is_err());
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_observation_is_player_relative() {
        let mut state = RepeatedRps::new(4).new_initial_state();
        state.apply_actions(&[2, 0]).unwrap();

        let obs0 = state.observation_tensor(0);
        let obs1 = state.observation_tensor(1);
        assert_eq!(
            obs0.as_slice().unwrap(),
            &[0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.75]
        );
        assert_eq!(
            obs1.as_slice().unwrap(),
            &[1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.75]
        );
    }
}

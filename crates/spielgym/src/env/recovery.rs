//! Handling of illegal actions submitted at sequential nodes.
//!
//! Action spaces are declared over the full discrete range while only a
//! subset is legal at any node, and legal sets are not published to the
//! caller. The policy here decides what a submission outside that subset
//! turns into.

use crate::game::{Action, AgentId, GameError, State};
use crate::{Result, SpielError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Reward adjustment for an agent whose action was replaced.
pub const DEFAULT_ILLEGAL_ACTION_PENALTY: f32 = -0.1;

/// What to do when the engine rejects a sequential action as illegal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecoveryPolicy {
    /// Play a uniformly random legal action instead and add `penalty` to
    /// the offending agent's reward for this step.
    RandomLegal { penalty: f32 },
    /// Surface the engine's error to the caller.
    Reject,
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        RecoveryPolicy::RandomLegal {
            penalty: DEFAULT_ILLEGAL_ACTION_PENALTY,
        }
    }
}

impl RecoveryPolicy {
    /// Recover from `error`, raised when `agent` submitted `action`.
    ///
    /// # Returns
    /// The reward adjustment to apply to `agent`
    pub fn recover<S, R>(
        &self,
        state: &mut S,
        agent: AgentId,
        action: Action,
        error: GameError,
        rng: &mut R,
    ) -> Result<f32>
    where
        S: State + ?Sized,
        R: Rng + ?Sized,
    {
        match *self {
            RecoveryPolicy::Reject => Err(error.into()),
            RecoveryPolicy::RandomLegal { penalty } => {
                let legal = state.legal_actions();
                let &substitute = legal.choose(rng).ok_or(SpielError::NoLegalActions(agent))?;
                tracing::warn!(
                    agent,
                    action,
                    substitute,
                    penalty,
                    "Illegal action replaced by random legal action"
                );
                state.apply_action(substitute)?;
                Ok(penalty)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;
    use ndarray::{ArrayD, IxDyn};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fmt;

    struct Picker {
        legal: Vec<Action>,
        played: Option<Action>,
    }

    impl fmt::Display for Picker {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self.played)
        }
    }

    impl State for Picker {
        fn current_player(&self) -> Player {
            Player::Agent(0)
        }
        fn legal_actions(&self) -> Vec<Action> {
            self.legal.clone()
        }
        fn chance_outcomes(&self) -> Vec<(Action, f64)> {
            vec![]
        }
        fn apply_action(&mut self, action: Action) -> std::result::Result<(), GameError> {
            if !self.legal.contains(&action) {
                return Err(GameError::IllegalAction {
                    player: Player::Agent(0),
                    action,
                });
            }
            self.played = Some(action);
            Ok(())
        }
        fn apply_actions(&mut self, _actions: &[Action]) -> std::result::Result<(), GameError> {
            unimplemented!()
        }
        fn returns(&self) -> Vec<f32> {
            vec![0.0]
        }
        fn is_terminal(&self) -> bool {
            self.played.is_some()
        }
        fn observation_tensor(&self, _player: AgentId) -> ArrayD<f32> {
            ArrayD::zeros(IxDyn(&[1]))
        }
    }

    fn illegal(action: Action) -> GameError {
        GameError::IllegalAction {
            player: Player::Agent(0),
            action,
        }
    }

    #[test]
    fn test_random_legal_substitutes_and_penalizes() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = Picker {
            legal: vec![2, 5],
            played: None,
        };

        let penalty = RecoveryPolicy::default()
            .recover(&mut state, 0, 9, illegal(9), &mut rng)
            .unwrap();

        assert_eq!(penalty, DEFAULT_ILLEGAL_ACTION_PENALTY);
        assert!(matches!(state.played, Some(2) | Some(5)));
    }

    #[test]
    fn test_reject_surfaces_error() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = Picker {
            legal: vec![1],
            played: None,
        };

        let err = RecoveryPolicy::Reject
            .recover(&mut state, 0, 4, illegal(4), &mut rng)
            .unwrap_err();

        assert!(matches!(
            err,
            SpielError::Game(GameError::IllegalAction { action: 4, .. })
        ));
        assert!(state.played.is_none());
    }

    #[test]
    fn test_no_legal_actions() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = Picker {
            legal: vec![],
            played: None,
        };

        let err = RecoveryPolicy::default()
            .recover(&mut state, 0, 0, illegal(0), &mut rng)
            .unwrap_err();
        assert!(matches!(err, SpielError::NoLegalActions(0)));
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&RecoveryPolicy::default()).unwrap();
        assert_eq!(json, r#"{"kind":"random_legal","penalty":-0.1}"#);

        let parsed: RecoveryPolicy = serde_json::from_str(r#"{"kind":"reject"}"#).unwrap();
        assert_eq!(parsed, RecoveryPolicy::Reject);
    }
}

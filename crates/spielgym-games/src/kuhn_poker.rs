//! Kuhn poker.

use ndarray::{Array1, ArrayD};
use spielgym::game::{Action, AgentId, Dynamics, Game, GameError, Player, State};
use std::fmt;

const NUM_CARDS: usize = 3;
const PASS: Action = 0;
const BET: Action = 1;
const ANTE: f32 = 1.0;

/// Two-player Kuhn poker
///
/// Each player antes one chip and is dealt one of three cards by two
/// consecutive chance nodes. Players then pass (0) or bet (1); a bet facing
/// a pass is a fold, two passes or two bets go to showdown.
///
/// Observation: [player one-hot (2), private card one-hot (3), contributions (2)]
#[derive(Clone, Debug, Default)]
pub struct KuhnPoker;

impl KuhnPoker {
    pub fn new() -> Self {
        Self
    }
}

impl Game for KuhnPoker {
    type State = KuhnPokerState;

    fn name(&self) -> &str {
        "kuhn_poker"
    }

    fn num_players(&self) -> usize {
        2
    }

    fn dynamics(&self) -> Dynamics {
        Dynamics::Sequential
    }

    fn observation_tensor_size(&self) -> usize {
        2 + NUM_CARDS + 2
    }

    fn num_distinct_actions(&self) -> usize {
        2
    }

    fn new_initial_state(&self) -> KuhnPokerState {
        KuhnPokerState {
            cards: Vec::with_capacity(2),
            history: Vec::new(),
            contributions: [ANTE; 2],
        }
    }

    fn utility_sum(&self) -> Option<f32> {
        Some(0.0)
    }
}

/// One hand of Kuhn poker
#[derive(Clone, Debug, PartialEq)]
pub struct KuhnPokerState {
    /// Card of each player, in deal order
    cards: Vec<usize>,
    history: Vec<Action>,
    contributions: [f32; 2],
}

impl KuhnPokerState {
    pub fn cards(&self) -> &[usize] {
        &self.cards
    }

    pub fn history(&self) -> &[Action] {
        &self.history
    }

    fn winner(&self) -> usize {
        let folded = self.history.last() == Some(&PASS) && self.history.contains(&BET);
        if folded {
            // The last player to act folded
            1 - (self.history.len() - 1) % 2
        } else if self.cards[0] > self.cards[1] {
            0
        } else {
            1
        }
    }
}

impl State for KuhnPokerState {
    fn current_player(&self) -> Player {
        if self.cards.len() < 2 {
            Player::Chance
        } else if self.is_terminal() {
            Player::Terminal
        } else {
            Player::Agent((self.history.len() % 2) as AgentId)
        }
    }

    fn legal_actions(&self) -> Vec<Action> {
        match self.current_player() {
            Player::Agent(_) => vec![PASS, BET],
            _ => Vec::new(),
        }
    }

    fn chance_outcomes(&self) -> Vec<(Action, f64)> {
        if self.cards.len() >= 2 {
            return Vec::new();
        }
        let remaining: Vec<usize> = (0..NUM_CARDS).filter(|c| !self.cards.contains(c)).collect();
        let p = 1.0 / remaining.len() as f64;
        remaining.into_iter().map(|c| (c, p)).collect()
    }

    fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        match self.current_player() {
            Player::Chance if action < NUM_CARDS && !self.cards.contains(&action) => {
                self.cards.push(action);
                Ok(())
            }
            Player::Agent(id) if action == PASS || action == BET => {
                if action == BET {
                    self.contributions[id as usize] += 1.0;
                }
                self.history.push(action);
                Ok(())
            }
            player => Err(GameError::IllegalAction { player, action }),
        }
    }

    fn apply_actions(&mut self, _actions: &[Action]) -> Result<(), GameError> {
        Err(GameError::WrongNode {
            expected: "simultaneous",
            found: self.current_player(),
        })
    }

    fn returns(&self) -> Vec<f32> {
        if !self.is_terminal() {
            return vec![0.0; 2];
        }
        let winner = self.winner();
        let loser = 1 - winner;
        let mut returns = vec![0.0; 2];
        returns[winner] = self.contributions[loser];
        returns[loser] = -self.contributions[loser];
        returns
    }

    fn is_terminal(&self) -> bool {
        match self.history.as_slice() {
            [_, _, _] => true,
            [PASS, BET] => false,
            [_, _] => true,
            _ => false,
        }
    }

    fn observation_tensor(&self, player: AgentId) -> ArrayD<f32> {
        let mut obs = vec![0.0; 2 + NUM_CARDS + 2];
        obs[player as usize] = 1.0;
        if let Some(&card) = self.cards.get(player as usize) {
            obs[2 + card] = 1.0;
        }
        obs[2 + NUM_CARDS] = self.contributions[0];
        obs[2 + NUM_CARDS + 1] = self.contributions[1];
        Array1::from(obs).into_dyn()
    }
}

impl fmt::Display for KuhnPokerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [char; NUM_CARDS] = ['J', 'Q', 'K'];
        let cards: Vec<String> = self.cards.iter().map(|&c| NAMES[c].to_string()).collect();
        let history: String = self
            .history
            .iter()
            .map(|&a| if a == BET { 'b' } else { 'p' })
            .collect();
        write!(f, "Cards: {} | History: {}", cards.join(" "), history)
    }
}

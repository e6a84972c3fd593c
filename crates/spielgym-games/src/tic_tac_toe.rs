//! Tic-tac-toe.

use ndarray::{Array3, ArrayD};
use spielgym::game::{Action, AgentId, Dynamics, Game, GameError, Player, State};
use std::fmt;

const CELLS: usize = 9;
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Empty,
    Nought,
    Cross,
}

/// Tic-tac-toe on a 3x3 board
///
/// Player 0 plays crosses and moves first. Actions are cell indices in
/// row-major order; occupied cells are illegal.
///
/// Observation: a [3, 3, 3] tensor of planes (empty, nought, cross).
#[derive(Clone, Debug, Default)]
pub struct TicTacToe;

impl TicTacToe {
    pub fn new() -> Self {
        Self
    }
}

impl Game for TicTacToe {
    type State = TicTacToeState;

    fn name(&self) -> &str {
        "tic_tac_toe"
    }

    fn num_players(&self) -> usize {
        2
    }

    fn dynamics(&self) -> Dynamics {
        Dynamics::Sequential
    }

    fn observation_tensor_size(&self) -> usize {
        3 * CELLS
    }

    fn num_distinct_actions(&self) -> usize {
        CELLS
    }

    fn new_initial_state(&self) -> TicTacToeState {
        TicTacToeState {
            board: [Cell::Empty; CELLS],
            moves: 0,
        }
    }

    fn utility_sum(&self) -> Option<f32> {
        Some(0.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TicTacToeState {
    board: [Cell; CELLS],
    moves: usize,
}

impl TicTacToeState {
    /// Number of moves played
    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn is_occupied(&self, cell: usize) -> bool {
        self.board.get(cell).map_or(false, |&c| c != Cell::Empty)
    }

    fn line_owner(&self) -> Option<Cell> {
        LINES.iter().find_map(|&[a, b, c]| {
            let owner = self.board[a];
            (owner != Cell::Empty && owner == self.board[b] && owner == self.board[c])
                .then_some(owner)
        })
    }

    fn mark_of(player: usize) -> Cell {
        if player == 0 {
            Cell::Cross
        } else {
            Cell::Nought
        }
    }
}

impl State for TicTacToeState {
    fn current_player(&self) -> Player {
        if self.is_terminal() {
            Player::Terminal
        } else {
            Player::Agent((self.moves % 2) as AgentId)
        }
    }

    fn legal_actions(&self) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..CELLS).filter(|&c| !self.is_occupied(c)).collect()
    }

    fn chance_outcomes(&self) -> Vec<(Action, f64)> {
        Vec::new()
    }

    fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        let player = self.current_player();
        match player {
            Player::Agent(id) if action < CELLS && !self.is_occupied(action) => {
                self.board[action] = Self::mark_of(id as usize);
                self.moves += 1;
                Ok(())
            }
            _ => Err(GameError::IllegalAction { player, action }),
        }
    }

    fn apply_actions(&mut self, _actions: &[Action]) -> Result<(), GameError> {
        Err(GameError::WrongNode {
            expected: "simultaneous",
            found: self.current_player(),
        })
    }

    fn returns(&self) -> Vec<f32> {
        match self.line_owner() {
            Some(Cell::Cross) => vec![1.0, -1.0],
            Some(Cell::Nought) => vec![-1.0, 1.0],
            _ => vec![0.0, 0.0],
        }
    }

    fn is_terminal(&self) -> bool {
        self.moves == CELLS || self.line_owner().is_some()
    }

    /// Both players see the full board.
    fn observation_tensor(&self, _player: AgentId) -> ArrayD<f32> {
        let mut planes = Array3::<f32>::zeros((3, 3, 3));
        for (i, cell) in self.board.iter().enumerate() {
            let plane = match cell {
                Cell::Empty => 0,
                Cell::Nought => 1,
                Cell::Cross => 2,
            };
            planes[[plane, i / 3, i % 3]] = 1.0;
        }
        planes.into_dyn()
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.board.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in cells {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Nought => 'o',
                    Cell::Cross => 'x',
                };
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

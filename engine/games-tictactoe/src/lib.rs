//! Tic-tac-toe implementation of the [`game_core::Rules`] trait.
//!
//! The smallest useful fixture for exercising the search engine: short
//! games, no forced passes, and positions with an obvious best move that a
//! correct search must find.

use game_core::{Outcome, Player, Rules};

/// A tic-tac-toe position. Cell values: 0 = empty, 1 = player one (X),
/// 2 = player two (O).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [u8; 9],
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self { cells: [0; 9] }
    }

    /// Build a board from raw cells. Intended for setting up test
    /// positions.
    pub fn from_cells(cells: [u8; 9]) -> Self {
        Self { cells }
    }

    pub fn cell(&self, pos: u8) -> u8 {
        self.cells[pos as usize]
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != 0)
    }

    /// The winning mark on the board, if any.
    fn winning_mark(&self) -> Option<u8> {
        // Rows, columns, diagonals.
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

        for line in &LINES {
            let [a, b, c] = *line;
            if self.cells[a] != 0 && self.cells[a] == self.cells[b] && self.cells[b] == self.cells[c]
            {
                return Some(self.cells[a]);
            }
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn mark_of(player: Player) -> u8 {
    match player {
        Player::One => 1,
        Player::Two => 2,
    }
}

/// Tic-tac-toe rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl TicTacToe {
    pub fn new() -> Self {
        Self
    }
}

impl Rules for TicTacToe {
    type State = Board;
    type Move = u8;

    fn legal_moves(&self, state: &Self::State, _player: Player) -> Vec<Self::Move> {
        if state.winning_mark().is_some() {
            return Vec::new();
        }
        (0..9u8).filter(|&pos| state.cell(pos) == 0).collect()
    }

    fn apply_move(&self, state: &Self::State, mv: Self::Move, player: Player) -> Self::State {
        let mut next = *state;
        next.cells[mv as usize] = mark_of(player);
        next
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.winning_mark().is_some() || state.is_full()
    }

    fn winner(&self, state: &Self::State) -> Outcome {
        match state.winning_mark() {
            Some(1) => Outcome::Win(Player::One),
            Some(2) => Outcome::Win(Player::Two),
            _ => Outcome::Draw,
        }
    }
}

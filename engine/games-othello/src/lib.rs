//! Othello (Reversi) implementation of the [`game_core::Rules`] trait.
//!
//! The 8x8 flipping game is the reason the search engine handles forced
//! passes: a player with no capturing move must forfeit the turn, and the
//! game only ends once the board is full or neither player can move. The
//! winner is whoever holds more discs; equal counts are a draw.

use game_core::{Outcome, Player, Rules};

const SIZE: usize = 8;

/// The eight neighbourhood directions used for capture scans.
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// An Othello position. Cell values: 0 = empty, 1 = player one (white),
/// 2 = player two (black).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [u8; SIZE * SIZE],
}

/// A board square, indexed 0..64 row-major.
pub type Square = u8;

fn disc_of(player: Player) -> u8 {
    match player {
        Player::One => 1,
        Player::Two => 2,
    }
}

impl Board {
    /// The standard opening position: four discs around the centre.
    pub fn new() -> Self {
        let mut cells = [0; SIZE * SIZE];
        cells[Self::index(3, 3)] = 1;
        cells[Self::index(4, 4)] = 1;
        cells[Self::index(3, 4)] = 2;
        cells[Self::index(4, 3)] = 2;
        Self { cells }
    }

    /// Build a board from raw cells. Intended for setting up test
    /// positions.
    pub fn from_cells(cells: [u8; SIZE * SIZE]) -> Self {
        Self { cells }
    }

    fn index(row: usize, col: usize) -> usize {
        row * SIZE + col
    }

    pub fn cell(&self, square: Square) -> u8 {
        self.cells[square as usize]
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != 0)
    }

    /// Disc counts as (player one, player two).
    pub fn counts(&self) -> (u32, u32) {
        let ones = self.cells.iter().filter(|&&c| c == 1).count() as u32;
        let twos = self.cells.iter().filter(|&&c| c == 2).count() as u32;
        (ones, twos)
    }

    /// Opponent discs that would be flipped by `player` placing a disc on
    /// `square`. Empty when the placement captures nothing (and is
    /// therefore illegal).
    fn captured(&self, square: Square, disc: u8) -> Vec<usize> {
        let opponent = 3 - disc;
        let row = (square as usize / SIZE) as i8;
        let col = (square as usize % SIZE) as i8;
        let mut captured = Vec::new();

        for (dr, dc) in DIRECTIONS {
            let mut r = row + dr;
            let mut c = col + dc;
            let mut path = Vec::new();
            while Self::inside(r, c) && self.cells[Self::index(r as usize, c as usize)] == opponent
            {
                path.push(Self::index(r as usize, c as usize));
                r += dr;
                c += dc;
            }
            // A run of opponent discs counts only when bracketed by one of
            // the player's own discs.
            if !path.is_empty()
                && Self::inside(r, c)
                && self.cells[Self::index(r as usize, c as usize)] == disc
            {
                captured.extend(path);
            }
        }

        captured
    }

    fn inside(row: i8, col: i8) -> bool {
        (0..SIZE as i8).contains(&row) && (0..SIZE as i8).contains(&col)
    }

    fn moves_for(&self, disc: u8) -> Vec<Square> {
        (0..(SIZE * SIZE) as u8)
            .filter(|&sq| self.cells[sq as usize] == 0 && !self.captured(sq, disc).is_empty())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Othello rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct Othello;

impl Othello {
    pub fn new() -> Self {
        Self
    }
}

impl Rules for Othello {
    type State = Board;
    type Move = Square;

    fn legal_moves(&self, state: &Self::State, player: Player) -> Vec<Self::Move> {
        state.moves_for(disc_of(player))
    }

    fn apply_move(&self, state: &Self::State, mv: Self::Move, player: Player) -> Self::State {
        let disc = disc_of(player);
        let mut next = state.clone();
        next.cells[mv as usize] = disc;
        for idx in state.captured(mv, disc) {
            next.cells[idx] = disc;
        }
        next
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        if state.is_full() {
            return true;
        }
        state.moves_for(1).is_empty() && state.moves_for(2).is_empty()
    }

    fn winner(&self, state: &Self::State) -> Outcome {
        let (ones, twos) = state.counts();
        if ones == twos {
            Outcome::Draw
        } else if ones > twos {
            Outcome::Win(Player::One)
        } else {
            Outcome::Win(Player::Two)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(row: usize, col: usize) -> Square {
        (row * SIZE + col) as Square
    }

    #[test]
    fn opening_position_has_four_moves_per_player() {
        let game = Othello::new();
        let board = Board::new();

        let white = game.legal_moves(&board, Player::One);
        let black = game.legal_moves(&board, Player::Two);
        assert_eq!(white.len(), 4);
        assert_eq!(black.len(), 4);
        assert!(!game.is_terminal(&board));
    }

    #[test]
    fn opening_counts_are_even() {
        let board = Board::new();
        assert_eq!(board.counts(), (2, 2));
    }

    #[test]
    fn capture_flips_bracketed_run() {
        let game = Othello::new();
        let board = Board::new();

        // Standard opening move: black plays (2,3), flipping the white
        // disc at (3,3).
        let mv = square(2, 3);
        assert!(game.legal_moves(&board, Player::Two).contains(&mv));

        let next = game.apply_move(&board, mv, Player::Two);
        assert_eq!(next.cell(square(2, 3)), 2);
        assert_eq!(next.cell(square(3, 3)), 2);
        // Source board untouched.
        assert_eq!(board.cell(square(3, 3)), 1);
        assert_eq!(next.counts(), (1, 4));
    }

    #[test]
    fn placement_without_capture_is_illegal() {
        let game = Othello::new();
        let board = Board::new();
        assert!(!game.legal_moves(&board, Player::Two).contains(&square(0, 0)));
    }

    #[test]
    fn stalled_board_is_terminal() {
        // A single white disc on an otherwise empty board: nobody can
        // capture, so the game is over even though the board is not full.
        let mut cells = [0u8; SIZE * SIZE];
        cells[0] = 1;
        let board = Board::from_cells(cells);
        let game = Othello::new();

        assert!(game.legal_moves(&board, Player::One).is_empty());
        assert!(game.legal_moves(&board, Player::Two).is_empty());
        assert!(game.is_terminal(&board));
        assert_eq!(game.winner(&board), Outcome::Win(Player::One));
    }

    #[test]
    fn winner_by_disc_count() {
        let mut cells = [1u8; SIZE * SIZE];
        for cell in cells.iter_mut().take(10) {
            *cell = 2;
        }
        let board = Board::from_cells(cells);
        let game = Othello::new();

        assert!(game.is_terminal(&board));
        assert_eq!(game.winner(&board), Outcome::Win(Player::One));
    }

    #[test]
    fn equal_counts_draw() {
        let mut cells = [1u8; SIZE * SIZE];
        for cell in cells.iter_mut().take(32) {
            *cell = 2;
        }
        let board = Board::from_cells(cells);
        assert_eq!(Othello::new().winner(&board), Outcome::Draw);
    }

    #[test]
    fn one_sided_pass_position() {
        // Top row "2 1 . ...": black holds the corner, so black can
        // bracket the white disc from (0,2), while the corner disc itself
        // cannot be bracketed from any direction. White must pass.
        let mut cells = [0u8; SIZE * SIZE];
        cells[square(0, 0) as usize] = 2;
        cells[square(0, 1) as usize] = 1;
        let board = Board::from_cells(cells);
        let game = Othello::new();

        assert_eq!(game.legal_moves(&board, Player::Two), vec![square(0, 2)]);
        assert!(game.legal_moves(&board, Player::One).is_empty());
        assert!(!game.is_terminal(&board));
    }
}

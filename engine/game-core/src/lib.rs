//! Core traits and types for two-player perfect-information games.
//!
//! This crate provides the game-facing abstraction consumed by the search
//! engine: a [`Rules`] trait exposing legal-move generation, move
//! application, terminal detection and winner resolution over an opaque
//! state type. Game crates implement `Rules`; the search engine never
//! inspects a state beyond what the trait offers.

use std::fmt;

/// One of the two players. Player one moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player one"),
            Player::Two => write!(f, "player two"),
        }
    }
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl Outcome {
    /// Reward of this outcome for `perspective`: +1 win, -1 loss, 0 draw.
    pub fn reward_for(self, perspective: Player) -> f32 {
        match self {
            Outcome::Draw => 0.0,
            Outcome::Win(p) if p == perspective => 1.0,
            Outcome::Win(_) => -1.0,
        }
    }
}

/// Rules of a two-player perfect-information game.
///
/// Implementations must be pure with respect to the passed state:
/// [`Rules::apply_move`] returns a fresh state and must not mutate the
/// input (copy-on-write semantics). States are snapshots; the caller is
/// free to hold onto any number of them.
///
/// A player with no legal moves forfeits the turn without altering the
/// board. Games where this can happen (e.g. Reversi) must report a state
/// as terminal once neither player can move.
pub trait Rules {
    /// Snapshot of a game position.
    type State: Clone;

    /// A single move. Kept `Copy` so the search tree can store and hand
    /// them out freely.
    type Move: Copy + Eq + fmt::Debug;

    /// All legal moves for `player` in `state`. Empty means `player` must
    /// pass (or the game is over).
    fn legal_moves(&self, state: &Self::State, player: Player) -> Vec<Self::Move>;

    /// Apply a legal move for `player`, returning the resulting state.
    ///
    /// Precondition: `mv` was produced by [`Rules::legal_moves`] for this
    /// exact state and player.
    fn apply_move(&self, state: &Self::State, mv: Self::Move, player: Player) -> Self::State;

    /// Whether the game is over in `state`.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Winner of a finished game. Only meaningful once
    /// [`Rules::is_terminal`] reports true.
    fn winner(&self, state: &Self::State) -> Outcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_flips() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
        assert_eq!(Player::One.opponent().opponent(), Player::One);
    }

    #[test]
    fn outcome_reward_perspective() {
        assert_eq!(Outcome::Win(Player::One).reward_for(Player::One), 1.0);
        assert_eq!(Outcome::Win(Player::One).reward_for(Player::Two), -1.0);
        assert_eq!(Outcome::Draw.reward_for(Player::One), 0.0);
        assert_eq!(Outcome::Draw.reward_for(Player::Two), 0.0);
    }
}

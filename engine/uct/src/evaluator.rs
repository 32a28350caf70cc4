//! Position evaluation strategies.
//!
//! The search engine scores the position it reaches each iteration through
//! an [`Evaluator`]. Two kinds of implementation exist: a learned model
//! wrapping whatever inference backend the caller uses (it lives outside
//! this crate, behind this trait), and the [`RolloutEvaluator`] shipped
//! here, which estimates the outcome by playing the game out with
//! uniformly random moves.

use game_core::{Player, Rules};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// Maps a position to an expected outcome in `[-1, 1]` for a given
/// player: +1 certain win, -1 certain loss, 0 balanced.
///
/// `to_move` is the player who acts from `state`; `perspective` is the
/// player the returned reward is expressed for (during search, always the
/// root player). Evaluators that need randomness draw from `rng`, which
/// the search seeds deterministically; evaluators that do not simply
/// ignore it.
pub trait Evaluator<R: Rules> {
    fn evaluate(
        &self,
        rules: &R,
        state: &R::State,
        to_move: Player,
        perspective: Player,
        rng: &mut ChaCha20Rng,
    ) -> Result<f32, EvaluatorError>;
}

/// Estimates a position by playing it out to the end with uniformly
/// random legal moves and scoring the final outcome +1/-1/0 for the
/// perspective player.
///
/// A player without a legal move forfeits the turn; two consecutive
/// forfeits end the playout even if the rules do not report the position
/// as terminal.
#[derive(Debug, Clone)]
pub struct RolloutEvaluator {
    /// Upper bound on playout length, guarding against rules that never
    /// reach a terminal state.
    pub max_plies: u32,
}

impl Default for RolloutEvaluator {
    fn default() -> Self {
        Self { max_plies: 512 }
    }
}

impl RolloutEvaluator {
    pub fn new(max_plies: u32) -> Self {
        Self { max_plies }
    }
}

impl<R: Rules> Evaluator<R> for RolloutEvaluator {
    fn evaluate(
        &self,
        rules: &R,
        state: &R::State,
        to_move: Player,
        perspective: Player,
        rng: &mut ChaCha20Rng,
    ) -> Result<f32, EvaluatorError> {
        let mut state = state.clone();
        let mut active = to_move;
        let mut skipped = 0u8;
        let mut plies = 0u32;

        while !rules.is_terminal(&state) && skipped < 2 {
            if plies >= self.max_plies {
                return Err(EvaluatorError::EvaluationFailed(format!(
                    "rollout exceeded {} plies without reaching a terminal state",
                    self.max_plies
                )));
            }

            let moves = rules.legal_moves(&state, active);
            if moves.is_empty() {
                skipped += 1;
                active = active.opponent();
                continue;
            }
            skipped = 0;

            let mv = moves[rng.gen_range(0..moves.len())];
            state = rules.apply_move(&state, mv, active);
            active = active.opponent();
            plies += 1;
        }

        Ok(rules.winner(&state).reward_for(perspective))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_othello::Othello;
    use games_tictactoe::{Board, TicTacToe};
    use rand::SeedableRng;

    fn rng(seed: u64) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(seed)
    }

    #[test]
    fn rollout_on_won_position_scores_immediately() {
        let game = TicTacToe::new();
        let board = Board::from_cells([1, 1, 1, 2, 2, 0, 0, 0, 0]);
        let evaluator = RolloutEvaluator::default();

        let for_winner = evaluator
            .evaluate(&game, &board, Player::Two, Player::One, &mut rng(0))
            .unwrap();
        let for_loser = evaluator
            .evaluate(&game, &board, Player::Two, Player::Two, &mut rng(0))
            .unwrap();

        assert_eq!(for_winner, 1.0);
        assert_eq!(for_loser, -1.0);
    }

    #[test]
    fn rollout_on_drawn_position_scores_zero() {
        let game = TicTacToe::new();
        let board = Board::from_cells([1, 2, 1, 1, 2, 2, 2, 1, 1]);
        let evaluator = RolloutEvaluator::default();

        let reward = evaluator
            .evaluate(&game, &board, Player::One, Player::One, &mut rng(0))
            .unwrap();
        assert_eq!(reward, 0.0);
    }

    #[test]
    fn rollout_reward_stays_in_range() {
        let game = Othello::new();
        let board = games_othello::Board::new();
        let evaluator = RolloutEvaluator::default();

        for seed in 0..20 {
            let reward = evaluator
                .evaluate(&game, &board, Player::One, Player::One, &mut rng(seed))
                .unwrap();
            assert!(reward == 1.0 || reward == -1.0 || reward == 0.0);
        }
    }

    #[test]
    fn rollout_is_seed_deterministic() {
        let game = Othello::new();
        let board = games_othello::Board::new();
        let evaluator = RolloutEvaluator::default();

        let first = evaluator
            .evaluate(&game, &board, Player::Two, Player::Two, &mut rng(99))
            .unwrap();
        let second = evaluator
            .evaluate(&game, &board, Player::Two, Player::Two, &mut rng(99))
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn rollout_perspectives_are_opposite_unless_drawn() {
        let game = TicTacToe::new();
        let board = Board::new();
        let evaluator = RolloutEvaluator::default();

        for seed in 0..10 {
            let for_one = evaluator
                .evaluate(&game, &board, Player::One, Player::One, &mut rng(seed))
                .unwrap();
            let for_two = evaluator
                .evaluate(&game, &board, Player::One, Player::Two, &mut rng(seed))
                .unwrap();
            // Same seed, same playout, mirrored perspective.
            assert_eq!(for_one, -for_two);
        }
    }

    #[test]
    fn rollout_errors_on_endless_rules() {
        // Rules that never terminate: one legal move forever.
        #[derive(Debug)]
        struct Endless;
        impl Rules for Endless {
            type State = u8;
            type Move = u8;

            fn legal_moves(&self, _state: &u8, _player: Player) -> Vec<u8> {
                vec![0]
            }
            fn apply_move(&self, state: &u8, _mv: u8, _player: Player) -> u8 {
                *state
            }
            fn is_terminal(&self, _state: &u8) -> bool {
                false
            }
            fn winner(&self, _state: &u8) -> game_core::Outcome {
                game_core::Outcome::Draw
            }
        }

        let evaluator = RolloutEvaluator::new(16);
        let result = evaluator.evaluate(&Endless, &0, Player::One, Player::One, &mut rng(0));
        assert!(matches!(result, Err(EvaluatorError::EvaluationFailed(_))));
    }
}

//! UCT (Upper Confidence bounds applied to Trees) search for two-player
//! perfect-information games.
//!
//! This crate provides a game-agnostic Monte Carlo tree search that works
//! with any game implementing the `game-core` [`Rules`](game_core::Rules)
//! trait.
//!
//! # Overview
//!
//! Each search iteration runs four phases:
//!
//! 1. **Selection**: Descend from the root choosing children by UCB1
//!    (mean reward plus an exploration bonus for rarely visited children)
//! 2. **Expansion**: Materialize one untried move of the reached node as
//!    a new child
//! 3. **Simulation**: Score the reached position with an [`Evaluator`],
//!    from the root player's perspective
//! 4. **Backpropagation**: Update visit counts and reward sums along the
//!    path back to the root, flipping the reward sign at every level
//!
//! Players without a legal move forfeit their turn: such nodes get a
//! single pass child with the same board and the opposite player to move,
//! and the search descends through it like any other edge.
//!
//! # Usage
//!
//! ```rust,ignore
//! use uct::{RolloutEvaluator, UctConfig, run_search};
//! use game_core::Player;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let game = games_othello::Othello::new();
//! let board = games_othello::Board::new();
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = run_search(
//!     &game,
//!     &RolloutEvaluator::default(),
//!     UctConfig::default(),
//!     board,
//!     Player::Two,
//!     &mut rng,
//! )?;
//!
//! println!("Best move: {:?}", result.best_move);
//! println!("Root value: {}", result.root_value);
//! ```
//!
//! # Configuration
//!
//! The [`UctConfig`] struct controls search behavior:
//!
//! - `iterations`: Iteration budget per search (default: 1000)
//! - `exploration`: Exploration constant in the UCB1 formula
//!   (default: 1/√2)
//! - `tie_break_noise_std`: Gaussian noise added to finite selection
//!   scores, breaking ties between converged children (default: 0.01)
//!
//! # Evaluators
//!
//! The search scores reached positions through an [`Evaluator`]:
//!
//! - [`RolloutEvaluator`]: Plays the position out with uniformly random
//!   moves and scores the final outcome
//! - Custom evaluators can wrap a learned model behind the same trait

pub mod config;
pub mod evaluator;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::UctConfig;
pub use evaluator::{Evaluator, EvaluatorError, RolloutEvaluator};
pub use node::{IncomingMove, Node, NodeId};
pub use search::{run_search, Search, SearchError, SearchResult};
pub use tree::SearchTree;

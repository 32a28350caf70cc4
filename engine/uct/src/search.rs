//! UCT search driver.
//!
//! Runs the select -> expand -> simulate -> backpropagate loop:
//! 1. Selection: descend from the root choosing children by UCB1 until an
//!    expandable, forced-pass or terminal node is reached
//! 2. Expansion: materialize one untried move as a new child
//! 3. Simulation: score the reached position with the evaluator, from the
//!    root player's perspective
//! 4. Backpropagation: walk the path back to the root, flipping the
//!    reward sign at every level
//!
//! The tree lives exactly as long as one driver invocation: a fresh root
//! per decision, everything dropped once the move is returned.

use game_core::{Player, Rules};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::UctConfig;
use crate::evaluator::{Evaluator, EvaluatorError};
use crate::node::{IncomingMove, NodeId};
use crate::tree::SearchTree;

/// Errors that can occur during a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The searching player has no legal move in the root state. Deciding
    /// to pass is the caller's business; the engine refuses to guess.
    #[error("root state has no legal move for the searching player")]
    InvalidRootState,

    /// Expansion was requested on a node without untried moves. Unreachable
    /// through a correct descent.
    #[error("expansion requested with no untried moves remaining")]
    ExhaustedExpansion,

    /// The evaluator failed. The search aborts as a whole; a partially
    /// searched tree is never used to pick a move.
    #[error("evaluator error: {0}")]
    Evaluation(#[from] EvaluatorError),
}

/// Outcome of a finished search.
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// The move with the best mean reward at the root.
    pub best_move: M,

    /// Visits accumulated by the root, equal to the iteration budget.
    pub root_visits: u32,

    /// Mean backpropagated reward of the chosen child: the estimated
    /// outcome for the searching player after playing `best_move`.
    pub root_value: f32,
}

/// A single move decision in progress. Owns the search tree; borrows the
/// rules and the evaluator.
pub struct Search<'a, R: Rules, E: Evaluator<R>> {
    rules: &'a R,
    evaluator: &'a E,
    config: UctConfig,
    tree: SearchTree<R::State, R::Move>,
    root_player: Player,
}

impl<'a, R, E> Search<'a, R, E>
where
    R: Rules,
    E: Evaluator<R>,
{
    /// Start a search for `player` from `state`.
    ///
    /// Fails with [`SearchError::InvalidRootState`] if `player` has no
    /// legal move in `state`.
    pub fn new(
        rules: &'a R,
        evaluator: &'a E,
        config: UctConfig,
        state: R::State,
        player: Player,
    ) -> Result<Self, SearchError> {
        if rules.legal_moves(&state, player).is_empty() {
            return Err(SearchError::InvalidRootState);
        }

        Ok(Self {
            rules,
            evaluator,
            config,
            tree: SearchTree::new(state, player),
            root_player: player,
        })
    }

    /// Run the configured number of iterations and pick the root move
    /// with the best mean reward (zero exploration, configured tie-break
    /// noise).
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<R::Move>, SearchError> {
        for iteration in 0..self.config.iterations {
            let leaf = self.descend(rng)?;
            let (reward, leaf_to_move) = {
                let node = self.tree.get(leaf);
                let reward = self.evaluator.evaluate(
                    self.rules,
                    &node.state,
                    node.to_move,
                    self.root_player,
                    rng,
                )?;
                (reward, node.to_move)
            };
            // The evaluator reports for the root player; each node's sum
            // must be in the perspective of the player who moved into it,
            // or selection at its parent optimizes for the wrong side.
            // Align the sign at the leaf; backpropagation alternates it
            // from there.
            let signed = if leaf_to_move == self.root_player {
                -reward
            } else {
                reward
            };
            self.tree.backpropagate(leaf, signed);

            trace!(
                iteration,
                leaf = leaf.0,
                reward,
                nodes = self.tree.len(),
                "search iteration complete"
            );
        }

        let best_child = self
            .tree
            .select_child(
                self.tree.root(),
                0.0,
                self.config.tie_break_noise_std,
                rng,
            )
            .ok_or(SearchError::InvalidRootState)?;
        let best_move = self
            .tree
            .get(best_child)
            .incoming
            .played()
            .ok_or(SearchError::InvalidRootState)?;

        let result = SearchResult {
            best_move,
            root_visits: self.tree.get(self.tree.root()).visit_count,
            root_value: self.tree.get(best_child).mean_reward(),
        };

        debug!(
            best_move = ?result.best_move,
            root_visits = result.root_visits,
            root_value = result.root_value,
            nodes = self.tree.len(),
            "move selected"
        );

        Ok(result)
    }

    /// The search tree (for inspection and tests).
    pub fn tree(&self) -> &SearchTree<R::State, R::Move> {
        &self.tree
    }

    /// Descend from the root to the node to simulate this iteration.
    ///
    /// Terminal nodes are returned as-is (their evaluation reflects the
    /// true outcome). A node whose player must pass descends through its
    /// single pass child, creating it on first visit. Otherwise one
    /// untried move is expanded, or, once fully expanded, the best child
    /// by UCB1 is followed.
    fn descend(&mut self, rng: &mut ChaCha20Rng) -> Result<NodeId, SearchError> {
        let mut current = self.tree.root();
        loop {
            if self.rules.is_terminal(&self.tree.get(current).state) {
                return Ok(current);
            }

            self.ensure_backlog(current, rng);

            if self.tree.is_forced_pass(current) {
                if let Some(pass) = self.tree.pass_child(current) {
                    current = pass;
                    continue;
                }
                return Ok(self.attach_pass_child(current));
            }

            if !self.tree.get(current).is_fully_expanded() {
                return self.expand(current);
            }

            current = self
                .tree
                .select_child(
                    current,
                    self.config.exploration,
                    self.config.tie_break_noise_std,
                    rng,
                )
                .ok_or(SearchError::ExhaustedExpansion)?;
        }
    }

    /// Compute and cache the shuffled untried-move backlog of `id` on
    /// first contact. Repeated calls are no-ops, so the remaining set
    /// only shrinks through expansion.
    fn ensure_backlog(&mut self, id: NodeId, rng: &mut ChaCha20Rng) {
        if self.tree.get(id).untried.is_none() {
            let moves = {
                let node = self.tree.get(id);
                self.rules.legal_moves(&node.state, node.to_move)
            };
            self.tree.set_backlog(id, moves, rng);
        }
    }

    /// Materialize one untried move of `id` as a new child and return it.
    fn expand(&mut self, id: NodeId) -> Result<NodeId, SearchError> {
        let mv = self
            .tree
            .pop_untried(id)
            .ok_or(SearchError::ExhaustedExpansion)?;
        let (child_state, child_to_move) = {
            let node = self.tree.get(id);
            (
                self.rules.apply_move(&node.state, mv, node.to_move),
                node.to_move.opponent(),
            )
        };
        Ok(self
            .tree
            .add_child(id, IncomingMove::Played(mv), child_state, child_to_move))
    }

    /// Create the single pass child of `id`: same board, opposite player
    /// to move.
    fn attach_pass_child(&mut self, id: NodeId) -> NodeId {
        let (state, child_to_move) = {
            let node = self.tree.get(id);
            (node.state.clone(), node.to_move.opponent())
        };
        self.tree.add_child(id, IncomingMove::Pass, state, child_to_move)
    }
}

/// Convenience wrapper running a whole search in one call.
pub fn run_search<R, E>(
    rules: &R,
    evaluator: &E,
    config: UctConfig,
    state: R::State,
    player: Player,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<R::Move>, SearchError>
where
    R: Rules,
    E: Evaluator<R>,
{
    Search::new(rules, evaluator, config, state, player)?.run(rng)
}

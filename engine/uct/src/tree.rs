//! Arena-backed search tree.
//!
//! Nodes are stored in a contiguous `Vec` and referenced by [`NodeId`]
//! indices. Parent links are plain indices, so backpropagation walks up
//! the tree in O(depth) without shared mutable ownership.

use game_core::Player;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal};

use crate::node::{IncomingMove, Node, NodeId};

/// Search tree with arena-based node storage. The tree owns every node it
/// creates; dropping the tree drops the whole search state at once.
#[derive(Debug)]
pub struct SearchTree<S, M> {
    nodes: Vec<Node<S, M>>,
    root: NodeId,
}

impl<S, M: Copy + Eq> SearchTree<S, M> {
    /// Create a tree holding only a fresh root.
    pub fn new(root_state: S, to_move: Player) -> Self {
        Self {
            nodes: vec![Node::new_root(root_state, to_move)],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<S, M> {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<S, M> {
        &mut self.nodes[id.0 as usize]
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach a new child to `parent` and return its id. Children keep
    /// their creation order, which makes tie-breaking deterministic for a
    /// given sequence of expansions.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        incoming: IncomingMove<M>,
        state: S,
        to_move: Player,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new_child(parent, incoming, state, to_move));
        self.get_mut(parent).children.push(id);
        id
    }

    /// The pass child of `parent`, if one was already created.
    pub fn pass_child(&self, parent: NodeId) -> Option<NodeId> {
        self.get(parent)
            .children
            .iter()
            .copied()
            .find(|&child| self.get(child).incoming.is_pass())
    }

    /// Whether `id` is a forced-pass node: its move backlog computed empty
    /// and it has no played children. Expansion children and a pass child
    /// never coexist under one parent, so checking the first child
    /// suffices.
    pub fn is_forced_pass(&self, id: NodeId) -> bool {
        let node = self.get(id);
        node.untried.as_ref().is_some_and(|backlog| backlog.is_empty())
            && node
                .children
                .first()
                .is_none_or(|&child| self.get(child).incoming.is_pass())
    }

    /// Select the child of `id` maximizing the UCB1 score, with a Gaussian
    /// perturbation of standard deviation `noise_std` added to every
    /// finite score before comparison. Unvisited children always win.
    /// Ties between equal scores go to the earliest-created child.
    ///
    /// `None` if the node has no children.
    pub fn select_child(
        &self,
        id: NodeId,
        exploration: f32,
        noise_std: f32,
        rng: &mut ChaCha20Rng,
    ) -> Option<NodeId> {
        let node = self.get(id);
        let noise = (noise_std > 0.0)
            .then(|| Normal::new(0.0, noise_std))
            .and_then(Result::ok);

        let mut best: Option<(NodeId, f32)> = None;
        for &child_id in &node.children {
            let mut score = self.get(child_id).ucb1_score(node.visit_count, exploration);
            if score.is_finite() {
                if let Some(noise) = &noise {
                    score += noise.sample(rng);
                }
            }
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Backpropagate `reward` from `leaf` to the root: every node on the
    /// path gains a visit and accumulates the reward, and the reward sign
    /// flips at each level (what is good for one player is equally bad for
    /// the opponent).
    pub fn backpropagate(&mut self, leaf: NodeId, reward: f32) {
        let mut current = leaf;
        let mut signed = reward;

        while current.is_some() {
            let node = self.get_mut(current);
            node.visit_count += 1;
            node.total_reward += signed;
            signed = -signed;
            current = node.parent;
        }
    }

    /// Record the move backlog of `id`, shuffled so that expansion order
    /// is not biased by move-generation order. Must only be called once
    /// per node, before any expansion.
    pub fn set_backlog(&mut self, id: NodeId, mut moves: Vec<M>, rng: &mut ChaCha20Rng) {
        use rand::seq::SliceRandom;
        moves.shuffle(rng);
        self.get_mut(id).untried = Some(moves);
    }

    /// Pop one move from the computed backlog of `id`.
    pub fn pop_untried(&mut self, id: NodeId) -> Option<M> {
        self.get_mut(id).untried.as_mut().and_then(Vec::pop)
    }

    /// Depth of the deepest node, for diagnostics.
    pub fn max_depth(&self) -> u32 {
        self.depth_below(self.root, 0)
    }

    fn depth_below(&self, id: NodeId, depth: u32) -> u32 {
        self.get(id)
            .children
            .iter()
            .map(|&child| self.depth_below(child, depth + 1))
            .max()
            .unwrap_or(depth)
    }
}

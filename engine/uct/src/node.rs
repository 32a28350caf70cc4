//! Search tree node representation.
//!
//! Each node is one game state reached during search. Nodes live in an
//! arena owned by the tree and refer to each other by index, which keeps
//! parent back-references (needed for backpropagation) free of ownership
//! cycles.

use game_core::Player;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// How a node was reached from its parent.
///
/// `Pass` is a real edge in the tree: the player to move had no legal
/// move and forfeited the turn without changing the board. It is distinct
/// from the root, which has no incoming edge at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomingMove<M> {
    /// The node is the search root.
    Root,
    /// A regular move played by the parent's player to move.
    Played(M),
    /// The parent's player to move had to forfeit the turn.
    Pass,
}

impl<M: Copy> IncomingMove<M> {
    /// The played move, if this edge is a regular move.
    pub fn played(&self) -> Option<M> {
        match self {
            IncomingMove::Played(mv) => Some(*mv),
            _ => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, IncomingMove::Pass)
    }
}

/// A node in the search tree.
///
/// `total_reward` accumulates backpropagated rewards; the sign alternates
/// level by level during backpropagation, so each node's sum is expressed
/// in the perspective of the player who moved into it. Selection at a
/// node therefore maximizes that node's own player's outcome by reading
/// child means directly.
#[derive(Debug, Clone)]
pub struct Node<S, M> {
    /// Parent node index (`NONE` for the root).
    pub parent: NodeId,

    /// Edge that produced this node from its parent.
    pub incoming: IncomingMove<M>,

    /// Snapshot of the game state at this node.
    pub state: S,

    /// The player who acts from this state.
    pub to_move: Player,

    /// Number of times backpropagation has passed through this node.
    pub visit_count: u32,

    /// Running sum of backpropagated rewards.
    pub total_reward: f32,

    /// Legal moves not yet materialized as children. `None` until first
    /// queried; `Some(vec)` afterwards, possibly empty. The distinction
    /// makes "fully expanded" unambiguous: a node is fully expanded only
    /// once the backlog has been computed and drained.
    pub untried: Option<Vec<M>>,

    /// Child node indices, in creation order.
    pub children: Vec<NodeId>,
}

impl<S, M: Copy> Node<S, M> {
    /// Create a root node.
    pub fn new_root(state: S, to_move: Player) -> Self {
        Self {
            parent: NodeId::NONE,
            incoming: IncomingMove::Root,
            state,
            to_move,
            visit_count: 0,
            total_reward: 0.0,
            untried: None,
            children: Vec::new(),
        }
    }

    /// Create a child node.
    pub fn new_child(parent: NodeId, incoming: IncomingMove<M>, state: S, to_move: Player) -> Self {
        Self {
            parent,
            incoming,
            state,
            to_move,
            visit_count: 0,
            total_reward: 0.0,
            untried: None,
            children: Vec::new(),
        }
    }

    /// Mean backpropagated reward. Returns 0.0 if never visited; callers
    /// selecting among children must treat unvisited nodes as infinitely
    /// attractive instead (see [`Node::ucb1_score`]).
    #[inline]
    pub fn mean_reward(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.total_reward / self.visit_count as f32
        }
    }

    /// UCB1 selection score of this node, seen from a parent with
    /// `parent_visits` visits:
    ///
    /// `mean_reward + c * sqrt(2 * ln(parent_visits) / visit_count)`
    ///
    /// Unvisited nodes score positive infinity so they are always
    /// preferred over visited siblings.
    #[inline]
    pub fn ucb1_score(&self, parent_visits: u32, exploration: f32) -> f32 {
        if self.visit_count == 0 {
            return f32::INFINITY;
        }
        let mut score = self.mean_reward();
        if exploration > 0.0 {
            score += exploration
                * (2.0 * (parent_visits as f32).ln() / self.visit_count as f32).sqrt();
        }
        score
    }

    /// Whether the untried-move backlog has been computed and drained.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.as_ref().is_some_and(|backlog| backlog.is_empty())
    }
}

//! Selection policies for the MCTS algorithm
//!
//! A selection policy decides which child to descend into once a node is fully
//! expanded, balancing exploration and exploitation.

use crate::{
    game_state::GameState,
    tree::{NodeId, SearchTree},
    Result,
};

/// Exploration constant used while descending the tree
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = 1.4;

/// Trait for policies that select nodes to explore
pub trait SelectionPolicy<S: GameState> {
    /// Selects a child of `node` to descend into
    fn select_child(&self, tree: &SearchTree<S>, node: NodeId) -> Result<NodeId>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>>;
}

/// Upper Confidence bound applied to Trees (UCT)
///
/// ```text
/// UCT = value / n + c * sqrt(2 * ln(N) / n)
/// ```
///
/// Where:
/// - `value` is wins minus losses for the player to move at the parent
/// - `n` is the child's visit count and `N` the parent's
/// - `c` is the exploration constant
///
/// Ties are broken in favour of the child expanded first, so the choice is
/// reproducible under a fixed random seed.
#[derive(Debug, Clone)]
pub struct UCTPolicy {
    /// Higher values favor exploration of less-visited nodes; 0 is greedy.
    pub exploration_constant: f64,
}

impl UCTPolicy {
    /// Creates a new UCT policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UCTPolicy {
            exploration_constant,
        }
    }

    /// Pure exploitation, used for the final move choice
    pub fn greedy() -> Self {
        Self::new(0.0)
    }
}

impl Default for UCTPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXPLORATION_CONSTANT)
    }
}

impl<S: GameState + 'static> SelectionPolicy<S> for UCTPolicy {
    fn select_child(&self, tree: &SearchTree<S>, node: NodeId) -> Result<NodeId> {
        tree.select_best_child(node, self.exploration_constant)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        Box::new(self.clone())
    }
}

// Implement SelectionPolicy for Box<dyn SelectionPolicy>
impl<S: GameState> SelectionPolicy<S> for Box<dyn SelectionPolicy<S>> {
    fn select_child(&self, tree: &SearchTree<S>, node: NodeId) -> Result<NodeId> {
        (**self).select_child(tree, node)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        (**self).clone_box()
    }
}

//! Backpropagation policies for the MCTS algorithm
//!
//! Backpropagation policies determine how to update node statistics
//! after a simulation. The driver applies the policy to every node from the
//! simulated leaf up to the root.

use crate::{
    game_state::{GameState, Outcome},
    tree::SearchNode,
};

/// Trait for policies that backpropagate simulation results
pub trait BackpropagationPolicy<S: GameState> {
    /// Updates statistics for a node based on a simulation outcome
    fn update_stats(&self, node: &mut SearchNode<S>, outcome: &Outcome<S::Player>);

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>>;
}

/// Standard backpropagation policy
///
/// Increments the visit count and tallies the outcome under its absolute
/// player identity. Every ancestor records the same outcome; `value` decides
/// at read time whose side it favors.
#[derive(Debug, Clone)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy
    }
}

impl Default for StandardPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState + 'static> BackpropagationPolicy<S> for StandardPolicy {
    fn update_stats(&self, node: &mut SearchNode<S>, outcome: &Outcome<S::Player>) {
        node.increment_visits();
        node.record_outcome(outcome);
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        Box::new(self.clone())
    }
}

// Implement BackpropagationPolicy for Box<dyn BackpropagationPolicy>
impl<S: GameState> BackpropagationPolicy<S> for Box<dyn BackpropagationPolicy<S>> {
    fn update_stats(&self, node: &mut SearchNode<S>, outcome: &Outcome<S::Player>) {
        (**self).update_stats(node, outcome)
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        (**self).clone_box()
    }
}

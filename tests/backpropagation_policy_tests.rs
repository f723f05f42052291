use std::cell::Cell;
use std::rc::Rc;

use uct_mcts::{
    games::{Mark, TicTacToe},
    policy::backpropagation::{BackpropagationPolicy, StandardPolicy},
    tree::{SearchNode, SearchTree},
    MCTSConfig, Outcome, MCTS,
};

/// Delegates to the standard policy and counts node updates
#[derive(Clone)]
struct CountingPolicy {
    updates: Rc<Cell<u64>>,
}

impl BackpropagationPolicy<TicTacToe> for CountingPolicy {
    fn update_stats(&self, node: &mut SearchNode<TicTacToe>, outcome: &Outcome<Mark>) {
        self.updates.set(self.updates.get() + 1);
        StandardPolicy::new().update_stats(node, outcome);
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<TicTacToe>> {
        Box::new(self.clone())
    }
}

#[test]
fn test_standard_policy() {
    let mut tree = SearchTree::new(TicTacToe::default());
    let root = tree.root();
    let node = tree.get_mut(root);

    let policy = StandardPolicy::new();

    // Initial state
    assert_eq!(node.visits(), 0);
    assert_eq!(node.total_outcomes(), 0);

    policy.update_stats(node, &Outcome::Win(Mark::X));
    assert_eq!(node.visits(), 1);
    assert_eq!(node.wins_for(&Mark::X), 1);

    policy.update_stats(node, &Outcome::Win(Mark::O));
    policy.update_stats(node, &Outcome::Draw);
    assert_eq!(node.visits(), 3);
    assert_eq!(node.wins_for(&Mark::O), 1);
    assert_eq!(node.outcome_tally().get(&Outcome::Draw), Some(&1));
    assert_eq!(node.value_for(&Mark::X), 0);
}

#[test]
fn test_every_ancestor_records_the_same_outcome() {
    let config = MCTSConfig::default().with_seed(31);
    let mut mcts = MCTS::new(TicTacToe::default(), config).unwrap();
    mcts.best_action(300).unwrap();

    let tree = mcts.tree();
    for (_, node) in tree.iter() {
        if let Some(parent) = node.parent() {
            let parent = tree.get(parent);
            for (outcome, count) in node.outcome_tally() {
                assert!(parent.outcome_tally().get(outcome).copied().unwrap_or(0) >= *count);
            }
        }
    }
}

#[test]
fn test_custom_policy_sees_the_whole_path() {
    let updates = Rc::new(Cell::new(0));
    let config = MCTSConfig::default().with_seed(8);
    let mut mcts = MCTS::new(TicTacToe::default(), config)
        .unwrap()
        .with_backpropagation_policy(CountingPolicy {
            updates: Rc::clone(&updates),
        });

    mcts.best_action(120).unwrap();

    // One update per node on each leaf-to-root walk
    let total_visits: u64 = mcts.tree().iter().map(|(_, node)| node.visits()).sum();
    assert_eq!(updates.get(), total_visits);
    assert!(updates.get() > 120);
}

#[test]
fn test_backpropagation_policy_cloning() {
    let policy = StandardPolicy::new();
    let boxed: Box<dyn BackpropagationPolicy<TicTacToe>> = Box::new(policy);
    let cloned = boxed.clone_box();

    let mut tree = SearchTree::new(TicTacToe::default());
    let root = tree.root();
    cloned.update_stats(tree.get_mut(root), &Outcome::Draw);
    assert_eq!(tree.get(root).visits(), 1);
}

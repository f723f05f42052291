//! Tree data structures for Monte Carlo Tree Search
//!
//! The tree is an arena: every [`SearchNode`] lives in one `Vec` and refers to
//! its parent and children by [`NodeId`]. Parent links are plain indices, so
//! backpropagation can walk upwards without any ownership cycle.

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;

use log::trace;

use crate::{
    game_state::{GameState, Outcome},
    utils, MCTSError, Result,
};

/// Index of a node inside a [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a node in the MCTS tree
///
/// Each node holds one game state, the action that led to it, and the
/// statistics of every simulation that passed through it. Outcomes are tallied
/// by absolute player identity and only relativized when read.
pub struct SearchNode<S: GameState> {
    state: S,
    action: Option<S::Action>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,

    /// Cache for `legal_moves`, filled on first access
    legal_actions: OnceCell<Vec<S::Action>>,

    /// Actions not yet expanded into children; materialized lazily and only
    /// ever shrinks
    untried_actions: Option<Vec<S::Action>>,

    visits: u64,
    outcome_tally: HashMap<Outcome<S::Player>, u64>,
    depth: usize,
}

impl<S: GameState> SearchNode<S> {
    fn new(state: S, action: Option<S::Action>, parent: Option<NodeId>, depth: usize) -> Self {
        SearchNode {
            state,
            action,
            parent,
            children: Vec::new(),
            legal_actions: OnceCell::new(),
            untried_actions: None,
            visits: 0,
            outcome_tally: HashMap::new(),
            depth,
        }
    }

    /// The game state at this node
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The action that led to this node (`None` for the root)
    pub fn action(&self) -> Option<&S::Action> {
        self.action.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in expansion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Depth of this node in the tree (root = 0)
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the number of visits to this node
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Counts of simulation outcomes observed at or below this node
    pub fn outcome_tally(&self) -> &HashMap<Outcome<S::Player>, u64> {
        &self.outcome_tally
    }

    /// Total number of outcomes recorded
    pub fn total_outcomes(&self) -> u64 {
        self.outcome_tally.values().sum()
    }

    /// Legal moves of this node's state, computed once and cached
    pub fn legal_moves(&self) -> &[S::Action] {
        self.legal_actions
            .get_or_init(|| self.state.get_legal_actions())
    }

    /// Number of legal moves not yet expanded
    pub fn untried_count(&self) -> usize {
        match &self.untried_actions {
            Some(untried) => untried.len(),
            None => self.legal_moves().len(),
        }
    }

    fn untried_actions_mut(&mut self) -> &mut Vec<S::Action> {
        if self.untried_actions.is_none() {
            let legal = self.legal_moves().to_vec();
            self.untried_actions = Some(legal);
        }
        self.untried_actions.get_or_insert_with(Vec::new)
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns true if every legal move has been expanded into a child
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_count() == 0
    }

    /// Returns true if this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Increments the visit count
    pub fn increment_visits(&mut self) {
        self.visits += 1;
    }

    /// Adds one simulation outcome to the tally
    pub fn record_outcome(&mut self, outcome: &Outcome<S::Player>) {
        *self.outcome_tally.entry(outcome.clone()).or_insert(0) += 1;
    }

    /// Number of recorded simulations won by `player`
    pub fn wins_for(&self, player: &S::Player) -> u64 {
        self.outcome_tally
            .get(&Outcome::Win(player.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Wins for `player` minus wins for anyone else; draws count zero
    pub fn value_for(&self, player: &S::Player) -> i64 {
        self.outcome_tally
            .iter()
            .map(|(outcome, &count)| match outcome {
                Outcome::Win(winner) if winner == player => count as i64,
                Outcome::Win(_) => -(count as i64),
                Outcome::Draw => 0,
            })
            .sum()
    }
}

/// Arena holding every node of one search
pub struct SearchTree<S: GameState> {
    nodes: Vec<SearchNode<S>>,
}

impl<S: GameState> SearchTree<S> {
    /// Creates a tree containing only the root
    pub fn new(root_state: S) -> Self {
        SearchTree {
            nodes: vec![SearchNode::new(root_state, None, None, 0)],
        }
    }

    /// The root is always the first node allocated
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this tree.
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.0]
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false after construction
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all nodes in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode<S>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    pub fn legal_moves(&self, id: NodeId) -> &[S::Action] {
        self.get(id).legal_moves()
    }

    pub fn is_terminal(&self, id: NodeId) -> bool {
        self.get(id).is_terminal()
    }

    pub fn is_fully_expanded(&self, id: NodeId) -> bool {
        self.get(id).is_fully_expanded()
    }

    /// Expands the node by creating a child for its last untried action
    ///
    /// The action is only consumed once it has been applied successfully.
    ///
    /// # Errors
    ///
    /// * [`MCTSError::TerminalState`] if the node is terminal
    /// * [`MCTSError::NoUntriedActions`] if the node is fully expanded
    /// * any error returned by [`GameState::apply_action`]
    pub fn expand(&mut self, id: NodeId) -> Result<NodeId> {
        let child_id = NodeId(self.nodes.len());
        let node = self.get_mut(id);

        if node.is_terminal() {
            return Err(MCTSError::TerminalState);
        }

        let action = node
            .untried_actions_mut()
            .last()
            .cloned()
            .ok_or(MCTSError::NoUntriedActions)?;
        let next_state = node.state.apply_action(&action)?;
        node.untried_actions_mut().pop();
        node.children.push(child_id);
        let depth = node.depth + 1;

        trace!("expanded {} with {:?} into {}", id, action, child_id);

        self.nodes
            .push(SearchNode::new(next_state, Some(action), Some(id), depth));
        Ok(child_id)
    }

    /// Value of a node from the viewpoint of the player to move at its parent
    ///
    /// Returns `None` for the root, which has no parent to choose it.
    pub fn value(&self, id: NodeId) -> Option<i64> {
        let node = self.get(id);
        let parent = self.get(node.parent?);
        Some(node.value_for(&parent.state.get_current_player()))
    }

    /// UCT score of a node as seen by its parent
    ///
    /// `value / n + c * sqrt(2 * ln(N) / n)`. An unvisited node scores `+inf`.
    /// Returns `None` for the root.
    pub fn uct_score(&self, id: NodeId, exploration_constant: f64) -> Option<f64> {
        let node = self.get(id);
        let parent = self.get(node.parent?);
        let value = node.value_for(&parent.state.get_current_player());
        Some(utils::uct_value(
            value,
            node.visits,
            parent.visits,
            exploration_constant,
        ))
    }

    /// Returns the child with the highest UCT score
    ///
    /// Ties go to the child expanded first. With `exploration_constant = 0`
    /// this is pure exploitation.
    ///
    /// # Errors
    ///
    /// [`MCTSError::EmptyChildren`] if the node has no children.
    pub fn select_best_child(&self, id: NodeId, exploration_constant: f64) -> Result<NodeId> {
        let node = self.get(id);
        let mover = node.state.get_current_player();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let child = self.get(child_id);
            let score = utils::uct_value(
                child.value_for(&mover),
                child.visits,
                node.visits,
                exploration_constant,
            );
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((child_id, score));
            }
        }

        best.map(|(child_id, _)| child_id)
            .ok_or(MCTSError::EmptyChildren)
    }

    /// Returns the child with the most visits, first one on ties
    ///
    /// # Errors
    ///
    /// [`MCTSError::EmptyChildren`] if the node has no children.
    pub fn most_visited_child(&self, id: NodeId) -> Result<NodeId> {
        let mut best: Option<(NodeId, u64)> = None;
        for &child_id in &self.get(id).children {
            let visits = self.get(child_id).visits;
            if best.map_or(true, |(_, best_visits)| visits > best_visits) {
                best = Some((child_id, visits));
            }
        }

        best.map(|(child_id, _)| child_id)
            .ok_or(MCTSError::EmptyChildren)
    }

    /// Renders the tree as indented text, one node per line
    ///
    /// Nodes deeper than `max_depth` are omitted.
    pub fn visualize(&self, max_depth: Option<usize>) -> String {
        let mut output = String::new();
        self.visualize_node(self.root(), max_depth, &mut output);
        output
    }

    fn visualize_node(&self, id: NodeId, max_depth: Option<usize>, output: &mut String) {
        let node = self.get(id);
        let indent = "  ".repeat(node.depth);
        let action_str = match &node.action {
            Some(action) => format!("{:?}", action),
            None => "Root".to_string(),
        };
        let value_str = match self.value(id) {
            Some(value) => value.to_string(),
            None => "-".to_string(),
        };

        output.push_str(&format!(
            "{}{} (visits: {}, value: {})\n",
            indent, action_str, node.visits, value_str
        ));

        if max_depth.map_or(true, |max| node.depth < max) {
            for &child_id in &node.children {
                self.visualize_node(child_id, max_depth, output);
            }
        }
    }
}

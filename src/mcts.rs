//! Main implementation of the Monte Carlo Tree Search algorithm
//!
//! This module contains the search driver, orchestrating the phases of
//! selection, expansion, simulation, and backpropagation over one arena tree.

use std::time::Instant;

use log::{debug, trace, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::{BestChildCriteria, MCTSConfig},
    game_state::{GameState, Outcome},
    policy::{
        backpropagation::{BackpropagationPolicy, StandardPolicy},
        selection::{SelectionPolicy, UCTPolicy},
        simulation::{RandomPolicy, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{NodeId, SearchTree},
    MCTSError, Result,
};

/// Starts a search from `root_state` with the default configuration
///
/// Equivalent to `MCTS::new(root_state, MCTSConfig::default())`, which cannot
/// fail since the defaults are valid.
pub fn new_search<S: GameState + 'static>(root_state: S) -> MCTS<S> {
    MCTS::build(root_state, MCTSConfig::default())
}

/// The Monte Carlo Tree Search driver
///
/// Owns the search tree, the policies for each phase and the rollout RNG.
/// Repeated calls to [`best_action`](MCTS::best_action) keep growing the same
/// tree.
pub struct MCTS<S: GameState> {
    tree: SearchTree<S>,
    config: MCTSConfig,
    statistics: SearchStatistics,
    selection_policy: Box<dyn SelectionPolicy<S>>,
    simulation_policy: Box<dyn SimulationPolicy<S>>,
    backpropagation_policy: Box<dyn BackpropagationPolicy<S>>,
    rng: StdRng,
}

impl<S: GameState + 'static> MCTS<S> {
    /// Creates a new MCTS instance with the given initial state and configuration
    ///
    /// # Errors
    ///
    /// [`MCTSError::InvalidConfiguration`] if `config` does not validate.
    pub fn new(initial_state: S, config: MCTSConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(initial_state, config))
    }

    fn build(initial_state: S, config: MCTSConfig) -> Self {
        let selection_policy: Box<dyn SelectionPolicy<S>> =
            Box::new(UCTPolicy::new(config.exploration_constant));
        let simulation_policy: Box<dyn SimulationPolicy<S>> = Box::new(RandomPolicy::new());
        let backpropagation_policy: Box<dyn BackpropagationPolicy<S>> =
            Box::new(StandardPolicy::new());

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        MCTS {
            tree: SearchTree::new(initial_state),
            config,
            statistics: SearchStatistics::new(),
            selection_policy,
            simulation_policy,
            backpropagation_policy,
            rng,
        }
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P: BackpropagationPolicy<S> + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    /// Runs `config.simulations` iterations and returns the best action
    pub fn search(&mut self) -> Result<S::Action> {
        self.best_action(self.config.simulations)
    }

    /// Runs `simulations` iterations and returns the action of the best child
    ///
    /// # Errors
    ///
    /// [`MCTSError::EmptyChildren`] if the root is terminal: the iterations
    /// still run (each one ends at the root) but there is nothing to choose.
    /// Check [`GameState::is_terminal`] before searching.
    pub fn best_action(&mut self, simulations: usize) -> Result<S::Action> {
        let best = self.best_child(simulations)?;
        self.tree
            .get(best)
            .action()
            .cloned()
            .ok_or(MCTSError::EmptyChildren)
    }

    /// Runs `simulations` iterations and returns the best child of the root
    ///
    /// Use this when the caller wants the resulting state rather than the
    /// move: `mcts.tree().get(id).state()`.
    pub fn best_child(&mut self, simulations: usize) -> Result<NodeId> {
        self.run_simulations(simulations)?;
        self.select_best_action()
    }

    fn run_simulations(&mut self, simulations: usize) -> Result<()> {
        self.statistics = SearchStatistics::new();

        let root = self.tree.root();
        if self.tree.is_terminal(root) {
            warn!("searching from a terminal root; no move can be recommended");
        }

        debug!(
            "starting search: {} simulations on a tree of {} nodes",
            simulations,
            self.tree.len()
        );

        let start_time = Instant::now();
        for _ in 0..simulations {
            self.execute_iteration()?;
            self.statistics.iterations += 1;
        }

        self.statistics.total_time = start_time.elapsed();
        self.statistics.tree_size = self.tree.len();
        debug!("{}", self.statistics.summary());

        Ok(())
    }

    /// Execute a single iteration of the MCTS algorithm
    fn execute_iteration(&mut self) -> Result<()> {
        let leaf = self.tree_policy()?;

        let outcome = self
            .simulation_policy
            .simulate(self.tree.get(leaf).state(), &mut self.rng)?;

        self.backpropagate(leaf, &outcome);
        Ok(())
    }

    /// Descends from the root to a node to simulate from
    ///
    /// Returns the first terminal node reached, or a freshly expanded child of
    /// the first node that still has untried actions. Fully expanded nodes are
    /// passed through with the selection policy, so no child is ever compared
    /// by UCT before it has been visited.
    fn tree_policy(&mut self) -> Result<NodeId> {
        let mut current = self.tree.root();

        loop {
            if self.tree.is_terminal(current) {
                self.statistics.terminal_leaves += 1;
                self.note_depth(current);
                return Ok(current);
            }

            if !self.tree.is_fully_expanded(current) {
                let child = self.tree.expand(current)?;
                self.note_depth(child);
                return Ok(child);
            }

            // Not terminal yet nothing to play: the game broke its contract
            if self.tree.get(current).is_leaf() {
                return Err(MCTSError::NoLegalActions);
            }

            current = self.selection_policy.select_child(&self.tree, current)?;
            trace!("selected {}", current);
        }
    }

    /// Walks from `leaf` up to the root, updating every node on the way
    fn backpropagate(&mut self, leaf: NodeId, outcome: &Outcome<S::Player>) {
        let mut current = Some(leaf);

        while let Some(id) = current {
            let node = self.tree.get_mut(id);
            self.backpropagation_policy.update_stats(node, outcome);
            current = node.parent();
        }
    }

    fn note_depth(&mut self, id: NodeId) {
        let depth = self.tree.get(id).depth();
        self.statistics.max_depth = self.statistics.max_depth.max(depth);
    }

    /// Selects the best child of the root based on configured criteria
    fn select_best_action(&self) -> Result<NodeId> {
        let root = self.tree.root();

        let best = match self.config.best_child_criteria {
            BestChildCriteria::HighestValue => self.tree.select_best_child(root, 0.0),
            BestChildCriteria::MostVisits => self.tree.most_visited_child(root),
        };

        if let Ok(id) = best {
            let node = self.tree.get(id);
            debug!(
                "best move {:?} (visits: {}, value: {:?})",
                node.action(),
                node.visits(),
                self.tree.value(id)
            );
        }

        best
    }

    /// The search tree built so far
    pub fn tree(&self) -> &SearchTree<S> {
        &self.tree
    }

    /// The root node of the search tree
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Returns the statistics of the last search
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns a visualization of the search tree
    pub fn visualize_tree(&self) -> String {
        self.tree.visualize(None)
    }
}

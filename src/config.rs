//! Configuration options for the MCTS algorithm
//!
//! The search has two real tunables, the simulation budget and the exploration
//! constant. The rest controls how the final move is picked and whether
//! rollouts are reproducible.

use crate::{policy::selection::DEFAULT_EXPLORATION_CONSTANT, MCTSError, Result};

/// Criteria for selecting the best child after search is complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestChildCriteria {
    /// Select the child with the highest UCT score at exploration constant 0,
    /// i.e. the best average value for the player to move at the root
    HighestValue,

    /// Select the child with the most visits
    ///
    /// More conservative: it relies on statistical confidence rather than on
    /// value estimates that may rest on few visits.
    MostVisits,
}

/// Configuration for the MCTS algorithm
///
/// # Example
///
/// ```
/// use uct_mcts::{MCTSConfig, config::BestChildCriteria};
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.4)
///     .with_simulations(2_000)
///     .with_best_child_criteria(BestChildCriteria::MostVisits)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MCTSConfig {
    /// Exploration constant for UCT while descending the tree
    pub exploration_constant: f64,

    /// Number of select/expand/rollout/backpropagate iterations per search
    pub simulations: usize,

    /// Criteria for selecting the best child after search
    pub best_child_criteria: BestChildCriteria,

    /// Seed for the rollout RNG; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            simulations: 1_000,
            best_child_criteria: BestChildCriteria::HighestValue,
            seed: None,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the number of simulations run by [`MCTS::search`](crate::MCTS::search)
    pub fn with_simulations(mut self, simulations: usize) -> Self {
        self.simulations = simulations;
        self
    }

    /// Sets the criteria for selecting the best child
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Makes rollouts deterministic
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the configuration can drive a search
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        if self.simulations == 0 {
            return Err(MCTSError::InvalidConfiguration(
                "simulation budget must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

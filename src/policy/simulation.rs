//! Simulation (rollout) policies for the MCTS algorithm
//!
//! A simulation policy plays a game out from a given state to estimate the
//! value of that state. Rollouts only produce game states; they never touch
//! the search tree.

use rand::{seq::SliceRandom, RngCore};

use crate::{
    game_state::{GameState, Outcome},
    MCTSError, Result,
};

/// Trait for policies that simulate games
pub trait SimulationPolicy<S: GameState> {
    /// Plays from `state` to a terminal state and returns its outcome
    ///
    /// All randomness must come from `rng` so that seeded searches are
    /// reproducible.
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> Result<Outcome<S::Player>>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>>;
}

/// Random simulation policy
///
/// This policy plays uniformly random legal moves until the game ends.
#[derive(Debug, Clone)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState + 'static> SimulationPolicy<S> for RandomPolicy {
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> Result<Outcome<S::Player>> {
        let mut current_state = state.clone();

        loop {
            if let Some(outcome) = current_state.outcome() {
                return Ok(outcome);
            }

            let legal_actions = current_state.get_legal_actions();
            let action = legal_actions
                .choose(&mut *rng)
                .ok_or(MCTSError::NoLegalActions)?;
            current_state = current_state.apply_action(action)?;
        }
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        Box::new(self.clone())
    }
}

// Implement SimulationPolicy for Box<dyn SimulationPolicy>
impl<S: GameState> SimulationPolicy<S> for Box<dyn SimulationPolicy<S>> {
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> Result<Outcome<S::Player>> {
        (**self).simulate(state, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        (**self).clone_box()
    }
}

//! # uct-mcts
//!
//! A Monte Carlo Tree Search (MCTS) engine with Upper Confidence bounds applied
//! to Trees (UCT) for two-player, zero-sum, perfect-information games.
//!
//! The engine only sees a game through the [`GameState`] trait: legal moves,
//! applying a move, and the terminal outcome. Any game implementing it can be
//! searched without touching the engine.
//!
//! ## Basic Usage
//!
//! ```
//! use uct_mcts::{Action, GameState, MCTSConfig, Outcome, Player, MCTS};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Take(usize);
//!
//! impl Action for Take {}
//!
//! #[derive(Clone, Debug, PartialEq, Eq, Hash)]
//! struct Side(u8);
//!
//! impl Player for Side {}
//!
//! // Players alternately take one or two stones; taking the last one wins
//! #[derive(Clone)]
//! struct Nim {
//!     stones: usize,
//!     to_move: Side,
//! }
//!
//! impl GameState for Nim {
//!     type Action = Take;
//!     type Player = Side;
//!
//!     fn get_legal_actions(&self) -> Vec<Take> {
//!         (1..=2).filter(|&n| n <= self.stones).map(Take).collect()
//!     }
//!
//!     fn apply_action(&self, action: &Take) -> uct_mcts::Result<Self> {
//!         if action.0 == 0 || action.0 > 2 || action.0 > self.stones {
//!             return Err(uct_mcts::MCTSError::IllegalMove(format!("{:?}", action)));
//!         }
//!         Ok(Nim {
//!             stones: self.stones - action.0,
//!             to_move: Side(1 - self.to_move.0),
//!         })
//!     }
//!
//!     fn outcome(&self) -> Option<Outcome<Side>> {
//!         // The player who just moved took the last stone
//!         (self.stones == 0).then(|| Outcome::Win(Side(1 - self.to_move.0)))
//!     }
//!
//!     fn get_current_player(&self) -> Side {
//!         self.to_move.clone()
//!     }
//! }
//!
//! fn main() -> Result<(), uct_mcts::MCTSError> {
//!     let config = MCTSConfig::default().with_simulations(500).with_seed(1);
//!     let mut mcts = MCTS::new(Nim { stones: 4, to_move: Side(0) }, config)?;
//!
//!     // Leaving a multiple of three is the winning reply
//!     let best_action = mcts.search()?;
//!     assert_eq!(best_action, Take(1));
//!
//!     println!("{}", mcts.get_statistics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Each iteration of the search runs four phases:
//!
//! 1. **Selection**: from the root, descend through fully expanded nodes by
//!    UCT (exploration constant 1.4).
//! 2. **Expansion**: at the first node with untried moves, create one child.
//! 3. **Simulation**: play uniformly random moves from the new child until the
//!    game ends.
//! 4. **Backpropagation**: add the outcome to every node from the child up to
//!    the root.
//!
//! After the budget is spent the root's child with the best exploitation
//! score (UCT with exploration constant 0) is recommended.
//!
//! Outcomes are tallied by absolute player identity. A node's value is read
//! from the side of the player to move at its parent, since that is the player
//! who chooses between it and its siblings.
//!
//! ## Examples
//!
//! The crate ships tic-tac-toe on an N×N board in [`games::tic_tac_toe`] and an
//! interactive game against the engine:
//!
//! ```bash
//! cargo run --example tic_tac_toe
//! ```

pub mod config;
pub mod game_state;
pub mod games;
pub mod mcts;
pub mod policy;
pub mod stats;
pub mod tree;
pub mod utils;

pub use config::MCTSConfig;
pub use game_state::{Action, GameState, Outcome, Player};
pub use mcts::{new_search, MCTS};
pub use policy::{BackpropagationPolicy, SelectionPolicy, SimulationPolicy};
pub use stats::SearchStatistics;
pub use tree::{NodeId, SearchNode, SearchTree};

/// Error types for the MCTS algorithm
#[derive(thiserror::Error, Debug)]
pub enum MCTSError {
    /// A move was applied to a state where it is not legal
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    /// A game state failed its own shape invariants
    #[error("Malformed state: {0}")]
    MalformedState(String),

    /// Best-child selection on a node without children
    #[error("Node has no children to select from")]
    EmptyChildren,

    /// Expansion of a node whose moves have all been tried
    #[error("Node is already fully expanded")]
    NoUntriedActions,

    /// Expansion of a terminal node
    #[error("Cannot expand a terminal state")]
    TerminalState,

    /// A non-terminal state offered no legal actions
    #[error("No legal actions available from current state")]
    NoLegalActions,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for MCTS operations
pub type Result<T> = std::result::Result<T, MCTSError>;

//! Traits defining game state representation for MCTS.
//!
//! The GameState trait is the primary interface that must be implemented for any
//! game that will be searched. The engine only ever talks to a game through it,
//! so any two-player, zero-sum, perfect-information game can be plugged in.

use std::fmt::Debug;
use std::hash::Hash;

use crate::Result;

/// Trait for actions (moves) that can be taken in a game
///
/// Actions are opaque to the engine: it only stores, clones and compares them.
pub trait Action: Clone + Debug + PartialEq {}

/// Trait for players in a game
///
/// Players are absolute identities ("X", "O"), never relative roles. They key
/// the outcome tally of every search node, hence the `Hash + Eq` bound.
pub trait Player: Clone + Debug + PartialEq + Eq + Hash {}

/// Terminal result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<P> {
    /// The given player won
    Win(P),
    /// Nobody won
    Draw,
}

impl<P: PartialEq> Outcome<P> {
    /// Returns true if this outcome is a win for `player`
    pub fn is_win_for(&self, player: &P) -> bool {
        matches!(self, Outcome::Win(winner) if winner == player)
    }

    /// Returns the winner, if any
    pub fn winner(&self) -> Option<&P> {
        match self {
            Outcome::Win(winner) => Some(winner),
            Outcome::Draw => None,
        }
    }
}

/// Trait defining the game state interface required for MCTS
///
/// A state is an immutable snapshot: `apply_action` returns a fresh state and
/// leaves `self` untouched, since the search explores many continuations of the
/// same position.
pub trait GameState: Clone {
    /// The type of actions that can be taken in this game
    type Action: Action;

    /// The type of players in this game
    type Player: Player;

    /// Returns the list of legal actions from this state
    ///
    /// The order must be deterministic: the search expands actions from the end
    /// of this list, and tie-breaks depend on that order.
    ///
    /// # Example
    ///
    /// ```
    /// # use uct_mcts::{GameState, Action, Player, Outcome};
    /// # #[derive(Debug, Clone, PartialEq)]
    /// # struct MyAction(usize);
    /// # impl Action for MyAction {}
    /// # #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    /// # struct MyPlayer;
    /// # impl Player for MyPlayer {}
    /// # #[derive(Clone)]
    /// # struct MyGame;
    /// # impl GameState for MyGame {
    /// # type Action = MyAction;
    /// # type Player = MyPlayer;
    /// fn get_legal_actions(&self) -> Vec<MyAction> {
    ///     // Return all valid moves in the current position
    ///     vec![MyAction(0), MyAction(1), MyAction(2)]
    /// }
    /// # fn apply_action(&self, _: &MyAction) -> uct_mcts::Result<Self> { Ok(self.clone()) }
    /// # fn outcome(&self) -> Option<Outcome<MyPlayer>> { None }
    /// # fn get_current_player(&self) -> MyPlayer { MyPlayer }
    /// # }
    /// ```
    fn get_legal_actions(&self) -> Vec<Self::Action>;

    /// Applies an action to the current state, returning the new state
    ///
    /// Must fail with [`MCTSError::IllegalMove`](crate::MCTSError::IllegalMove)
    /// when `action` is not legal here. On success the turn has advanced.
    fn apply_action(&self, action: &Self::Action) -> Result<Self>;

    /// Returns the result of the game, or `None` while it is undecided
    fn outcome(&self) -> Option<Outcome<Self::Player>>;

    /// Returns true if this state is terminal (game over)
    fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Returns the player whose turn it is in this state
    ///
    /// The search reads a child's statistics from the point of view of the
    /// player to move at its parent.
    fn get_current_player(&self) -> Self::Player;
}

impl Player for usize {}
impl Player for i32 {}
impl Player for char {}
impl Player for String {}

impl Action for usize {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_reports_winner() {
        let win: Outcome<char> = Outcome::Win('x');
        assert!(win.is_win_for(&'x'));
        assert!(!win.is_win_for(&'o'));
        assert_eq!(win.winner(), Some(&'x'));

        let draw: Outcome<char> = Outcome::Draw;
        assert!(!draw.is_win_for(&'x'));
        assert_eq!(draw.winner(), None);
    }
}

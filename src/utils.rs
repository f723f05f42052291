//! Utility functions for the MCTS algorithm
//!
//! The UCT arithmetic lives here so the tree and the selection policies share
//! one definition of the formula.

/// Calculates the exploitation term for UCT
///
/// This is the node's value (wins minus losses, from the parent mover's side)
/// averaged over its visits.
pub fn exploitation_term(value: i64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    value as f64 / visits as f64
}

/// Calculates the exploration term for UCT
///
/// `c * sqrt(2 * ln(N) / n)`, where `N` is the parent's visit count and `n` the
/// child's.
pub fn exploration_term(parent_visits: u64, child_visits: u64, exploration_constant: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }

    exploration_constant * (2.0 * (parent_visits as f64).ln() / child_visits as f64).sqrt()
}

/// Calculates the UCT score for a node
///
/// Unvisited nodes score `+inf` so they are always preferred over visited ones.
pub fn uct_value(value: i64, visits: u64, parent_visits: u64, exploration_constant: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    let exploitation = exploitation_term(value, visits);

    // 0 * ln(0) is NaN
    if exploration_constant == 0.0 {
        return exploitation;
    }

    exploitation + exploration_term(parent_visits, visits, exploration_constant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unvisited_scores_infinite() {
        assert_eq!(uct_value(0, 0, 10, 1.4), f64::INFINITY);
        assert_eq!(exploration_term(10, 0, 1.4), f64::INFINITY);
    }

    #[test]
    fn matches_formula() {
        let expected = 3.0 / 4.0 + 1.4 * (2.0 * (10f64).ln() / 4.0).sqrt();
        assert!((uct_value(3, 4, 10, 1.4) - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_constant_is_pure_exploitation() {
        assert_eq!(uct_value(-2, 4, 1, 0.0), -0.5);
        assert_eq!(exploitation_term(5, 0), 0.0);
    }
}

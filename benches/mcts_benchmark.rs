#[macro_use]
extern crate criterion;

use criterion::{black_box, BenchmarkId, Criterion};
use std::time::Duration;
use uct_mcts::{
    games::TicTacToe, Action, GameState, MCTSConfig, Outcome, Player, MCTS,
};

// Simple game state for benchmarking
#[derive(Clone, Debug)]
struct BenchGameState {
    depth: usize,
    branching_factor: usize,
    max_depth: usize,
    score: usize,
}

impl BenchGameState {
    fn new(branching_factor: usize, max_depth: usize) -> Self {
        BenchGameState {
            depth: 0,
            branching_factor,
            max_depth,
            score: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct BenchAction(usize);

impl Action for BenchAction {}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct BenchPlayer(usize);

impl Player for BenchPlayer {}

impl GameState for BenchGameState {
    type Action = BenchAction;
    type Player = BenchPlayer;

    fn get_legal_actions(&self) -> Vec<Self::Action> {
        // Terminal nodes have no actions
        if self.depth >= self.max_depth {
            return vec![];
        }

        (0..self.branching_factor).map(BenchAction).collect()
    }

    fn apply_action(&self, action: &Self::Action) -> uct_mcts::Result<Self> {
        let mut new_state = self.clone();
        new_state.depth += 1;
        // Use action to affect state to prevent optimizer from removing it
        new_state.score += action.0;
        Ok(new_state)
    }

    fn outcome(&self) -> Option<Outcome<BenchPlayer>> {
        if self.depth < self.max_depth {
            return None;
        }
        match self.score % 3 {
            0 => Some(Outcome::Draw),
            winner => Some(Outcome::Win(BenchPlayer(winner - 1))),
        }
    }

    fn get_current_player(&self) -> Self::Player {
        BenchPlayer(self.depth % 2)
    }
}

fn bench_mcts_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search");
    group.measurement_time(Duration::from_secs(10));

    // Test different branching factors
    for bf in [2, 3, 5].iter() {
        // Constant depth = 4 for reasonable benchmarks
        let initial_state = BenchGameState::new(*bf, 4);

        let config = MCTSConfig::default()
            .with_exploration_constant(1.4)
            .with_simulations(1000)
            .with_seed(0);

        group.bench_with_input(BenchmarkId::new("branching_factor", bf), bf, |b, &_| {
            b.iter(|| {
                let mut mcts = MCTS::new(initial_state.clone(), config.clone()).unwrap();
                black_box(mcts.search())
            })
        });
    }

    // Test different iteration counts
    for &simulations in &[100, 1000, 5000] {
        let initial_state = BenchGameState::new(2, 4);

        let config = MCTSConfig::default()
            .with_simulations(simulations)
            .with_seed(0);

        group.bench_with_input(
            BenchmarkId::new("simulations", simulations),
            &simulations,
            |b, &_| {
                b.iter(|| {
                    let mut mcts = MCTS::new(initial_state.clone(), config.clone()).unwrap();
                    black_box(mcts.search())
                })
            },
        );
    }

    group.finish();
}

fn bench_tic_tac_toe(c: &mut Criterion) {
    let mut group = c.benchmark_group("tic_tac_toe");

    for &size in &[3, 4] {
        let initial_state = TicTacToe::new(size).unwrap();
        let config = MCTSConfig::default().with_seed(0);

        group.bench_with_input(BenchmarkId::new("opening_move", size), &size, |b, &_| {
            b.iter(|| {
                let mut mcts = MCTS::new(initial_state.clone(), config.clone()).unwrap();
                black_box(mcts.search())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mcts_search, bench_tic_tac_toe);
criterion_main!(benches);

//! Tic-Tac-Toe against the MCTS engine
//!
//! You play X and move first; the engine answers as O after 1000 simulations.
//! An optional argument sets the board size: `cargo run --example tic_tac_toe -- 4`

use std::io::{self, BufRead, Write};

use uct_mcts::{
    games::{Mark, TicTacToe},
    new_search, GameState, Outcome,
};

const SIMULATIONS: usize = 1000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let size = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 3,
    };

    println!("MCTS Tic-Tac-Toe Example");
    println!("========================");
    println!();

    let mut game = TicTacToe::new(size)?;
    println!("{}", game);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        // Human player (X)
        print!("Your move (row,col): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };

        let action = match game.parse_move(&line?) {
            Ok(action) => action,
            Err(e) => {
                println!("Invalid move: {}", e);
                continue;
            }
        };

        game = game.apply_action(&action)?;
        println!("{}", game);
        if judge(&game) {
            break;
        }

        // Engine (O)
        let mut mcts = new_search(game.clone());
        let reply = mcts.best_action(SIMULATIONS)?;
        println!("Engine plays {}", reply);

        game = game.apply_action(&reply)?;
        println!("{}", game);
        if judge(&game) {
            break;
        }
    }

    Ok(())
}

/// Announces the result from X's point of view; returns true once the game is over
fn judge(game: &TicTacToe) -> bool {
    match game.outcome() {
        Some(Outcome::Win(Mark::X)) => println!("You win!"),
        Some(Outcome::Win(Mark::O)) => println!("You lose!"),
        Some(Outcome::Draw) => println!("Tie!"),
        None => return false,
    }
    true
}

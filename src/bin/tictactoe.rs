//! Quantum tic-tac-toe
//! Interactive command-line game played over stdin

use anyhow::Result;
use clap::{Parser, ValueEnum};
use qudit_tictactoe::tictactoe::{TicTacResult, TicTacRules, TicTacSquare, TicTacToe};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Rules {
    /// Only single-square moves
    Classical,
    /// Split moves onto unplayed squares
    Minimal,
    /// Any move on any square
    Fully,
}

impl From<Rules> for TicTacRules {
    fn from(rules: Rules) -> Self {
        match rules {
            Rules::Classical => TicTacRules::Classical,
            Rules::Minimal => TicTacRules::MinimalQuantum,
            Rules::Fully => TicTacRules::FullyQuantum,
        }
    }
}

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(version)]
#[command(about = "Quantum tic-tac-toe on qutrit squares", long_about = None)]
struct Cli {
    /// Which quantum moves are allowed
    #[arg(short, long, value_enum, default_value = "minimal")]
    rules: Rules,

    /// Seed for reproducible measurements
    #[arg(short, long)]
    seed: Option<u64>,
}

const HELP: &str = "\
Moves:
  a..i   place your mark on one square
  ab     split your mark across two squares
Commands:
  map    show square names
  help   show this message
  exit   leave the game";

const MAP: &str = "\
 a | b | c
---+---+---
 d | e | f
---+---+---
 g | h | i";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut game = TicTacToe::new(cli.rules.into());
    if let Some(seed) = cli.seed {
        game = game.with_seed(seed);
    }

    println!("Quantum tic-tac-toe ({:?} rules). Type 'help' for moves.", game.rules());
    println!("{MAP}");

    let stdin = io::stdin();
    let mut mark = TicTacSquare::X;
    loop {
        print!("{mark} to move> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        match line.trim() {
            "" => continue,
            "exit" => return Ok(()),
            "help" => println!("{HELP}"),
            "map" => println!("{MAP}"),
            mv => match game.move_mark(mv, mark) {
                Ok(result) => {
                    println!("{}", game.print());
                    if result != TicTacResult::Unfinished {
                        println!("Final board: {}", game.sample(1)?.concat());
                        println!("Result: {result}");
                        return Ok(());
                    }
                    mark = mark.opponent();
                }
                Err(e) => println!("{e}"),
            },
        }
    }
}

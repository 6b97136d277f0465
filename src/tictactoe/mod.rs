//! Quantum tic-tac-toe: board squares are qutrits, and a split move puts a
//! mark in superposition across two squares.

mod enums;
mod game;
mod split;

pub use enums::{TicTacResult, TicTacRules, TicTacSquare};
pub use game::{SQUARE_NAMES, TicTacToe, board_to_string, eval_board};
pub use split::{QuditSplitGate, TicTacSplit};

use crate::core::errors::{GameError, GateError, WorldError};
use crate::tictactoe::{TicTacResult, TicTacRules, TicTacSplit, TicTacSquare};
use crate::world::{QuantumEffect, QuantumObject, QuantumWorld, QuditFlip, QuditValue};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Square names in row-major order.
pub const SQUARE_NAMES: [char; 9] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i'];

/// Rows, columns and diagonals, as board indices.
const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Evaluates a classical board.
pub fn eval_board(board: &[TicTacSquare; 9]) -> TicTacResult {
    let mut x_wins = false;
    let mut o_wins = false;
    for [a, b, c] in WINNING_LINES {
        let side = board[a];
        if side == TicTacSquare::Empty || board[b] != side || board[c] != side {
            continue;
        }
        match side {
            TicTacSquare::X => x_wins = true,
            TicTacSquare::O => o_wins = true,
            TicTacSquare::Empty => {}
        }
    }

    match (x_wins, o_wins) {
        (true, true) => TicTacResult::BothWin,
        (true, false) => TicTacResult::XWins,
        (false, true) => TicTacResult::OWins,
        _ if board.contains(&TicTacSquare::Empty) => TicTacResult::Unfinished,
        _ => TicTacResult::Draw,
    }
}

/// Renders a board as a 9-character string over `.XO`.
pub fn board_to_string(board: &[TicTacSquare]) -> String {
    board.iter().map(|s| s.symbol()).collect()
}

/// A game of quantum tic-tac-toe.
///
/// Each square is a qutrit in a shared [`QuantumWorld`]. Moves are one letter
/// (`a` to `i`) to place a mark, or two letters to split a mark across two
/// squares.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    board: QuantumWorld,
    rules: TicTacRules,
    seed: Option<u64>,
    empty_squares: BTreeSet<char>,
}

impl TicTacToe {
    pub fn new(rules: TicTacRules) -> Self {
        Self {
            board: Self::empty_board(None),
            rules,
            seed: None,
            empty_squares: SQUARE_NAMES.into_iter().collect(),
        }
    }

    /// Seeds the board so samples and the final measurement are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.board = Self::empty_board(Some(seed));
        self
    }

    fn empty_board(seed: Option<u64>) -> QuantumWorld {
        let squares = SQUARE_NAMES
            .iter()
            .map(|&name| QuantumObject::new(name, TicTacSquare::Empty));
        let world = QuantumWorld::new(squares).expect("square names are unique");
        match seed {
            Some(seed) => world.with_seed(seed),
            None => world,
        }
    }

    pub fn rules(&self) -> TicTacRules {
        self.rules
    }

    /// The underlying world of the nine squares.
    pub fn board(&self) -> &QuantumWorld {
        &self.board
    }

    /// Squares no move has touched yet.
    pub fn empty_squares(&self) -> &BTreeSet<char> {
        &self.empty_squares
    }

    /// Resets the board to nine empty squares.
    pub fn clear(&mut self) {
        self.board = Self::empty_board(self.seed);
        self.empty_squares = SQUARE_NAMES.into_iter().collect();
    }

    fn parse_move(mv: &str) -> Result<Vec<char>, GameError> {
        let squares: Vec<char> = mv.chars().collect();
        if squares.is_empty() || squares.len() > 2 {
            return Err(GameError::MoveLength(mv.to_string()));
        }
        if let Some(&square) = squares.iter().find(|c| !SQUARE_NAMES.contains(*c)) {
            return Err(GameError::UnknownSquare {
                mv: mv.to_string(),
                square,
            });
        }
        Ok(squares)
    }

    fn require_empty(&self, square: char) -> Result<(), GameError> {
        if self.empty_squares.contains(&square) {
            Ok(())
        } else {
            Err(GameError::SquareNotEmpty(square))
        }
    }

    /// Plays `mv` for `mark` and returns the game's result afterwards.
    ///
    /// # Errors
    ///
    /// Returns `GameError` if the move is malformed, `mark` is not a player's
    /// mark, or the rules forbid the move. A rejected move leaves the board
    /// unchanged.
    pub fn move_mark(&mut self, mv: &str, mark: TicTacSquare) -> Result<TicTacResult, GameError> {
        let squares = Self::parse_move(mv)?;
        if mark == TicTacSquare::Empty {
            return Err(GateError::InvalidSquare(mark.to_string()).into());
        }

        match squares.as_slice() {
            &[square] => {
                if self.rules != TicTacRules::FullyQuantum {
                    self.require_empty(square)?;
                }
                let flip = QuditFlip::new(TicTacSquare::DIMENSION, 0, mark.level())?;
                flip.apply(&mut self.board, &[square.to_string().as_str()])?;
            }
            &[first, second] => {
                if self.rules == TicTacRules::Classical {
                    return Err(GameError::QuantumMoveNotAllowed);
                }
                if first == second {
                    return Err(GameError::SameSquare(mv.to_string()));
                }
                if self.rules == TicTacRules::MinimalQuantum {
                    self.require_empty(first)?;
                    self.require_empty(second)?;
                }
                let split = TicTacSplit::new(mark)?;
                let (first_name, second_name) = (first.to_string(), second.to_string());
                split.apply(&mut self.board, &[first_name.as_str(), second_name.as_str()])?;
            }
            _ => return Err(GameError::MoveLength(mv.to_string())),
        }

        for square in &squares {
            self.empty_squares.remove(square);
        }
        debug!(mv, %mark, rules = ?self.rules, "move played");
        Ok(self.result()?)
    }

    /// Result of the game.
    ///
    /// While any square is untouched the game is `Unfinished`. Once every
    /// square has been played the board is measured, collapsing it, and the
    /// measured board is evaluated. A fully played board is final: if the
    /// measurement left empty squares and no line, the game is a `Draw`.
    pub fn result(&mut self) -> Result<TicTacResult, WorldError> {
        if !self.empty_squares.is_empty() {
            return Ok(TicTacResult::Unfinished);
        }
        let measured = self.board.pop::<TicTacSquare>()?;
        let board: [TicTacSquare; 9] = measured
            .try_into()
            .map_err(|v: Vec<TicTacSquare>| WorldError::WrongObjectCount {
                expected: 9,
                got: v.len(),
            })?;
        let result = match eval_board(&board) {
            TicTacResult::Unfinished => TicTacResult::Draw,
            result => result,
        };
        info!(board = %board_to_string(&board), %result, "board measured");
        Ok(result)
    }

    /// Samples the board `count` times without collapsing it.
    pub fn sample(&mut self, count: usize) -> Result<Vec<String>, WorldError> {
        Ok(self
            .board
            .peek::<TicTacSquare>(count)?
            .iter()
            .map(|board| board_to_string(board))
            .collect())
    }

    /// Renders the board with the probability of each mark per square.
    ///
    /// Every square takes three lines: the chance it is empty, X or O, as
    /// whole percentages.
    pub fn print(&self) -> String {
        let probs = self.board.get_probabilities();
        let mut out = String::new();
        for row in 0..3 {
            for mark in [TicTacSquare::Empty, TicTacSquare::X, TicTacSquare::O] {
                let cells: Vec<String> = (0..3)
                    .map(|col| {
                        let p = probs[row * 3 + col][mark.level()];
                        format!(" {} {:>3}% ", mark.symbol(), (p * 100.0).round() as u32)
                    })
                    .collect();
                out.push_str(&cells.join("|"));
                out.push('\n');
            }
            if row < 2 {
                out.push_str(&["--------"; 3].join("+"));
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::TicTacSquare::{Empty as E, O, X};

    #[test]
    fn lines_win() {
        assert_eq!(eval_board(&[X, X, X, O, O, E, E, E, E]), TicTacResult::XWins);
        assert_eq!(eval_board(&[O, X, X, O, X, E, O, E, E]), TicTacResult::OWins);
        assert_eq!(eval_board(&[X, O, O, E, X, E, E, E, X]), TicTacResult::XWins);
    }

    #[test]
    fn both_players_can_win() {
        assert_eq!(
            eval_board(&[X, X, X, O, O, O, E, E, E]),
            TicTacResult::BothWin
        );
    }

    #[test]
    fn full_board_without_line_is_draw() {
        assert_eq!(eval_board(&[X, O, X, X, O, O, O, X, X]), TicTacResult::Draw);
        assert_eq!(eval_board(&[E; 9]), TicTacResult::Unfinished);
    }

    #[test]
    fn renders_symbols() {
        assert_eq!(board_to_string(&[X, E, O]), "X.O");
    }

    #[test]
    fn print_shows_certain_empty_board() {
        let game = TicTacToe::new(TicTacRules::Classical);
        let text = game.print();
        assert_eq!(text.lines().count(), 11);
        assert!(text.starts_with(" . 100% | . 100% | . 100% "));
        assert!(text.contains(" X   0% "));
    }
}

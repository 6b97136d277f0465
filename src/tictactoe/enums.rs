use crate::world::QuditValue;
use std::fmt;

/// Contents of one board square, stored as a qutrit level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TicTacSquare {
    Empty = 0,
    X = 1,
    O = 2,
}

impl TicTacSquare {
    /// Board symbol: `.`, `X` or `O`.
    pub fn symbol(self) -> char {
        match self {
            TicTacSquare::Empty => '.',
            TicTacSquare::X => 'X',
            TicTacSquare::O => 'O',
        }
    }

    /// The other player's mark; `Empty` stays `Empty`.
    pub fn opponent(self) -> Self {
        match self {
            TicTacSquare::X => TicTacSquare::O,
            TicTacSquare::O => TicTacSquare::X,
            TicTacSquare::Empty => TicTacSquare::Empty,
        }
    }
}

impl QuditValue for TicTacSquare {
    const DIMENSION: usize = 3;

    fn level(self) -> usize {
        self as usize
    }

    fn from_level(level: usize) -> Option<Self> {
        match level {
            0 => Some(TicTacSquare::Empty),
            1 => Some(TicTacSquare::X),
            2 => Some(TicTacSquare::O),
            _ => None,
        }
    }
}

impl fmt::Display for TicTacSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TicTacSquare::Empty => "EMPTY",
            TicTacSquare::X => "X",
            TicTacSquare::O => "O",
        };
        f.write_str(name)
    }
}

/// Outcome of evaluating a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TicTacResult {
    Unfinished,
    XWins,
    OWins,
    Draw,
    BothWin,
}

impl fmt::Display for TicTacResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TicTacResult::Unfinished => "unfinished",
            TicTacResult::XWins => "X wins",
            TicTacResult::OWins => "O wins",
            TicTacResult::Draw => "draw",
            TicTacResult::BothWin => "both X and O win",
        };
        f.write_str(text)
    }
}

/// Which quantum moves a game allows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TicTacRules {
    /// Only single-square moves on unplayed squares.
    Classical,
    /// Split moves allowed, but only onto unplayed squares.
    #[default]
    MinimalQuantum,
    /// Any move on any squares.
    FullyQuantum,
}

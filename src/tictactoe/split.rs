use crate::core::errors::{GateError, WorldError};
use crate::core::{Gate, Operation, QuditGate, QuditXGate};
use crate::tictactoe::TicTacSquare;
use crate::world::{QuantumEffect, QuantumObject, QuditValue};
use ndarray::Array2;
use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

/// Two-qutrit gate that splits a mark across two squares.
///
/// On the pair |0,m> and |m,0>, where m is the mark's level, it acts as the
/// square root of iSWAP:
///
/// |0,m> -> (|0,m> + i|m,0>)/√2
/// |m,0> -> (|m,0> + i|0,m>)/√2
///
/// Every other basis state is left alone, so two applications swap the pair
/// up to a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuditSplitGate {
    square: TicTacSquare,
}

impl QuditSplitGate {
    /// Creates the gate for `square`, which must be `X` or `O`.
    pub fn new(square: TicTacSquare) -> Result<Self, GateError> {
        match square {
            TicTacSquare::X | TicTacSquare::O => Ok(Self { square }),
            TicTacSquare::Empty => Err(GateError::InvalidSquare(square.to_string())),
        }
    }

    pub fn square(&self) -> TicTacSquare {
        self.square
    }
}

impl QuditGate for QuditSplitGate {
    fn qid_shape(&self) -> Vec<usize> {
        vec![3, 3]
    }

    fn gate(&self) -> Gate {
        let mark = self.square.level();
        let zero_mark = mark;
        let mark_zero = 3 * mark;

        let mut matrix = Array2::<Complex64>::eye(9);
        let diag = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let off = Complex64::new(0.0, FRAC_1_SQRT_2);
        matrix[[zero_mark, zero_mark]] = diag;
        matrix[[mark_zero, mark_zero]] = diag;
        matrix[[zero_mark, mark_zero]] = off;
        matrix[[mark_zero, zero_mark]] = off;

        let symbol = format!("×{}", self.square.symbol());
        Gate::new(matrix, vec![3, 3])
            .and_then(|g| g.with_symbols([symbol.clone(), symbol]))
            .expect("split matrix is unitary")
    }
}

/// Quantum effect placing a mark in superposition across two squares.
///
/// The first square is flipped from empty to the mark, then the split gate
/// shares it with the second square. Starting from two empty squares this
/// gives an even superposition of the mark on either square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TicTacSplit {
    flip: QuditXGate,
    split: QuditSplitGate,
}

impl TicTacSplit {
    pub fn new(mark: TicTacSquare) -> Result<Self, GateError> {
        let split = QuditSplitGate::new(mark)?;
        Ok(Self {
            flip: QuditXGate::new(3, 0, mark.level())?,
            split,
        })
    }

    pub fn mark(&self) -> TicTacSquare {
        self.split.square()
    }
}

impl QuantumEffect for TicTacSplit {
    fn num_dimension(&self) -> Option<usize> {
        Some(TicTacSquare::DIMENSION)
    }

    fn num_objects(&self) -> Option<usize> {
        Some(2)
    }

    fn effect(&self, objects: &[&QuantumObject]) -> Result<Vec<Operation>, WorldError> {
        let (first, second) = match objects {
            [first, second] => (first.qid(), second.qid()),
            _ => {
                return Err(WorldError::WrongObjectCount {
                    expected: 2,
                    got: objects.len(),
                });
            }
        };
        Ok(vec![
            self.flip.on(&[first])?,
            self.split.on(&[first, second])?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_is_identity_outside_the_split_pair() {
        let g = QuditSplitGate::new(TicTacSquare::O).unwrap().gate();
        let one = Complex64::new(1.0, 0.0);
        for idx in [0, 1, 3, 4, 5, 7, 8] {
            assert_eq!(g.matrix[[idx, idx]], one);
        }
        assert!((g.matrix[[6, 2]] - Complex64::new(0.0, FRAC_1_SQRT_2)).norm() < 1e-12);
        assert_eq!(g.wire_symbols, vec!["×O", "×O"]);
    }

    #[test]
    fn empty_is_not_a_mark() {
        let err = QuditSplitGate::new(TicTacSquare::Empty).unwrap_err();
        assert_eq!(err.to_string(), "Not a valid square: EMPTY");
        assert!(TicTacSplit::new(TicTacSquare::Empty).is_err());
    }
}

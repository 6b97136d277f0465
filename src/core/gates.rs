use crate::core::circuit::Operation;
use crate::core::errors::{CircuitError, GateError};
use crate::core::qid::NamedQid;
use crate::core::utils;
use ndarray::Array2;
use num_complex::Complex64;

/// Represents a quantum gate on one or more qudits.
///
/// A gate is defined by its unitary matrix, the dimension of every qudit it
/// acts on, and the symbol drawn on each wire in a circuit diagram.
#[derive(Clone, Debug)]
pub struct Gate {
    /// The unitary matrix of the gate.
    pub matrix: Array2<Complex64>,
    /// Dimension of each qudit, in the order the gate is applied.
    pub qid_shape: Vec<usize>,
    /// Diagram symbol per qudit.
    pub wire_symbols: Vec<String>,
}

impl Gate {
    /// Creates a new `Gate` from a unitary matrix.
    ///
    /// # Arguments
    ///
    /// * `matrix` - A square, unitary `Array2<Complex64>`.
    /// * `qid_shape` - Dimensions of the qudits; their product must be the matrix size.
    ///
    /// # Errors
    ///
    /// Returns a `GateError` if:
    /// - The matrix is not square.
    /// - The shape is empty or has a dimension below 2.
    /// - The matrix size does not match the shape.
    /// - The matrix is not unitary.
    pub fn new(matrix: Array2<Complex64>, qid_shape: Vec<usize>) -> Result<Self, GateError> {
        let (rows, cols) = matrix.dim();

        if rows != cols {
            return Err(GateError::NotSquareMatrix);
        }

        if qid_shape.is_empty() || qid_shape.iter().any(|&d| d < 2) {
            return Err(GateError::InvalidDimensions);
        }

        if rows != utils::total_dimension(&qid_shape) {
            return Err(GateError::ShapeMismatch {
                size: rows,
                shape: qid_shape,
            });
        }

        if !utils::is_unitary(&matrix) {
            return Err(GateError::NonUnitary);
        }

        let wire_symbols = vec!["U".to_string(); qid_shape.len()];

        Ok(Self {
            matrix,
            qid_shape,
            wire_symbols,
        })
    }

    /// Replaces the diagram symbols, one per qudit.
    pub fn with_symbols<S: Into<String>>(
        mut self,
        symbols: impl IntoIterator<Item = S>,
    ) -> Result<Self, GateError> {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        if symbols.len() != self.qid_shape.len() {
            return Err(GateError::SymbolCountMismatch {
                expected: self.qid_shape.len(),
                got: symbols.len(),
            });
        }
        if let Some(i) = symbols.iter().position(String::is_empty) {
            return Err(GateError::EmptySymbol(i));
        }
        self.wire_symbols = symbols;
        Ok(self)
    }

    /// Number of qudits the gate acts on.
    pub fn num_qudits(&self) -> usize {
        self.qid_shape.len()
    }

    /// Size of the gate's matrix.
    pub fn dimension(&self) -> usize {
        self.matrix.nrows()
    }
}

/// Anything that can be turned into a [`Gate`] and placed on qids.
pub trait QuditGate {
    /// Dimension of each qudit the gate expects.
    fn qid_shape(&self) -> Vec<usize>;

    /// The unitary gate.
    fn gate(&self) -> Gate;

    /// Builds an operation applying this gate to `qids`.
    ///
    /// # Errors
    ///
    /// Returns `CircuitError` if the qid count or a qid dimension does not
    /// match [`QuditGate::qid_shape`], or if a qid repeats.
    fn on(&self, qids: &[&NamedQid]) -> Result<Operation, CircuitError> {
        let qids = qids.iter().map(|&q| q.clone()).collect();
        Operation::unitary(self.gate(), qids)
    }
}

impl QuditGate for Gate {
    fn qid_shape(&self) -> Vec<usize> {
        self.qid_shape.clone()
    }

    fn gate(&self) -> Gate {
        self.clone()
    }
}

/// Swaps two basis levels of a single qudit.
///
/// Levels other than `source` and `destination` are left alone. With
/// `source == destination` the gate is the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuditXGate {
    dimension: usize,
    source: usize,
    destination: usize,
}

impl QuditXGate {
    pub fn new(dimension: usize, source: usize, destination: usize) -> Result<Self, GateError> {
        if dimension < 2 {
            return Err(GateError::InvalidDimensions);
        }
        for level in [source, destination] {
            if level >= dimension {
                return Err(GateError::LevelOutOfRange { level, dimension });
            }
        }
        Ok(Self {
            dimension,
            source,
            destination,
        })
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn destination(&self) -> usize {
        self.destination
    }
}

impl QuditGate for QuditXGate {
    fn qid_shape(&self) -> Vec<usize> {
        vec![self.dimension]
    }

    fn gate(&self) -> Gate {
        let mut matrix = Array2::<Complex64>::eye(self.dimension);
        if self.source != self.destination {
            let (s, d) = (self.source, self.destination);
            matrix[[s, s]] = Complex64::new(0.0, 0.0);
            matrix[[d, d]] = Complex64::new(0.0, 0.0);
            matrix[[d, s]] = Complex64::new(1.0, 0.0);
            matrix[[s, d]] = Complex64::new(1.0, 0.0);
        }

        // A level permutation is always unitary and the levels were checked in `new`.
        Gate::new(matrix, vec![self.dimension])
            .and_then(|g| g.with_symbols([format!("X({}_{})", self.source, self.destination)]))
            .expect("level swap is a valid unitary")
    }
}

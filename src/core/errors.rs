use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    #[error("Matrix is not Unitary (U†U != I)")]
    NonUnitary,

    #[error("Matrix must be square")]
    NotSquareMatrix,

    #[error("Invalid Dimensions")]
    InvalidDimensions,

    #[error("Matrix of size {size} does not match qid shape {shape:?}")]
    ShapeMismatch { size: usize, shape: Vec<usize> },

    #[error("Expected {expected} wire symbols, got {got}")]
    SymbolCountMismatch { expected: usize, got: usize },

    #[error("Wire symbol {0} is empty")]
    EmptySymbol(usize),

    #[error("Level {level} is out of range for dimension {dimension}")]
    LevelOutOfRange { level: usize, dimension: usize },

    #[error("Not a valid square: {0}")]
    InvalidSquare(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("Qudit index out of bounds")]
    IndexOutOfBounds { index: usize, num_qudits: usize },

    #[error("Duplicate qudit index found: {0}")]
    DuplicateQudit(usize),

    #[error("Dimension mismatch on qudit {index}: expected {expected}, got {got}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },

    #[error("Gate error: {0}")]
    GateError(#[from] GateError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CircuitError {
    #[error("Duplicate qid in operation: {0}")]
    DuplicateQid(String),

    #[error("Qid {name} has dimension {got}, gate expects {expected}")]
    QidDimensionMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Operation needs at least one qid")]
    NoQids,

    #[error("Gate error: {0}")]
    GateError(#[from] GateError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Circuit error: {0}")]
    CircuitError(#[from] CircuitError),

    #[error("State error: {0}")]
    StateError(#[from] StateError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    #[error("Object {0} already exists in this world")]
    DuplicateObject(String),

    #[error("No object named {0} in this world")]
    UnknownObject(String),

    #[error("Effect expects {expected} objects, got {got}")]
    WrongObjectCount { expected: usize, got: usize },

    #[error("Object {name} has dimension {got}, effect expects {expected}")]
    WrongDimension {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Level {level} of object {name} has no value of the requested type")]
    InvalidLevel { name: String, level: usize },

    #[error("Gate error: {0}")]
    GateError(#[from] GateError),

    #[error("Circuit error: {0}")]
    CircuitError(#[from] CircuitError),

    #[error("State error: {0}")]
    StateError(#[from] StateError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Move {0} must be 1 or 2 letters")]
    MoveLength(String),

    #[error("Move {mv} contains {square}, squares are a through i")]
    UnknownSquare { mv: String, square: char },

    #[error("Square {0} is not empty")]
    SquareNotEmpty(char),

    #[error("Quantum moves are not allowed in a classical game")]
    QuantumMoveNotAllowed,

    #[error("Split move {0} must use two different squares")]
    SameSquare(String),

    #[error("Gate error: {0}")]
    GateError(#[from] GateError),

    #[error("World error: {0}")]
    WorldError(#[from] WorldError),
}

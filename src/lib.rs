mod core;
mod sampler;
mod simulator;
pub mod tictactoe;
pub mod world;

pub use crate::core::{
    Circuit, Gate, Moment, NamedQid, Operation, OperationKind, QuditGate, QuditXGate, StateVector,
    errors, measure, utils,
};
pub use crate::sampler::Sampler;
pub use crate::simulator::{SimulationResult, Simulator};

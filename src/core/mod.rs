pub mod circuit;
pub mod errors;
mod gates;
mod qid;
mod state;
pub mod utils;

pub use circuit::{Circuit, Moment, Operation, OperationKind, measure};
pub use gates::{Gate, QuditGate, QuditXGate};
pub use qid::NamedQid;
pub use state::StateVector;

//! Quantum worlds: named objects sharing one joint state, changed through
//! effects and observed through peeks and pops.

mod effect;
mod object;
mod quantum_world;

pub use effect::{QuantumEffect, QuditFlip};
pub use object::{QuantumObject, QuditValue};
pub use quantum_world::QuantumWorld;

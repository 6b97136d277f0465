use crate::core::errors::WorldError;
use crate::core::{Operation, QuditGate, QuditXGate};
use crate::world::{QuantumObject, QuantumWorld};

/// An action on one or more objects of a [`QuantumWorld`].
///
/// Implementors describe the operations; the world validates the objects and
/// applies them.
pub trait QuantumEffect {
    /// Dimension every target object must have, if the effect constrains it.
    fn num_dimension(&self) -> Option<usize> {
        None
    }

    /// Number of objects the effect acts on, if fixed.
    fn num_objects(&self) -> Option<usize> {
        None
    }

    /// Operations that realise the effect on `objects`.
    fn effect(&self, objects: &[&QuantumObject]) -> Result<Vec<Operation>, WorldError>;

    /// Applies the effect to the objects called `names` in `world`.
    fn apply(&self, world: &mut QuantumWorld, names: &[&str]) -> Result<(), WorldError> {
        world.apply_effect(self, names)
    }
}

/// Swaps two levels of each target object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuditFlip {
    gate: QuditXGate,
    dimension: usize,
}

impl QuditFlip {
    pub fn new(dimension: usize, source: usize, destination: usize) -> Result<Self, WorldError> {
        Ok(Self {
            gate: QuditXGate::new(dimension, source, destination)?,
            dimension,
        })
    }
}

impl QuantumEffect for QuditFlip {
    fn num_dimension(&self) -> Option<usize> {
        Some(self.dimension)
    }

    fn effect(&self, objects: &[&QuantumObject]) -> Result<Vec<Operation>, WorldError> {
        objects
            .iter()
            .map(|obj| Ok(self.gate.on(&[obj.qid()])?))
            .collect()
    }
}

use crate::core::NamedQid;

/// A typed value stored in the levels of a qudit.
///
/// Implemented by small enums such as board squares: each variant is one
/// basis level.
pub trait QuditValue: Copy + Sized {
    /// Number of levels of the qudit holding this type.
    const DIMENSION: usize;

    /// Basis level of this value.
    fn level(self) -> usize;

    /// Value stored at `level`, if any.
    fn from_level(level: usize) -> Option<Self>;
}

impl QuditValue for bool {
    const DIMENSION: usize = 2;

    fn level(self) -> usize {
        usize::from(self)
    }

    fn from_level(level: usize) -> Option<Self> {
        match level {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }
}

/// A named object in a [`QuantumWorld`](crate::world::QuantumWorld).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantumObject {
    qid: NamedQid,
    initial_level: usize,
}

impl QuantumObject {
    /// Creates an object prepared in `value`.
    pub fn new<T: QuditValue>(name: impl Into<String>, value: T) -> Self {
        Self {
            qid: NamedQid::new(name, T::DIMENSION),
            initial_level: value.level(),
        }
    }

    pub fn name(&self) -> &str {
        self.qid.name()
    }

    pub fn dimension(&self) -> usize {
        self.qid.dimension()
    }

    pub fn qid(&self) -> &NamedQid {
        &self.qid
    }

    pub fn initial_level(&self) -> usize {
        self.initial_level
    }
}

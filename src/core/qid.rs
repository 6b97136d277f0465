use std::fmt;

/// A qudit identified by name.
///
/// Qids order by name first, which fixes wire order in diagrams and qudit
/// order in simulated registers.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamedQid {
    name: String,
    dimension: usize,
}

impl NamedQid {
    /// Creates a qid with `dimension` basis levels.
    pub fn new(name: impl Into<String>, dimension: usize) -> Self {
        Self {
            name: name.into(),
            dimension,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl fmt::Display for NamedQid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (d={})", self.name, self.dimension)
    }
}

use rand::Rng;
use std::collections::BTreeMap;

/// Draws outcome indices from a fixed probability distribution.
///
/// The cumulative distribution is computed once, so repeated draws (peeks,
/// histograms) cost a binary search each instead of a full scan.
#[derive(Debug, Clone)]
pub struct Sampler {
    cdf: Vec<f64>,
}

impl Sampler {
    /// Builds a sampler over `probs`.
    ///
    /// The probabilities do not need to sum to exactly one; the last
    /// cumulative value is used as the total.
    pub fn new(probs: &[f64]) -> Self {
        let mut cdf = Vec::with_capacity(probs.len());
        let mut current_sum = 0.0;
        for &p in probs {
            current_sum += p.max(0.0);
            cdf.push(current_sum);
        }
        Self { cdf }
    }

    /// Number of possible outcomes.
    pub fn len(&self) -> usize {
        self.cdf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cdf.is_empty()
    }

    /// Draws one outcome index.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let total = self.cdf.last().copied().unwrap_or(0.0);
        let r: f64 = rng.random::<f64>() * total;

        let idx = self.cdf.partition_point(|&c| c <= r);

        // Safety check for floating point rounding errors
        idx.min(self.cdf.len().saturating_sub(1))
    }

    /// Draws `num_shots` outcome indices.
    pub fn sample_many<R: Rng>(&self, num_shots: usize, rng: &mut R) -> Vec<usize> {
        (0..num_shots).map(|_| self.sample(rng)).collect()
    }

    /// Draws `num_shots` outcomes and counts how often each index occurred.
    ///
    /// Only outcomes that occurred are present in the map.
    pub fn counts<R: Rng>(&self, num_shots: usize, rng: &mut R) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for _ in 0..num_shots {
            *counts.entry(self.sample(rng)).or_insert(0) += 1;
        }
        counts
    }
}

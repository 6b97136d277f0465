use crate::core::errors::StateError;
use crate::core::gates::Gate;
use crate::core::utils::{self, find_duplicate};
use crate::sampler::Sampler;
use ndarray::Array1;
use num_complex::Complex64;
use rand::Rng;
use tracing::trace;

/// Amplitudes below this squared norm are treated as zero.
const ZERO_TOLERANCE: f64 = 1e-14;

/// Dense state vector of a mixed-radix qudit register.
///
/// Index `i` holds the amplitude of the basis state whose levels are the
/// big-endian digits of `i` over `dims`.
#[derive(Clone, Debug)]
pub struct StateVector {
    pub amplitudes: Array1<Complex64>,
    pub dims: Vec<usize>,
}

impl StateVector {
    /// Creates a register initialized to |0...0>.
    pub fn new(dims: Vec<usize>) -> Self {
        let mut amplitudes = Array1::<Complex64>::zeros(utils::total_dimension(&dims));
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self { amplitudes, dims }
    }

    /// Creates the basis state with the given level on every qudit.
    pub fn from_levels(dims: Vec<usize>, levels: &[usize]) -> Result<Self, StateError> {
        if levels.len() != dims.len() {
            return Err(StateError::IndexOutOfBounds {
                index: levels.len(),
                num_qudits: dims.len(),
            });
        }
        for (index, (&level, &dim)) in levels.iter().zip(&dims).enumerate() {
            if level >= dim {
                return Err(StateError::DimensionMismatch {
                    index,
                    expected: dim,
                    got: level,
                });
            }
        }
        let mut amplitudes = Array1::<Complex64>::zeros(utils::total_dimension(&dims));
        amplitudes[utils::levels_to_index(levels, &dims)] = Complex64::new(1.0, 0.0);
        Ok(Self { amplitudes, dims })
    }

    pub fn num_qudits(&self) -> usize {
        self.dims.len()
    }

    /// Appends a new least-significant qudit prepared in `level`.
    ///
    /// The result is the tensor product of the current state with |level>.
    pub fn push_qudit(&mut self, dimension: usize, level: usize) -> Result<(), StateError> {
        if level >= dimension {
            return Err(StateError::DimensionMismatch {
                index: self.dims.len(),
                expected: dimension,
                got: level,
            });
        }
        let mut amplitudes = Array1::<Complex64>::zeros(self.amplitudes.len() * dimension);
        for (i, &amp) in self.amplitudes.iter().enumerate() {
            amplitudes[i * dimension + level] = amp;
        }
        self.amplitudes = amplitudes;
        self.dims.push(dimension);
        Ok(())
    }

    /// Checks if a given index is within the register's range
    fn validate_qudit_index(&self, index: usize) -> Result<(), StateError> {
        if index >= self.dims.len() {
            return Err(StateError::IndexOutOfBounds {
                index,
                num_qudits: self.dims.len(),
            });
        }
        Ok(())
    }

    fn validate_targets(&self, targets: &[usize]) -> Result<(), StateError> {
        for &q in targets {
            self.validate_qudit_index(q)?;
        }
        if let Some(dup) = find_duplicate(targets) {
            return Err(StateError::DuplicateQudit(dup));
        }
        Ok(())
    }

    /// Applies `gate` to the qudits at `targets`, in the gate's qudit order.
    pub fn apply(&mut self, gate: &Gate, targets: &[usize]) -> Result<(), StateError> {
        self.validate_targets(targets)?;

        if gate.num_qudits() != targets.len() {
            return Err(StateError::IndexOutOfBounds {
                index: targets.len(),
                num_qudits: gate.num_qudits(),
            });
        }
        for (&t, &expected) in targets.iter().zip(&gate.qid_shape) {
            if self.dims[t] != expected {
                return Err(StateError::DimensionMismatch {
                    index: t,
                    expected,
                    got: self.dims[t],
                });
            }
        }

        let strides = utils::strides(&self.dims);
        let mut next = Array1::<Complex64>::zeros(self.amplitudes.len());

        for (col_idx, &amp) in self.amplitudes.iter().enumerate() {
            if amp.norm_sqr() < ZERO_TOLERANCE {
                continue;
            }
            // Local column of the gate and the untouched part of the index
            let small_col = utils::extract_digits(col_idx, targets, &self.dims, &strides);
            let passive = col_idx - utils::deposit_digits(small_col, targets, &self.dims, &strides);

            for small_row in 0..gate.dimension() {
                let val = gate.matrix[[small_row, small_col]];
                if val.norm_sqr() < f64::EPSILON {
                    continue;
                }
                let row_idx =
                    passive + utils::deposit_digits(small_row, targets, &self.dims, &strides);
                next[row_idx] += val * amp;
            }
        }

        trace!(?targets, symbols = ?gate.wire_symbols, "applied gate");
        self.amplitudes = next;
        Ok(())
    }

    /// Probability of every basis state of the register.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Marginal probability of each level of qudit `index`.
    pub fn marginal(&self, index: usize) -> Result<Vec<f64>, StateError> {
        self.validate_qudit_index(index)?;
        let strides = utils::strides(&self.dims);
        let mut probs = vec![0.0; self.dims[index]];
        for (i, c) in self.amplitudes.iter().enumerate() {
            probs[utils::digit(i, index, &self.dims, &strides)] += c.norm_sqr();
        }
        Ok(probs)
    }

    /// Joint outcome probabilities of `targets`, indexed big-endian over their
    /// dimensions.
    pub fn outcome_probabilities(&self, targets: &[usize]) -> Result<Vec<f64>, StateError> {
        self.validate_targets(targets)?;
        let strides = utils::strides(&self.dims);
        let size: usize = targets.iter().map(|&t| self.dims[t]).product();
        let mut probs = vec![0.0; size];
        for (i, c) in self.amplitudes.iter().enumerate() {
            probs[utils::extract_digits(i, targets, &self.dims, &strides)] += c.norm_sqr();
        }

        // Renormalize against floating point drift
        let total: f64 = probs.iter().sum();
        if total > 0.0 {
            for p in &mut probs {
                *p /= total;
            }
        }
        Ok(probs)
    }

    /// Measures `targets` in the computational basis and collapses the state.
    ///
    /// Returns the measured level of each target, in `targets` order.
    pub fn measure<R: Rng>(
        &mut self,
        targets: &[usize],
        rng: &mut R,
    ) -> Result<Vec<usize>, StateError> {
        let probs = self.outcome_probabilities(targets)?;
        let outcome = Sampler::new(&probs).sample(rng);
        let p_selected = probs[outcome];

        let strides = utils::strides(&self.dims);
        let norm = Complex64::new(p_selected.sqrt(), 0.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if utils::extract_digits(i, targets, &self.dims, &strides) == outcome {
                *amp /= norm;
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }

        let target_dims: Vec<usize> = targets.iter().map(|&t| self.dims[t]).collect();
        let levels = utils::index_to_levels(outcome, &target_dims);
        trace!(?targets, ?levels, probability = p_selected, "measured");
        Ok(levels)
    }

    /// Measures every qudit and collapses onto the sampled basis state.
    pub fn measure_all<R: Rng>(&mut self, rng: &mut R) -> Vec<usize> {
        let probs = self.probabilities();
        let outcome = Sampler::new(&probs).sample(rng);
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[outcome] = Complex64::new(1.0, 0.0);
        utils::index_to_levels(outcome, &self.dims)
    }

    /// Squared norm of the state, 1 for a valid state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gates::{QuditGate, QuditXGate};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn starts_in_zero_state() {
        let s = StateVector::new(vec![3, 3]);
        assert_eq!(s.amplitudes.len(), 9);
        assert_eq!(s.probabilities()[0], 1.0);
    }

    #[test]
    fn x_gate_moves_level_on_chosen_qudit() {
        let mut s = StateVector::new(vec![3, 3]);
        s.apply(&QuditXGate::new(3, 0, 2).unwrap().gate(), &[1])
            .unwrap();
        assert_eq!(s.probabilities()[2], 1.0);
        assert_eq!(s.marginal(1).unwrap(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn push_qudit_is_tensor_product() {
        let mut s = StateVector::from_levels(vec![3], &[1]).unwrap();
        s.push_qudit(3, 2).unwrap();
        assert_eq!(s.dims, vec![3, 3]);
        assert_eq!(s.probabilities()[5], 1.0);
        assert!(s.push_qudit(2, 2).is_err());
    }

    #[test]
    fn apply_validates_targets() {
        let mut s = StateVector::new(vec![3, 2]);
        let x = QuditXGate::new(3, 0, 1).unwrap().gate();
        assert!(matches!(
            s.apply(&x, &[2]),
            Err(StateError::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            s.apply(&x, &[1]),
            Err(StateError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn measure_collapses_basis_state() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut s = StateVector::from_levels(vec![3, 3], &[2, 1]).unwrap();
        assert_eq!(s.measure(&[1, 0], &mut rng).unwrap(), vec![1, 2]);
        assert!((s.norm_sqr() - 1.0).abs() < 1e-12);
        assert_eq!(s.measure_all(&mut rng), vec![2, 1]);
    }

    #[test]
    fn measure_collapses_superposition() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let m = ndarray::array![
            [Complex64::new(h, 0.0), Complex64::new(h, 0.0)],
            [Complex64::new(h, 0.0), Complex64::new(-h, 0.0)],
        ];
        let hadamard = Gate::new(m, vec![2]).unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let mut seen = [false; 2];
        for _ in 0..50 {
            let mut s = StateVector::new(vec![2]);
            s.apply(&hadamard, &[0]).unwrap();
            let level = s.measure(&[0], &mut rng).unwrap()[0];
            seen[level] = true;
            assert!((s.marginal(0).unwrap()[level] - 1.0).abs() < 1e-12);
            assert_eq!(s.measure(&[0], &mut rng).unwrap(), vec![level]);
        }
        assert_eq!(seen, [true, true]);
    }
}

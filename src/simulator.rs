use crate::core::errors::SimulationError;
use crate::core::{Circuit, NamedQid, OperationKind, StateVector};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Measurement records of a [`Simulator::run`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationResult {
    pub repetitions: usize,
    /// For each key, one entry per repetition holding the measured level of
    /// every qid under that key.
    pub measurements: BTreeMap<String, Vec<Vec<usize>>>,
}

impl SimulationResult {
    /// Per-repetition records of `key`.
    pub fn measurements(&self, key: &str) -> Option<&[Vec<usize>]> {
        self.measurements.get(key).map(Vec::as_slice)
    }

    /// Levels of the first qid under `key`, one per repetition.
    pub fn values(&self, key: &str) -> Option<Vec<usize>> {
        self.measurements
            .get(key)
            .map(|records| records.iter().filter_map(|r| r.first().copied()).collect())
    }

    /// Counts of each distinct record under `key`.
    pub fn histogram(&self, key: &str) -> BTreeMap<Vec<usize>, usize> {
        let mut counts = BTreeMap::new();
        for record in self.measurements.get(key).into_iter().flatten() {
            *counts.entry(record.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Runs circuits on a dense state vector.
///
/// Without a seed every run draws fresh entropy; with one, runs are
/// reproducible.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    /// Optional seed for the measurement RNG.
    pub seed: Option<u64>,
}

impl Simulator {
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Fixes the measurement RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    fn register(circuit: &Circuit) -> (Vec<NamedQid>, HashMap<NamedQid, usize>) {
        let qids = circuit.all_qids();
        let index = qids
            .iter()
            .enumerate()
            .map(|(i, q)| (q.clone(), i))
            .collect();
        (qids, index)
    }

    /// Samples the circuit `repetitions` times.
    ///
    /// Every repetition starts from level 0 on each qid and applies the
    /// moments in order; measurements collapse the state mid-circuit.
    pub fn run(
        &self,
        circuit: &Circuit,
        repetitions: usize,
    ) -> Result<SimulationResult, SimulationError> {
        let (qids, index) = Self::register(circuit);
        let dims: Vec<usize> = qids.iter().map(NamedQid::dimension).collect();
        let mut rng = self.rng();

        let mut measurements: BTreeMap<String, Vec<Vec<usize>>> = BTreeMap::new();
        for op in circuit.operations() {
            if let OperationKind::Measure { key } = &op.kind {
                measurements.entry(key.clone()).or_default();
            }
        }

        for _ in 0..repetitions {
            let mut state = StateVector::new(dims.clone());
            for op in circuit.operations() {
                let targets: Vec<usize> = op.qids.iter().map(|q| index[q]).collect();
                match &op.kind {
                    OperationKind::Unitary(gate) => state.apply(gate, &targets)?,
                    OperationKind::Measure { key } => {
                        let levels = state.measure(&targets, &mut rng)?;
                        if let Some(records) = measurements.get_mut(key) {
                            records.push(levels);
                        }
                    }
                }
            }
        }

        debug!(
            repetitions,
            qids = qids.len(),
            keys = measurements.len(),
            "circuit run complete"
        );

        Ok(SimulationResult {
            repetitions,
            measurements,
        })
    }

    /// Final state of the circuit's gates, ignoring measurements.
    ///
    /// Qudits are ordered as in [`Circuit::all_qids`].
    pub fn simulate(&self, circuit: &Circuit) -> Result<StateVector, SimulationError> {
        let (qids, index) = Self::register(circuit);
        let mut state = StateVector::new(qids.iter().map(NamedQid::dimension).collect());
        for op in circuit.operations() {
            if let OperationKind::Unitary(gate) = &op.kind {
                let targets: Vec<usize> = op.qids.iter().map(|q| index[q]).collect();
                state.apply(gate, &targets)?;
            }
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{QuditGate, QuditXGate, measure};

    #[test]
    fn records_every_repetition() {
        let q = NamedQid::new("q", 3);
        let mut c = Circuit::new();
        c.append(QuditXGate::new(3, 0, 2).unwrap().on(&[&q]).unwrap());
        c.append(measure(&[&q], "q").unwrap());
        let result = Simulator::new().with_seed(3).run(&c, 5).unwrap();
        assert_eq!(result.repetitions, 5);
        assert_eq!(result.values("q").unwrap(), vec![2; 5]);
        assert_eq!(result.histogram("q")[&vec![2usize]], 5);
        assert!(result.measurements("missing").is_none());
    }

    #[test]
    fn simulate_skips_measurements() {
        let q = NamedQid::new("q", 3);
        let mut c = Circuit::new();
        c.append(measure(&[&q], "q").unwrap());
        c.append(QuditXGate::new(3, 0, 1).unwrap().on(&[&q]).unwrap());
        let state = Simulator::new().simulate(&c).unwrap();
        assert_eq!(state.probabilities(), vec![0.0, 1.0, 0.0]);
    }
}

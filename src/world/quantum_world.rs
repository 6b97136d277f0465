use crate::core::errors::WorldError;
use crate::core::utils::{self, find_duplicate};
use crate::core::{Circuit, OperationKind, QuditGate, QuditXGate, StateVector};
use crate::sampler::Sampler;
use crate::world::{QuantumEffect, QuantumObject, QuditValue};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A collection of named quantum objects sharing one joint state.
///
/// Effects entangle objects with each other. `peek` samples the current
/// distribution without disturbing it, `pop` measures and collapses it.
#[derive(Debug, Clone)]
pub struct QuantumWorld {
    objects: Vec<QuantumObject>,
    index: HashMap<String, usize>,
    state: StateVector,
    circuit: Circuit,
    rng: StdRng,
}

impl Default for QuantumWorld {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            index: HashMap::new(),
            state: StateVector::new(Vec::new()),
            circuit: Circuit::new(),
            rng: StdRng::from_os_rng(),
        }
    }
}

impl QuantumWorld {
    /// Creates a world holding `objects`, each prepared in its initial value.
    pub fn new(objects: impl IntoIterator<Item = QuantumObject>) -> Result<Self, WorldError> {
        let mut world = Self::default();
        for obj in objects {
            world.add_object(obj)?;
        }
        Ok(world)
    }

    /// Reseeds the sampling RNG so peeks and pops are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Adds an object to the world, in product with the existing state.
    pub fn add_object(&mut self, object: QuantumObject) -> Result<(), WorldError> {
        if self.index.contains_key(object.name()) {
            return Err(WorldError::DuplicateObject(object.name().to_string()));
        }
        self.state
            .push_qudit(object.dimension(), object.initial_level())?;

        if object.initial_level() != 0 {
            let prep = QuditXGate::new(object.dimension(), 0, object.initial_level())?;
            self.circuit.append(prep.on(&[object.qid()])?);
        }

        debug!(
            name = object.name(),
            dimension = object.dimension(),
            level = object.initial_level(),
            "added object"
        );
        self.index
            .insert(object.name().to_string(), self.objects.len());
        self.objects.push(object);
        Ok(())
    }

    pub fn objects(&self) -> &[QuantumObject] {
        &self.objects
    }

    /// Looks up an object by name.
    pub fn get_object(&self, name: &str) -> Option<&QuantumObject> {
        self.index.get(name).map(|&i| &self.objects[i])
    }

    /// Every operation applied to the world so far.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// The joint state, with objects in insertion order.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    fn position(&self, name: &str) -> Result<usize, WorldError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| WorldError::UnknownObject(name.to_string()))
    }

    /// Validates `names` against the effect and applies its operations.
    ///
    /// Nothing is applied if any check fails.
    pub fn apply_effect<E: QuantumEffect + ?Sized>(
        &mut self,
        effect: &E,
        names: &[&str],
    ) -> Result<(), WorldError> {
        if let Some(expected) = effect.num_objects() {
            if names.len() != expected {
                return Err(WorldError::WrongObjectCount {
                    expected,
                    got: names.len(),
                });
            }
        }
        if let Some(dup) = find_duplicate(names) {
            return Err(WorldError::DuplicateObject(dup.to_string()));
        }

        let positions = names
            .iter()
            .map(|name| self.position(name))
            .collect::<Result<Vec<_>, _>>()?;
        let objects: Vec<&QuantumObject> = positions.iter().map(|&i| &self.objects[i]).collect();

        if let Some(expected) = effect.num_dimension() {
            if let Some(obj) = objects.iter().find(|o| o.dimension() != expected) {
                return Err(WorldError::WrongDimension {
                    name: obj.name().to_string(),
                    expected,
                    got: obj.dimension(),
                });
            }
        }

        let operations = effect.effect(&objects)?;

        // Resolve every target before touching the state
        let mut resolved = Vec::with_capacity(operations.len());
        for op in operations {
            let targets = op
                .qids
                .iter()
                .map(|q| self.position(q.name()))
                .collect::<Result<Vec<_>, _>>()?;
            resolved.push((op, targets));
        }

        let mut next = self.state.clone();
        for (op, targets) in &resolved {
            match &op.kind {
                OperationKind::Unitary(gate) => next.apply(gate, targets)?,
                OperationKind::Measure { .. } => {
                    next.measure(targets, &mut self.rng)?;
                }
            }
        }
        self.state = next;
        self.circuit.extend(resolved.into_iter().map(|(op, _)| op));

        debug!(?names, "applied effect");
        Ok(())
    }

    /// Samples every object `count` times as raw levels, without collapsing.
    pub fn peek_levels(&mut self, count: usize) -> Vec<Vec<usize>> {
        let sampler = Sampler::new(&self.state.probabilities());
        sampler
            .sample_many(count, &mut self.rng)
            .into_iter()
            .map(|idx| utils::index_to_levels(idx, &self.state.dims))
            .collect()
    }

    /// Samples every object `count` times as typed values, without collapsing.
    pub fn peek<T: QuditValue>(&mut self, count: usize) -> Result<Vec<Vec<T>>, WorldError> {
        self.check_value_type::<T>()?;
        self.peek_levels(count)
            .iter()
            .map(|levels| self.to_values(levels))
            .collect()
    }

    /// Measures every object, collapses the world onto the outcome and
    /// returns it as raw levels.
    pub fn pop_levels(&mut self) -> Vec<usize> {
        let levels = self.state.measure_all(&mut self.rng);
        debug!(?levels, "popped world");
        levels
    }

    /// Measures every object, collapses the world onto the outcome and
    /// returns it as typed values.
    pub fn pop<T: QuditValue>(&mut self) -> Result<Vec<T>, WorldError> {
        self.check_value_type::<T>()?;
        let levels = self.pop_levels();
        self.to_values(&levels)
    }

    /// Counts of each level per object over `count` peeks.
    pub fn get_histogram(&mut self, count: usize) -> Vec<BTreeMap<usize, usize>> {
        let mut histogram: Vec<BTreeMap<usize, usize>> = self
            .objects
            .iter()
            .map(|o| (0..o.dimension()).map(|level| (level, 0)).collect())
            .collect();
        for levels in self.peek_levels(count) {
            for (counts, level) in histogram.iter_mut().zip(levels) {
                *counts.entry(level).or_insert(0) += 1;
            }
        }
        histogram
    }

    /// Exact marginal probability of each level, per object.
    pub fn get_probabilities(&self) -> Vec<Vec<f64>> {
        (0..self.objects.len())
            .map(|i| {
                self.state
                    .marginal(i)
                    .expect("every object has a qudit in the state")
            })
            .collect()
    }

    fn check_value_type<T: QuditValue>(&self) -> Result<(), WorldError> {
        match self.objects.iter().find(|o| o.dimension() != T::DIMENSION) {
            Some(obj) => Err(WorldError::WrongDimension {
                name: obj.name().to_string(),
                expected: T::DIMENSION,
                got: obj.dimension(),
            }),
            None => Ok(()),
        }
    }

    fn to_values<T: QuditValue>(&self, levels: &[usize]) -> Result<Vec<T>, WorldError> {
        levels
            .iter()
            .zip(&self.objects)
            .map(|(&level, obj)| {
                T::from_level(level).ok_or_else(|| WorldError::InvalidLevel {
                    name: obj.name().to_string(),
                    level,
                })
            })
            .collect()
    }
}

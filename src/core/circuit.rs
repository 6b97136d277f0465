//! Circuits: ordered moments of operations on named qudits, and their text
//! diagrams.

use crate::core::errors::CircuitError;
use crate::core::gates::Gate;
use crate::core::qid::NamedQid;
use crate::core::utils;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// What an operation does to its qids.
#[derive(Clone, Debug)]
pub enum OperationKind {
    /// Apply a unitary gate.
    Unitary(Gate),
    /// Measure in the computational basis and record under `key`.
    Measure { key: String },
}

/// A gate or measurement placed on an ordered list of distinct qids.
#[derive(Clone, Debug)]
pub struct Operation {
    pub kind: OperationKind,
    pub qids: Vec<NamedQid>,
}

impl Operation {
    /// Places `gate` on `qids`, checking count, dimensions and duplicates.
    pub fn unitary(gate: Gate, qids: Vec<NamedQid>) -> Result<Self, CircuitError> {
        Self::check_qids(&qids)?;
        if gate.qid_shape.len() != qids.len() {
            return Err(CircuitError::GateError(
                crate::core::errors::GateError::InvalidDimensions,
            ));
        }
        for (q, &expected) in qids.iter().zip(&gate.qid_shape) {
            if q.dimension() != expected {
                return Err(CircuitError::QidDimensionMismatch {
                    name: q.name().to_string(),
                    expected,
                    got: q.dimension(),
                });
            }
        }
        Ok(Self {
            kind: OperationKind::Unitary(gate),
            qids,
        })
    }

    /// Measures `qids` in the computational basis under `key`.
    pub fn measure(qids: Vec<NamedQid>, key: impl Into<String>) -> Result<Self, CircuitError> {
        Self::check_qids(&qids)?;
        Ok(Self {
            kind: OperationKind::Measure { key: key.into() },
            qids,
        })
    }

    fn check_qids(qids: &[NamedQid]) -> Result<(), CircuitError> {
        if qids.is_empty() {
            return Err(CircuitError::NoQids);
        }
        if let Some(dup) = utils::find_duplicate(qids) {
            return Err(CircuitError::DuplicateQid(dup.name().to_string()));
        }
        Ok(())
    }

    /// Diagram symbol for each of the operation's qids.
    pub fn wire_symbols(&self) -> Vec<String> {
        match &self.kind {
            OperationKind::Unitary(gate) => gate.wire_symbols.clone(),
            OperationKind::Measure { key } => {
                let mut symbols = vec!["M".to_string(); self.qids.len()];
                symbols[0] = format!("M('{key}')");
                symbols
            }
        }
    }
}

/// Shorthand for a single-key computational-basis measurement.
pub fn measure(qids: &[&NamedQid], key: impl Into<String>) -> Result<Operation, CircuitError> {
    Operation::measure(qids.iter().map(|&q| q.clone()).collect(), key)
}

/// Operations that run at the same time on disjoint qids.
#[derive(Clone, Debug, Default)]
pub struct Moment {
    pub operations: Vec<Operation>,
}

impl Moment {
    fn touches(&self, qid: &NamedQid) -> bool {
        self.operations.iter().any(|op| op.qids.contains(qid))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Circuit {
    moments: Vec<Moment>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation in the earliest moment after the last moment that
    /// touches any of its qids.
    pub fn append(&mut self, operation: Operation) -> &mut Self {
        let earliest = self
            .moments
            .iter()
            .rposition(|m| operation.qids.iter().any(|q| m.touches(q)))
            .map_or(0, |i| i + 1);

        if earliest == self.moments.len() {
            self.moments.push(Moment::default());
        }
        self.moments[earliest].operations.push(operation);
        self
    }

    /// Appends every operation in order.
    pub fn extend(&mut self, operations: impl IntoIterator<Item = Operation>) -> &mut Self {
        for op in operations {
            self.append(op);
        }
        self
    }

    pub fn moments(&self) -> &[Moment] {
        &self.moments
    }

    /// Operations in moment order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.moments.iter().flat_map(|m| m.operations.iter())
    }

    /// Every qid used by the circuit, sorted.
    pub fn all_qids(&self) -> Vec<NamedQid> {
        self.operations()
            .flat_map(|op| op.qids.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }

    /// Renders the text diagram of the circuit.
    pub fn to_text_diagram(&self) -> String {
        let qids = self.all_qids();
        if qids.is_empty() {
            return String::new();
        }
        let row_of: HashMap<&NamedQid, usize> =
            qids.iter().enumerate().map(|(i, q)| (q, i)).collect();

        let labels: Vec<String> = qids.iter().map(|q| q.to_string()).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut wires: Vec<String> = labels
            .iter()
            .map(|l| format!("{l:<label_width$}: "))
            .collect();
        // One connector row between each pair of adjacent wires.
        let mut connectors: Vec<String> = vec![" ".repeat(label_width + 2); qids.len() - 1];

        for column in self.diagram_columns(&row_of) {
            let mut cells: Vec<Option<String>> = vec![None; qids.len()];
            let mut links = vec![false; qids.len().saturating_sub(1)];

            for (op, (lo, hi)) in column {
                for (q, symbol) in op.qids.iter().zip(op.wire_symbols()) {
                    cells[row_of[q]] = Some(symbol);
                }
                for row in lo..hi {
                    links[row] = true;
                }
                for row in lo + 1..hi {
                    cells[row].get_or_insert_with(|| "┼".to_string());
                }
            }

            let width = cells
                .iter()
                .flatten()
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(1)
                .max(1);

            for (wire, cell) in wires.iter_mut().zip(&cells) {
                wire.push_str("───");
                let symbol = cell.as_deref().unwrap_or("");
                wire.push_str(symbol);
                wire.push_str(&"─".repeat(width - symbol.chars().count()));
            }
            for (connector, &linked) in connectors.iter_mut().zip(&links) {
                connector.push_str("   ");
                connector.push(if linked { '│' } else { ' ' });
                connector.push_str(&" ".repeat(width - 1));
            }
        }

        let mut lines = Vec::with_capacity(2 * qids.len() - 1);
        for (i, wire) in wires.iter_mut().enumerate() {
            wire.push_str("───");
            lines.push(wire.clone());
            if let Some(connector) = connectors.get(i) {
                lines.push(connector.trim_end().to_string());
            }
        }
        lines.join("\n")
    }

    /// Splits each moment into diagram columns so that no operation is drawn
    /// across the row span of another one.
    fn diagram_columns<'a>(
        &'a self,
        row_of: &HashMap<&NamedQid, usize>,
    ) -> Vec<Vec<(&'a Operation, (usize, usize))>> {
        let mut columns = Vec::new();
        for moment in &self.moments {
            let mut split: Vec<Vec<(&Operation, (usize, usize))>> = Vec::new();
            for op in &moment.operations {
                let rows = op.qids.iter().map(|q| row_of[q]);
                let span = (rows.clone().min().unwrap_or(0), rows.max().unwrap_or(0));
                let free = split.iter().position(|col| {
                    col.iter()
                        .all(|&(_, (lo, hi))| span.1 < lo || hi < span.0)
                });
                match free {
                    Some(i) => split[i].push((op, span)),
                    None => split.push(vec![(op, span)]),
                }
            }
            columns.extend(split);
        }
        columns
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text_diagram())
    }
}

//! Tests for circuit simulation: repetitions, seeds and mid-circuit collapse.

use qudit_tictactoe::errors::{CircuitError, GateError};
use qudit_tictactoe::tictactoe::{QuditSplitGate, TicTacSquare};
use qudit_tictactoe::{Circuit, Gate, NamedQid, QuditGate, QuditXGate, Simulator, measure};

fn split_circuit() -> (Circuit, NamedQid, NamedQid) {
    let a = NamedQid::new("a", 3);
    let b = NamedQid::new("b", 3);
    let mut c = Circuit::new();
    c.append(QuditXGate::new(3, 0, 1).unwrap().on(&[&a]).unwrap());
    c.append(
        QuditSplitGate::new(TicTacSquare::X)
            .unwrap()
            .on(&[&a, &b])
            .unwrap(),
    );
    c.append(measure(&[&a, &b], "ab").unwrap());
    (c, a, b)
}

#[test]
fn test_same_seed_same_samples() {
    let (c, _, _) = split_circuit();
    let first = Simulator::new().with_seed(17).run(&c, 200).unwrap();
    let second = Simulator::new().with_seed(17).run(&c, 200).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_split_outcomes_are_exclusive() {
    let (c, _, _) = split_circuit();
    let result = Simulator::new().with_seed(8).run(&c, 1000).unwrap();
    let hist = result.histogram("ab");
    assert_eq!(hist.len(), 2);
    let mark_on_a = hist[&vec![1usize, 0]];
    let mark_on_b = hist[&vec![0usize, 1]];
    assert_eq!(mark_on_a + mark_on_b, 1000);
    assert!(mark_on_a > 400 && mark_on_b > 400);
}

#[test]
fn test_measurement_collapses_before_later_gates() {
    let (mut c, a, b) = split_circuit();
    // After collapse a second split no longer has a definite swap result
    c.append(
        QuditSplitGate::new(TicTacSquare::X)
            .unwrap()
            .on(&[&a, &b])
            .unwrap(),
    );
    c.append(measure(&[&a], "a").unwrap());
    let result = Simulator::new().with_seed(21).run(&c, 400).unwrap();
    let values = result.values("a").unwrap();
    assert!(values.contains(&0));
    assert!(values.contains(&1));
    assert!(values.iter().all(|&v| v < 2));
}

#[test]
fn test_gate_on_wrong_qid_dimension() {
    let q = NamedQid::new("q", 2);
    let r = NamedQid::new("r", 3);
    let err = QuditSplitGate::new(TicTacSquare::O)
        .unwrap()
        .on(&[&q, &r])
        .unwrap_err();
    assert_eq!(
        err,
        CircuitError::QidDimensionMismatch {
            name: "q".into(),
            expected: 3,
            got: 2
        }
    );
}

#[test]
fn test_gate_needs_real_qudits() {
    let one = ndarray::Array2::eye(1);
    assert_eq!(
        Gate::new(one.clone(), vec![]).unwrap_err(),
        GateError::InvalidDimensions
    );
    assert_eq!(Gate::new(one, vec![1]).unwrap_err(), GateError::InvalidDimensions);
}

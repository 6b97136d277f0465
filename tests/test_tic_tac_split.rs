//! Tests for the split gate and the split move on qutrit squares.

use qudit_tictactoe::errors::GateError;
use qudit_tictactoe::tictactoe::{QuditSplitGate, TicTacSplit, TicTacSquare};
use qudit_tictactoe::world::{QuantumEffect, QuantumObject, QuantumWorld, QuditFlip};
use qudit_tictactoe::{Circuit, NamedQid, QuditGate, QuditXGate, Simulator, measure};

fn check_double_split_swaps(mark: TicTacSquare, swap_state1: usize, swap_state2: usize) {
    let q0 = NamedQid::new("a", 3);
    let q1 = NamedQid::new("b", 3);
    let sim = Simulator::new().with_seed(42);
    let split = QuditSplitGate::new(mark).unwrap();

    for a in 0..3 {
        for b in 0..3 {
            let mut c = Circuit::new();
            if a > 0 {
                c.append(QuditXGate::new(3, 0, a).unwrap().on(&[&q0]).unwrap());
            }
            if b > 0 {
                c.append(QuditXGate::new(3, 0, b).unwrap().on(&[&q1]).unwrap());
            }
            c.append(split.on(&[&q0, &q1]).unwrap());
            c.append(split.on(&[&q0, &q1]).unwrap());
            c.append(measure(&[&q0], "a").unwrap());
            c.append(measure(&[&q1], "b").unwrap());

            let results = sim.run(&c, 10).unwrap();
            let on_a = results.values("a").unwrap();
            let on_b = results.values("b").unwrap();
            assert_eq!(on_a.len(), 10);

            let swapped = (a == swap_state1 && b == swap_state2)
                || (a == swap_state2 && b == swap_state1);
            if swapped {
                assert!(on_a.iter().all(|&r| r == b), "a={a} b={b}: {on_a:?}");
                assert!(on_b.iter().all(|&r| r == a), "a={a} b={b}: {on_b:?}");
            } else {
                assert!(on_a.iter().all(|&r| r == a), "a={a} b={b}: {on_a:?}");
                assert!(on_b.iter().all(|&r| r == b), "a={a} b={b}: {on_b:?}");
            }
        }
    }
}

#[test]
fn test_split_gate_twice_swaps_x() {
    check_double_split_swaps(TicTacSquare::X, 0, 1);
}

#[test]
fn test_split_gate_twice_swaps_o() {
    check_double_split_swaps(TicTacSquare::O, 0, 2);
}

#[test]
fn test_invalid_mark_for_gate() {
    let err = QuditSplitGate::new(TicTacSquare::Empty).unwrap_err();
    assert!(matches!(err, GateError::InvalidSquare(_)));
    assert!(err.to_string().starts_with("Not a valid square"));
    assert!(TicTacSplit::new(TicTacSquare::Empty).is_err());

    for mark in [TicTacSquare::X, TicTacSquare::O] {
        assert_eq!(QuditSplitGate::new(mark).unwrap().square(), mark);
    }
}

#[test]
fn test_diagram() {
    let q0 = NamedQid::new("a", 3);
    let q1 = NamedQid::new("b", 3);
    let mut c = Circuit::new();
    c.append(
        QuditSplitGate::new(TicTacSquare::X)
            .unwrap()
            .on(&[&q0, &q1])
            .unwrap(),
    );
    let expected = "
a (d=3): ───×X───
            │
b (d=3): ───×X───
"
    .trim();
    assert_eq!(c.to_string(), expected);
}

#[test]
fn test_single_split_superposition() {
    let q0 = NamedQid::new("a", 3);
    let q1 = NamedQid::new("b", 3);
    let mut c = Circuit::new();
    c.append(QuditXGate::new(3, 0, 2).unwrap().on(&[&q0]).unwrap());
    c.append(
        QuditSplitGate::new(TicTacSquare::O)
            .unwrap()
            .on(&[&q0, &q1])
            .unwrap(),
    );
    let probs = Simulator::new().simulate(&c).unwrap().probabilities();
    // |O,EMPTY> is index 6 and |EMPTY,O> is index 2
    assert!((probs[6] - 0.5).abs() < 1e-9);
    assert!((probs[2] - 0.5).abs() < 1e-9);
    assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
}

fn check_tic_tac_split(mark: TicTacSquare) {
    let a = QuantumObject::new("a", TicTacSquare::Empty);
    let b = QuantumObject::new("b", TicTacSquare::Empty);
    let mut board = QuantumWorld::new([a, b]).unwrap().with_seed(5);
    TicTacSplit::new(mark)
        .unwrap()
        .apply(&mut board, &["a", "b"])
        .unwrap();

    let results = board.peek::<TicTacSquare>(1000).unwrap();
    let on_a = vec![mark, TicTacSquare::Empty];
    let on_b = vec![TicTacSquare::Empty, mark];
    assert!(results.iter().any(|r| *r == on_a));
    assert!(results.iter().any(|r| *r == on_b));
    assert!(results.iter().all(|r| *r == on_a || *r == on_b));
}

#[test]
fn test_tic_tac_split_x() {
    check_tic_tac_split(TicTacSquare::X);
}

#[test]
fn test_tic_tac_split_o() {
    check_tic_tac_split(TicTacSquare::O);
}

#[test]
fn test_tic_tac_split_entangled() {
    use qudit_tictactoe::tictactoe::TicTacSquare::{Empty, O, X};

    let mut board = QuantumWorld::new([
        QuantumObject::new("a", Empty),
        QuantumObject::new("b", Empty),
        QuantumObject::new("c", Empty),
    ])
    .unwrap()
    .with_seed(9);
    TicTacSplit::new(X)
        .unwrap()
        .apply(&mut board, &["a", "b"])
        .unwrap();
    TicTacSplit::new(O)
        .unwrap()
        .apply(&mut board, &["b", "c"])
        .unwrap();

    let results = board.peek::<TicTacSquare>(1000).unwrap();
    let on_ab = vec![X, O, Empty];
    let on_ac = vec![X, Empty, O];
    let on_b = vec![Empty, X, Empty];
    assert!(results.iter().any(|r| *r == on_ab));
    assert!(results.iter().any(|r| *r == on_ac));
    assert!(results.iter().any(|r| *r == on_b));
    assert!(
        results
            .iter()
            .all(|r| *r == on_ab || *r == on_ac || *r == on_b)
    );
}

#[test]
fn test_split_needs_two_qutrits() {
    let mut board = QuantumWorld::new([
        QuantumObject::new("a", TicTacSquare::Empty),
        QuantumObject::new("flag", false),
    ])
    .unwrap();
    let split = TicTacSplit::new(TicTacSquare::X).unwrap();
    assert!(split.apply(&mut board, &["a"]).is_err());
    assert!(split.apply(&mut board, &["a", "flag"]).is_err());
    assert!(split.apply(&mut board, &["a", "a"]).is_err());
    assert!(board.circuit().is_empty());
}

#[test]
fn test_world_records_split_circuit() {
    let mut board = QuantumWorld::new([
        QuantumObject::new("a", TicTacSquare::Empty),
        QuantumObject::new("b", TicTacSquare::Empty),
    ])
    .unwrap();
    TicTacSplit::new(TicTacSquare::X)
        .unwrap()
        .apply(&mut board, &["a", "b"])
        .unwrap();
    let expected = "\
a (d=3): ───X(0_1)───×X───
                     │
b (d=3): ────────────×X───";
    assert_eq!(board.circuit().to_string(), expected);
}

#[test]
fn test_flip_on_several_squares() {
    let mut world = QuantumWorld::new(
        ["a", "b", "c"]
            .into_iter()
            .map(|name| QuantumObject::new(name, TicTacSquare::Empty)),
    )
    .unwrap()
    .with_seed(9);
    QuditFlip::new(3, 0, 2)
        .unwrap()
        .apply(&mut world, &["a", "c"])
        .unwrap();
    assert_eq!(world.circuit().operations().count(), 2);

    let probs = world.get_probabilities();
    assert_eq!(probs.len(), 3);
    assert_eq!(probs[0], vec![0.0, 0.0, 1.0]);
    assert_eq!(probs[1], vec![1.0, 0.0, 0.0]);
    assert_eq!(probs[2], vec![0.0, 0.0, 1.0]);
    assert_eq!(
        world.pop::<TicTacSquare>().unwrap(),
        vec![TicTacSquare::O, TicTacSquare::Empty, TicTacSquare::O]
    );
}

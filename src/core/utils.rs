//! Utility functions for qudit registers.
//!
//! This module contains helper functions for:
//! - Mixed-radix index arithmetic (strides, digit extraction and deposit).
//! - Unitarity checks.
//! - Duplicate detection in index lists.

use ndarray::Array2;
use num_complex::Complex64;

/// Tolerance used when comparing a matrix product against the identity.
pub const UNITARY_TOLERANCE: f64 = 1e-6;

/// Total dimension of a register with the given per-qudit dimensions.
pub fn total_dimension(dims: &[usize]) -> usize {
    dims.iter().product()
}

/// Big-endian strides of a mixed-radix register.
///
/// The first qudit is the most significant digit, so its stride is the
/// product of every dimension after it.
pub fn strides(dims: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; dims.len()];
    for i in (0..dims.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}

/// Reads the digit of qudit `pos` out of a register index.
pub fn digit(index: usize, pos: usize, dims: &[usize], strides: &[usize]) -> usize {
    (index / strides[pos]) % dims[pos]
}

/// Splits a register index into one level per qudit.
pub fn index_to_levels(index: usize, dims: &[usize]) -> Vec<usize> {
    let strides = strides(dims);
    (0..dims.len())
        .map(|pos| digit(index, pos, dims, &strides))
        .collect()
}

/// Joins one level per qudit into a register index.
pub fn levels_to_index(levels: &[usize], dims: &[usize]) -> usize {
    levels
        .iter()
        .zip(dims)
        .fold(0, |acc, (&level, &dim)| acc * dim + level)
}

/// Extracts the digits in positions `targets` of `index` into a compact
/// big-endian value over the target dimensions.
pub fn extract_digits(index: usize, targets: &[usize], dims: &[usize], strides: &[usize]) -> usize {
    targets.iter().fold(0, |acc, &pos| {
        acc * dims[pos] + digit(index, pos, dims, strides)
    })
}

/// Scatters the digits of `compact_value` into the positions `targets`.
///
/// Inverse of [`extract_digits`]: the result only has the target digits set.
pub fn deposit_digits(
    compact_value: usize,
    targets: &[usize],
    dims: &[usize],
    strides: &[usize],
) -> usize {
    let mut rest = compact_value;
    let mut result = 0;
    for &pos in targets.iter().rev() {
        result += (rest % dims[pos]) * strides[pos];
        rest /= dims[pos];
    }
    result
}

/// Find duplicate in a slice
pub fn find_duplicate<T: Eq + std::hash::Hash + Clone>(items: &[T]) -> Option<T> {
    let mut seen = std::collections::HashSet::new();
    items.iter().find(|&item| !seen.insert(item)).cloned()
}

/// Checks if a given matrix is unitary (U U† = I).
pub fn is_unitary(matrix: &Array2<Complex64>) -> bool {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return false;
    }
    let eye = Array2::<Complex64>::eye(rows);

    let u_dagger = matrix.t().mapv(|x| x.conj());
    let product = matrix.dot(&u_dagger);

    product
        .iter()
        .zip(eye.iter())
        .all(|(a, b)| (*a - *b).norm() < UNITARY_TOLERANCE)
}

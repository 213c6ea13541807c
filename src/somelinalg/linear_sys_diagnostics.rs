use crate::errors::NumericalError;
use crate::global::SINGULARITY_THRESHOLD;
use log::warn;
use nalgebra::{DMatrix, DVector};

/// Diagonal dominance of a square matrix, `|A_ii|` against `sum_{j != i} |A_ij|` row by row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagonalDominance {
    /// `>` in every row
    Strict,
    /// `>=` in every row
    Weak,
    None,
}

pub fn diagonal_dominance(A: &DMatrix<f64>) -> DiagonalDominance {
    let mut strict = true;
    for (i, row) in A.row_iter().enumerate() {
        let diag = row[i].abs();
        let off: f64 = row
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, v)| v.abs())
            .sum();
        if diag < off {
            return DiagonalDominance::None;
        }
        if diag == off {
            strict = false;
        }
    }
    if strict {
        DiagonalDominance::Strict
    } else {
        DiagonalDominance::Weak
    }
}

/// Checks that `A x = b` is a square system with matching right-hand side.
pub fn check_square_system(A: &DMatrix<f64>, b: &DVector<f64>) -> Result<(), NumericalError> {
    let (rows, cols) = A.shape();
    if rows == 0 || rows != cols {
        return Err(NumericalError::Precondition(format!(
            "matrix must be square and non-empty, got {}x{}",
            rows, cols
        )));
    }
    if b.len() != rows {
        return Err(NumericalError::Precondition(format!(
            "right-hand side has {} entries, matrix has {} rows",
            b.len(),
            rows
        )));
    }
    Ok(())
}

/// Index of the first zero diagonal entry, if any.
pub fn zero_diagonal_entry(A: &DMatrix<f64>) -> Option<usize> {
    A.diagonal().iter().position(|d| *d == 0.0)
}

/// Singularity test on the pivots of the LU decomposition, relative to the largest entry.
pub fn is_singular(A: &DMatrix<f64>) -> bool {
    let scale = A.amax();
    if scale == 0.0 {
        return true;
    }
    let lu = A.clone().lu();
    let min_pivot = lu
        .u()
        .diagonal()
        .iter()
        .fold(f64::INFINITY, |acc, p| acc.min(p.abs()));
    let singular = min_pivot <= SINGULARITY_THRESHOLD * scale;
    if singular {
        warn!("Matrix is singular. Smallest pivot = {:e}", min_pivot);
    }
    singular
}

/// Ratio of the largest to the smallest singular value is above `threshold`.
pub fn poorly_conditioned(A: &DMatrix<f64>, threshold: f64) -> bool {
    let singular_values = A.singular_values();
    let max_sigma = singular_values.max();
    let min_sigma = singular_values.min();
    let condition_number = max_sigma / min_sigma;
    let poorly_conditioned = condition_number > threshold;
    if poorly_conditioned {
        warn!(
            "The system of linear equations is poorly conditioned. Condition number = {:.2e}",
            condition_number
        );
    }
    poorly_conditioned
}

//! Tridiagonal linear systems.
//!
//! The Thomas algorithm (Gaussian elimination without pivoting, O(n)) is tried first; when
//! it meets a vanishing pivot the system is handed to the dense LU decomposition of nalgebra,
//! which pivots. A matrix that is singular for LU too gives [`NumericalError::SingularSystem`].
use crate::errors::NumericalError;
use crate::global::SINGULARITY_THRESHOLD;
use crate::somelinalg::linear_sys_diagnostics::is_singular;
use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

#[derive(Clone, Debug, PartialEq)]
pub struct Tridiagonal {
    /// sub-diagonal, `lower[i]` sits in row `i + 1`
    pub lower: Vec<f64>,
    pub diag: Vec<f64>,
    /// super-diagonal, `upper[i]` sits in row `i`
    pub upper: Vec<f64>,
}

impl Tridiagonal {
    pub fn new(lower: Vec<f64>, diag: Vec<f64>, upper: Vec<f64>) -> Result<Self, NumericalError> {
        let n = diag.len();
        if n == 0 || lower.len() + 1 != n || upper.len() + 1 != n {
            return Err(NumericalError::Precondition(format!(
                "tridiagonal bands of sizes {}, {}, {} do not fit together",
                lower.len(),
                n,
                upper.len()
            )));
        }
        Ok(Self { lower, diag, upper })
    }

    pub fn size(&self) -> usize {
        self.diag.len()
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        let n = self.size();
        DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                self.diag[i]
            } else if i == j + 1 {
                self.lower[j]
            } else if j == i + 1 {
                self.upper[i]
            } else {
                0.0
            }
        })
    }

    /// matrix-vector product without building the dense matrix
    pub fn mul_vec(&self, x: &DVector<f64>) -> DVector<f64> {
        let n = self.size();
        DVector::from_fn(n, |i, _| {
            let mut s = self.diag[i] * x[i];
            if i > 0 {
                s += self.lower[i - 1] * x[i - 1];
            }
            if i + 1 < n {
                s += self.upper[i] * x[i + 1];
            }
            s
        })
    }

    /// Thomas algorithm, None on a vanishing pivot
    pub fn solve_thomas(&self, rhs: &DVector<f64>) -> Option<DVector<f64>> {
        let n = self.size();
        let scale = self
            .diag
            .iter()
            .chain(self.lower.iter())
            .chain(self.upper.iter())
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let mut c_star = vec![0.0; n];
        let mut d_star = vec![0.0; n];
        let mut pivot = self.diag[0];
        for i in 0..n {
            if i > 0 {
                pivot = self.diag[i] - self.lower[i - 1] * c_star[i - 1];
            }
            if !pivot.is_finite() || pivot.abs() <= SINGULARITY_THRESHOLD * scale {
                debug!("Thomas algorithm: pivot {:e} in row {}", pivot, i);
                return None;
            }
            if i + 1 < n {
                c_star[i] = self.upper[i] / pivot;
            }
            let previous = if i > 0 { self.lower[i - 1] * d_star[i - 1] } else { 0.0 };
            d_star[i] = (rhs[i] - previous) / pivot;
        }
        let mut x = DVector::zeros(n);
        x[n - 1] = d_star[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = d_star[i] - c_star[i] * x[i + 1];
        }
        Some(x)
    }

    /// Solves the system, falling back to a pivoted dense LU when Thomas fails.
    pub fn solve(&self, rhs: &DVector<f64>) -> Result<DVector<f64>, NumericalError> {
        let n = self.size();
        if rhs.len() != n {
            return Err(NumericalError::Precondition(format!(
                "right-hand side has {} entries, matrix has {} rows",
                rhs.len(),
                n
            )));
        }
        if let Some(x) = self.solve_thomas(rhs) {
            return Ok(x);
        }
        warn!("Thomas algorithm failed, trying dense LU for {}x{} system", n, n);
        let dense = self.to_dense();
        if is_singular(&dense) {
            return Err(NumericalError::SingularSystem { size: n });
        }
        dense
            .lu()
            .solve(rhs)
            .ok_or(NumericalError::SingularSystem { size: n })
    }
}

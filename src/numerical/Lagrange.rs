//! Lagrange interpolation polynomial
//! ```text
//! P(x) = sum_i y_i * prod_{j != i} (x - x_j)/(x_i - x_j)
//! ```
//! computed in coefficient form, so the result is an ordinary [`Polynomial`].
//!
//! Example#
//! ```
//! use RustedNumerics::numerical::Lagrange::lagrange;
//! let P = lagrange(&[(0.0, 1.0), (1.0, 2.0), (2.0, 5.0)]).unwrap();
//! assert_eq!(P.to_string(), "1 + x^2");
//! ```
use crate::errors::NumericalError;
use crate::global::THRESHOLD;
use crate::symbolic::polynomial::Polynomial;
use log::{debug, info};

/// coefficients of `poly * (x - root)`
fn mul_by_linear(poly: &[f64], root: f64) -> Vec<f64> {
    let mut result = vec![0.0; poly.len() + 1];
    for (k, c) in poly.iter().enumerate() {
        result[k + 1] += c;
        result[k] -= c * root;
    }
    result
}

/// Interpolation polynomial through `points`; x-coordinates must be distinct.
pub fn lagrange(points: &[(f64, f64)]) -> Result<Polynomial, NumericalError> {
    if points.is_empty() {
        return Err(NumericalError::Precondition(
            "at least one point is required".to_string(),
        ));
    }
    if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(NumericalError::Precondition(
            "points must be finite".to_string(),
        ));
    }
    for (i, (xi, _)) in points.iter().enumerate() {
        if let Some((xj, _)) = points[i + 1..].iter().find(|(xj, _)| xj == xi) {
            return Err(NumericalError::Precondition(format!(
                "duplicate x-coordinate {}",
                xj
            )));
        }
    }
    info!("Lagrange interpolation through {} points", points.len());
    let n = points.len();
    let mut coefficients = vec![0.0; n];
    for (i, (xi, yi)) in points.iter().enumerate() {
        let mut basis = vec![1.0];
        let mut denominator = 1.0;
        for (j, (xj, _)) in points.iter().enumerate() {
            if i != j {
                basis = mul_by_linear(&basis, *xj);
                denominator *= xi - xj;
            }
        }
        debug!("L_{}: {:?} / {}", i, basis, denominator);
        for (c, b) in coefficients.iter_mut().zip(basis.iter()) {
            *c += yi * b / denominator;
        }
    }
    // cancellation leaves round-off instead of exact zeros; terms are compared by their size
    // over the nodes, a small coefficient of x^k may still be a large term there
    let radius = points.iter().fold(0.0_f64, |acc, (x, _)| acc.max(x.abs()));
    Ok(Polynomial::from_coefficients(coefficients).chop_within(THRESHOLD, radius))
}

/// Separate x and y lists, as read from a task file.
pub fn lagrange_xy(xs: &[f64], ys: &[f64]) -> Result<Polynomial, NumericalError> {
    if xs.len() != ys.len() {
        return Err(NumericalError::Precondition(format!(
            "{} x values but {} y values",
            xs.len(),
            ys.len()
        )));
    }
    let points: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
    lagrange(&points)
}

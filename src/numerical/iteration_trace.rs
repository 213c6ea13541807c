//! Iteration history shared by all iterative methods.
//!
//! Every solver returns an [`IterationTrace`]: the ordered records of its run plus the
//! terminal [`SolverState`]. Only malformed input and violated preconditions are returned
//! as `Err`; a singular Jacobian, a vanishing derivative or an exhausted iteration budget
//! end the run early and are visible through [`IterationTrace::state`]. Callers that only
//! want the answer use [`IterationTrace::ensure_converged`].
use crate::errors::{DomainError, NumericalError};
use crate::global::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use log::{info, warn};
use nalgebra::DVector;
use std::fmt;
use tabled::{builder::Builder, settings::Style};

/// Anything that can be stored as the approximation of an iteration record.
pub trait TraceValue: Clone + fmt::Debug {
    /// titles of the table/CSV columns holding the approximation
    fn column_names(&self) -> Vec<String>;
    fn values(&self) -> Vec<f64>;
}

impl TraceValue for f64 {
    fn column_names(&self) -> Vec<String> {
        vec!["x".to_string()]
    }
    fn values(&self) -> Vec<f64> {
        vec![*self]
    }
}

impl TraceValue for DVector<f64> {
    fn column_names(&self) -> Vec<String> {
        (0..self.len()).map(|i| format!("x{}", i)).collect()
    }
    fn values(&self) -> Vec<f64> {
        self.iter().copied().collect()
    }
}

/// One step of an iterative method.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationRecord<V> {
    pub index: usize,
    pub approximation: V,
    /// function value or its norm at the approximation
    pub residual: f64,
    /// the method's own error measure, `+inf` for the initial guess
    pub error: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DivergenceReason {
    /// derivative too close to zero to take a Newton step
    ZeroDerivative { x: f64, derivative: f64 },
    /// safety cap of a method without a non-fatal budget outcome
    IterationCap { iterations: usize },
    SingularJacobian { iteration: usize },
    SingularMatrix { size: usize },
    /// evaluation failed at the current iterate
    Domain(DomainError),
    NonFiniteIterate,
}

impl fmt::Display for DivergenceReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DivergenceReason::ZeroDerivative { x, derivative } => {
                write!(f, "derivative {:e} is zero at x = {}", derivative, x)
            }
            DivergenceReason::IterationCap { iterations } => {
                write!(f, "no convergence within {} iterations", iterations)
            }
            DivergenceReason::SingularJacobian { iteration } => {
                write!(f, "singular Jacobian at iteration {}", iteration)
            }
            DivergenceReason::SingularMatrix { size } => {
                write!(f, "singular {}x{} matrix", size, size)
            }
            DivergenceReason::Domain(err) => write!(f, "{}", err),
            DivergenceReason::NonFiniteIterate => write!(f, "iterate is not finite"),
        }
    }
}

/// State machine of an iterative run.
#[derive(Clone, Debug, PartialEq)]
pub enum SolverState {
    Running,
    Converged,
    Diverged(DivergenceReason),
    /// budget exhausted before the tolerance was met, the trace holds the best estimate
    IterationLimitReached,
}

/// Stopping parameters understood by every iterative method.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvergenceConfig {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ConvergenceConfig {
    pub fn new(tolerance: f64, max_iterations: usize) -> Result<Self, NumericalError> {
        let config = Self {
            tolerance,
            max_iterations,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> Result<(), NumericalError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(NumericalError::InvalidConfig(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(NumericalError::InvalidConfig(
                "max_iterations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Append-only history of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationTrace<V> {
    method: String,
    records: Vec<IterationRecord<V>>,
    state: SolverState,
}

impl<V: TraceValue> IterationTrace<V> {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            records: Vec::new(),
            state: SolverState::Running,
        }
    }

    /// appends a record, the index is the position in the trace
    pub fn push(&mut self, approximation: V, residual: f64, error: f64) {
        let index = self.records.len();
        self.records.push(IterationRecord {
            index,
            approximation,
            residual,
            error,
        });
    }

    /// Sets the terminal state and logs the outcome.
    pub fn finish(&mut self, state: SolverState) {
        match &state {
            SolverState::Converged => info!(
                "{}: converged after {} records",
                self.method,
                self.records.len()
            ),
            SolverState::IterationLimitReached => warn!(
                "{}: iteration budget exhausted, last error {:e}",
                self.method,
                self.last_error()
            ),
            SolverState::Diverged(reason) => warn!("{}: stopped, {}", self.method, reason),
            SolverState::Running => {}
        }
        self.state = state;
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn records(&self) -> &[IterationRecord<V>] {
        &self.records
    }

    pub fn state(&self) -> &SolverState {
        &self.state
    }

    pub fn is_converged(&self) -> bool {
        self.state == SolverState::Converged
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&IterationRecord<V>> {
        self.records.last()
    }

    /// the sequence of iterates in order
    pub fn approximations(&self) -> Vec<V> {
        self.records.iter().map(|r| r.approximation.clone()).collect()
    }

    /// latest approximation, the best available estimate whatever the state
    pub fn solution(&self) -> Option<&V> {
        self.records.last().map(|r| &r.approximation)
    }

    fn last_error(&self) -> f64 {
        self.records.last().map_or(f64::INFINITY, |r| r.error)
    }

    /// Returns the final approximation of a converged run, otherwise the matching error.
    pub fn ensure_converged(&self) -> Result<&V, NumericalError> {
        match &self.state {
            SolverState::Converged => self.solution().ok_or_else(|| NumericalError::Divergence {
                reason: "empty trace".to_string(),
            }),
            SolverState::IterationLimitReached => Err(NumericalError::NonConvergence {
                iterations: self.records.last().map_or(0, |r| r.index),
                last_error: self.last_error(),
            }),
            SolverState::Diverged(DivergenceReason::SingularJacobian { iteration }) => {
                Err(NumericalError::SingularJacobian {
                    iteration: *iteration,
                })
            }
            SolverState::Diverged(DivergenceReason::SingularMatrix { size }) => {
                Err(NumericalError::SingularSystem { size: *size })
            }
            SolverState::Diverged(reason) => Err(NumericalError::Divergence {
                reason: reason.to_string(),
            }),
            SolverState::Running => Err(NumericalError::Divergence {
                reason: "run did not finish".to_string(),
            }),
        }
    }

    /// Header of the table and CSV views.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = vec!["k".to_string()];
        if let Some(first) = self.records.first() {
            names.extend(first.approximation.column_names());
        }
        names.push("residual".to_string());
        names.push("error".to_string());
        names
    }

    /// rows of numbers in the order of [`IterationTrace::column_names`]
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.records
            .iter()
            .map(|r| {
                let mut row = vec![r.index as f64];
                row.extend(r.approximation.values());
                row.push(r.residual);
                row.push(r.error);
                row
            })
            .collect()
    }

    /// Pretty table of the run.
    pub fn to_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.column_names());
        for record in &self.records {
            let mut row = vec![record.index.to_string()];
            row.extend(
                record
                    .approximation
                    .values()
                    .iter()
                    .map(|v| format!("{:.10}", v)),
            );
            row.push(format!("{:.3e}", record.residual));
            row.push(format!("{:.3e}", record.error));
            builder.push_record(row);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(state: SolverState) -> IterationTrace<f64> {
        let mut trace = IterationTrace::new("test");
        trace.push(1.0, 0.5, f64::INFINITY);
        trace.push(1.5, 0.1, 0.5);
        trace.push(1.4, 0.01, 0.1);
        trace.finish(state);
        trace
    }

    #[test]
    fn test_config_validation() {
        assert!(ConvergenceConfig::new(1e-8, 10).is_ok());
        assert!(matches!(
            ConvergenceConfig::new(0.0, 10),
            Err(NumericalError::InvalidConfig(_))
        ));
        assert!(ConvergenceConfig::new(f64::NAN, 10).is_err());
        assert!(ConvergenceConfig::new(1e-3, 0).is_err());
        let config = ConvergenceConfig::default().with_tolerance(1e-3).with_max_iterations(5);
        assert_eq!(config.tolerance, 1e-3);
        assert_eq!(config.max_iterations, 5);
        assert_eq!(ConvergenceConfig::default().max_iterations, DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_trace_records_in_order() {
        let trace = sample(SolverState::Converged);
        let indices: Vec<usize> = trace.records().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(trace.approximations(), vec![1.0, 1.5, 1.4]);
        assert_eq!(trace.ensure_converged().unwrap(), &1.4);
        assert!(trace.is_converged());
    }

    #[test]
    fn test_ensure_converged_maps_states() {
        assert!(matches!(
            sample(SolverState::IterationLimitReached).ensure_converged(),
            Err(NumericalError::NonConvergence { iterations: 2, .. })
        ));
        assert!(matches!(
            sample(SolverState::Diverged(DivergenceReason::SingularJacobian { iteration: 1 }))
                .ensure_converged(),
            Err(NumericalError::SingularJacobian { iteration: 1 })
        ));
        assert!(matches!(
            sample(SolverState::Diverged(DivergenceReason::ZeroDerivative {
                x: 0.0,
                derivative: 0.0
            }))
            .ensure_converged(),
            Err(NumericalError::Divergence { .. })
        ));
        assert!(IterationTrace::<f64>::new("empty").ensure_converged().is_err());
    }

    #[test]
    fn test_table_and_rows() {
        let trace = sample(SolverState::Converged);
        assert_eq!(trace.column_names(), vec!["k", "x", "residual", "error"]);
        assert_eq!(trace.rows()[1], vec![1.0, 1.5, 0.1, 0.5]);
        let table = trace.to_table();
        assert!(table.contains("residual"));
        assert!(table.contains("1.4000000000"));

        let mut vec_trace = IterationTrace::new("vector");
        vec_trace.push(DVector::from_vec(vec![1.0, 2.0]), 0.0, f64::INFINITY);
        assert_eq!(vec_trace.column_names(), vec!["k", "x0", "x1", "residual", "error"]);
    }
}

//! Error types shared by the symbolic engine and the numerical solvers.
//!
//! ┌ [`ParseError`]     : formula text could not be turned into an expression
//! ├ [`DomainError`]    : invalid arithmetic while evaluating an expression
//! └ [`NumericalError`] : everything a solver call can fail with
use thiserror::Error;

/// Formula parsing errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty formula")]
    Empty,

    #[error("syntax error at position {position}: unexpected `{fragment}`")]
    Syntax { position: usize, fragment: String },

    #[error("unknown function `{name}` at position {position}")]
    UnknownFunction { name: String, position: usize },

    #[error("unknown symbol `{name}`")]
    UnknownSymbol { name: String },
}

/// Numeric evaluation errors. Raised instead of silently producing NaN or infinity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("logarithm of non-positive value {value}")]
    LogarithmOfNonPositive { value: f64 },

    #[error("negative base {base} raised to fractional power {exponent}")]
    NegativeBaseFractionalPower { base: f64, exponent: f64 },

    #[error("{function} is undefined at {value}")]
    OutOfDomain { function: String, value: f64 },

    #[error("non-finite result in {operation}")]
    NonFinite { operation: String },
}

/// Errors returned by the numerical methods.
///
/// Malformed input and violated preconditions abort a call with one of these.
/// Mid-run failures and exhausted budgets are reported through the terminal
/// state of the returned trace instead, see
/// [`IterationTrace::ensure_converged`](crate::numerical::iteration_trace::IterationTrace::ensure_converged).
#[derive(Debug, Error)]
pub enum NumericalError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("singular Jacobian at iteration {iteration}")]
    SingularJacobian { iteration: usize },

    #[error("singular linear system of size {size}")]
    SingularSystem { size: usize },

    #[error("iteration diverged: {reason}")]
    Divergence { reason: String },

    #[error("no convergence after {iterations} iterations, last error {last_error}")]
    NonConvergence { iterations: usize, last_error: f64 },

    #[error("task error: {0}")]
    Task(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for NumericalError {
    fn from(err: csv::Error) -> Self {
        NumericalError::Io(std::io::Error::other(err.to_string()))
    }
}

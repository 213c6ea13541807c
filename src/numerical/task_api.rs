//! Runs the methods of the crate from task documents.
//!
//! Each section of a document (see [`crate::Utils::task_parser`]) names a method and its
//! parameters. Formulas are parsed by the expression parser, matrices and vectors by the
//! strict literal parser; numeric parameters may be constant formulas such as `pi/2`.
//!
//! | method                  | required keys                     | optional keys                        |
//! |-------------------------|-----------------------------------|--------------------------------------|
//! | `taylor`                | `f`, `x0`, `n`                    | `x` (point for the error estimate)   |
//! | `bisection`             | `f`, `a`, `b`                     | `tolerance`, `max_iterations`        |
//! | `newton_raphson`        | `f`, `x0`                         | `tolerance`, `max_iterations`        |
//! | `newton_raphson_system` | `equations`, `x0`, `max_iterations` | `unknowns`                         |
//! | `jacobi`                | `A`, `b`                          | `x0`, `tolerance`, `max_iterations`  |
//! | `finite_differences`    | `p`, `q`, `r`, `a`, `ya`, `b`, `yb`, `n` |                               |
//! | `lagrange`              | `x`, `y`                          |                                      |
//!
//! Example#
//! ```
//! use RustedNumerics::numerical::task_api::run_document;
//! let document = "
//! newton_raphson
//!     f: x^2 - 2
//!     x0: 1
//!     tolerance: 1e-10
//! lagrange
//!     x: 0, 1, 2
//!     y: 1, 2, 5
//! ";
//! for report in run_document(document).unwrap() {
//!     println!("{}", report);
//! }
//! ```
use crate::Utils::logger::{save_trace_to_csv, save_xy_to_csv};
use crate::Utils::task_parser::{SectionMap, Value, parse_document, split_list};
use crate::errors::NumericalError;
use crate::numerical::BVP_finite_diff::{BVPProblem, BVPSolution, finite_differences};
use crate::numerical::Bisection::{BisectionPoint, bisection};
use crate::numerical::Jacobi::jacobi_with_guess;
use crate::numerical::Lagrange::lagrange_xy;
use crate::numerical::NR::newton_raphson;
use crate::numerical::NR_system::NR_system;
use crate::numerical::Taylor::{TaylorReport, taylor, taylor_report};
use crate::numerical::iteration_trace::{ConvergenceConfig, IterationTrace, SolverState};
use crate::somelinalg::matrix_literal::{parse_matrix, parse_number_list, parse_vector};
use crate::symbolic::parse_expr::parse_with_variables;
use crate::symbolic::polynomial::Polynomial;
use crate::symbolic::symbolic_engine::Expr;
use log::info;
use nalgebra::DVector;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tabled::{builder::Builder, settings::Style};

/// Methods that can be requested by a task document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TaskKind {
    Taylor,
    NewtonRaphson,
    NewtonRaphsonSystem,
    Jacobi,
    FiniteDifferences,
    Bisection,
    Lagrange,
}

impl TaskKind {
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            TaskKind::Taylor => &["f", "x0", "n"],
            TaskKind::NewtonRaphson => &["f", "x0"],
            TaskKind::NewtonRaphsonSystem => &["equations", "x0", "max_iterations"],
            TaskKind::Jacobi => &["A", "b"],
            TaskKind::FiniteDifferences => &["p", "q", "r", "a", "ya", "b", "yb", "n"],
            TaskKind::Bisection => &["f", "a", "b"],
            TaskKind::Lagrange => &["x", "y"],
        }
    }

    pub fn optional_keys(&self) -> &'static [&'static str] {
        match self {
            TaskKind::Taylor => &["x"],
            TaskKind::NewtonRaphson | TaskKind::Bisection => &["tolerance", "max_iterations"],
            TaskKind::NewtonRaphsonSystem => &["unknowns"],
            TaskKind::Jacobi => &["x0", "tolerance", "max_iterations"],
            TaskKind::FiniteDifferences | TaskKind::Lagrange => &[],
        }
    }

    /// Checks that every required key is present and no unknown key is given.
    pub fn validate_keys(&self, section: &SectionMap) -> Result<(), NumericalError> {
        if let Some(missing) = self
            .required_keys()
            .iter()
            .find(|key| !section.contains_key(**key))
        {
            return Err(NumericalError::Task(format!(
                "{}: missing key `{}`",
                self, missing
            )));
        }
        let mut unknown: Vec<&String> = section
            .keys()
            .filter(|key| {
                !self.required_keys().contains(&key.as_str())
                    && !self.optional_keys().contains(&key.as_str())
            })
            .collect();
        unknown.sort();
        if let Some(key) = unknown.first() {
            return Err(NumericalError::Task(format!(
                "{}: unknown key `{}`, expected one of {:?} {:?}",
                self,
                key,
                self.required_keys(),
                self.optional_keys()
            )));
        }
        Ok(())
    }
}

/// What a method produced.
#[derive(Clone, Debug)]
pub enum TaskOutcome {
    Polynomial(Polynomial),
    Taylor(TaylorReport),
    Bracket(IterationTrace<BisectionPoint>),
    Scalar(IterationTrace<f64>),
    Vector(IterationTrace<DVector<f64>>),
    Grid(BVPSolution),
}

#[derive(Clone, Debug)]
pub struct TaskReport {
    pub kind: TaskKind,
    pub outcome: TaskOutcome,
}

impl TaskReport {
    /// terminal state of an iterative method, None for direct methods
    pub fn state(&self) -> Option<&SolverState> {
        match &self.outcome {
            TaskOutcome::Bracket(trace) => Some(trace.state()),
            TaskOutcome::Scalar(trace) => Some(trace.state()),
            TaskOutcome::Vector(trace) => Some(trace.state()),
            _ => None,
        }
    }

    pub fn to_table(&self) -> String {
        match &self.outcome {
            TaskOutcome::Polynomial(polynomial) => {
                let mut builder = Builder::default();
                builder.push_record(["P(x)".to_string(), polynomial.to_string()]);
                builder.push_record(["degree".to_string(), polynomial.degree().to_string()]);
                let mut table = builder.build();
                table.with(Style::modern_rounded());
                table.to_string()
            }
            TaskOutcome::Taylor(report) => report.to_table(),
            TaskOutcome::Bracket(trace) => trace.to_table(),
            TaskOutcome::Scalar(trace) => trace.to_table(),
            TaskOutcome::Vector(trace) => trace.to_table(),
            TaskOutcome::Grid(solution) => solution.to_table(),
        }
    }

    /// CSV export of traces and grids; polynomials have nothing tabular to export.
    pub fn save_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), NumericalError> {
        match &self.outcome {
            TaskOutcome::Bracket(trace) => save_trace_to_csv(trace, path),
            TaskOutcome::Scalar(trace) => save_trace_to_csv(trace, path),
            TaskOutcome::Vector(trace) => save_trace_to_csv(trace, path),
            TaskOutcome::Grid(solution) => save_xy_to_csv(&solution.x, &solution.y, ("x", "y"), path),
            TaskOutcome::Polynomial(_) | TaskOutcome::Taylor(_) => Err(NumericalError::Task(
                format!("{}: result is a polynomial, nothing to save as CSV", self.kind),
            )),
        }
    }
}

impl fmt::Display for TaskReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        write!(f, "{}", self.to_table())?;
        if let Some(state) = self.state() {
            write!(f, "\nstate: {:?}", state)?;
        }
        Ok(())
    }
}

fn value<'a>(kind: TaskKind, section: &'a SectionMap, key: &str) -> Result<&'a Value, NumericalError> {
    section
        .get(key)
        .ok_or_else(|| NumericalError::Task(format!("{}: missing key `{}`", kind, key)))
}

/// number literal or constant formula such as `pi/4`
fn number_from_text(text: &str) -> Result<f64, NumericalError> {
    parse_with_variables(text, &[])?.eval_expression(&[], &[])
}

fn number(kind: TaskKind, section: &SectionMap, key: &str) -> Result<f64, NumericalError> {
    let value = value(kind, section, key)?;
    match value.as_float() {
        Some(number) => Ok(number),
        None => number_from_text(&value.to_string_value()),
    }
}

fn count(kind: TaskKind, section: &SectionMap, key: &str) -> Result<usize, NumericalError> {
    value(kind, section, key)?
        .as_integer()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            NumericalError::Task(format!("{}: `{}` must be a non-negative integer", kind, key))
        })
}

fn formula(kind: TaskKind, section: &SectionMap, key: &str) -> Result<Expr, NumericalError> {
    Ok(parse_with_variables(&value(kind, section, key)?.to_string_value(), &["x"])?)
}

fn convergence_config(kind: TaskKind, section: &SectionMap) -> Result<ConvergenceConfig, NumericalError> {
    let mut config = ConvergenceConfig::default();
    if section.contains_key("tolerance") {
        config = config.with_tolerance(number(kind, section, "tolerance")?);
    }
    if section.contains_key("max_iterations") {
        config = config.with_max_iterations(count(kind, section, "max_iterations")?);
    }
    config.validate()?;
    Ok(config)
}

/// Runs one section after checking its keys.
pub fn run_task(kind: TaskKind, section: &SectionMap) -> Result<TaskReport, NumericalError> {
    kind.validate_keys(section)?;
    info!("running task {}", kind);
    let outcome = match kind {
        TaskKind::Taylor => {
            let f = formula(kind, section, "f")?;
            let x0 = number(kind, section, "x0")?;
            let n = count(kind, section, "n")?;
            if section.contains_key("x") {
                TaskOutcome::Taylor(taylor_report(&f, x0, n, number(kind, section, "x")?)?)
            } else {
                TaskOutcome::Polynomial(taylor(&f, x0, n)?)
            }
        }
        TaskKind::Bisection => {
            let f = formula(kind, section, "f")?;
            let config = convergence_config(kind, section)?;
            let (a, b) = (number(kind, section, "a")?, number(kind, section, "b")?);
            TaskOutcome::Bracket(bisection(&f, a, b, &config)?)
        }
        TaskKind::NewtonRaphson => {
            let f = formula(kind, section, "f")?;
            let config = convergence_config(kind, section)?;
            TaskOutcome::Scalar(newton_raphson(&f, number(kind, section, "x0")?, &config)?)
        }
        TaskKind::NewtonRaphsonSystem => {
            let equations = split_list(&value(kind, section, "equations")?.to_string_value());
            let equations: Vec<&str> = equations.iter().map(|s| s.as_str()).collect();
            let x0 = parse_number_list(&value(kind, section, "x0")?.to_string_value())?;
            let unknowns = section
                .get("unknowns")
                .map(|unknowns| split_list(&unknowns.to_string_value()));
            let max_iterations = count(kind, section, "max_iterations")?;
            let mut NR_instance = NR_system::new();
            NR_instance.eq_generate_from_str(&equations, unknowns, x0, max_iterations)?;
            TaskOutcome::Vector(NR_instance.solve()?)
        }
        TaskKind::Jacobi => {
            let A = parse_matrix(&value(kind, section, "A")?.to_string_value())?;
            let b = parse_vector(&value(kind, section, "b")?.to_string_value())?;
            let x0 = match section.get("x0") {
                Some(x0) => parse_vector(&x0.to_string_value())?,
                None => DVector::zeros(b.len()),
            };
            let config = convergence_config(kind, section)?;
            TaskOutcome::Vector(jacobi_with_guess(&A, &b, &x0, &config)?)
        }
        TaskKind::FiniteDifferences => {
            let text = |key: &str| -> Result<String, NumericalError> {
                Ok(value(kind, section, key)?.to_string_value())
            };
            let problem = BVPProblem::from_formulas(
                &text("p")?,
                &text("q")?,
                &text("r")?,
                (number(kind, section, "a")?, number(kind, section, "ya")?),
                (number(kind, section, "b")?, number(kind, section, "yb")?),
            )?;
            TaskOutcome::Grid(finite_differences(&problem, count(kind, section, "n")?)?)
        }
        TaskKind::Lagrange => {
            let xs = numbers(kind, section, "x")?;
            let ys = numbers(kind, section, "y")?;
            TaskOutcome::Polynomial(lagrange_xy(&xs, &ys)?)
        }
    };
    Ok(TaskReport { kind, outcome })
}

/// list of numbers, each item may be a constant formula
fn numbers(kind: TaskKind, section: &SectionMap, key: &str) -> Result<Vec<f64>, NumericalError> {
    split_list(&value(kind, section, key)?.to_string_value())
        .iter()
        .map(|item| number_from_text(item))
        .collect()
}

/// Parses a task document and runs its sections in order, stopping at the first failure.
pub fn run_document(text: &str) -> Result<Vec<TaskReport>, NumericalError> {
    let document = parse_document(text)?;
    document
        .iter()
        .map(|(title, section)| {
            let kind = TaskKind::from_str(title).map_err(|_| {
                let known: Vec<String> = TaskKind::iter().map(|k| k.to_string()).collect();
                NumericalError::Task(format!(
                    "unknown method `{}`, expected one of {}",
                    title,
                    known.join(", ")
                ))
            })?;
            run_task(kind, section)
        })
        .collect()
}

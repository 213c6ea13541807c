//! Newton-Raphson method for systems of `n` equations in `n` unknowns.
//!
//! Unlike the scalar method this variant has no tolerance: it performs exactly
//! `max_iterations` Newton steps and stops earlier only when the Jacobian becomes
//! singular or an evaluation fails. The partial trace is returned in that case.
//!
//! Example#1
//! ```
//! use RustedNumerics::numerical::NR_system::newton_raphson_n;
//! // the shortest way: equations in x0, x1, ... and an initial guess
//! let trace = newton_raphson_n(&["x0^2 + x1^2 - 10", "x0 - x1 - 4"], &[1.0, 1.0], 10).unwrap();
//! let solution = trace.solution().unwrap();
//! assert!((solution[0] - 3.0).abs() < 1e-9 && (solution[1] + 1.0).abs() < 1e-9);
//! ```
//! Example#2
//! ```
//! // or the more verbose way with named unknowns
//! use RustedNumerics::numerical::NR_system::NR_system;
//! use RustedNumerics::symbolic::symbolic_engine::Expr;
//! let eq_system = Expr::parse_vector_expression(vec!["x^2 + y^2 - 10", "x - y - 4"]).unwrap();
//! let mut NR_instance = NR_system::new();
//! NR_instance
//!     .set_equation_system(eq_system, Some(vec!["x".to_string(), "y".to_string()]), vec![4.0, 0.0], 20)
//!     .unwrap();
//! NR_instance.eq_generate().unwrap();
//! let trace = NR_instance.solve().unwrap();
//! println!("{}", trace.to_table());
//! ```
use crate::errors::NumericalError;
use crate::numerical::iteration_trace::{DivergenceReason, IterationTrace, SolverState};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_functions::Jacobian;
use log::{debug, info, warn};
use nalgebra::DVector;

pub struct NR_system {
    pub jacobian: Jacobian, // symbolic and compiled jacobian and residual functions
    pub eq_system: Vec<Expr>, // vector of equations
    pub values: Vec<String>, // vector of unknowns
    pub initial_guess: Vec<f64>,
    pub max_iterations: usize,
    generated: bool,
}

impl Default for NR_system {
    fn default() -> Self {
        Self::new()
    }
}

impl NR_system {
    pub fn new() -> NR_system {
        NR_system {
            jacobian: Jacobian::new(),
            eq_system: Vec::new(),
            values: Vec::new(),
            initial_guess: Vec::new(),
            max_iterations: 100,
            generated: false,
        }
    }

    /// Sets equations, unknowns, initial guess and the number of Newton steps.
    /// Without explicit unknowns the indexed names `x0..x{n-1}` are used.
    pub fn set_equation_system(
        &mut self,
        eq_system: Vec<Expr>,
        unknowns: Option<Vec<String>>,
        initial_guess: Vec<f64>,
        max_iterations: usize,
    ) -> Result<(), NumericalError> {
        let n = eq_system.len();
        if n == 0 {
            return Err(NumericalError::Precondition(
                "system of equations is empty".to_string(),
            ));
        }
        let values = unknowns.unwrap_or_else(|| Expr::IndexedVars(n, "x").1);
        if values.len() != n {
            return Err(NumericalError::Precondition(format!(
                "{} equations but {} unknowns",
                n,
                values.len()
            )));
        }
        if initial_guess.len() != n {
            return Err(NumericalError::Precondition(format!(
                "initial guess has {} entries, system has {} unknowns",
                initial_guess.len(),
                n
            )));
        }
        if initial_guess.iter().any(|v| !v.is_finite()) {
            return Err(NumericalError::Precondition(
                "initial guess must be finite".to_string(),
            ));
        }
        if max_iterations == 0 {
            return Err(NumericalError::InvalidConfig(
                "max_iterations must be positive".to_string(),
            ));
        }
        self.eq_system = eq_system;
        self.values = values;
        self.initial_guess = initial_guess;
        self.max_iterations = max_iterations;
        self.generated = false;
        Ok(())
    }

    pub fn eq_generate_from_str(
        &mut self,
        eq_system_string: &[&str],
        unknowns: Option<Vec<String>>,
        initial_guess: Vec<f64>,
        max_iterations: usize,
    ) -> Result<(), NumericalError> {
        let eq_system = Expr::parse_vector_expression(eq_system_string.to_vec())?;
        self.set_equation_system(eq_system, unknowns, initial_guess, max_iterations)?;
        self.eq_generate()
    }

    /// Builds the symbolic Jacobian once and compiles it with the residual vector.
    pub fn eq_generate(&mut self) -> Result<(), NumericalError> {
        let args: Vec<&str> = self.values.iter().map(|x| x.as_str()).collect();
        let mut Jacobian_instance = Jacobian::from_vectors(self.eq_system.clone(), &args);
        Jacobian_instance.calc_jacobian()?;
        Jacobian_instance.readable_jacobian();
        info!("Jacobian: {:?}", Jacobian_instance.readable_jacobian);
        Jacobian_instance.jacobian_generate()?;
        Jacobian_instance.lambdify_funcvector()?;
        self.jacobian = Jacobian_instance;
        self.generated = true;
        Ok(())
    }

    /// One Newton step: solve `J dx = F` and return `x - dx`, None for a singular Jacobian.
    fn iteration(&self, x: &DVector<f64>, F: &DVector<f64>) -> Result<Option<DVector<f64>>, NumericalError> {
        let J = self
            .jacobian
            .evaluate_func_jacobian_DMatrix_unmut(x.as_slice())?;
        let delta = match J.lu().solve(F) {
            Some(delta) if delta.iter().all(|v| v.is_finite()) => delta,
            _ => return Ok(None),
        };
        Ok(Some(x - delta))
    }

    /// Runs exactly `max_iterations` Newton steps unless the Jacobian becomes singular.
    pub fn solve(&mut self) -> Result<IterationTrace<DVector<f64>>, NumericalError> {
        if !self.generated {
            self.eq_generate()?;
        }
        info!(
            "Newton-Raphson for {} equations, {} iterations",
            self.eq_system.len(),
            self.max_iterations
        );
        let mut trace = IterationTrace::new("Newton-Raphson system");
        let mut x = DVector::from_vec(self.initial_guess.clone());
        let mut F = self
            .jacobian
            .evaluate_funvector_lambdified_DVector_unmut(x.as_slice())?;
        trace.push(x.clone(), F.norm(), f64::INFINITY);
        for k in 1..=self.max_iterations {
            let new_x = match self.iteration(&x, &F) {
                Ok(Some(new_x)) => new_x,
                Ok(None) => {
                    warn!("singular Jacobian at iteration {}", k);
                    trace.finish(SolverState::Diverged(DivergenceReason::SingularJacobian {
                        iteration: k,
                    }));
                    return Ok(trace);
                }
                Err(NumericalError::Domain(err)) => {
                    trace.finish(SolverState::Diverged(DivergenceReason::Domain(err)));
                    return Ok(trace);
                }
                Err(err) => return Err(err),
            };
            F = match self
                .jacobian
                .evaluate_funvector_lambdified_DVector_unmut(new_x.as_slice())
            {
                Ok(F) => F,
                Err(err) => {
                    trace.finish(SolverState::Diverged(DivergenceReason::Domain(err)));
                    return Ok(trace);
                }
            };
            let error = (&new_x - &x).norm();
            debug!("iteration = {}, |F| = {:e}, |dx| = {:e}", k, F.norm(), error);
            trace.push(new_x.clone(), F.norm(), error);
            x = new_x;
        }
        trace.finish(SolverState::Converged);
        Ok(trace)
    }

    pub fn get_result(&self, trace: &IterationTrace<DVector<f64>>) -> Option<DVector<f64>> {
        trace.solution().cloned()
    }
}

/// n-D Newton-Raphson for equations in the unknowns `x0, x1, ... x{n-1}`.
pub fn newton_raphson_n(
    system: &[&str],
    x0: &[f64],
    max_iterations: usize,
) -> Result<IterationTrace<DVector<f64>>, NumericalError> {
    let mut NR_instance = NR_system::new();
    NR_instance.eq_generate_from_str(system, None, x0.to_vec(), max_iterations)?;
    NR_instance.solve()
}

/// n-D Newton-Raphson with explicitly named unknowns.
pub fn newton_raphson_n_vars(
    system: &[&str],
    unknowns: &[&str],
    x0: &[f64],
    max_iterations: usize,
) -> Result<IterationTrace<DVector<f64>>, NumericalError> {
    let mut NR_instance = NR_system::new();
    let unknowns = unknowns.iter().map(|s| s.to_string()).collect();
    NR_instance.eq_generate_from_str(system, Some(unknowns), x0.to_vec(), max_iterations)?;
    NR_instance.solve()
}

#![allow(non_camel_case_types)]

use crate::errors::{DomainError, NumericalError, ParseError};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_lambdify::NumericFunction;
use log::debug;
use nalgebra::{DMatrix, DVector};
///
/// calculate symbolic jacobian and evaluate it
/// Example#
/// ```
/// use RustedNumerics::symbolic::symbolic_functions::Jacobian;
/// let mut Jacobian_instance = Jacobian::new();
/// // function of 2 arguments
/// Jacobian_instance.set_funcvecor_from_str(&["2*x^3 + y", "x*y - 1"]).unwrap();
/// // set vector of variables
/// Jacobian_instance.set_variables(&["x", "y"]);
/// // calculate symbolic jacobian
/// Jacobian_instance.calc_jacobian().unwrap();
/// // transform into human readable form
/// Jacobian_instance.readable_jacobian();
/// println!("Jacobian: {:?}", Jacobian_instance.readable_jacobian);
/// // compile jacobian and residual vector into numeric closures
/// Jacobian_instance.jacobian_generate().unwrap();
/// Jacobian_instance.lambdify_funcvector().unwrap();
/// let J = Jacobian_instance.evaluate_func_jacobian_DMatrix_unmut(&[1.0, 2.0]).unwrap();
/// assert_eq!(J[(0, 0)], 6.0);
/// assert_eq!(J[(1, 1)], 1.0);
/// let F = Jacobian_instance.evaluate_funvector_lambdified_DVector_unmut(&[1.0, 2.0]).unwrap();
/// assert_eq!(F[1], 1.0);
/// ```
pub struct Jacobian {
    pub vector_of_functions: Vec<Expr>, // vector of symbolic functions/expressions
    pub vector_of_variables: Vec<Expr>, // vector of symbolic variables
    pub variable_string: Vec<String>,   // vector of string representation of variables
    pub symbolic_jacobian: Vec<Vec<Expr>>, // vector of symbolic jacobian
    pub readable_jacobian: Vec<Vec<String>>, // human readable jacobian
    lambdified_functions: Vec<NumericFunction>, // residual functions compiled against variable_string
    function_jacobian: Vec<Vec<NumericFunction>>, // compiled partial derivatives
}

impl Default for Jacobian {
    fn default() -> Self {
        Self::new()
    }
}

impl Jacobian {
    pub fn new() -> Self {
        Self {
            vector_of_functions: Vec::new(),
            vector_of_variables: Vec::new(),
            variable_string: Vec::new(),
            symbolic_jacobian: Vec::new(),
            readable_jacobian: Vec::new(),
            lambdified_functions: Vec::new(),
            function_jacobian: Vec::new(),
        }
    }

    pub fn from_vectors(vector_of_functions: Vec<Expr>, variables: &[&str]) -> Self {
        let mut jac = Self::new();
        jac.set_vector_of_functions(vector_of_functions);
        jac.set_variables(variables);
        jac
    }
    /// Basic functionality: setting functions and variables
    pub fn set_vector_of_functions(&mut self, value: Vec<Expr>) {
        self.vector_of_functions = value;
    }

    pub fn set_funcvecor_from_str(&mut self, value: &[&str]) -> Result<(), ParseError> {
        self.vector_of_functions = Expr::parse_vector_expression(value.to_vec())?;
        Ok(())
    }

    pub fn set_variables(&mut self, varvec: &[&str]) {
        let vec_trimmed: Vec<String> = varvec.iter().map(|s| s.trim().to_string()).collect();
        self.vector_of_variables = vec_trimmed.iter().map(|s| Expr::Var(s.clone())).collect();
        self.variable_string = vec_trimmed;
    }

    fn variable_refs(&self) -> Vec<&str> {
        self.variable_string.iter().map(|s| s.as_str()).collect()
    }

    /// turn jacobian into readable format
    pub fn readable_jacobian(&mut self) {
        self.readable_jacobian = self
            .symbolic_jacobian
            .iter()
            .map(|row| row.iter().map(|el| el.to_string()).collect())
            .collect();
    }

    /// calculate the symbolic jacobian: element (i, j) is d f_i / d x_j
    pub fn calc_jacobian(&mut self) -> Result<(), NumericalError> {
        if self.vector_of_functions.is_empty() {
            return Err(NumericalError::Precondition(
                "vector of functions is empty".to_string(),
            ));
        }
        if self.vector_of_variables.is_empty() {
            return Err(NumericalError::Precondition(
                "vector of variables is empty".to_string(),
            ));
        }
        let variables = self.variable_refs();
        let new_jac: Vec<Vec<Expr>> = self
            .vector_of_functions
            .iter()
            .map(|func| {
                variables
                    .iter()
                    .map(|var| func.diff(var).simplify())
                    .collect()
            })
            .collect();
        debug!("symbolic jacobian {:?}", new_jac);
        self.symbolic_jacobian = new_jac;
        Ok(())
    }

    /// evaluate a single element of the symbolic jacobian, handy for checks
    pub fn calc_ij_element(&self, i: usize, j: usize, values: &[f64]) -> Result<f64, NumericalError> {
        let element = self
            .symbolic_jacobian
            .get(i)
            .and_then(|row| row.get(j))
            .ok_or_else(|| {
                NumericalError::Precondition(format!("no jacobian element ({}, {})", i, j))
            })?;
        element.eval_expression(&self.variable_refs(), values)
    }

    //////////////////////////////JACOBIAN AND RESIDUAL VECTOR FOR NONLINEAR SOLVERS//////////////
    /// creating function jacobian: a matrix of compiled partial derivatives
    pub fn jacobian_generate(&mut self) -> Result<(), ParseError> {
        let variables = self.variable_refs();
        let compiled = self
            .symbolic_jacobian
            .iter()
            .map(|row| row.iter().map(|el| el.compile(&variables)).collect())
            .collect::<Result<Vec<Vec<NumericFunction>>, ParseError>>()?;
        self.function_jacobian = compiled;
        Ok(())
    }

    pub fn lambdify_funcvector(&mut self) -> Result<(), ParseError> {
        let variables = self.variable_refs();
        let compiled = self
            .vector_of_functions
            .iter()
            .map(|func| func.compile(&variables))
            .collect::<Result<Vec<NumericFunction>, ParseError>>()?;
        self.lambdified_functions = compiled;
        Ok(())
    }

    // evaluate jacobian to nalgebra DMatrix
    pub fn evaluate_func_jacobian_DMatrix_unmut(&self, x: &[f64]) -> Result<DMatrix<f64>, DomainError> {
        let rows = self.function_jacobian.len();
        let cols = self.variable_string.len();
        let mut result: Vec<f64> = Vec::with_capacity(rows * cols);
        for row in &self.function_jacobian {
            for func in row {
                result.push(func(x)?);
            }
        }
        Ok(DMatrix::from_row_slice(rows, cols, &result))
    }

    pub fn evaluate_funvector_lambdified_DVector_unmut(
        &self,
        arg_values: &[f64],
    ) -> Result<DVector<f64>, DomainError> {
        let result = self
            .lambdified_functions
            .iter()
            .map(|func| func(arg_values))
            .collect::<Result<Vec<f64>, DomainError>>()?;
        Ok(DVector::from_vec(result))
    }
}

//! # Symbolic Engine Module
//!
//! Core expression tree used by every numerical method of the crate.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! A closed set of node kinds:
//! - **Variables**: `Var(String)` - symbolic variables like "x", "x0"
//! - **Constants**: `Const(f64)` - numerical constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Functions**: `Exp`, `Ln`, `sin`, `cos`, `tg`, `ctg`, `arcsin`, `arccos`, `arctg`, `arcctg`, `abs`
//!
//! Expressions are immutable values: substitution, differentiation and simplification
//! all return new trees.
//!
//! ### Key Methods
//! - `Symbols(symbols: &str)` - create multiple variables from a comma-separated string
//! - `IndexedVars(n, name)` - create indexed variables x0, x1, ...
//! - `substitute(var, value)` / `substitute_expr(var, expr)` - replace a variable
//! - `variables()` - sorted list of the variables an expression depends on
//! - `diff`, `diff_n` - see `symbolic_engine_derivatives`
//! - `simplify` - see `symbolic_simplify`
//! - `compile`, `eval_expression` - see `symbolic_lambdify`
//!
//! The operator overloads (`+ - * /`, unary `-`) build trees without any simplification.
#![allow(non_camel_case_types)]

use std::f64::consts::LN_10;
use std::fmt;

/// Core symbolic expression enum representing mathematical expressions as an abstract syntax tree.
///
/// # Examples
/// ```rust
/// use RustedNumerics::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// assert_eq!(expr.to_string(), "x + 2");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "x0")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    /// Sine function: sin(x)
    sin(Box<Expr>),
    /// Cosine function: cos(x)
    cos(Box<Expr>),
    /// Tangent function: tan(x) - uses mathematical notation 'tg'
    tg(Box<Expr>),
    /// Cotangent function: cot(x) - uses mathematical notation 'ctg'
    ctg(Box<Expr>),
    /// Arcsine function: arcsin(x)
    arcsin(Box<Expr>),
    /// Arccosine function: arccos(x)
    arccos(Box<Expr>),
    /// Arctangent function: arctan(x) - uses mathematical notation 'arctg'
    arctg(Box<Expr>),
    /// Arccotangent function: arccot(x) - uses mathematical notation 'arcctg'
    arcctg(Box<Expr>),
    /// Absolute value: |x|
    abs(Box<Expr>),
}

// binding strength used by Display to decide where brackets are needed
const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_POWER: u8 = 3;
const PREC_ATOM: u8 = 4;

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Const(val) if *val < 0.0 => 0,
            Expr::Mul(lhs, _) if **lhs == Expr::Const(-1.0) => 0,
            Expr::Add(..) | Expr::Sub(..) => PREC_SUM,
            Expr::Mul(..) | Expr::Div(..) => PREC_PRODUCT,
            Expr::Pow(..) => PREC_POWER,
            _ => PREC_ATOM,
        }
    }

    fn fmt_with(&self, f: &mut fmt::Formatter, min_prec: u8) -> fmt::Result {
        if self.precedence() < min_prec {
            write!(f, "(")?;
            self.fmt_bare(f)?;
            write!(f, ")")
        } else {
            self.fmt_bare(f)
        }
    }

    fn fmt_bare(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => {
                lhs.fmt_with(f, PREC_SUM)?;
                write!(f, " + ")?;
                rhs.fmt_with(f, PREC_SUM)
            }
            Expr::Sub(lhs, rhs) => {
                lhs.fmt_with(f, PREC_SUM)?;
                write!(f, " - ")?;
                rhs.fmt_with(f, PREC_PRODUCT)
            }
            Expr::Mul(lhs, rhs) if **lhs == Expr::Const(-1.0) => {
                write!(f, "-")?;
                rhs.fmt_with(f, PREC_POWER)
            }
            Expr::Mul(lhs, rhs) => {
                lhs.fmt_with(f, PREC_PRODUCT)?;
                write!(f, "*")?;
                rhs.fmt_with(f, PREC_PRODUCT)
            }
            Expr::Div(lhs, rhs) => {
                lhs.fmt_with(f, PREC_PRODUCT)?;
                write!(f, "/")?;
                rhs.fmt_with(f, PREC_POWER)
            }
            Expr::Pow(base, exp) => {
                base.fmt_with(f, PREC_ATOM)?;
                write!(f, "^")?;
                exp.fmt_with(f, PREC_ATOM)
            }
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::ctg(expr) => write!(f, "ctg({})", expr),
            Expr::arcsin(expr) => write!(f, "arcsin({})", expr),
            Expr::arccos(expr) => write!(f, "arccos({})", expr),
            Expr::arctg(expr) => write!(f, "arctg({})", expr),
            Expr::arcctg(expr) => write!(f, "arcctg({})", expr),
            Expr::abs(expr) => write!(f, "abs({})", expr),
        }
    }
}

/// Pretty printing with the minimal number of brackets.
///
/// The output is valid input for the parser, so `parse(e.to_string())` rebuilds an
/// expression that evaluates like `e`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_bare(f)
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        *self = Expr::Add(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::SubAssign for Expr {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Expr::Sub(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        *self = Expr::Mul(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::DivAssign for Expr {
    fn div_assign(&mut self, rhs: Self) {
        *self = Expr::Div(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Creates multiple symbolic variables from a comma-separated string.
    ///
    /// Whitespace is trimmed and empty names are skipped.
    /// ```rust
    /// use RustedNumerics::symbolic::symbolic_engine::Expr;
    /// let vars = Expr::Symbols("x, y, z");
    /// assert_eq!(vars.len(), 3);
    /// ```
    pub fn Symbols(symbols: &str) -> Vec<Expr> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| Expr::Var(s.to_string()))
            .collect()
    }

    /// Rebuilds the node with `f` applied to every direct child.
    /// Leaves (variables and constants) are returned unchanged.
    pub fn map_children<F>(&self, f: F) -> Expr
    where
        F: Fn(&Expr) -> Expr,
    {
        let g = |e: &Expr| Box::new(f(e));
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(g(lhs), g(rhs)),
            Expr::Sub(lhs, rhs) => Expr::Sub(g(lhs), g(rhs)),
            Expr::Mul(lhs, rhs) => Expr::Mul(g(lhs), g(rhs)),
            Expr::Div(lhs, rhs) => Expr::Div(g(lhs), g(rhs)),
            Expr::Pow(base, exp) => Expr::Pow(g(base), g(exp)),
            Expr::Exp(expr) => Expr::Exp(g(expr)),
            Expr::Ln(expr) => Expr::Ln(g(expr)),
            Expr::sin(expr) => Expr::sin(g(expr)),
            Expr::cos(expr) => Expr::cos(g(expr)),
            Expr::tg(expr) => Expr::tg(g(expr)),
            Expr::ctg(expr) => Expr::ctg(g(expr)),
            Expr::arcsin(expr) => Expr::arcsin(g(expr)),
            Expr::arccos(expr) => Expr::arccos(g(expr)),
            Expr::arctg(expr) => Expr::arctg(g(expr)),
            Expr::arcctg(expr) => Expr::arcctg(g(expr)),
            Expr::abs(expr) => Expr::abs(g(expr)),
        }
    }

    /// Direct children of the node, left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Var(_) | Expr::Const(_) => Vec::new(),
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => vec![lhs.as_ref(), rhs.as_ref()],
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr)
            | Expr::ctg(expr)
            | Expr::arcsin(expr)
            | Expr::arccos(expr)
            | Expr::arctg(expr)
            | Expr::arcctg(expr)
            | Expr::abs(expr) => vec![expr.as_ref()],
        }
    }

    /// Substitutes a variable with a constant value throughout the expression.
    ///
    /// Purely functional: `self` is left untouched.
    pub fn substitute(&self, var: &str, value: f64) -> Expr {
        self.substitute_expr(var, &Expr::Const(value))
    }

    /// substitute a variable with an expression
    pub fn substitute_expr(&self, var: &str, expr: &Expr) -> Expr {
        match self {
            Expr::Var(name) if name == var => expr.clone(),
            _ => self.map_children(|child| child.substitute_expr(var, expr)),
        }
    }

    /// Renames a variable throughout the expression.
    pub fn rename_variable(&self, old_var: &str, new_var: &str) -> Expr {
        self.substitute_expr(old_var, &Expr::Var(new_var.to_string()))
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            _ => self
                .children()
                .iter()
                .any(|child| child.contains_variable(var_name)),
        }
    }

    /// Sorted, deduplicated names of all variables of the expression.
    ///
    /// ```rust
    /// use RustedNumerics::symbolic::symbolic_engine::Expr;
    /// let expr = Expr::parse_expression("x^2 + y*z + x").unwrap();
    /// assert_eq!(expr.variables(), vec!["x", "y", "z"]);
    /// ```
    pub fn variables(&self) -> Vec<String> {
        fn collect(expr: &Expr, out: &mut Vec<String>) {
            match expr {
                Expr::Var(name) => out.push(name.clone()),
                _ => expr.children().into_iter().for_each(|child| collect(child, out)),
            }
        }
        let mut vars = Vec::new();
        collect(self, &mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates exponential function e^(self).
    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    /// Creates natural logarithm ln(self).
    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    /// Creates base-10 logarithm using ln(x)/ln(10) identity.
    pub fn log10(self) -> Expr {
        Expr::Ln(self.boxed()) / Expr::Const(LN_10)
    }

    /// Creates square root as self^0.5.
    pub fn sqrt(self) -> Expr {
        Expr::Pow(self.boxed(), Box::new(Expr::Const(0.5)))
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Checks if expression is exactly zero (constant 0.0).
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// Value of a constant node.
    pub fn as_const(&self) -> Option<f64> {
        match self {
            Expr::Const(val) => Some(*val),
            _ => None,
        }
    }

    //__________________________________INDEXED VARIABLES____________________________________

    /// Creates a single indexed variable with format "name + index" (e.g., "x5").
    pub fn IndexedVar(index: usize, var_name: &str) -> Expr {
        Expr::Var(format!("{}{}", var_name, index))
    }

    /// Creates variables `x0, x1, ... x{n-1}` together with their names.
    pub fn IndexedVars(num_vars: usize, var_name: &str) -> (Vec<Expr>, Vec<String>) {
        let vec_of_names: Vec<String> = (0..num_vars)
            .map(|i| format!("{}{}", var_name, i))
            .collect();
        let vec_of_expr = vec_of_names
            .iter()
            .map(|name| Expr::Var(name.clone()))
            .collect();
        (vec_of_expr, vec_of_names)
    }
}

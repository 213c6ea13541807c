//___________________________________TESTS____________________________________
// Cross-module checks of the expression engine: parse, print, differentiate,
// simplify and compile must agree with each other and with plain f64 math.

#[cfg(test)]
mod tests {
    use crate::errors::{DomainError, NumericalError, ParseError};
    use crate::symbolic::parse_expr::parse_with_variables;
    use crate::symbolic::symbolic_engine::Expr;
    use crate::symbolic::utils::linspace;
    use approx::{assert_relative_eq, relative_eq};
    use std::f64::consts::FRAC_PI_2;

    type Reference = fn(f64) -> f64;

    /// formulas in x with the same function written in plain Rust
    fn battery() -> [(&'static str, Reference); 14] {
        [
            ("x^2 - 2*x + 1", |x| x * x - 2.0 * x + 1.0),
            ("3*x^3 - x/4 + 7", |x| 3.0 * x.powi(3) - x / 4.0 + 7.0),
            ("sin(x) + cos(2*x)", |x| x.sin() + (2.0 * x).cos()),
            ("exp(-x^2)", |x| (-x * x).exp()),
            ("-x^2", |x| -(x * x)),
            ("ln(x + 3)*sqrt(x + 3)", |x| (x + 3.0).ln() * (x + 3.0).sqrt()),
            ("tan(x/2) - atan(x)", |x| (x / 2.0).tan() - x.atan()),
            ("x*exp(sin(x))/(1 + x^2)", |x| x * x.sin().exp() / (1.0 + x * x)),
            ("2^x + x**3", |x| 2f64.powf(x) + x.powi(3)),
            ("abs(x - 0.5) + log10(x + 2)", |x| (x - 0.5).abs() + (x + 2.0).log10()),
            ("asin(x/2) + acos(x/3)", |x| (x / 2.0).asin() + (x / 3.0).acos()),
            ("pi*x - e", |x| std::f64::consts::PI * x - std::f64::consts::E),
            ("1/(x + 2)^2", |x| 1.0 / ((x + 2.0) * (x + 2.0))),
            ("cot(x + 2) + acot(x)", |x| 1.0 / (x + 2.0).tan() + FRAC_PI_2 - x.atan()),
        ]
    }

    fn sample_points() -> Vec<f64> {
        linspace(-1.3, 1.4, 17)
    }

    #[test]
    fn test_compile_matches_reference() {
        for (formula, reference) in battery() {
            let f = Expr::parse_expression(formula).unwrap().compile1D("x").unwrap();
            for x in sample_points() {
                let value = f(x).unwrap();
                assert!(
                    relative_eq!(value, reference(x), epsilon = 1e-12, max_relative = 1e-12),
                    "{} at x = {}: {} vs {}",
                    formula,
                    x,
                    value,
                    reference(x)
                );
            }
        }
    }

    #[test]
    fn test_direct_evaluation_matches_compiled() {
        for (formula, _) in battery() {
            let expr = Expr::parse_expression(formula).unwrap();
            let f = expr.compile(&["x"]).unwrap();
            for x in sample_points() {
                assert_eq!(f(&[x]).unwrap(), expr.eval_expression(&["x"], &[x]).unwrap());
            }
        }
    }

    #[test]
    fn test_display_reparses_to_same_values() {
        for (formula, reference) in battery() {
            let expr = Expr::parse_expression(formula).unwrap();
            let printed = expr.to_string();
            let reparsed = Expr::parse_expression(&printed)
                .unwrap_or_else(|e| panic!("{} printed as {} fails: {}", formula, printed, e));
            for x in sample_points() {
                let value = reparsed.eval_expression(&["x"], &[x]).unwrap();
                assert!(
                    relative_eq!(value, reference(x), epsilon = 1e-12, max_relative = 1e-12),
                    "{} printed as {}",
                    formula,
                    printed
                );
            }
        }
    }

    #[test]
    fn test_simplify_preserves_values() {
        for (formula, reference) in battery() {
            let simplified = Expr::parse_expression(formula).unwrap().simplify();
            for x in sample_points() {
                let value = simplified.eval_expression(&["x"], &[x]).unwrap();
                assert!(
                    relative_eq!(value, reference(x), epsilon = 1e-12, max_relative = 1e-10),
                    "{} simplified to {}",
                    formula,
                    simplified
                );
            }
        }
    }

    #[test]
    fn test_derivatives_match_central_differences() {
        let h = 1e-6;
        for (formula, reference) in battery() {
            let derivative = Expr::parse_expression(formula).unwrap().diff("x").simplify();
            // abs is not differentiable at its kink
            for x in sample_points().into_iter().filter(|x| (x - 0.5).abs() > 1e-3) {
                let numeric = (reference(x + h) - reference(x - h)) / (2.0 * h);
                let analytic = derivative.eval_expression(&["x"], &[x]).unwrap();
                assert!(
                    relative_eq!(analytic, numeric, epsilon = 1e-5, max_relative = 1e-5),
                    "d/dx {} = {} at x = {}: {} vs {}",
                    formula,
                    derivative,
                    x,
                    analytic,
                    numeric
                );
            }
        }
    }

    #[test]
    fn test_second_derivative_and_order_zero() {
        let f = Expr::parse_expression("x^4 - sin(x)").unwrap();
        assert_eq!(f.diff_n("x", 0), f);
        let d2 = f.diff_n("x", 2);
        for x in [-1.0, 0.3, 2.0] {
            assert_relative_eq!(
                d2.eval_expression(&["x"], &[x]).unwrap(),
                12.0 * x * x + f64::sin(x),
                epsilon = 1e-12
            );
        }
        let d5 = Expr::parse_expression("x^4").unwrap().diff_n("x", 5);
        assert!(d5.variables().is_empty());
        assert_eq!(d5.eval_expression(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_partial_derivatives() {
        let f = Expr::parse_expression("x^2*y + exp(y*z)").unwrap();
        let grad = f.diff_multi_args(&["x", "y", "z"]);
        let point: [f64; 3] = [1.5, -0.5, 2.0];
        let vars = ["x", "y", "z"];
        let (x, y, z) = (point[0], point[1], point[2]);
        let expected = [
            2.0 * x * y,
            x * x + z * (y * z).exp(),
            y * (y * z).exp(),
        ];
        for (g, e) in grad.iter().zip(expected.iter()) {
            assert_relative_eq!(g.eval_expression(&vars, &point).unwrap(), *e, epsilon = 1e-12);
        }
        assert_eq!(f.diff_multi().len(), 3);
    }

    #[test]
    fn test_substitution_is_pure() {
        let f = Expr::parse_expression("x*y + x").unwrap();
        let g = f.substitute("x", 2.0);
        assert!(f.contains_variable("x"));
        assert!(!g.contains_variable("x"));
        assert_eq!(g.variables(), vec!["y"]);
        assert_relative_eq!(g.eval_expression(&["y"], &[3.0]).unwrap(), 8.0);
        let h = f.substitute_expr("y", &Expr::parse_expression("sin(t)").unwrap());
        assert_eq!(h.variables(), vec!["t", "x"]);
        assert_eq!(f.rename_variable("x", "u").variables(), vec!["u", "y"]);
    }

    #[test]
    fn test_operator_overloads_build_trees() {
        let vars = Expr::Symbols("x, y");
        let (x, y) = (vars[0].clone(), vars[1].clone());
        let mut expr = x.clone() * y.clone() + x.clone().pow(Expr::Const(2.0));
        expr -= Expr::Const(1.0);
        expr /= y.clone();
        assert_relative_eq!(
            expr.eval_expression(&["x", "y"], &[3.0, 2.0]).unwrap(),
            (6.0 + 9.0 - 1.0) / 2.0
        );
        let neg = -x.clone();
        assert_eq!(neg.to_string(), "-x");
        let (indexed, names) = Expr::IndexedVars(3, "x");
        assert_eq!(names, vec!["x0", "x1", "x2"]);
        assert_eq!(indexed[2], Expr::IndexedVar(2, "x"));
    }

    #[test]
    fn test_domain_errors_are_not_nan() {
        let cases = [
            ("ln(x)", -1.0),
            ("1/x", 0.0),
            ("sqrt(x)", -4.0),
            ("asin(x)", 2.0),
            ("x^0.5", -1.0),
        ];
        for (formula, x) in cases {
            let f = Expr::parse_expression(formula).unwrap().compile1D("x").unwrap();
            assert!(f(x).is_err(), "{} at {} should fail", formula, x);
        }
        let err = Expr::parse_expression("ln(x)")
            .unwrap()
            .eval_expression(&["x"], &[0.0])
            .unwrap_err();
        assert!(matches!(err, NumericalError::Domain(DomainError::LogarithmOfNonPositive { .. })));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Expr::parse_expression(""), Err(ParseError::Empty)));
        assert!(matches!(Expr::parse_expression("x +* 2"), Err(ParseError::Syntax { .. })));
        assert!(matches!(Expr::parse_expression("(x + 1"), Err(ParseError::Syntax { .. })));
        assert!(matches!(
            Expr::parse_expression("foo(x)"),
            Err(ParseError::UnknownFunction { .. })
        ));
        assert!(matches!(
            parse_with_variables("x + y", &["x"]),
            Err(ParseError::UnknownSymbol { .. })
        ));
        assert!(matches!(
            Expr::parse_expression("x + y").unwrap().compile(&["x"]),
            Err(ParseError::UnknownSymbol { .. })
        ));
    }
}

//! Formula parser: turns a string like `"x^2 - 2*sin(x)"` into an [`Expr`].
//!
//! Grammar (whitespace allowed between tokens):
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/') unary)*
//! unary      := '-' unary | '+' unary | power
//! power      := atom (('^' | '**') unary)?
//! atom       := number | function '(' expression ')' | constant | variable | '(' expression ')'
//! ```
//! `^` binds tighter than unary minus and is right-associative, so `-x^2` is `-(x^2)`
//! and `2^3^2` is `2^9`.
//!
//! Functions: `sin cos tan tg cot ctg asin arcsin acos arccos atan arctan arctg acot arcctg
//! exp log ln sqrt log10 abs`. Constants: `pi`, `e`. Any other identifier is a variable.
//! ```
//! use RustedNumerics::symbolic::symbolic_engine::Expr;
//! let parsed_expression = Expr::parse_expression("x^2.3 * log(x + y + y^2.6)").unwrap();
//! let f = parsed_expression.compile(&["x", "y"]).unwrap();
//! println!("{} = {:?}", parsed_expression, f(&[1.0, 2.0]));
//! ```
use crate::errors::ParseError;
use crate::symbolic::symbolic_engine::Expr;
use log::debug;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0, one_of},
    combinator::{cut, map, map_res, not, opt, recognize},
    error::{Error, ErrorKind},
    multi::many0,
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, terminated},
};
use std::f64::consts::{E, LN_10, PI};

type Builder = fn(Box<Expr>) -> Expr;

/// Node constructor of a named function, None for unknown names
fn function_builder(name: &str) -> Option<Builder> {
    let builder: Builder = match name {
        "sin" => Expr::sin,
        "cos" => Expr::cos,
        "tan" | "tg" => Expr::tg,
        "cot" | "ctg" => Expr::ctg,
        "asin" | "arcsin" => Expr::arcsin,
        "acos" | "arccos" => Expr::arccos,
        "atan" | "arctan" | "arctg" => Expr::arctg,
        "acot" | "arcctg" => Expr::arcctg,
        "exp" => Expr::Exp,
        "log" | "ln" => Expr::Ln,
        "abs" => Expr::abs,
        "sqrt" => |arg| Expr::Pow(arg, Box::new(Expr::Const(0.5))),
        "log10" => |arg| Expr::Div(Box::new(Expr::Ln(arg)), Box::new(Expr::Const(LN_10))),
        _ => return None,
    };
    Some(builder)
}

fn named_constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(PI),
        "e" => Some(E),
        _ => None,
    }
}

fn ws<'a, O, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

/// unsigned decimal literal: `12`, `1.5`, `.5`, `3.`, `1e-6`
fn number(input: &str) -> IResult<&str, Expr> {
    // signs belong to the unary rule
    map_res(preceded(not(one_of("+-")), recognize_float), |s: &str| {
        s.parse::<f64>().map(Expr::Const)
    })
    .parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

fn function_or_symbol(input: &str) -> IResult<&str, Expr> {
    let (rest, name) = identifier(input)?;
    let (after_ws, _) = multispace0::<&str, Error<&str>>(rest)?;
    if after_ws.starts_with('(') {
        let Some(builder) = function_builder(name) else {
            // reported as UnknownFunction by parse_expression_func
            return Err(nom::Err::Failure(Error::new(input, ErrorKind::Verify)));
        };
        let (rest, argument) =
            preceded(char('('), cut(terminated(expression, char(')')))).parse(after_ws)?;
        return Ok((rest, builder(Box::new(argument))));
    }
    if function_builder(name).is_some() {
        // a function name without an argument list
        return Err(nom::Err::Failure(Error::new(rest, ErrorKind::Char)));
    }
    match named_constant(name) {
        Some(value) => Ok((rest, Expr::Const(value))),
        None => Ok((rest, Expr::Var(name.to_string()))),
    }
}

fn parenthesized(input: &str) -> IResult<&str, Expr> {
    preceded(char('('), cut(terminated(expression, char(')')))).parse(input)
}

fn atom(input: &str) -> IResult<&str, Expr> {
    ws(alt((number, function_or_symbol, parenthesized))).parse(input)
}

fn negate(expr: Expr) -> Expr {
    match expr {
        Expr::Const(val) => Expr::Const(-val),
        other => -other,
    }
}

fn power(input: &str) -> IResult<&str, Expr> {
    let (input, base) = atom(input)?;
    let (input, exponent) =
        opt(preceded(ws(alt((tag("**"), tag("^")))), cut(unary))).parse(input)?;
    match exponent {
        Some(exponent) => Ok((input, base.pow(exponent))),
        None => Ok((input, base)),
    }
}

fn unary(input: &str) -> IResult<&str, Expr> {
    alt((
        map(preceded(ws(char('-')), cut(unary)), negate),
        preceded(ws(char('+')), cut(unary)),
        power,
    ))
    .parse(input)
}

fn term(input: &str) -> IResult<&str, Expr> {
    let (input, first) = unary(input)?;
    let (input, rest) = many0(pair(ws(one_of("*/")), cut(unary))).parse(input)?;
    let expr = rest.into_iter().fold(first, |acc, (op, rhs)| match op {
        '*' => acc * rhs,
        _ => acc / rhs,
    });
    Ok((input, expr))
}

fn expression(input: &str) -> IResult<&str, Expr> {
    let (input, first) = term(input)?;
    let (input, rest) = many0(pair(ws(one_of("+-")), cut(term))).parse(input)?;
    let expr = rest.into_iter().fold(first, |acc, (op, rhs)| match op {
        '+' => acc + rhs,
        _ => acc - rhs,
    });
    Ok((input, expr))
}

/// character position of `rest` inside `full`
fn position_of(full: &str, rest: &str) -> usize {
    let offset = full.len().saturating_sub(rest.len());
    full[..offset].chars().count()
}

pub(crate) fn syntax_error(full: &str, rest: &str) -> ParseError {
    let trimmed = rest.trim_start();
    let fragment: String = trimmed
        .chars()
        .take_while(|c| !c.is_whitespace())
        .take(16)
        .collect();
    ParseError::Syntax {
        position: position_of(full, trimmed),
        fragment: if fragment.is_empty() {
            "end of input".to_string()
        } else {
            fragment
        },
    }
}

/// Parses a whole formula; trailing garbage is a syntax error.
pub fn parse_expression_func(input: &str) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    match expression(input) {
        Ok((rest, expr)) if rest.trim().is_empty() => {
            debug!("parsed {:?} as {}", input, expr);
            Ok(expr)
        }
        Ok((rest, _)) => Err(syntax_error(input, rest)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => match e.code {
            ErrorKind::Verify => {
                let name = identifier(e.input)
                    .map(|(_, name)| name.to_string())
                    .unwrap_or_default();
                Err(ParseError::UnknownFunction {
                    name,
                    position: position_of(input, e.input),
                })
            }
            _ => Err(syntax_error(input, e.input)),
        },
        Err(nom::Err::Incomplete(_)) => Err(syntax_error(input, "")),
    }
}

/// Parses a formula that may only use the listed variables.
pub fn parse_with_variables(input: &str, allowed: &[&str]) -> Result<Expr, ParseError> {
    let expr = parse_expression_func(input)?;
    if let Some(name) = expr
        .variables()
        .into_iter()
        .find(|name| !allowed.contains(&name.as_str()))
    {
        return Err(ParseError::UnknownSymbol { name });
    }
    Ok(expr)
}

impl Expr {
    /// Parses a mathematical expression from its string representation.
    ///
    /// # Supported Syntax
    /// - Variables: x, y, x0, var_name
    /// - Constants: 3.14, 2.5, 1e-6, pi, e
    /// - Operators: +, -, *, /, ^ (also **)
    /// - Functions: sin, cos, exp, ln/log, sqrt, etc.
    /// - Parentheses for grouping
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        parse_expression_func(input)
    }

    /// Parses multiple expressions, failing on the first malformed one.
    pub fn parse_vector_expression(input: Vec<&str>) -> Result<Vec<Expr>, ParseError> {
        input.into_iter().map(parse_expression_func).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_expression_func("42").unwrap(), Expr::Const(42.0));
        assert_eq!(parse_expression_func(" 1.5 ").unwrap(), Expr::Const(1.5));
        assert_eq!(parse_expression_func(".5").unwrap(), Expr::Const(0.5));
        assert_eq!(parse_expression_func("1e-3").unwrap(), Expr::Const(1e-3));
        assert_eq!(parse_expression_func("2.5E2").unwrap(), Expr::Const(250.0));
        assert_eq!(parse_expression_func("-3").unwrap(), Expr::Const(-3.0));
        assert_eq!(parse_expression_func("3.").unwrap(), Expr::Const(3.0));
    }

    #[test]
    fn test_parse_decimal_at_end_of_input() {
        assert_eq!(parse_expression_func("1.5").unwrap(), Expr::Const(1.5));
        assert_eq!(parse_expression_func("0.3").unwrap(), Expr::Const(0.3));
        assert_eq!(parse_expression_func("x - 0.3").unwrap(), x() - Expr::Const(0.3));
        assert_eq!(
            parse_expression_func("x^2 - 2.25").unwrap(),
            x().pow(Expr::Const(2.0)) - Expr::Const(2.25)
        );
        assert_eq!(
            parse_expression_func("2*x**1.5").unwrap(),
            Expr::Const(2.0) * x().pow(Expr::Const(1.5))
        );
    }

    #[test]
    fn test_parse_precedence() {
        let parsed = parse_expression_func("1 + 2*x^2").unwrap();
        let expected = Expr::Const(1.0) + Expr::Const(2.0) * x().pow(Expr::Const(2.0));
        assert_eq!(parsed, expected);
        let parsed = parse_expression_func("(1 + 2)*x").unwrap();
        assert_eq!(parsed, (Expr::Const(1.0) + Expr::Const(2.0)) * x());
    }

    #[test]
    fn test_parse_left_associativity() {
        let parsed = parse_expression_func("x - 1 - 2").unwrap();
        assert_eq!(parsed, (x() - Expr::Const(1.0)) - Expr::Const(2.0));
        let parsed = parse_expression_func("x / 2 / 4").unwrap();
        assert_eq!(parsed, (x() / Expr::Const(2.0)) / Expr::Const(4.0));
    }

    #[test]
    fn test_parse_power_right_associative_and_unary_minus() {
        let parsed = parse_expression_func("2^3^2").unwrap();
        assert_eq!(
            parsed,
            Expr::Const(2.0).pow(Expr::Const(3.0).pow(Expr::Const(2.0)))
        );
        let parsed = parse_expression_func("-x^2").unwrap();
        assert_eq!(parsed, -(x().pow(Expr::Const(2.0))));
        let parsed = parse_expression_func("x**2").unwrap();
        assert_eq!(parsed, x().pow(Expr::Const(2.0)));
        let parsed = parse_expression_func("x^-1").unwrap();
        assert_eq!(parsed, x().pow(Expr::Const(-1.0)));
    }

    #[test]
    fn test_parse_functions_and_constants() {
        let parsed = parse_expression_func("sin(x) + tan(x) + arctg(x)").unwrap();
        let expected = Expr::sin(x().boxed()) + Expr::tg(x().boxed()) + Expr::arctg(x().boxed());
        assert_eq!(parsed, expected);
        assert_eq!(parse_expression_func("log(x)").unwrap(), Expr::Ln(x().boxed()));
        assert_eq!(parse_expression_func("sqrt(x)").unwrap(), x().sqrt());
        let pi = parse_expression_func("pi").unwrap();
        assert_relative_eq!(pi.as_const().unwrap(), PI);
        let e = parse_expression_func("e").unwrap();
        assert_relative_eq!(e.as_const().unwrap(), E);
        assert_eq!(
            parse_expression_func("exp ( x )").unwrap(),
            Expr::Exp(x().boxed())
        );
    }

    #[test]
    fn test_parse_indexed_variables() {
        let parsed = parse_expression_func("x0^2 + x1 - x_2").unwrap();
        assert_eq!(parsed.variables(), vec!["x0", "x1", "x_2"]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_expression_func("   "), Err(ParseError::Empty));
        assert_eq!(
            parse_expression_func("x +"),
            Err(ParseError::Syntax {
                position: 3,
                fragment: "end of input".to_string()
            })
        );
        assert!(matches!(
            parse_expression_func("(x + 1"),
            Err(ParseError::Syntax { .. })
        ));
        assert!(matches!(
            parse_expression_func("x + 1)"),
            Err(ParseError::Syntax { position: 5, .. })
        ));
        assert!(matches!(
            parse_expression_func("2 $ 3"),
            Err(ParseError::Syntax { position: 2, .. })
        ));
        assert!(matches!(
            parse_expression_func("sin x"),
            Err(ParseError::Syntax { .. })
        ));
        assert!(matches!(
            parse_expression_func("x * * 2"),
            Err(ParseError::Syntax { .. })
        ));
    }

    #[test]
    fn test_parse_unknown_function() {
        assert_eq!(
            parse_expression_func("1 + foo(x)"),
            Err(ParseError::UnknownFunction {
                name: "foo".to_string(),
                position: 4
            })
        );
    }

    #[test]
    fn test_parse_with_variables() {
        assert!(parse_with_variables("x^2 - 2", &["x"]).is_ok());
        assert_eq!(
            parse_with_variables("x + y", &["x"]),
            Err(ParseError::UnknownSymbol {
                name: "y".to_string()
            })
        );
    }

    #[test]
    fn test_parse_vector_expression() {
        let parsed = Expr::parse_vector_expression(vec!["x0 + x1", "x0 - x1"]).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(Expr::parse_vector_expression(vec!["x0 +", "x1"]).is_err());
    }
}

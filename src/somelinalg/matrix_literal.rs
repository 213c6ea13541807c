//! Strict parser of numeric matrix and vector literals.
//!
//! Accepted forms:
//! ```text
//! [[4, 1], [1, 3]]      bracketed rows
//! 4 1; 1 3              rows separated by ';' or new lines, entries by spaces or commas
//! [1, 2]   1, 2   1 2   vectors
//! ```
//! Entries are decimal literals with an optional sign. Nothing is evaluated: names,
//! operators and non-finite values are rejected.
use crate::errors::{NumericalError, ParseError};
use crate::symbolic::parse_expr::syntax_error;
use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{char, multispace0, one_of, space0, space1},
    combinator::{map_opt, recognize},
    error::Error,
    multi::separated_list1,
    number::complete::recognize_float,
    sequence::{delimited, preceded},
};
use nalgebra::{DMatrix, DVector};

fn ws<'a, O, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn signed_number(input: &str) -> IResult<&str, f64> {
    map_opt(recognize_float, |s: &str| {
        s.parse::<f64>().ok().filter(|v| v.is_finite())
    })
    .parse(input)
}

fn bracketed_row(input: &str) -> IResult<&str, Vec<f64>> {
    delimited(
        ws(char('[')),
        separated_list1(ws(char(',')), ws(signed_number)),
        ws(char(']')),
    )
    .parse(input)
}

fn bracketed_matrix(input: &str) -> IResult<&str, Vec<Vec<f64>>> {
    delimited(
        ws(char('[')),
        separated_list1(ws(char(',')), bracketed_row),
        ws(char(']')),
    )
    .parse(input)
}

fn entry_separator(input: &str) -> IResult<&str, &str> {
    alt((recognize((space0, char(','), space0)), space1)).parse(input)
}

fn plain_row(input: &str) -> IResult<&str, Vec<f64>> {
    preceded(space0, separated_list1(entry_separator, signed_number)).parse(input)
}

fn row_separator(input: &str) -> IResult<&str, &str> {
    recognize((space0, one_of(";\n"), multispace0)).parse(input)
}

fn plain_matrix(input: &str) -> IResult<&str, Vec<Vec<f64>>> {
    delimited(
        multispace0,
        separated_list1(row_separator, plain_row),
        multispace0,
    )
    .parse(input)
}

fn run<'a, O>(
    text: &'a str,
    parser: impl Fn(&'a str) -> IResult<&'a str, O>,
) -> Result<O, NumericalError> {
    match parser(text) {
        Ok((rest, value)) if rest.trim().is_empty() => Ok(value),
        Ok((rest, _)) => Err(syntax_error(text, rest).into()),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(syntax_error(text, e.input).into()),
        Err(nom::Err::Incomplete(_)) => Err(syntax_error(text, "").into()),
    }
}

/// Parses a rectangular matrix literal.
pub fn parse_matrix(text: &str) -> Result<DMatrix<f64>, NumericalError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty.into());
    }
    let rows = if text.trim_start().starts_with('[') {
        run(text, bracketed_matrix)?
    } else {
        run(text, plain_matrix)?
    };
    let cols = rows[0].len();
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
        return Err(NumericalError::Precondition(format!(
            "row {} has {} entries, row 0 has {}",
            i,
            row.len(),
            cols
        )));
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Ok(DMatrix::from_row_slice(rows.len(), cols, &flat))
}

/// Parses a list of numbers, bracketed or not.
pub fn parse_number_list(text: &str) -> Result<Vec<f64>, NumericalError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty.into());
    }
    if text.trim_start().starts_with('[') {
        run(text, bracketed_row)
    } else {
        run(text, |input| delimited(multispace0, plain_row, multispace0).parse(input))
    }
}

pub fn parse_vector(text: &str) -> Result<DVector<f64>, NumericalError> {
    Ok(DVector::from_vec(parse_number_list(text)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_forms() {
        let expected = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        assert_eq!(parse_matrix("[[4, 1], [1, 3]]").unwrap(), expected);
        assert_eq!(parse_matrix(" [ [4,1],\n [1,3] ] ").unwrap(), expected);
        assert_eq!(parse_matrix("4 1; 1 3").unwrap(), expected);
        assert_eq!(parse_matrix("4, 1\n1, 3\n").unwrap(), expected);
        let m = parse_matrix("[[-1.5e2, .5, +3.]]").unwrap();
        assert_eq!(m.shape(), (1, 3));
        assert_eq!(m[(0, 0)], -150.0);
        assert_eq!(m[(0, 1)], 0.5);
    }

    #[test]
    fn test_vector_forms() {
        let expected = DVector::from_vec(vec![1.0, 2.0]);
        assert_eq!(parse_vector("[1, 2]").unwrap(), expected);
        assert_eq!(parse_vector("1, 2").unwrap(), expected);
        assert_eq!(parse_vector("1 2").unwrap(), expected);
        assert_eq!(parse_number_list("0, 1, 2").unwrap(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_decimal_in_last_entry() {
        assert_eq!(parse_vector("1, 2.5").unwrap(), DVector::from_vec(vec![1.0, 2.5]));
        assert_eq!(parse_vector("[0.25]").unwrap(), DVector::from_vec(vec![0.25]));
        assert_eq!(
            parse_matrix("4 1; 1 3.5").unwrap(),
            DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.5])
        );
        assert_eq!(parse_number_list("0.1 -2.75").unwrap(), vec![0.1, -2.75]);
    }

    #[test]
    fn test_rejects_code_and_garbage() {
        for bad in [
            "[[1, 2], [3, x]]",
            "__import__('os')",
            "[1, 2] + [3]",
            "[[1, 2]",
            "1e400",
            "[1, 2,]",
            "nan",
        ] {
            assert!(
                matches!(parse_matrix(bad), Err(NumericalError::Parse(_))),
                "{} should be rejected",
                bad
            );
        }
        assert!(matches!(parse_vector("   "), Err(NumericalError::Parse(ParseError::Empty))));
    }

    #[test]
    fn test_ragged_rows() {
        assert!(matches!(
            parse_matrix("[[1, 2], [3]]"),
            Err(NumericalError::Precondition(_))
        ));
        assert!(matches!(
            parse_matrix("1 2; 3"),
            Err(NumericalError::Precondition(_))
        ));
    }
}

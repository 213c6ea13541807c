/// parse task documents made of sections like
/// ```text
/// // comment
/// newton_raphson
///   f: x^2 - 2
///   x0: 1.0
///
/// jacobi
///   A: [[4, 1], [1, 3]]
///   b: [1, 2]
/// ```
/// A section is a title line followed by `key: value` lines. The value is the rest of the
/// line, so it may contain spaces and commas. Lines starting with `//`, `#` or `%` are comments.
/// Sections keep the order of the document and the same title may appear more than once.
use crate::errors::NumericalError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, space0},
    combinator::{all_consuming, map, recognize, rest},
    multi::many0,
    sequence::{delimited, pair, preceded},
};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;

pub type SectionMap = HashMap<String, Value>;
/// ordered list of `(title, key-value map)`
pub type Document = Vec<(String, SectionMap)>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    /// Classifies the raw text of a value: integer, float, boolean, otherwise text.
    pub fn from_text(s: &str) -> Value {
        let s = s.trim();
        if let Ok(val) = s.parse::<i64>() {
            Value::Integer(val)
        } else if let Ok(val) = s.parse::<f64>() {
            Value::Float(val)
        } else if let Ok(val) = s.parse::<bool>() {
            Value::Boolean(val)
        } else {
            Value::String(s.to_string())
        }
    }

    pub fn as_string(&self) -> Option<&String> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// integers are accepted as floats
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    pub fn to_string_value(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Float(f) => f.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Boolean(b) => b.to_string(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Line<'a> {
    Title(&'a str),
    Pair(&'a str, &'a str),
    Skip,
}

/// word characters without spaces, not starting with a digit
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

fn parse_comment(input: &str) -> IResult<&str, Line<'_>> {
    map(
        preceded(space0, pair(alt((tag("//"), tag("#"), tag("%"))), rest)),
        |_| Line::Skip,
    )
    .parse(input)
}

fn parse_key_value_pair(input: &str) -> IResult<&str, Line<'_>> {
    let colon_separator = delimited(space0, char(':'), space0);
    map(
        (preceded(space0, parse_identifier), colon_separator, rest),
        |(key, _, value): (&str, char, &str)| Line::Pair(key, value.trim()),
    )
    .parse(input)
}

fn parse_title(input: &str) -> IResult<&str, Line<'_>> {
    map(delimited(space0, parse_identifier, space0), Line::Title).parse(input)
}

fn parse_blank(input: &str) -> IResult<&str, Line<'_>> {
    map(space0, |_| Line::Skip).parse(input)
}

fn parse_line(input: &str) -> IResult<&str, Line<'_>> {
    all_consuming(alt((
        parse_comment,
        parse_key_value_pair,
        parse_title,
        parse_blank,
    )))
    .parse(input)
}

/// Parses a whole document. Errors name the offending line (1-based).
pub fn parse_document(input: &str) -> Result<Document, NumericalError> {
    let mut document: Document = Vec::new();
    for (number, text) in input.lines().enumerate() {
        let line_number = number + 1;
        let line = match parse_line(text) {
            Ok((_, line)) => line,
            Err(_) => {
                return Err(NumericalError::Task(format!(
                    "line {}: expected a title, `key: value` or a comment, got `{}`",
                    line_number,
                    text.trim()
                )));
            }
        };
        match line {
            Line::Skip => {}
            Line::Title(title) => document.push((title.to_string(), HashMap::new())),
            Line::Pair(key, value) => {
                let Some((title, section)) = document.last_mut() else {
                    return Err(NumericalError::Task(format!(
                        "line {}: key `{}` appears before any section title",
                        line_number, key
                    )));
                };
                if value.is_empty() {
                    return Err(NumericalError::Task(format!(
                        "line {}: key `{}` has no value",
                        line_number, key
                    )));
                }
                if section.contains_key(key) {
                    return Err(NumericalError::Task(format!(
                        "line {}: key `{}` repeated in section `{}`",
                        line_number, key, title
                    )));
                }
                section.insert(key.to_string(), Value::from_text(value));
            }
        }
    }
    if document.is_empty() {
        return Err(NumericalError::Task(
            "document contains no sections".to_string(),
        ));
    }
    Ok(document)
}

/// Reads and parses a task file.
pub fn parse_document_file<P: AsRef<Path>>(path: P) -> Result<Document, NumericalError> {
    let content = std::fs::read_to_string(path)?;
    parse_document(&content)
}

/// Splits a list value on top-level commas, commas inside brackets or parentheses are kept.
pub fn split_list(value: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in value.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            _ => {}
        }
        if c == ',' && depth == 0 {
            parts.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }
    if !current.trim().is_empty() || !parts.is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_identifier() {
        let (remaining, key) = parse_identifier("key_1: value1").unwrap();
        assert_eq!(key, "key_1");
        assert_eq!(remaining, ": value1");
        let (_, key) = parse_identifier("_private").unwrap();
        assert_eq!(key, "_private");
        assert!(parse_identifier("1key").is_err());
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("taylor").unwrap().1, Line::Title("taylor"));
        assert_eq!(parse_line("  taylor  ").unwrap().1, Line::Title("taylor"));
        assert_eq!(
            parse_line("  f : sin(x) + x^2, 3 ").unwrap().1,
            Line::Pair("f", "sin(x) + x^2, 3")
        );
        assert_eq!(parse_line("// f: x").unwrap().1, Line::Skip);
        assert_eq!(parse_line(" # note").unwrap().1, Line::Skip);
        assert_eq!(parse_line("% matlab style").unwrap().1, Line::Skip);
        assert_eq!(parse_line("   ").unwrap().1, Line::Skip);
        assert!(parse_line("taylor newton").is_err());
        assert!(parse_line("= 3").is_err());
    }

    #[test]
    fn test_value_classification() {
        assert_eq!(Value::from_text("100"), Value::Integer(100));
        assert_eq!(Value::from_text(" 1e-6 "), Value::Float(1e-6));
        assert_eq!(Value::from_text("true"), Value::Boolean(true));
        assert_eq!(
            Value::from_text("x^2 - 2"),
            Value::String("x^2 - 2".to_string())
        );
        assert_eq!(Value::Integer(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Boolean(true).as_float(), None);
    }

    #[test]
    fn test_parse_document() {
        let input = "
        // root of x^2 - 2
        newton_raphson
            f: x^2 - 2
            x0: 1

        # a second run of the same method
        newton_raphson
            f: cos(x) - x
            x0: 0.5
            tolerance: 1e-10
        jacobi
            A: [[4, 1], [1, 3]]
            b: 1, 2
        ";
        let document = parse_document(input).unwrap();
        assert_eq!(document.len(), 3);
        assert_eq!(document[0].0, "newton_raphson");
        assert_eq!(document[1].0, "newton_raphson");
        assert_eq!(document[2].0, "jacobi");
        assert_eq!(
            document[0].1.get("f"),
            Some(&Value::String("x^2 - 2".to_string()))
        );
        assert_eq!(document[0].1.get("x0"), Some(&Value::Integer(1)));
        assert_eq!(document[1].1.get("tolerance"), Some(&Value::Float(1e-10)));
        assert_eq!(
            document[2].1.get("A").unwrap().to_string_value(),
            "[[4, 1], [1, 3]]"
        );
        assert_eq!(document[2].1.get("b").unwrap().to_string_value(), "1, 2");
    }

    #[test]
    fn test_document_errors() {
        let err = parse_document("f: x^2\ntaylor").unwrap_err();
        assert!(err.to_string().contains("line 1"));
        let err = parse_document("taylor\n  f: x\n  f: x^2").unwrap_err();
        assert!(err.to_string().contains("repeated"));
        assert!(parse_document("taylor\n  f:   ").is_err());
        assert!(parse_document("taylor\n x0 = 1").is_err());
        assert!(parse_document("// only a comment\n\n").is_err());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("0, 1, 2"), vec!["0", "1", "2"]);
        assert_eq!(
            split_list("x^2 + y^2 - 10, atan(x, y)"),
            vec!["x^2 + y^2 - 10", "atan(x, y)"]
        );
        assert_eq!(split_list("[1, 2], [3, 4]"), vec!["[1, 2]", "[3, 4]"]);
        assert_eq!(split_list("single"), vec!["single"]);
        assert!(split_list("  ").is_empty());
    }

    #[test]
    fn test_parse_document_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lagrange\n  x: 0, 1, 2\n  y: 1, 2, 5").unwrap();
        let document = parse_document_file(file.path()).unwrap();
        assert_eq!(document[0].0, "lagrange");
        assert!(parse_document_file("/nonexistent/task.txt").is_err());
    }
}

// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License

use crate::Utils::logger::{init_logger, save_trace_to_csv};
use crate::Utils::task_parser::parse_document;
use crate::errors::NumericalError;
use crate::numerical::NR::newton_raphson;
use crate::numerical::iteration_trace::ConvergenceConfig;
use crate::numerical::task_api::run_document;
use crate::symbolic::symbolic_engine::Expr;

pub const EXAMPLE_TASKS: &str = r#"
// every method of the crate in one task document
taylor
    f: exp(x)
    x0: 0
    n: 4
    x: 0.5
bisection
    f: x^3 - x - 2
    a: 1
    b: 2
    tolerance: 1e-6
newton_raphson
    f: x^2 - 2
    x0: 1
    tolerance: 1e-10
newton_raphson_system
    equations: x^2 + y^2 - 10, x - y - 4
    unknowns: x, y
    x0: 1, 1
    max_iterations: 8
jacobi
    A: [[4, 1], [1, 3]]
    b: [1, 2]
    tolerance: 1e-10
finite_differences
    p: 0
    q: -1
    r: 0
    a: 0
    ya: 0
    b: pi/2
    yb: 1
    n: 9
lagrange
    x: 0, 1, 2
    y: 1, 2, 5
"#;

pub fn utils_examples(example: usize) -> Result<(), NumericalError> {
    match example {
        0 => {
            // TASK DOCUMENT: parse and show the sections
            let document = parse_document(EXAMPLE_TASKS)?;
            for (title, section) in &document {
                println!("{}: {:?}", title, section);
            }
        }
        1 => {
            // TASK DOCUMENT: run every section
            for report in run_document(EXAMPLE_TASKS)? {
                println!("{}\n", report);
            }
        }
        2 => {
            // LOGGING and CSV export
            init_logger(Some("info"), false)?;
            let f = Expr::parse_expression("x^3 - 2*x - 5")?;
            let trace = newton_raphson(&f, 2.0, &ConvergenceConfig::default())?;
            let path = std::env::temp_dir().join("newton_raphson_trace.csv");
            save_trace_to_csv(&trace, &path)?;
            println!("trace saved to {}", path.display());
        }
        _ => {
            println!("no utils example {}", example);
        }
    }
    Ok(())
}

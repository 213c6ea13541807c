#![allow(non_snake_case)]
use RustedNumerics::Examples::approximation_examples::approximation_examples;
use RustedNumerics::Examples::bvp_examples::bvp_examples;
use RustedNumerics::Examples::linear_sys_examples::linear_sys_examples;
use RustedNumerics::Examples::nonlinear_eqs_examples::nonlinear_eqs_examples;
use RustedNumerics::Examples::symbolic_examples::sym_examples;
use RustedNumerics::Examples::utils_examples::utils_examples;
use RustedNumerics::Utils::logger::init_logger;
use RustedNumerics::errors::NumericalError;
use RustedNumerics::numerical::task_api::run_document;
use log::error;
use std::env;
use std::process::ExitCode;

/// `RustedNumerics <task file> [loglevel]` runs the tasks of the file,
/// without arguments every example is run.
fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let result = match args.get(1) {
        Some(path) => run_task_file(path, args.get(2).map(|s| s.as_str())),
        None => run_examples(),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_task_file(path: &str, loglevel: Option<&str>) -> Result<(), NumericalError> {
    init_logger(loglevel.or(Some("info")), false)?;
    let text = std::fs::read_to_string(path)?;
    for report in run_document(&text)? {
        println!("{}\n", report);
    }
    Ok(())
}

fn run_examples() -> Result<(), NumericalError> {
    init_logger(Some("warn"), false)?;
    for example in 0..4 {
        sym_examples(example)?;
    }
    for example in 0..2 {
        approximation_examples(example)?;
    }
    for example in 0..4 {
        nonlinear_eqs_examples(example)?;
    }
    for example in 0..3 {
        linear_sys_examples(example)?;
        bvp_examples(example)?;
        utils_examples(example)?;
    }
    Ok(())
}

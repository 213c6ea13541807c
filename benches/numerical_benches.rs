#![allow(non_snake_case)]
use RustedNumerics::Examples::utils_examples::EXAMPLE_TASKS;
use RustedNumerics::numerical::BVP_finite_diff::{BVPProblem, finite_differences};
use RustedNumerics::numerical::Jacobi::jacobi;
use RustedNumerics::numerical::NR::newton_raphson;
use RustedNumerics::numerical::NR_system::newton_raphson_n;
use RustedNumerics::numerical::Taylor::taylor;
use RustedNumerics::numerical::iteration_trace::ConvergenceConfig;
use RustedNumerics::numerical::task_api::run_document;
use RustedNumerics::symbolic::symbolic_engine::Expr;
use criterion::{Criterion, criterion_group, criterion_main};
use nalgebra::{DMatrix, DVector};
use std::hint::black_box;

fn bench_compile(c: &mut Criterion) {
    let expr = Expr::parse_expression("x*exp(sin(x))/(1 + x^2) + ln(x + 3)").unwrap();
    c.bench_function("parse and compile", |b| {
        b.iter(|| {
            Expr::parse_expression(black_box("x*exp(sin(x))/(1 + x^2) + ln(x + 3)"))
                .unwrap()
                .compile1D("x")
                .unwrap()
        })
    });
    let f = expr.compile1D("x").unwrap();
    c.bench_function("compiled evaluation", |b| b.iter(|| f(black_box(0.7)).unwrap()));
}

fn bench_taylor(c: &mut Criterion) {
    let f = Expr::parse_expression("exp(x)*sin(x)").unwrap();
    c.bench_function("taylor degree 8", |b| b.iter(|| taylor(&f, black_box(0.0), 8).unwrap()));
}

fn bench_newton(c: &mut Criterion) {
    let f = Expr::parse_expression("cos(x) - x").unwrap();
    let config = ConvergenceConfig::new(1e-12, 100).unwrap();
    c.bench_function("newton_raphson scalar", |b| {
        b.iter(|| newton_raphson(&f, black_box(1.0), &config).unwrap())
    });
    c.bench_function("newton_raphson system", |b| {
        b.iter(|| newton_raphson_n(&["x0^2 + x1^2 - 10", "x0 - x1 - 4"], black_box(&[1.0, 1.0][..]), 10).unwrap())
    });
}

fn bench_linear(c: &mut Criterion) {
    let n = 50;
    let A = DMatrix::from_fn(n, n, |i, j| if i == j { 4.0 } else if i.abs_diff(j) == 1 { -1.0 } else { 0.0 });
    let b = DVector::from_element(n, 1.0);
    let config = ConvergenceConfig::new(1e-10, 1000).unwrap();
    c.bench_function("jacobi 50x50", |bench| bench.iter(|| jacobi(&A, black_box(&b), &config).unwrap()));
    let problem = BVPProblem::from_formulas("0", "-1", "sin(x)", (0.0, 0.0), (1.0, 1.0)).unwrap();
    c.bench_function("finite differences n = 1000", |bench| {
        bench.iter(|| finite_differences(&problem, black_box(1000)).unwrap())
    });
}

fn bench_task_document(c: &mut Criterion) {
    c.bench_function("example task document", |b| b.iter(|| run_document(black_box(EXAMPLE_TASKS)).unwrap()));
}

criterion_group!(benches, bench_compile, bench_taylor, bench_newton, bench_linear, bench_task_document);
criterion_main!(benches);

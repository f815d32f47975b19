//! Criterion benchmarks for calculator engine performance

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scical_engine::{Bindings, Engine, FormatConfig, Markup, Mode};
use std::time::Duration;

fn create_test_engine() -> Engine {
    Engine::new().unwrap_or_else(|e| panic!("failed to create test engine: {}", e))
}

fn custom_criterion() -> Criterion {
    Criterion::default()
        .sample_size(20) // Reduced from default 100
        .warm_up_time(Duration::from_millis(100)) // Reduced warmup
        .measurement_time(Duration::from_secs(1)) // Reduced measurement time
        .nresamples(1000) // Reduced from default 100000
        .noise_threshold(0.05) // Slightly higher threshold for faster convergence
}

fn bench_engine_setup(c: &mut Criterion) {
    c.bench_function("engine_new", |b| b.iter(create_test_engine));
}

fn bench_parse(c: &mut Criterion) {
    let engine = create_test_engine();

    c.bench_function("parse_arithmetic", |b| {
        b.iter(|| engine.parse(black_box("1 + 2 * 3 - 4 / 5")).unwrap())
    });

    c.bench_function("parse_units", |b| {
        b.iter(|| engine.parse(black_box("3 km/h + 12 m/s to mi/h")).unwrap())
    });

    c.bench_function("parse_nested", |b| {
        b.iter(|| {
            engine
                .parse(black_box("((((1 + 2) * 3) ^ 2 - sqrt(16)) / (7 // 2))!"))
                .unwrap()
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let engine = create_test_engine();
    let bindings = Bindings::new();

    c.bench_function("evaluate_exact_arithmetic", |b| {
        b.iter(|| engine.evaluate(black_box("1/3 + 2/7 * 3^4"), &bindings).unwrap())
    });

    c.bench_function("evaluate_big_integers", |b| {
        b.iter(|| engine.evaluate(black_box("50! / 48!"), &bindings).unwrap())
    });

    c.bench_function("evaluate_conversion", |b| {
        b.iter(|| engine.evaluate(black_box("1in to cm"), &bindings).unwrap())
    });

    c.bench_function("evaluate_quadratic", |b| {
        b.iter(|| engine.evaluate(black_box("x^2 - 3x + 2 = 0"), &bindings).unwrap())
    });

    c.bench_function("evaluate_numerical_solve", |b| {
        b.iter(|| engine.evaluate(black_box("x^3 = 2"), &bindings).unwrap())
    });

    c.bench_function("evaluate_matrix", |b| {
        b.iter(|| {
            engine
                .evaluate(black_box("[1, 2; 3, 4]^-1 * [5; 6]"), &bindings)
                .unwrap()
        })
    });
}

fn bench_calculate(c: &mut Criterion) {
    let engine = create_test_engine();
    let exact = FormatConfig::default();
    let approximate = FormatConfig {
        mode: Mode::Approximate,
        ..FormatConfig::default()
    };
    let html = FormatConfig {
        markup: Markup::Html,
        ..FormatConfig::default()
    };

    c.bench_function("calculate_exact", |b| {
        b.iter(|| engine.calculate(black_box("sqrt(8) + 1/3"), &exact).unwrap())
    });

    c.bench_function("calculate_approximate", |b| {
        b.iter(|| engine.calculate(black_box("sin(pi/7) * e"), &approximate).unwrap())
    });

    c.bench_function("calculate_html", |b| {
        b.iter(|| engine.calculate(black_box("6.02214e23 kg m/s^2"), &html).unwrap())
    });
}

criterion_group! {
    name = benches;
    config = custom_criterion();
    targets =
        bench_engine_setup,
        bench_parse,
        bench_evaluate,
        bench_calculate
}
criterion_main!(benches);

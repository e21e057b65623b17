use criterion::{black_box, criterion_group, criterion_main, Criterion};

use butcher_formula::{methods, RkFormula};

fn bench_order_rk4(c: &mut Criterion) {
    c.bench_function("order/rk4", |b| {
        b.iter(|| {
            let f = RkFormula::new(methods::rk4());
            black_box(f.order())
        });
    });
}

fn bench_stability_function_radau5(c: &mut Criterion) {
    c.bench_function("stability_function/radau5", |b| {
        b.iter(|| {
            let f = RkFormula::new(methods::radau5());
            black_box(f.stability_function())
        });
    });
}

fn bench_a_stability_radau2a(c: &mut Criterion) {
    c.bench_function("is_a_stable/radau2a", |b| {
        b.iter(|| {
            let f = RkFormula::new(methods::radau2a());
            black_box(f.is_a_stable().unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_order_rk4,
    bench_stability_function_radau5,
    bench_a_stability_radau2a
);
criterion_main!(benches);

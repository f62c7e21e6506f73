use criterion::{black_box, criterion_group, Criterion};

use sphmomentum::sph::smoothing_kernel::*;

fn bench_kernels(c: &mut Criterion) {
    let support_radius = black_box(1.0);
    let r = black_box(0.4);

    {
        let kernel = black_box(CubicSpline::new(support_radius, KernelSpace::Dim3));
        c.bench_function("CubicSpline.evaluate", |b| b.iter(|| kernel.evaluate(r)));
        c.bench_function("CubicSpline.first_derivative", |b| b.iter(|| kernel.first_derivative(r)));
    }
    {
        let kernel = black_box(WendlandQuinticC2::new(support_radius, KernelSpace::Dim3));
        c.bench_function("WendlandQuinticC2.evaluate", |b| b.iter(|| kernel.evaluate(r)));
        c.bench_function("WendlandQuinticC2.first_derivative", |b| b.iter(|| kernel.first_derivative(r)));
    }
}

fn config() -> Criterion {
    Criterion::default()
        .warm_up_time(core::time::Duration::new(0, 100))
        .sample_size(1000)
        .significance_level(0.1)
}

criterion_group!(
    name = smoothing_kernel;
    config = config();
    targets = bench_kernels
);

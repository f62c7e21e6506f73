use criterion::{black_box, criterion_group, Criterion};

use cgmath::prelude::*;
use sphmomentum::sph::momentum_formulation::*;
use sphmomentum::units::*;

fn bench_formulation(c: &mut Criterion, name: &str, formulation_type: MomentumFormulationType) {
    let formulation = create_momentum_formulation(formulation_type);
    let e_ij = black_box(Vector::new(1.0, 1.0, 0.0).normalize());
    let vel_i = black_box(Vector::new(0.1, 0.0, -0.2));
    let vel_j = black_box(Vector::new(0.0, 0.3, 0.1));
    let speccoeff = formulation.specific_coefficient(1010.0, 990.0, 0.125, 0.125, -120.0, -120.0);

    c.bench_function(&format!("{}.specific_coefficient", name), |b| {
        b.iter(|| formulation.specific_coefficient(black_box(1010.0), 990.0, 0.125, 0.125, -120.0, -120.0))
    });
    c.bench_function(&format!("{}.pressure_gradient", name), |b| {
        b.iter(|| {
            let mut acc_i = Vector::zero();
            let mut acc_j = Vector::zero();
            formulation.pressure_gradient(1010.0, 990.0, 150.0, -140.0, speccoeff, e_ij, Some(&mut acc_i), Some(&mut acc_j));
            (acc_i, acc_j)
        })
    });
    c.bench_function(&format!("{}.shear_forces", name), |b| {
        b.iter(|| {
            let mut acc_i = Vector::zero();
            let mut acc_j = Vector::zero();
            let result = formulation.shear_forces(
                1010.0,
                990.0,
                vel_i,
                vel_j,
                5.0,
                1.0e-3,
                1.0e-3,
                0.0,
                0.0,
                0.04,
                speccoeff,
                e_ij,
                Some(&mut acc_i),
                Some(&mut acc_j),
            );
            (result, acc_i, acc_j)
        })
    });
}

fn bench_formulations(c: &mut Criterion) {
    bench_formulation(c, "Monaghan", MomentumFormulationType::Monaghan);
    bench_formulation(c, "Adami", MomentumFormulationType::Adami);
}

criterion_group!(momentum_formulation, bench_formulations);

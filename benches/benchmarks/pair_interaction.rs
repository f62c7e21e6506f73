use criterion::{black_box, criterion_group, Criterion};
use rand::SeedableRng;

use sphmomentum::sph::*;
use sphmomentum::units::*;

fn setup(config: &SimulationConfig) -> (PairInteraction, Particles) {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(config.fluid_block.seed);
    let mut particles = Particles::new();
    particles.add_fluid_block(
        Point::from(config.fluid_block.origin),
        config.fluid_block.num_particles,
        config.particle_spacing,
        config.material.reference_density,
        config.space,
        config.fluid_block.jitter,
        &mut rng,
    );
    let interaction = PairInteraction::from_config(config);
    particles.update_densities(interaction.kernel());
    let material = &config.material;
    particles.update_pressures(&material.equation_of_state, material.reference_density, material.speed_of_sound, false);
    (interaction, particles)
}

fn bench_pair_interaction(c: &mut Criterion) {
    for formulation in [MomentumFormulationType::Monaghan, MomentumFormulationType::Adami] {
        let config = SimulationConfig {
            formulation,
            ..Default::default()
        };
        let (interaction, mut particles) = setup(&config);
        let gravity = black_box(Vector::new(0.0, 0.0, -9.81));

        if formulation == MomentumFormulationType::Adami {
            c.bench_function(&format!("update_densities - {} particles", particles.len()), |b| {
                b.iter(|| particles.update_densities(interaction.kernel()))
            });
        }
        c.bench_function(&format!("evaluate_accelerations - {:?}, {} particles", formulation, particles.len()), |b| {
            b.iter(|| interaction.evaluate_accelerations(&mut particles, gravity))
        });
        c.bench_function(&format!("evaluate_accelerations_pairwise - {:?}, {} particles", formulation, particles.len()), |b| {
            b.iter(|| interaction.evaluate_accelerations_pairwise(&mut particles, gravity))
        });
    }
}

fn config() -> Criterion {
    Criterion::default().sample_size(20)
}

criterion_group!(
    name = pair_interaction;
    config = config();
    targets = bench_pair_interaction
);

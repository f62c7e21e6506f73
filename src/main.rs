use rand::SeedableRng;

use sphmomentum::sph::*;
use sphmomentum::units::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    microprofile::init!();
    microprofile::set_enable_all_groups!(true);

    if let Err(err) = run() {
        log::error!("simulation failed: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading configuration from {}", path);
            SimulationConfig::from_json_file(path)?
        }
        None => {
            log::info!("no configuration given, using defaults");
            SimulationConfig::default()
        }
    };
    config.validate()?;
    log::debug!("{:#?}", config);

    let mut particles = Particles::new();
    let mut rng = rand::rngs::SmallRng::seed_from_u64(config.fluid_block.seed);
    let num_particles = particles.add_fluid_block(
        Point::from(config.fluid_block.origin),
        config.fluid_block.num_particles,
        config.particle_spacing,
        config.material.reference_density,
        config.space,
        config.fluid_block.jitter,
        &mut rng,
    );
    log::info!(
        "{} particles, {:?} formulation, {:?} kernel with support radius {} m",
        num_particles,
        config.formulation,
        config.kernel,
        config.support_radius()
    );

    let mut solver = WCSPHSolver::from_config(&config);
    let start = std::time::Instant::now();
    for step in 1..=config.num_steps {
        solver.simulation_step(&mut particles, config.timestep)?;
        microprofile::flip!();

        if step % config.output_interval == 0 || step == config.num_steps {
            let momentum = particles.total_momentum();
            log::info!(
                "step {:5} | t = {:.4} s | E_kin = {:.6e} J | max |v| = {:.4} m/s | momentum = ({:.3e}, {:.3e}, {:.3e})",
                step,
                step as Real * config.timestep,
                particles.kinetic_energy(),
                particles.max_velocity(),
                momentum.x,
                momentum.y,
                momentum.z,
            );
        }
    }
    log::info!(
        "{} steps in {:.2} s ({:.3} ms per step)",
        config.num_steps,
        start.elapsed().as_secs_f64(),
        start.elapsed().as_secs_f64() * 1000.0 / config.num_steps.max(1) as f64
    );

    Ok(())
}

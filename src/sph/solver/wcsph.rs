use super::super::config::SimulationConfig;
use super::super::equation_of_state::EquationOfState;
use super::super::error::InteractionError;
use super::super::pair_interaction::PairInteraction;
use super::super::particles::Particles;
use microprofile::scope;
use super::Solver;
use crate::units::*;

// Weakly compressible SPH with summation density and kick-drift-kick time integration.
// Transport velocity after "A transport-velocity formulation for smoothed particle hydrodynamics", Adami et al. 2013:
// particles are advected with a modified velocity that includes the background pressure acceleration.
pub struct WCSPHSolver {
    interaction: PairInteraction,
    equation_of_state: EquationOfState,
    reference_density: Real,
    speed_of_sound: Real,
    clamp_negative_pressure: bool,
    gravity: Vector,

    // Accelerations are kept in the particles from the previous step, need an initial evaluation before the first step.
    accelerations_up_to_date: bool,
}

impl WCSPHSolver {
    pub fn new(interaction: PairInteraction, config: &SimulationConfig) -> WCSPHSolver {
        WCSPHSolver {
            interaction,
            equation_of_state: config.material.equation_of_state,
            reference_density: config.material.reference_density,
            speed_of_sound: config.material.speed_of_sound,
            clamp_negative_pressure: config.material.clamp_negative_pressure,
            gravity: config.gravity(),
            accelerations_up_to_date: false,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> WCSPHSolver {
        Self::new(PairInteraction::from_config(config), config)
    }

    /// Forces a full re-evaluation of densities, pressures and accelerations on the next step,
    /// required whenever particles were changed from the outside.
    pub fn clear_cached_data(&mut self) {
        self.accelerations_up_to_date = false;
    }

    fn update_accelerations(&mut self, particles: &mut Particles) -> Result<(), InteractionError> {
        microprofile::scope!("WCSPHSolver", "update_accelerations");

        particles.update_densities(self.interaction.kernel());
        particles.update_pressures(
            &self.equation_of_state,
            self.reference_density,
            self.speed_of_sound,
            self.clamp_negative_pressure,
        );

        let result = self.interaction.evaluate_accelerations(particles, self.gravity);
        self.accelerations_up_to_date = result.is_ok();
        result
    }
}

// Particle state changed by kick, drift and density update, kept to undo a failed step.
struct StepStart {
    positions: Vec<Point>,
    velocities: Vec<Vector>,
    modified_velocities: Vec<Vector>,
    densities: Vec<Real>,
    pressures: Vec<Real>,
}

impl StepStart {
    fn save(particles: &Particles) -> StepStart {
        StepStart {
            positions: particles.positions.clone(),
            velocities: particles.velocities.clone(),
            modified_velocities: particles.modified_velocities.clone(),
            densities: particles.densities.clone(),
            pressures: particles.pressures.clone(),
        }
    }

    fn restore(self, particles: &mut Particles) {
        particles.positions = self.positions;
        particles.velocities = self.velocities;
        particles.modified_velocities = self.modified_velocities;
        particles.densities = self.densities;
        particles.pressures = self.pressures;
    }
}

impl Solver for WCSPHSolver {
    fn simulation_step(&mut self, particles: &mut Particles, dt: Real) -> Result<(), InteractionError> {
        microprofile::scope!("WCSPHSolver", "simulation_step");

        if !self.accelerations_up_to_date {
            self.update_accelerations(particles)?;
        }

        let step_start = StepStart::save(particles);
        let transport_velocity = self.interaction.transport_velocity();
        {
            microprofile::scope!("WCSPHSolver", "kick drift");
            for ((((pos, v), mod_v), a), mod_a) in particles
                .positions
                .iter_mut()
                .zip(particles.velocities.iter_mut())
                .zip(particles.modified_velocities.iter_mut())
                .zip(particles.accelerations.iter())
                .zip(particles.modified_accelerations.iter())
            {
                *v += 0.5 * dt * *a; // v at t_(i+0.5)
                *mod_v = if transport_velocity { *v + 0.5 * dt * *mod_a } else { *v };
                *pos += *mod_v * dt; // pos at t_(i+1)
            }
        }

        if let Err(err) = self.update_accelerations(particles) {
            // Accelerations were left untouched by the failed evaluation and still belong to the restored state.
            step_start.restore(particles);
            self.accelerations_up_to_date = true;
            log::debug!("step aborted, particles reset to the start of the step: {}", err);
            return Err(err);
        }

        {
            microprofile::scope!("WCSPHSolver", "kick");
            for (v, a) in particles.velocities.iter_mut().zip(particles.accelerations.iter()) {
                *v += 0.5 * dt * *a; // v at t_(i+1)
            }
        }

        log::trace!(
            "step done, max velocity {:.4} m/s, kinetic energy {:.6} J",
            particles.max_velocity(),
            particles.kinetic_energy()
        );
        Ok(())
    }
}

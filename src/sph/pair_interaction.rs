use cgmath::prelude::*;
use rayon::prelude::*;
use microprofile::scope;

use super::config::{BackgroundPressure, MaterialConfig, SimulationConfig};
use super::error::InteractionError;
use super::momentum_formulation::{create_momentum_formulation, MomentumFormulation};
use super::particles::Particles;
use super::smoothing_kernel::{create_kernel, Kernel};
use crate::units::*;

/// Geometry of one particle pair as seen by the momentum formulation.
#[derive(Copy, Clone, Debug)]
pub struct PairGeometry {
    pub abs_rij: Real,
    pub e_ij: Vector, // unit vector pointing from j towards i
    pub dwdr_ij: Real,
    pub dwdr_ji: Real,
}

/// Evaluates the momentum equation for all interacting particle pairs.
pub struct PairInteraction {
    formulation: Box<dyn MomentumFormulation>,
    kernel: Box<dyn Kernel>,
    kernelfac: Real,
    material: MaterialConfig,
    background_pressure: BackgroundPressure,
    transport_velocity: bool,
}

impl PairInteraction {
    pub fn new(
        formulation: Box<dyn MomentumFormulation>,
        kernel: Box<dyn Kernel>,
        material: MaterialConfig,
        background_pressure: BackgroundPressure,
        transport_velocity: bool,
    ) -> PairInteraction {
        let kernelfac = (kernel.space().dimension() + 2) as Real;
        PairInteraction {
            formulation,
            kernel,
            kernelfac,
            material,
            background_pressure,
            transport_velocity,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> PairInteraction {
        Self::new(
            create_momentum_formulation(config.formulation),
            create_kernel(config.kernel, config.support_radius(), config.space),
            config.material,
            config.background_pressure,
            config.transport_velocity,
        )
    }

    pub fn kernel(&self) -> &dyn Kernel {
        self.kernel.as_ref()
    }

    pub fn transport_velocity(&self) -> bool {
        self.transport_velocity
    }

    /// Pair geometry from the vector `rj_to_ri = ri - rj` and its squared length.
    #[inline]
    pub fn pair_geometry(&self, rj_to_ri: Vector, r_sq: Real) -> PairGeometry {
        let abs_rij = r_sq.sqrt();
        // Uniform support radius, so the kernel is symmetric.
        let dwdr = self.kernel.first_derivative(abs_rij);
        PairGeometry {
            abs_rij,
            e_ij: rj_to_ri / abs_rij,
            dwdr_ij: dwdr,
            dwdr_ji: dwdr,
        }
    }

    /// Adds all momentum contributions of the pair (i, j) to the requested accumulators.
    #[allow(clippy::too_many_arguments)]
    pub fn interact(
        &self,
        particles: &Particles,
        i: usize,
        j: usize,
        pair: &PairGeometry,
        mut acc_i: Option<&mut Vector>,
        mut acc_j: Option<&mut Vector>,
        mod_acc_i: Option<&mut Vector>,
        mod_acc_j: Option<&mut Vector>,
    ) -> Result<(), InteractionError> {
        let formulation = self.formulation.as_ref();
        let (dens_i, dens_j) = (particles.densities[i], particles.densities[j]);
        let (mass_i, mass_j) = (particles.masses[i], particles.masses[j]);
        let (press_i, press_j) = (particles.pressures[i], particles.pressures[j]);
        let (vel_i, vel_j) = (particles.velocities[i], particles.velocities[j]);
        let visc = self.material.dynamic_viscosity;
        let bulk_visc = self.material.bulk_viscosity;

        let speccoeff = formulation.specific_coefficient(dens_i, dens_j, mass_i, mass_j, pair.dwdr_ij, pair.dwdr_ji);

        formulation.pressure_gradient(
            dens_i,
            dens_j,
            press_i,
            press_j,
            speccoeff,
            pair.e_ij,
            acc_i.as_deref_mut(),
            acc_j.as_deref_mut(),
        );

        formulation.shear_forces(
            dens_i,
            dens_j,
            vel_i,
            vel_j,
            self.kernelfac,
            visc,
            visc,
            bulk_visc,
            bulk_visc,
            pair.abs_rij,
            speccoeff,
            pair.e_ij,
            acc_i.as_deref_mut(),
            acc_j.as_deref_mut(),
        )?;

        if !self.transport_velocity {
            return Ok(());
        }

        match self.background_pressure {
            BackgroundPressure::None => (),
            BackgroundPressure::Standard { pressure } => {
                formulation.standard_background_pressure(dens_i, dens_j, pressure, pressure, speccoeff, pair.e_ij, mod_acc_i, mod_acc_j);
            }
            BackgroundPressure::Generalized { pressure } => {
                let mod_bg_press_i = (10.0 * press_i).abs().min(pressure);
                let mod_bg_press_j = (10.0 * press_j).abs().min(pressure);
                formulation.generalized_background_pressure(
                    dens_i,
                    dens_j,
                    mass_i,
                    mass_j,
                    mod_bg_press_i,
                    mod_bg_press_j,
                    pair.dwdr_ij,
                    pair.dwdr_ji,
                    pair.e_ij,
                    mod_acc_i,
                    mod_acc_j,
                );
            }
        }

        formulation.modified_velocity_contribution(
            dens_i,
            dens_j,
            vel_i,
            vel_j,
            Some(particles.modified_velocities[i]),
            Some(particles.modified_velocities[j]),
            speccoeff,
            pair.e_ij,
            acc_i,
            acc_j,
        );

        Ok(())
    }

    /// Recomputes accelerations and modified accelerations of all particles.
    ///
    /// Every particle gathers the contributions of its neighbors and only writes its own side of each pair,
    /// so particles can be processed in parallel without synchronization.
    /// On failure the accelerations of `particles` are left as they were.
    pub fn evaluate_accelerations(&self, particles: &mut Particles, gravity: Vector) -> Result<(), InteractionError> {
        microprofile::scope!("PairInteraction", "evaluate_accelerations");

        let mut accelerations = vec![Vector::zero(); particles.len()];
        let mut modified_accelerations = vec![Vector::zero(); particles.len()];
        let result = {
            let particles = &*particles;
            let support_radius_sq = self.kernel.support_radius() * self.kernel.support_radius();

            accelerations
                .par_iter_mut()
                .zip(modified_accelerations.par_iter_mut())
                .enumerate()
                .try_for_each(|(i, (acc_i, mod_acc_i))| {
                    *acc_i = gravity;
                    *mod_acc_i = Vector::zero();

                    Particles::try_foreach_neighbor_particle(&particles.positions, support_radius_sq, particles.positions[i], |j, r_sq, rj_to_ri| {
                        let pair = self.pair_geometry(rj_to_ri, r_sq);
                        self.interact(particles, i, j, &pair, Some(&mut *acc_i), None, Some(&mut *mod_acc_i), None)
                    })
                })
        };
        if result.is_ok() {
            particles.accelerations = accelerations;
            particles.modified_accelerations = modified_accelerations;
        }
        result
    }

    /// Same as [`evaluate_accelerations`](Self::evaluate_accelerations) but visits each unordered pair only once,
    /// accumulating into both particles. Serial.
    pub fn evaluate_accelerations_pairwise(&self, particles: &mut Particles, gravity: Vector) -> Result<(), InteractionError> {
        microprofile::scope!("PairInteraction", "evaluate_accelerations_pairwise");

        let mut accelerations = vec![gravity; particles.len()];
        let mut modified_accelerations = vec![Vector::zero(); particles.len()];

        let result = self.accumulate_pairwise(particles, &mut accelerations, &mut modified_accelerations);
        if result.is_ok() {
            particles.accelerations = accelerations;
            particles.modified_accelerations = modified_accelerations;
        }
        result
    }

    fn accumulate_pairwise(&self, particles: &Particles, accelerations: &mut [Vector], modified_accelerations: &mut [Vector]) -> Result<(), InteractionError> {
        let support_radius_sq = self.kernel.support_radius() * self.kernel.support_radius();

        for i in 0..particles.len() {
            let following = &particles.positions[(i + 1)..];
            Particles::try_foreach_neighbor_particle(following, support_radius_sq, particles.positions[i], |offset, r_sq, rj_to_ri| {
                let j = i + 1 + offset;
                let pair = self.pair_geometry(rj_to_ri, r_sq);

                let (head, tail) = accelerations.split_at_mut(j);
                let (mod_head, mod_tail) = modified_accelerations.split_at_mut(j);
                self.interact(
                    particles,
                    i,
                    j,
                    &pair,
                    Some(&mut head[i]),
                    Some(&mut tail[0]),
                    Some(&mut mod_head[i]),
                    Some(&mut mod_tail[0]),
                )
            })?;
        }
        Ok(())
    }
}

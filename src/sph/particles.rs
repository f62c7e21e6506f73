use cgmath::prelude::*;
use rand::Rng;
use rayon::prelude::*;
use microprofile::scope;

use super::equation_of_state::EquationOfState;
use super::smoothing_kernel::{Kernel, KernelSpace};
use crate::units::*;

#[derive(Default)]
pub struct Particles {
    pub positions: Vec<Point>,
    pub velocities: Vec<Vector>,
    pub modified_velocities: Vec<Vector>, // transport velocities, equal to velocities if transport velocity is off
    pub accelerations: Vec<Vector>,
    pub modified_accelerations: Vec<Vector>, // background pressure contributions, only used for the transport velocity
    pub densities: Vec<Real>,                // Local densities ρ
    pub pressures: Vec<Real>,
    pub masses: Vec<Real>,
}

impl Particles {
    const OVERLAP_THRESHOLD: Real = 1.0e-10;

    pub fn new() -> Particles {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn add_particle(&mut self, position: Point, velocity: Vector, mass: Real, density: Real) {
        self.positions.push(position);
        self.velocities.push(velocity);
        self.modified_velocities.push(velocity);
        self.accelerations.push(Zero::zero());
        self.modified_accelerations.push(Zero::zero());
        self.densities.push(density);
        self.pressures.push(0.0);
        self.masses.push(mass);
    }

    /// Adds a block of resting fluid particles on a lattice. Returns the number of added particles.
    ///
    /// - `num_particles`: particles per axis, axes beyond the kernel space dimension are ignored.
    /// - `jitter_amount`: Amount of jitter relative to `spacing`. 0 for perfect lattice.
    pub fn add_fluid_block(
        &mut self,
        min: Point,
        num_particles: [usize; 3],
        spacing: Real,
        density: Real,
        space: KernelSpace,
        jitter_amount: Real,
        rng: &mut impl Rng,
    ) -> usize {
        let dimension = space.dimension();
        let mut num_per_axis = [1_usize; 3];
        for (axis, num) in num_per_axis.iter_mut().enumerate().take(dimension) {
            *num = std::cmp::max(1, num_particles[axis]);
        }
        let num_added = num_per_axis.iter().product::<usize>();
        let mass = density * spacing.powi(dimension as i32);

        self.positions.reserve(num_added);
        let jitter_factor = spacing * jitter_amount;
        for z in 0..num_per_axis[2] {
            for y in 0..num_per_axis[1] {
                for x in 0..num_per_axis[0] {
                    let mut offset = Vector::new(x as Real, y as Real, z as Real) * spacing;
                    for axis in 0..dimension {
                        offset[axis] += (rng.gen::<Real>() - 0.5) * jitter_factor;
                    }
                    self.add_particle(min + offset, Zero::zero(), mass, density);
                }
            }
        }
        num_added
    }

    /// Calls `f(j, r_sq, rj_to_ri)` for all particles j within `support_radius_sq` of `ri`.
    #[inline(always)]
    pub(super) fn try_foreach_neighbor_particle<E>(
        positions: &[Point],
        support_radius_sq: Real,
        ri: Point,
        mut f: impl FnMut(usize, Real, Vector) -> Result<(), E>,
    ) -> Result<(), E> {
        for (j, rj) in positions.iter().enumerate() {
            let rj_to_ri = ri - rj;
            let r_sq = rj_to_ri.magnitude2();
            if r_sq >= support_radius_sq || r_sq < Self::OVERLAP_THRESHOLD {
                // Skips self and and degenerated overlaps
                continue;
            }
            f(j, r_sq, rj_to_ri)?;
        }
        Ok(())
    }

    #[inline(always)]
    fn foreach_neighbor_particle_compact(positions: &[Point], support_radius_sq: Real, ri: Point, mut f: impl FnMut(usize, Real)) {
        for (j, rj) in positions.iter().enumerate() {
            let r_sq = rj.distance2(ri);
            if r_sq >= support_radius_sq || r_sq < Self::OVERLAP_THRESHOLD {
                continue;
            }
            f(j, r_sq);
        }
    }

    /// Summation density.
    pub fn update_densities(&mut self, kernel: &dyn Kernel) {
        microprofile::scope!("Particles", "update_densities");
        assert_eq!(self.positions.len(), self.densities.len());

        // Density contributions are symmetric, but that is hard to use in a parallel loop.
        let positions = &self.positions;
        let masses = &self.masses;
        let support_radius_sq = kernel.support_radius() * kernel.support_radius();

        self.densities
            .par_iter_mut()
            .zip((positions, masses).into_par_iter())
            .for_each(|(density, (ri, mass_i))| {
                *density = kernel.evaluate(0.0) * mass_i; // self-contribution

                Self::foreach_neighbor_particle_compact(
                    positions,
                    support_radius_sq,
                    *ri,
                    #[inline(always)]
                    |j, r_sq| {
                        *density += kernel.evaluate(r_sq.sqrt()) * masses[j];
                    },
                );
            });
    }

    pub fn update_pressures(&mut self, equation_of_state: &EquationOfState, reference_density: Real, speed_of_sound: Real, clamp_negative: bool) {
        self.pressures
            .par_iter_mut()
            .zip(self.densities.par_iter())
            .for_each(|(pressure, &density)| {
                *pressure = equation_of_state.pressure(reference_density, speed_of_sound, density, clamp_negative);
            });
    }

    pub fn total_momentum(&self) -> Vector {
        self.velocities
            .iter()
            .zip(self.masses.iter())
            .fold(Vector::zero(), |momentum, (v, m)| momentum + *m * *v)
    }

    pub fn kinetic_energy(&self) -> Real {
        self.velocities
            .iter()
            .zip(self.masses.iter())
            .map(|(v, m)| 0.5 * m * v.magnitude2())
            .sum()
    }

    pub fn max_velocity(&self) -> Real {
        self.velocities.iter().map(|v| v.magnitude2()).fold(0.0, Real::max).sqrt()
    }
}

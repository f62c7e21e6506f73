use cgmath::prelude::*;

use super::{add_scaled, MomentumFormulation, SpecificCoefficients};
use crate::sph::error::InteractionError;
use crate::units::*;

// "A generalized wall boundary condition for smoothed particle hydrodynamics", Adami et al. 2012
// and "A transport-velocity formulation for smoothed particle hydrodynamics", Adami et al. 2013.
// Particle volumes instead of densities enter the pair coefficient, which behaves better at free surfaces and interfaces.
#[derive(Copy, Clone, Debug, Default)]
pub struct AdamiMomentumFormulation;

impl AdamiMomentumFormulation {
    pub fn new() -> AdamiMomentumFormulation {
        AdamiMomentumFormulation
    }
}

impl MomentumFormulation for AdamiMomentumFormulation {
    #[inline]
    fn specific_coefficient(
        &self,
        dens_i: Real,
        dens_j: Real,
        mass_i: Real,
        mass_j: Real,
        dwdr_ij: Real,
        dwdr_ji: Real,
    ) -> SpecificCoefficients {
        let volume_i = mass_i / dens_i;
        let volume_j = mass_j / dens_j;
        let fac = volume_i * volume_i + volume_j * volume_j;

        SpecificCoefficients {
            ij: fac * (dwdr_ij / mass_i),
            ji: fac * (dwdr_ji / mass_j),
        }
    }

    #[inline]
    fn pressure_gradient(
        &self,
        dens_i: Real,
        dens_j: Real,
        press_i: Real,
        press_j: Real,
        speccoeff: SpecificCoefficients,
        e_ij: Vector,
        acc_i: Option<&mut Vector>,
        acc_j: Option<&mut Vector>,
    ) {
        // density weighted inter-particle pressure
        let fac = (dens_i * press_j + dens_j * press_i) / (dens_i + dens_j);

        add_scaled(acc_i, -speccoeff.ij * fac, e_ij);
        add_scaled(acc_j, speccoeff.ji * fac, e_ij);
    }

    fn shear_forces(
        &self,
        _dens_i: Real,
        _dens_j: Real,
        vel_i: Vector,
        vel_j: Vector,
        _kernelfac: Real,
        visc_i: Real,
        visc_j: Real,
        _bulk_visc_i: Real,
        _bulk_visc_j: Real,
        abs_rij: Real,
        speccoeff: SpecificCoefficients,
        _e_ij: Vector,
        acc_i: Option<&mut Vector>,
        acc_j: Option<&mut Vector>,
    ) -> Result<(), InteractionError> {
        if visc_i <= 0.0 || visc_j <= 0.0 {
            return Ok(());
        }
        let viscosity = 2.0 * visc_i * visc_j / (visc_i + visc_j);

        let vel_ij = vel_i - vel_j;
        let fac = viscosity / abs_rij;

        add_scaled(acc_i, speccoeff.ij * fac, vel_ij);
        add_scaled(acc_j, -speccoeff.ji * fac, vel_ij);

        Ok(())
    }

    #[inline]
    fn standard_background_pressure(
        &self,
        _dens_i: Real,
        _dens_j: Real,
        bg_press_i: Real,
        bg_press_j: Real,
        speccoeff: SpecificCoefficients,
        e_ij: Vector,
        mod_acc_i: Option<&mut Vector>,
        mod_acc_j: Option<&mut Vector>,
    ) {
        add_scaled(mod_acc_i, -speccoeff.ij * bg_press_i, e_ij);
        add_scaled(mod_acc_j, speccoeff.ji * bg_press_j, e_ij);
    }

    #[inline]
    fn generalized_background_pressure(
        &self,
        dens_i: Real,
        dens_j: Real,
        mass_i: Real,
        mass_j: Real,
        mod_bg_press_i: Real,
        mod_bg_press_j: Real,
        mod_dwdr_ij: Real,
        mod_dwdr_ji: Real,
        e_ij: Vector,
        mod_acc_i: Option<&mut Vector>,
        mod_acc_j: Option<&mut Vector>,
    ) {
        if let Some(mod_acc_i) = mod_acc_i {
            *mod_acc_i += -(mod_bg_press_i * mass_i * mod_dwdr_ij) / (dens_i * dens_i) * e_ij;
        }
        if let Some(mod_acc_j) = mod_acc_j {
            *mod_acc_j += (mod_bg_press_j * mass_j * mod_dwdr_ji) / (dens_j * dens_j) * e_ij;
        }
    }

    fn modified_velocity_contribution(
        &self,
        dens_i: Real,
        dens_j: Real,
        vel_i: Vector,
        vel_j: Vector,
        mod_vel_i: Option<Vector>,
        mod_vel_j: Option<Vector>,
        speccoeff: SpecificCoefficients,
        e_ij: Vector,
        acc_i: Option<&mut Vector>,
        acc_j: Option<&mut Vector>,
    ) {
        // A = rho * v (x) (v_mod - v), already contracted with e_ij
        let mut a_ij_e_ij = Vector::zero();
        if let Some(mod_vel_i) = mod_vel_i {
            a_ij_e_ij += (0.5 * dens_i * (mod_vel_i - vel_i).dot(e_ij)) * vel_i;
        }
        if let Some(mod_vel_j) = mod_vel_j {
            a_ij_e_ij += (0.5 * dens_j * (mod_vel_j - vel_j).dot(e_ij)) * vel_j;
        }

        add_scaled(acc_i, speccoeff.ij, a_ij_e_ij);
        add_scaled(acc_j, -speccoeff.ji, a_ij_e_ij);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn specific_coefficient_uses_squared_volumes() {
        let formulation = AdamiMomentumFormulation::new();
        let speccoeff = formulation.specific_coefficient(2.0, 2.0, 1.0, 1.0, 1.0, 1.0);
        // (1/2)² + (1/2)² = 0.5
        assert_relative_eq!(speccoeff.ij, 0.5);
        assert_relative_eq!(speccoeff.ji, 0.5);

        let speccoeff = formulation.specific_coefficient(1.0, 2.0, 2.0, 1.0, -1.0, -2.0);
        // 4 + 0.25
        assert_relative_eq!(speccoeff.ij, -4.25 / 2.0);
        assert_relative_eq!(speccoeff.ji, -8.5);
    }

    #[test]
    fn pressure_gradient_uses_density_weighted_pressure() {
        let formulation = AdamiMomentumFormulation::new();
        let speccoeff = SpecificCoefficients { ij: -1.0, ji: -0.5 };
        let e_ij = Vector::unit_x();
        let mut acc_i = Vector::zero();
        let mut acc_j = Vector::zero();
        formulation.pressure_gradient(1.0, 3.0, 2.0, 6.0, speccoeff, e_ij, Some(&mut acc_i), Some(&mut acc_j));

        // (1 * 6 + 3 * 2) / 4 = 3
        assert_relative_eq!(acc_i, Vector::new(3.0, 0.0, 0.0));
        assert_relative_eq!(acc_j, Vector::new(-1.5, 0.0, 0.0));
    }

    #[test]
    fn shear_forces_use_harmonic_mean_viscosity() {
        let formulation = AdamiMomentumFormulation::new();
        let speccoeff = SpecificCoefficients { ij: -1.0, ji: -1.0 };
        let mut acc_i = Vector::zero();
        let mut acc_j = Vector::zero();
        formulation
            .shear_forces(
                1.0,
                1.0,
                Vector::new(0.0, 1.0, 0.0),
                Vector::new(0.0, -1.0, 0.0),
                5.0,
                1.0,
                3.0,
                100.0, // bulk viscosity plays no role
                100.0,
                0.5,
                speccoeff,
                Vector::unit_x(),
                Some(&mut acc_i),
                Some(&mut acc_j),
            )
            .unwrap();

        // 2*1*3/4 = 1.5, fac = 3, vel_ij = (0, 2, 0)
        assert_relative_eq!(acc_i, Vector::new(0.0, -6.0, 0.0));
        assert_relative_eq!(acc_j, Vector::new(0.0, 6.0, 0.0));
    }

    #[test]
    fn shear_forces_skip_non_positive_viscosity() {
        let formulation = AdamiMomentumFormulation::new();
        let speccoeff = SpecificCoefficients { ij: -1.0, ji: -1.0 };
        for (visc_i, visc_j) in [(0.0, 1.0), (1.0, 0.0), (-1.0, 2.0), (0.0, 0.0)] {
            let start = Vector::new(1.0, 2.0, 3.0);
            let mut acc_i = start;
            let mut acc_j = start;
            let result = formulation.shear_forces(
                1.0,
                1.0,
                Vector::unit_x(),
                Vector::zero(),
                5.0,
                visc_i,
                visc_j,
                0.0,
                0.0,
                0.0, // would divide by zero if anything was computed
                speccoeff,
                Vector::unit_x(),
                Some(&mut acc_i),
                Some(&mut acc_j),
            );
            assert!(result.is_ok());
            assert_eq!(acc_i, start);
            assert_eq!(acc_j, start);
        }
    }

    #[test]
    fn background_pressure_terms() {
        let formulation = AdamiMomentumFormulation::new();
        let speccoeff = SpecificCoefficients { ij: -1.0, ji: -2.0 };
        let e_ij = Vector::unit_z();

        let mut mod_acc_i = Vector::zero();
        let mut mod_acc_j = Vector::zero();
        formulation.standard_background_pressure(1.0, 2.0, 4.0, 8.0, speccoeff, e_ij, Some(&mut mod_acc_i), Some(&mut mod_acc_j));
        assert_relative_eq!(mod_acc_i, Vector::new(0.0, 0.0, 4.0));
        assert_relative_eq!(mod_acc_j, Vector::new(0.0, 0.0, -16.0));

        let mut mod_acc_i = Vector::zero();
        let mut mod_acc_j = Vector::zero();
        formulation.generalized_background_pressure(1.0, 2.0, 3.0, 4.0, 2.0, 2.0, -1.0, -0.5, e_ij, Some(&mut mod_acc_i), Some(&mut mod_acc_j));
        // i: -(2 * 3 * -1) / 1 = 6, j: (2 * 4 * -0.5) / 4 = -1
        assert_relative_eq!(mod_acc_i, Vector::new(0.0, 0.0, 6.0));
        assert_relative_eq!(mod_acc_j, Vector::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn modified_velocity_contribution_from_both_sides() {
        let formulation = AdamiMomentumFormulation::new();
        let speccoeff = SpecificCoefficients { ij: 2.0, ji: 1.0 };
        let e_ij = Vector::unit_y();
        let vel_i = Vector::new(1.0, 0.0, 0.0);
        let vel_j = Vector::new(0.0, 0.0, 1.0);
        let mut acc_i = Vector::zero();
        let mut acc_j = Vector::zero();
        formulation.modified_velocity_contribution(
            2.0,
            4.0,
            vel_i,
            vel_j,
            Some(vel_i + Vector::new(0.0, 1.0, 0.0)),
            Some(vel_j + Vector::new(7.0, -1.0, 0.0)),
            speccoeff,
            e_ij,
            Some(&mut acc_i),
            Some(&mut acc_j),
        );

        // i: 0.5 * 2 * 1 = 1 along vel_i, j: 0.5 * 4 * -1 = -2 along vel_j
        let a_ij_e_ij = Vector::new(1.0, 0.0, -2.0);
        assert_relative_eq!(acc_i, 2.0 * a_ij_e_ij);
        assert_relative_eq!(acc_j, -1.0 * a_ij_e_ij);
    }
}

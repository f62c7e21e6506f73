use cgmath::prelude::*;

use super::{add_scaled, MomentumFormulation, SpecificCoefficients};
use crate::sph::error::InteractionError;
use crate::units::*;

// Classic formulation with pressure over density squared per particle,
// viscous term after "Smoothed dissipative particle dynamics", Español & Revenga 2003.
#[derive(Copy, Clone, Debug, Default)]
pub struct MonaghanMomentumFormulation;

impl MonaghanMomentumFormulation {
    pub fn new() -> MonaghanMomentumFormulation {
        MonaghanMomentumFormulation
    }
}

impl MomentumFormulation for MonaghanMomentumFormulation {
    #[inline]
    fn specific_coefficient(
        &self,
        _dens_i: Real,
        _dens_j: Real,
        mass_i: Real,
        mass_j: Real,
        dwdr_ij: Real,
        dwdr_ji: Real,
    ) -> SpecificCoefficients {
        SpecificCoefficients {
            ij: dwdr_ij * mass_j,
            ji: dwdr_ji * mass_i,
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
        let fac = press_i / (dens_i * dens_i) + press_j / (dens_j * dens_j);

        add_scaled(acc_i, -speccoeff.ij * fac, e_ij);
        add_scaled(acc_j, speccoeff.ji * fac, e_ij);
    }

    fn shear_forces(
        &self,
        dens_i: Real,
        dens_j: Real,
        vel_i: Vector,
        vel_j: Vector,
        kernelfac: Real,
        visc_i: Real,
        visc_j: Real,
        bulk_visc_i: Real,
        bulk_visc_j: Real,
        abs_rij: Real,
        speccoeff: SpecificCoefficients,
        e_ij: Vector,
        acc_i: Option<&mut Vector>,
        acc_j: Option<&mut Vector>,
    ) -> Result<(), InteractionError> {
        let scaled_viscosity = if visc_i > 0.0 && visc_j > 0.0 {
            2.0 * visc_i * visc_j / (3.0 * (visc_i + visc_j))
        } else {
            0.0
        };
        let bulk_viscosity = if bulk_visc_i > 0.0 && bulk_visc_j > 0.0 {
            2.0 * bulk_visc_i * bulk_visc_j / (bulk_visc_i + bulk_visc_j)
        } else {
            0.0
        };

        let convection_coeff = kernelfac * (bulk_viscosity + scaled_viscosity);
        let diffusion_coeff = 5.0 * scaled_viscosity - bulk_viscosity;
        if diffusion_coeff < 0.0 {
            return Err(InteractionError::NegativeDiffusionCoefficient {
                diffusion_coeff,
                scaled_viscosity,
                bulk_viscosity,
            });
        }

        let vel_ij = vel_i - vel_j;
        let inv_densi_densj_absdist = 1.0 / (dens_i * dens_j * abs_rij);

        let fac_diff = diffusion_coeff * inv_densi_densj_absdist;
        let fac_conv = convection_coeff * vel_ij.dot(e_ij) * inv_densi_densj_absdist;

        if let Some(acc_i) = acc_i {
            *acc_i += speccoeff.ij * fac_diff * vel_ij;
            *acc_i += speccoeff.ij * fac_conv * e_ij;
        }
        if let Some(acc_j) = acc_j {
            *acc_j += -speccoeff.ji * fac_diff * vel_ij;
            *acc_j += -speccoeff.ji * fac_conv * e_ij;
        }

        Ok(())
    }

    #[inline]
    fn standard_background_pressure(
        &self,
        dens_i: Real,
        dens_j: Real,
        bg_press_i: Real,
        bg_press_j: Real,
        speccoeff: SpecificCoefficients,
        e_ij: Vector,
        mod_acc_i: Option<&mut Vector>,
        mod_acc_j: Option<&mut Vector>,
    ) {
        let fac = 1.0 / (dens_i * dens_i) + 1.0 / (dens_j * dens_j);

        add_scaled(mod_acc_i, -speccoeff.ij * bg_press_i * fac, e_ij);
        add_scaled(mod_acc_j, speccoeff.ji * bg_press_j * fac, e_ij);
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
            *mod_acc_i += -mod_bg_press_i * (mass_j / (dens_i * dens_i)) * mod_dwdr_ij * e_ij;
        }
        if let Some(mod_acc_j) = mod_acc_j {
            *mod_acc_j += mod_bg_press_j * (mass_i / (dens_j * dens_j)) * mod_dwdr_ji * e_ij;
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
        let mut a_ij_e_ij = Vector::zero();
        if let Some(mod_vel_i) = mod_vel_i {
            a_ij_e_ij += ((mod_vel_i - vel_i).dot(e_ij) / dens_i) * vel_i;
        }
        if let Some(mod_vel_j) = mod_vel_j {
            a_ij_e_ij += ((mod_vel_j - vel_j).dot(e_ij) / dens_j) * vel_j;
        }

        add_scaled(acc_i, speccoeff.ij, a_ij_e_ij);
        add_scaled(acc_j, -speccoeff.ji, a_ij_e_ij);
    }
}

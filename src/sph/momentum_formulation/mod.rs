pub use adami::AdamiMomentumFormulation;
pub use monaghan::MonaghanMomentumFormulation;

mod adami;
mod monaghan;

// ------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::error::InteractionError;
use crate::units::{Real, Vector};

/// Pair specific prefactors, computed once per pair by [`MomentumFormulation::specific_coefficient`].
///
/// All force terms of one pair need to be scaled by the same coefficients, otherwise momentum conservation breaks.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SpecificCoefficients {
    pub ij: Real, // felt by particle i due to j
    pub ji: Real, // felt by particle j due to i
}

/// Pairwise SPH momentum equation.
///
/// Every operation takes the state of an ordered particle pair (i, j) and *adds* its contribution to the given accumulators.
/// An accumulator passed as `None` is not requested (e.g. the particle is owned by someone else):
/// nothing is computed or written for that side, the other side is unaffected.
///
/// `e_ij` is the unit vector between both particles. The formulations don't care about its orientation,
/// callers pass the direction in which a positive pressure pushes particle i (see `pair_interaction`).
#[allow(clippy::too_many_arguments)]
pub trait MomentumFormulation: Send + Sync {
    /// Two phase initialization. Call `init` and then `setup` before first use.
    fn init(&mut self) {}
    fn setup(&mut self) {}

    /// `dwdr_ij`: kernel derivative felt at i due to j, `dwdr_ji` vice versa.
    fn specific_coefficient(
        &self,
        dens_i: Real,
        dens_j: Real,
        mass_i: Real,
        mass_j: Real,
        dwdr_ij: Real,
        dwdr_ji: Real,
    ) -> SpecificCoefficients;

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
    );

    /// Viscous forces from the relative velocity `vel_i - vel_j`.
    ///
    /// `kernelfac` weights the convective part (only used by formulations that have one), usually `space dimension + 2`.
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
    ) -> Result<(), InteractionError>;

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
    );

    /// Background pressure with per particle modified pressure and kernel derivatives, independent of the specific coefficients.
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
    );

    /// Transport velocity correction.
    ///
    /// Only sides with a modified velocity contribute. Each contributes the projection of (modified - true velocity) onto `e_ij`,
    /// times its own true velocity.
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
    );
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MomentumFormulationType {
    Monaghan,
    Adami,
}

impl Default for MomentumFormulationType {
    fn default() -> Self {
        MomentumFormulationType::Adami
    }
}

/// Creates an initialized and set up momentum formulation.
pub fn create_momentum_formulation(formulation_type: MomentumFormulationType) -> Box<dyn MomentumFormulation> {
    let mut formulation: Box<dyn MomentumFormulation> = match formulation_type {
        MomentumFormulationType::Monaghan => Box::new(MonaghanMomentumFormulation::new()),
        MomentumFormulationType::Adami => Box::new(AdamiMomentumFormulation::new()),
    };
    formulation.init();
    formulation.setup();
    log::debug!("created {:?} momentum formulation", formulation_type);
    formulation
}

#[inline(always)]
fn add_scaled(acc: Option<&mut Vector>, factor: Real, direction: Vector) {
    if let Some(acc) = acc {
        *acc += factor * direction;
    }
}

use serde::{Deserialize, Serialize};

use crate::units::Real;

/// Equation of State (EOS), relates local density to pressure for a weakly compressible fluid.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EquationOfState {
    // Tait equation as in Becker & Teschner 2007 WCSPH07, usually with exponent 7.
    Tait { exponent: i32 },
    // p = c² (ρ - ρ0)
    Linear,
}

impl Default for EquationOfState {
    fn default() -> Self {
        EquationOfState::Tait { exponent: 7 }
    }
}

impl EquationOfState {
    /// `clamp_negative`: clamps pressure to zero to work around particle deficiency at free surfaces. Good explanation here:
    /// https://github.com/InteractiveComputerGraphics/SPlisHSPlasH/issues/36#issuecomment-495883932
    pub fn pressure(&self, reference_density: Real, speed_of_sound: Real, local_density: Real, clamp_negative: bool) -> Real {
        let pressure = match *self {
            EquationOfState::Tait { exponent } => {
                // stiffness B = density0 * speed_of_sound² / γ
                let stiffness = reference_density * speed_of_sound * speed_of_sound / exponent as Real;
                stiffness * ((local_density / reference_density).powi(exponent) - 1.0)
            }
            EquationOfState::Linear => speed_of_sound * speed_of_sound * (local_density - reference_density),
        };

        if clamp_negative {
            pressure.max(0.0)
        } else {
            pressure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use more_asserts::*;

    #[test]
    fn rest_density_has_zero_pressure() {
        for eos in [EquationOfState::default(), EquationOfState::Tait { exponent: 1 }, EquationOfState::Linear] {
            assert_relative_eq!(eos.pressure(1000.0, 10.0, 1000.0, false), 0.0);
        }
    }

    #[test]
    fn tait_with_exponent_one_is_linear() {
        let tait = EquationOfState::Tait { exponent: 1 };
        let linear = EquationOfState::Linear;
        assert_relative_eq!(tait.pressure(1.0, 3.0, 1.2, false), linear.pressure(1.0, 3.0, 1.2, false), epsilon = 1.0e-12);
    }

    #[test]
    fn negative_pressure_clamping() {
        let eos = EquationOfState::default();
        assert_lt!(eos.pressure(1000.0, 10.0, 990.0, false), 0.0);
        assert_eq!(eos.pressure(1000.0, 10.0, 990.0, true), 0.0);
        assert_gt!(eos.pressure(1000.0, 10.0, 1010.0, true), 0.0);
    }
}

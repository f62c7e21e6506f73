use std::path::Path;

use serde::{Deserialize, Serialize};

use super::equation_of_state::EquationOfState;
use super::error::{Result, SimulationError};
use super::momentum_formulation::MomentumFormulationType;
use super::smoothing_kernel::{KernelSpace, KernelType};
use crate::units::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub reference_density: Real, // kg/m³ for the resting fluid (ρ0)
    pub speed_of_sound: Real,    // artificial speed of sound, usually 10x the expected max flow speed
    pub dynamic_viscosity: Real, // in Pa*s (η)
    pub bulk_viscosity: Real,    // in Pa*s (ζ)
    pub equation_of_state: EquationOfState,
    pub clamp_negative_pressure: bool,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        MaterialConfig {
            reference_density: 1000.0,
            speed_of_sound: 10.0,
            dynamic_viscosity: 1.0016 / 1000.0, // viscosity of water at 20 degrees in Pa*s
            bulk_viscosity: 0.0,
            equation_of_state: EquationOfState::default(),
            clamp_negative_pressure: false,
        }
    }
}

/// Artificial pressure against particle clumping. Only acts through the transport velocity.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BackgroundPressure {
    None,
    Standard { pressure: Real },
    // Scales the background pressure per particle with its physical pressure.
    Generalized { pressure: Real },
}

impl Default for BackgroundPressure {
    fn default() -> Self {
        BackgroundPressure::None
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidBlockConfig {
    pub origin: [Real; 3],
    pub num_particles: [usize; 3],
    pub jitter: Real, // relative to particle spacing
    pub seed: u64,
}

impl Default for FluidBlockConfig {
    fn default() -> Self {
        FluidBlockConfig {
            origin: [0.0; 3],
            num_particles: [10, 10, 10],
            jitter: 0.2,
            seed: 123456789,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub formulation: MomentumFormulationType,
    pub kernel: KernelType,
    pub space: KernelSpace,

    pub particle_spacing: Real,
    pub support_radius_factor: Real, // support radius = factor * particle spacing
    pub fluid_block: FluidBlockConfig,
    pub material: MaterialConfig,

    pub background_pressure: BackgroundPressure,
    pub transport_velocity: bool,
    pub gravity: [Real; 3], // m/s² (== N/kg)

    pub timestep: Real,
    pub num_steps: usize,
    pub output_interval: usize, // log progress every n steps
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            formulation: MomentumFormulationType::default(),
            kernel: KernelType::default(),
            space: KernelSpace::default(),

            particle_spacing: 0.05,
            support_radius_factor: 3.0,
            fluid_block: FluidBlockConfig::default(),
            material: MaterialConfig::default(),

            background_pressure: BackgroundPressure::Standard { pressure: 100.0 },
            transport_velocity: true,
            gravity: [0.0; 3],

            timestep: 1.0e-3,
            num_steps: 200,
            output_interval: 20,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<SimulationConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<SimulationConfig> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn support_radius(&self) -> Real {
        self.support_radius_factor * self.particle_spacing
    }

    pub fn gravity(&self) -> Vector {
        Vector::from(self.gravity)
    }

    /// Largest stable timestep from the acoustic (CFL) and the viscous condition, as in Adami et al. 2013.
    pub fn stable_timestep(&self) -> Real {
        let h = self.support_radius();
        let time_acoustic = 0.25 * h / self.material.speed_of_sound;
        let kinematic_viscosity = self.material.dynamic_viscosity / self.material.reference_density;
        if kinematic_viscosity > 0.0 {
            time_acoustic.min(0.125 * h * h / kinematic_viscosity)
        } else {
            time_acoustic
        }
    }

    pub fn validate(&self) -> Result<()> {
        fn require_positive(name: &str, value: Real) -> Result<()> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(SimulationError::InvalidParameter(format!("{} must be positive, got {}", name, value)))
            }
        }

        require_positive("particle_spacing", self.particle_spacing)?;
        require_positive("support_radius_factor", self.support_radius_factor)?;
        require_positive("material.reference_density", self.material.reference_density)?;
        require_positive("material.speed_of_sound", self.material.speed_of_sound)?;
        require_positive("timestep", self.timestep)?;
        if self.output_interval == 0 {
            return Err(SimulationError::InvalidParameter("output_interval must be at least 1".to_owned()));
        }
        if let EquationOfState::Tait { exponent } = self.material.equation_of_state {
            if exponent < 1 {
                return Err(SimulationError::InvalidParameter(format!("Tait exponent must be at least 1, got {}", exponent)));
            }
        }
        match self.background_pressure {
            BackgroundPressure::Standard { pressure } | BackgroundPressure::Generalized { pressure } if pressure < 0.0 => {
                return Err(SimulationError::InvalidParameter(format!("background pressure must not be negative, got {}", pressure)));
            }
            _ => (),
        }

        let stable_timestep = self.stable_timestep();
        if self.timestep > stable_timestep {
            log::warn!(
                "timestep {} exceeds the stability estimate of {}, expect the simulation to blow up",
                self.timestep,
                stable_timestep
            );
        }
        if self.background_pressure != BackgroundPressure::None && !self.transport_velocity {
            log::warn!("background pressure has no effect without transport velocity");
        }
        Ok(())
    }
}

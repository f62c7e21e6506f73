use thiserror::Error;

use crate::units::Real;

/// Failures raised while evaluating a single particle pair.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InteractionError {
    // 5 * scaled_viscosity - bulk_viscosity must stay non-negative, otherwise the viscous term generates energy.
    #[error(
        "diffusion coefficient is negative ({diffusion_coeff}): scaled viscosity {scaled_viscosity} is too small for bulk viscosity {bulk_viscosity}"
    )]
    NegativeDiffusionCoefficient {
        diffusion_coeff: Real,
        scaled_viscosity: Real,
        bulk_viscosity: Real,
    },
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("particle interaction failed: {0}")]
    Interaction(#[from] InteractionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

pub use wcsph::WCSPHSolver;

mod wcsph;

// ------------------------------------------------------

use super::error::InteractionError;
use super::particles::Particles;
use crate::units::Real;

pub trait Solver {
    // performs a single simulation step.
    fn simulation_step(&mut self, particles: &mut Particles, dt: Real) -> Result<(), InteractionError>;
}

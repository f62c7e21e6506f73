pub use self::config::*;
pub use self::equation_of_state::EquationOfState;
pub use self::error::*;
pub use self::momentum_formulation::*;
pub use self::pair_interaction::*;
pub use self::particles::Particles;
pub use self::smoothing_kernel::*;
pub use self::solver::*;

mod config;
mod equation_of_state;
mod error;
pub mod momentum_formulation;
mod pair_interaction;
mod particles;
pub mod smoothing_kernel;
mod solver;

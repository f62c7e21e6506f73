/// Smoothing Kernels.
pub use self::cubic::CubicSpline;
pub use self::kernel::{Kernel, KernelSpace};
pub use self::wendland_quintic_c2::WendlandQuinticC2;

// Shared sanity checks for every kernel type. Expects `$kernel::new(support_radius, space)`.
macro_rules! generate_kernel_tests {
    ($kernel:ident) => {
    };
}

mod cubic;
mod kernel;
mod wendland_quintic_c2;

// ------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::units::Real;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KernelType {
    CubicSpline,
    WendlandQuinticC2,
}

impl Default for KernelType {
    fn default() -> Self {
        KernelType::CubicSpline
    }
}

pub fn create_kernel(kernel_type: KernelType, support_radius: Real, space: KernelSpace) -> Box<dyn Kernel> {
    match kernel_type {
        KernelType::CubicSpline => Box::new(CubicSpline::new(support_radius, space)),
        KernelType::WendlandQuinticC2 => Box::new(WendlandQuinticC2::new(support_radius, space)),
    }
}

use serde::{Deserialize, Serialize};

use crate::units::Real;

/// Number of spatial dimensions a kernel is normalized for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KernelSpace {
    Dim1,
    Dim2,
    Dim3,
}

impl KernelSpace {
    pub fn dimension(self) -> usize {
        match self {
            KernelSpace::Dim1 => 1,
            KernelSpace::Dim2 => 2,
            KernelSpace::Dim3 => 3,
        }
    }
}

impl Default for KernelSpace {
    fn default() -> Self {
        KernelSpace::Dim3
    }
}

/// SPH smoothing kernel
///
/// Only radially symmetric kernels are supported.
/// Kernels have compact support: for r >= support_radius both value and derivative are zero.
pub trait Kernel: Send + Sync {
    /// Radius beyond which the kernel vanishes, often denoted as h.
    fn support_radius(&self) -> Real;

    fn space(&self) -> KernelSpace;

    /// Evaluates the kernel function for a distance `r` between two particles.
    fn evaluate(&self, r: Real) -> Real;

    /// Evaluates dW/dr, the derivative of the kernel with respect to the distance `r`.
    ///
    /// Non-positive within the support for all kernels here.
    fn first_derivative(&self, r: Real) -> Real;
}

use super::kernel::{Kernel, KernelSpace};
use crate::units::Real;

// https://github.com/InteractiveComputerGraphics/SPlisHSPlasH/blob/d5172c9/SPlisHSPlasH/SPHKernels.h#L545
// W(q) = (1 - q)^4 (4q + 1). Strictly only positive definite for 2D and 3D, the 1D variant is normalized all the same.
#[derive(Copy, Clone, Debug)]
pub struct WendlandQuinticC2 {
    support_radius: Real,
    h_inv: Real,
    normalizer: Real,
    space: KernelSpace,
}

impl WendlandQuinticC2 {
    pub fn new(support_radius: Real, space: KernelSpace) -> Self {
        let h = support_radius;
        let normalizer = match space {
            KernelSpace::Dim1 => 3.0 / (2.0 * h),
            KernelSpace::Dim2 => 7.0 / (std::f64::consts::PI * h.powi(2)),
            KernelSpace::Dim3 => 21.0 / (2.0 * std::f64::consts::PI * h.powi(3)),
        };
        WendlandQuinticC2 {
            support_radius,
            h_inv: 1.0 / h,
            normalizer,
            space,
        }
    }
}

impl Kernel for WendlandQuinticC2 {
    fn support_radius(&self) -> Real {
        self.support_radius
    }

    fn space(&self) -> KernelSpace {
        self.space
    }

    #[inline]
    fn evaluate(&self, r: Real) -> Real {
        let q = (self.h_inv * r).min(1.0);
        let one_minus_q = 1.0 - q;
        let one_minus_q_sq = one_minus_q * one_minus_q;
        self.normalizer * one_minus_q_sq * one_minus_q_sq * (4.0 * q + 1.0)
    }

    #[inline]
    fn first_derivative(&self, r: Real) -> Real {
        let q = (self.h_inv * r).min(1.0);
        -20.0 * self.normalizer * self.h_inv * q * (1.0 - q).powi(3)
    }
}

generate_kernel_tests!(WendlandQuinticC2);

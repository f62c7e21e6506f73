use super::kernel::{Kernel, KernelSpace};
use crate::units::Real;

/// Cubic Spline smoothing kernel.
///
/// Classic cubic spline cernel from "J. Monaghan, Smoothed Particle Hydrodynamics, “Annual Review of Astronomy and Astrophysics”, 30 (1992), pp. 543-574."
/// Normalization factors from https://pysph.readthedocs.io/en/latest/reference/kernels.html#monaghan1992 via https://github.com/rustsim/salva/blob/master/src/kernel/cubic_spline_kernel.rs
/// (rescaled to q = r / support radius)
#[derive(Copy, Clone, Debug)]
pub struct CubicSpline {
    support_radius: Real,
    h_inv: Real,
    normalizer: Real,
    space: KernelSpace,
}

impl CubicSpline {
    pub fn new(support_radius: Real, space: KernelSpace) -> CubicSpline {
        let h = support_radius;
        let normalizer = match space {
            KernelSpace::Dim1 => 4.0 / (3.0 * h),
            KernelSpace::Dim2 => 40.0 / (7.0 * std::f64::consts::PI * h * h),
            KernelSpace::Dim3 => 8.0 / (std::f64::consts::PI * h * h * h),
        };
        CubicSpline {
            support_radius,
            h_inv: 1.0 / h,
            normalizer,
            space,
        }
    }
}

impl Kernel for CubicSpline {
    fn support_radius(&self) -> Real {
        self.support_radius
    }

    fn space(&self) -> KernelSpace {
        self.space
    }

    #[inline]
    fn evaluate(&self, r: Real) -> Real {
        let q = r * self.h_inv;
        if q <= 0.5 {
            self.normalizer * (1.0 + (q * q * q - q * q) * 6.0)
        } else if q < 1.0 {
            self.normalizer * (1.0 - q).powi(3) * 2.0
        } else {
            0.0
        }
    }

    #[inline]
    fn first_derivative(&self, r: Real) -> Real {
        let q = r * self.h_inv;
        if q <= 0.5 {
            self.normalizer * (q * q * 3.0 - q * 2.0) * 6.0 * self.h_inv
        } else if q < 1.0 {
            -self.normalizer * (1.0 - q).powi(2) * 6.0 * self.h_inv
        } else {
            0.0
        }
    }
}

generate_kernel_tests!(CubicSpline);

// Element-wise helpers for DVec3
//
// glam already covers add/sub/mul/div (vector and scalar), normalize, dot and
// cross. These fill in the scalar broadcasts and element-wise powers the path
// tracer needs on colors.

use glam::DVec3;

/// Extension trait for DVec3 with scalar broadcasts and element-wise math.
pub trait Vec3Ext {
    /// Add `k` to every component.
    fn add_scalar(self, k: f64) -> DVec3;

    /// Subtract `k` from every component.
    fn sub_scalar(self, k: f64) -> DVec3;

    /// Raise every component to the power `k`.
    fn pow_scalar(self, k: f64) -> DVec3;

    /// Square root of every component.
    fn sqrt_elementwise(self) -> DVec3;

    /// True if any component is strictly positive.
    fn any_positive(self) -> bool;
}

impl Vec3Ext for DVec3 {
    #[inline]
    fn add_scalar(self, k: f64) -> DVec3 {
        self + DVec3::splat(k)
    }

    #[inline]
    fn sub_scalar(self, k: f64) -> DVec3 {
        self - DVec3::splat(k)
    }

    #[inline]
    fn pow_scalar(self, k: f64) -> DVec3 {
        DVec3::new(self.x.powf(k), self.y.powf(k), self.z.powf(k))
    }

    #[inline]
    fn sqrt_elementwise(self) -> DVec3 {
        DVec3::new(self.x.sqrt(), self.y.sqrt(), self.z.sqrt())
    }

    #[inline]
    fn any_positive(self) -> bool {
        self.cmpgt(DVec3::ZERO).any()
    }
}

/// Returns true if `a` and `b` differ by less than `epsilon`.
#[inline]
pub fn is_close(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

//! Reflectance model shared by every primitive.
//!
//! A material is an RGB reflectance plus a single lobe exponent `alpha`:
//! `alpha == 1` is Lambertian, `alpha > 1` is a Phong lobe around the mirror
//! direction. Emission lives on the primitive, not here.

use std::f64::consts::PI;

use glint_math::DVec3;

use crate::error::{finite_f64, out_of_range, ValidationResult};

/// Color type alias (RGB, unclamped radiance or [0, 1] reflectance)
pub type Color = DVec3;

/// Lobe exponent that marks a diffuse surface.
const DIFFUSE_ALPHA: f64 = 1.0;

/// Validated BRDF parameters `(r, g, b, alpha)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    color: Color,
    alpha: f64,
}

impl Material {
    /// Create a material from a reflectance color and lobe exponent.
    ///
    /// Each channel must lie in `[0, 1]` and `alpha >= 1`.
    pub fn new(color: Color, alpha: f64) -> ValidationResult<Self> {
        for channel in color.to_array() {
            let channel = finite_f64("brdf", channel)?;
            if !(0.0..=1.0).contains(&channel) {
                return Err(out_of_range("brdf", channel, "each color channel in [0, 1]"));
            }
        }
        let alpha = finite_f64("brdf.alpha", alpha)?;
        if alpha < DIFFUSE_ALPHA {
            return Err(out_of_range("brdf.alpha", alpha, "alpha >= 1"));
        }
        Ok(Self { color, alpha })
    }

    /// Lambertian material.
    pub fn diffuse(color: Color) -> ValidationResult<Self> {
        Self::new(color, DIFFUSE_ALPHA)
    }

    /// Phong-lobe material with shininess `alpha`.
    pub fn glossy(color: Color, alpha: f64) -> ValidationResult<Self> {
        Self::new(color, alpha)
    }

    /// Black diffuse material, the usual choice for pure emitters.
    pub fn black() -> Self {
        Self {
            color: Color::ZERO,
            alpha: DIFFUSE_ALPHA,
        }
    }

    /// Build from the packed `[r, g, b, alpha]` layout without validation.
    #[inline]
    pub(crate) fn from_packed(packed: [f64; 4]) -> Self {
        Self {
            color: Color::new(packed[0], packed[1], packed[2]),
            alpha: packed[3],
        }
    }

    /// Packed `[r, g, b, alpha]` layout.
    pub fn to_array(&self) -> [f64; 4] {
        [self.color.x, self.color.y, self.color.z, self.alpha]
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[inline]
    pub fn is_diffuse(&self) -> bool {
        self.alpha == DIFFUSE_ALPHA
    }

    /// Axis the sampling lobe is centered on: the normal for diffuse
    /// surfaces, the mirror direction otherwise.
    #[inline]
    pub fn lobe_axis(&self, normal: DVec3, reflected: DVec3) -> DVec3 {
        if self.is_diffuse() {
            normal
        } else {
            reflected
        }
    }

    /// Phong lobe factor `(alpha+1)/(2π) · max(cos, 0)^alpha`.
    #[inline]
    fn lobe(&self, reflected: DVec3, wi: DVec3) -> f64 {
        (self.alpha + 1.0) / (2.0 * PI) * reflected.dot(wi).max(0.0).powf(self.alpha)
    }

    /// Evaluate the BRDF for outgoing direction `wi`.
    ///
    /// `reflected` is the mirror of the view direction about `normal`.
    pub fn evaluate(&self, reflected: DVec3, wi: DVec3) -> Color {
        if self.is_diffuse() {
            self.color / PI
        } else {
            self.color * self.lobe(reflected, wi)
        }
    }

    /// Density of sampling `wi` with the cosine-power lobe around
    /// `lobe_axis`.
    pub fn pdf(&self, normal: DVec3, reflected: DVec3, wi: DVec3) -> f64 {
        if self.is_diffuse() {
            normal.dot(wi).max(0.0) / PI
        } else {
            self.lobe(reflected, wi)
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::splat(0.7),
            alpha: DIFFUSE_ALPHA,
        }
    }
}

//! Random number helpers and lobe sampling.

use std::f64::consts::PI;

use glint_math::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Resampling attempts before falling back to a fixed tangent axis.
const MAX_AUX_ATTEMPTS: usize = 4;

/// Minimum squared sine between the lobe axis and the auxiliary vector.
const MIN_AUX_SIN2: f64 = 1e-6;

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Independent random stream for pixel `(x, y)` of a frame.
///
/// The stream depends only on the frame seed and the pixel, never on which
/// thread renders it.
pub fn pixel_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let pixel = ((y as u64) << 32) | x as u64;
    StdRng::seed_from_u64(splitmix64(seed ^ splitmix64(pixel)))
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Sample a direction from the cosine-power lobe around local +z.
///
/// `alpha == 1` gives cosine-weighted hemisphere sampling; larger values
/// tighten the lobe.
#[inline]
pub fn sample_cosine_power(xi1: f64, xi2: f64, alpha: f64) -> DVec3 {
    let z = xi1.powf(1.0 / (alpha + 1.0));
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * xi2;
    DVec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Orthonormal frame around a unit axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub x: DVec3,
    pub y: DVec3,
    pub z: DVec3,
}

impl LocalFrame {
    /// Build a frame around unit `z` with a random tangent.
    ///
    /// Auxiliary vectors nearly parallel to `z` are redrawn; after a few
    /// failures the world axis least aligned with `z` is used instead.
    pub fn around(z: DVec3, rng: &mut dyn RngCore) -> Self {
        for _ in 0..MAX_AUX_ATTEMPTS {
            let aux = DVec3::new(gen_f64(rng), gen_f64(rng), gen_f64(rng));
            let tangent = z.cross(aux);
            if tangent.length_squared() > MIN_AUX_SIN2 * aux.length_squared() {
                return Self::from_tangent(z, tangent);
            }
        }

        Self::from_tangent(z, z.cross(least_aligned_axis(z)))
    }

    fn from_tangent(z: DVec3, tangent: DVec3) -> Self {
        let x = tangent.normalize();
        let y = z.cross(x).normalize();
        Self { x, y, z }
    }

    /// Map a local direction to world space.
    #[inline]
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        (local.x * self.x + local.y * self.y + local.z * self.z).normalize()
    }
}

fn least_aligned_axis(v: DVec3) -> DVec3 {
    let a = v.abs();
    if a.x <= a.y && a.x <= a.z {
        DVec3::X
    } else if a.y <= a.z {
        DVec3::Y
    } else {
        DVec3::Z
    }
}

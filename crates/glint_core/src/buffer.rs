//! Packed primitive buffer consumed by the integrator.
//!
//! Layout: every sphere record, then every plane record, as a flat `f64`
//! slice. Records are `#[repr(C)]` and `Pod`, so the field order below is the
//! serialization contract:
//!
//! - sphere (11 values): position[3], brdf[4], Le[3], radius[1]
//! - plane (13 values): position[3], brdf[4], Le[3], normal[3]

use std::mem::size_of;

use bytemuck::{Pod, Zeroable};
use glint_math::DVec3;

use crate::error::{ValidationError, ValidationResult};
use crate::material::{Color, Material};

/// Number of `f64` values per packed sphere.
pub const SPHERE_STRIDE: usize = size_of::<SphereRecord>() / size_of::<f64>();

/// Number of `f64` values per packed plane.
pub const PLANE_STRIDE: usize = size_of::<PlaneRecord>() / size_of::<f64>();

const _: () = assert!(SPHERE_STRIDE == 11);
const _: () = assert!(PLANE_STRIDE == 13);

/// Packed sphere.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SphereRecord {
    pub position: [f64; 3],
    pub brdf: [f64; 4],
    pub emission: [f64; 3],
    pub radius: f64,
}

/// Packed plane.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PlaneRecord {
    pub position: [f64; 3],
    pub brdf: [f64; 4],
    pub emission: [f64; 3],
    pub normal: [f64; 3],
}

impl SphereRecord {
    #[inline]
    pub fn center(&self) -> DVec3 {
        DVec3::from_array(self.position)
    }

    #[inline]
    pub fn material(&self) -> Material {
        Material::from_packed(self.brdf)
    }

    #[inline]
    pub fn emission(&self) -> Color {
        Color::from_array(self.emission)
    }
}

impl PlaneRecord {
    #[inline]
    pub fn point(&self) -> DVec3 {
        DVec3::from_array(self.position)
    }

    #[inline]
    pub fn normal(&self) -> DVec3 {
        DVec3::from_array(self.normal)
    }

    #[inline]
    pub fn material(&self) -> Material {
        Material::from_packed(self.brdf)
    }

    #[inline]
    pub fn emission(&self) -> Color {
        Color::from_array(self.emission)
    }
}

/// Flat `f64` buffer of packed primitives with per-type counts.
///
/// The length is checked once at construction, so the typed views below
/// never fail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveBuffer {
    data: Vec<f64>,
    sphere_count: usize,
    plane_count: usize,
}

impl PrimitiveBuffer {
    /// Wrap an externally produced buffer, checking its length against the
    /// counts.
    pub fn from_raw(data: Vec<f64>, sphere_count: usize, plane_count: usize) -> ValidationResult<Self> {
        let expected = sphere_count * SPHERE_STRIDE + plane_count * PLANE_STRIDE;
        if data.len() != expected {
            return Err(ValidationError::BufferLayout {
                len: data.len(),
                expected,
                spheres: sphere_count,
                planes: plane_count,
            });
        }

        Ok(Self {
            data,
            sphere_count,
            plane_count,
        })
    }

    /// Pack typed records, spheres first.
    pub fn from_records(spheres: &[SphereRecord], planes: &[PlaneRecord]) -> Self {
        let mut data = Vec::with_capacity(spheres.len() * SPHERE_STRIDE + planes.len() * PLANE_STRIDE);
        data.extend_from_slice(bytemuck::cast_slice(spheres));
        data.extend_from_slice(bytemuck::cast_slice(planes));

        Self {
            data,
            sphere_count: spheres.len(),
            plane_count: planes.len(),
        }
    }

    pub fn sphere_count(&self) -> usize {
        self.sphere_count
    }

    pub fn plane_count(&self) -> usize {
        self.plane_count
    }

    /// Total number of primitives.
    pub fn len(&self) -> usize {
        self.sphere_count + self.plane_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Raw bytes, for handing the buffer to a device.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    fn sphere_span(&self) -> usize {
        self.sphere_count * SPHERE_STRIDE
    }

    /// Typed view of the sphere section.
    #[inline]
    pub fn spheres(&self) -> &[SphereRecord] {
        bytemuck::cast_slice(&self.data[..self.sphere_span()])
    }

    /// Typed view of the plane section.
    #[inline]
    pub fn planes(&self) -> &[PlaneRecord] {
        bytemuck::cast_slice(&self.data[self.sphere_span()..])
    }
}

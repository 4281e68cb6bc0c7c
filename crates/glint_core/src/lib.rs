//! Glint Core - Scene representation for the Glint path tracer.
//!
//! This crate provides:
//!
//! - **Primitives**: `Sphere`, `Plane` and the closed `Geometry` enum
//! - **Materials**: diffuse/glossy `Material` with emission handled per primitive
//! - **Camera**: field-of-view camera producing a `ViewBasis`
//! - **Scene**: primitive list plus the packed `PrimitiveBuffer` the integrator reads
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{Camera, Geometry, Material, Scene, Sphere};
//! use glint_math::DVec3;
//!
//! let light = Sphere::new(DVec3::new(0.0, 0.0, 10.0), 2.0, Material::black(), DVec3::splat(10.0))?;
//! let scene = Scene::new(Camera::default(), vec![Geometry::from(light)])?;
//! println!("{} spheres, {} planes", scene.sphere_count(), scene.plane_count());
//! ```

pub mod buffer;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod material;
pub mod presets;
pub mod scene;

// Re-export commonly used types
pub use buffer::{PlaneRecord, PrimitiveBuffer, SphereRecord, PLANE_STRIDE, SPHERE_STRIDE};
pub use camera::{Camera, ViewBasis};
pub use error::{ValidationError, ValidationResult};
pub use geometry::{intersect_plane, intersect_sphere, Geometry, Plane, Sphere, NO_HIT};
pub use material::{Color, Material};
pub use scene::Scene;

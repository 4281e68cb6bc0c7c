//! Analytic primitives and their ray intersection routines.
//!
//! The free functions `intersect_sphere` and `intersect_plane` work on raw
//! vectors and return [`NO_HIT`] on a miss, so the integrator can call them
//! straight off the packed buffer. `Geometry::intersect` wraps them for
//! object-level callers.

use glint_math::{Ray, DVec3, EPSILON};

use crate::buffer::{PlaneRecord, SphereRecord};
use crate::error::{finite_f64, finite_vec3, non_zero_vec3, out_of_range, ValidationResult};
use crate::material::{Color, Material};

/// Ray parameter reported when a ray misses.
pub const NO_HIT: f64 = -1.0;

/// How far a plane normal may stray from unit length before we warn.
const NORMAL_LENGTH_TOLERANCE: f64 = 1e-3;

/// Intersect a ray with a sphere.
///
/// Returns the nearer root if it lies beyond `EPSILON`, otherwise the farther
/// one, otherwise [`NO_HIT`].
#[inline]
pub fn intersect_sphere(origin: DVec3, direction: DVec3, center: DVec3, radius: f64) -> f64 {
    let l = origin - center;
    let a = direction.dot(direction);
    let b = 2.0 * direction.dot(l);
    let c = l.dot(l) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return NO_HIT;
    }

    let sqrtd = discriminant.sqrt();
    let near = (-b - sqrtd) / (2.0 * a);
    let far = (-b + sqrtd) / (2.0 * a);

    if near > EPSILON {
        near
    } else if far > EPSILON {
        far
    } else {
        NO_HIT
    }
}

/// Intersect a ray with an infinite plane through `point` with unit `normal`.
#[inline]
pub fn intersect_plane(origin: DVec3, direction: DVec3, point: DVec3, normal: DVec3) -> f64 {
    let denominator = direction.dot(normal);
    if denominator.abs() < EPSILON {
        return NO_HIT;
    }

    let t = (point - origin).dot(normal) / denominator;
    if t > EPSILON {
        t
    } else {
        NO_HIT
    }
}

fn validate_emission(emission: Color) -> ValidationResult<Color> {
    let emission = finite_vec3("Le", emission)?;
    if emission.cmplt(DVec3::ZERO).any() {
        return Err(out_of_range("Le", emission.min_element(), "non-negative channels"));
    }
    Ok(emission)
}

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    material: Material,
    emission: Color,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: DVec3, radius: f64, material: Material, emission: Color) -> ValidationResult<Self> {
        let center = finite_vec3("position", center)?;
        let radius = finite_f64("radius", radius)?;
        if radius <= 0.0 {
            return Err(out_of_range("radius", radius, "radius > 0"));
        }
        let emission = validate_emission(emission)?;

        Ok(Self {
            center,
            radius,
            material,
            emission,
        })
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Packed form used by the primitive buffer.
    pub fn record(&self) -> SphereRecord {
        SphereRecord {
            position: self.center.to_array(),
            brdf: self.material.to_array(),
            emission: self.emission.to_array(),
            radius: self.radius,
        }
    }
}

/// An infinite plane primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    point: DVec3,
    normal: DVec3,
    material: Material,
    emission: Color,
}

impl Plane {
    /// Create a new plane through `point`.
    ///
    /// The normal is stored as given. A normal that is not unit length is
    /// accepted but logged, since intersection distances scale with it.
    pub fn new(point: DVec3, normal: DVec3, material: Material, emission: Color) -> ValidationResult<Self> {
        let point = finite_vec3("position", point)?;
        let normal = non_zero_vec3("normal", normal)?;
        if (normal.length() - 1.0).abs() > NORMAL_LENGTH_TOLERANCE {
            log::warn!("Plane normal {:?} is not unit length ({})", normal, normal.length());
        }
        let emission = validate_emission(emission)?;

        Ok(Self {
            point,
            normal,
            material,
            emission,
        })
    }

    pub fn point(&self) -> DVec3 {
        self.point
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Packed form used by the primitive buffer.
    pub fn record(&self) -> PlaneRecord {
        PlaneRecord {
            position: self.point.to_array(),
            brdf: self.material.to_array(),
            emission: self.emission.to_array(),
            normal: self.normal.to_array(),
        }
    }
}

/// Any primitive the scene can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Sphere(Sphere),
    Plane(Plane),
}

impl Geometry {
    /// Sphere center or plane reference point.
    pub fn position(&self) -> DVec3 {
        match self {
            Geometry::Sphere(s) => s.center,
            Geometry::Plane(p) => p.point,
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Geometry::Sphere(s) => &s.material,
            Geometry::Plane(p) => &p.material,
        }
    }

    /// Emitted radiance `Le`.
    pub fn emission(&self) -> Color {
        match self {
            Geometry::Sphere(s) => s.emission,
            Geometry::Plane(p) => p.emission,
        }
    }

    /// True if any emission channel is positive.
    pub fn is_light(&self) -> bool {
        self.emission().cmpgt(DVec3::ZERO).any()
    }

    /// Nearest valid hit distance along `ray`, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let t = match self {
            Geometry::Sphere(s) => intersect_sphere(ray.origin, ray.direction, s.center, s.radius),
            Geometry::Plane(p) => intersect_plane(ray.origin, ray.direction, p.point, p.normal),
        };
        (t > 0.0).then_some(t)
    }

    /// Surface normal at a point on the primitive.
    pub fn normal_at(&self, point: DVec3) -> DVec3 {
        match self {
            Geometry::Sphere(s) => (point - s.center).normalize(),
            Geometry::Plane(p) => p.normal,
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Self {
        Geometry::Sphere(sphere)
    }
}

impl From<Plane> for Geometry {
    fn from(plane: Plane) -> Self {
        Geometry::Plane(plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{PLANE_STRIDE, SPHERE_STRIDE};
    use crate::ValidationError;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn light_sphere() -> Sphere {
        Sphere::new(
            DVec3::new(-3.0, 0.0, 10.0),
            2.0,
            Material::black(),
            Color::new(20.0, 15.0, 15.0),
        )
        .unwrap()
    }

    fn floor() -> Plane {
        Plane::new(DVec3::new(0.0, -2.0, 0.0), DVec3::Y, Material::default(), Color::ZERO).unwrap()
    }

    #[test]
    fn test_sphere_hit_toward_center() {
        let sphere = light_sphere();
        let direction = sphere.center().normalize();
        let t = intersect_sphere(DVec3::ZERO, direction, sphere.center(), sphere.radius());

        // Distance to the center minus the radius
        let expected = sphere.center().length() - 2.0;
        assert!(t.is_finite() && t > 0.0);
        assert!((t - expected).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = light_sphere();
        // Straight down +z passes 3 units from the center, outside radius 2
        let t = intersect_sphere(DVec3::ZERO, DVec3::Z, sphere.center(), sphere.radius());
        assert_eq!(t, NO_HIT);
    }

    #[test]
    fn test_sphere_from_inside_returns_far_root() {
        let t = intersect_sphere(DVec3::ZERO, DVec3::X, DVec3::ZERO, 5.0);
        assert!((t - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_behind_origin() {
        let t = intersect_sphere(DVec3::ZERO, DVec3::Z, DVec3::new(0.0, 0.0, -10.0), 1.0);
        assert_eq!(t, NO_HIT);
    }

    #[test]
    fn test_sphere_miss_iff_negative_discriminant() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let center = DVec3::new(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
            );
            let radius = rng.gen_range(0.5..4.0);
            let origin = DVec3::new(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
            );
            if (origin - center).length() <= radius + 1e-3 {
                continue;
            }
            let direction = DVec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
            .normalize();

            let l = origin - center;
            let a = direction.dot(direction);
            let b = 2.0 * direction.dot(l);
            let c = l.dot(l) - radius * radius;
            let discriminant = b * b - 4.0 * a * c;
            let t = intersect_sphere(origin, direction, center, radius);

            if discriminant < 0.0 {
                assert_eq!(t, NO_HIT);
            } else if t != NO_HIT {
                assert!(t > EPSILON);
            } else {
                // A miss with a real root means the sphere is behind the origin
                assert!(direction.dot(center - origin) < 0.0);
            }
        }
    }

    #[test]
    fn test_plane_hit_below() {
        let plane = floor();
        let t = intersect_plane(DVec3::ZERO, -DVec3::Y, plane.point(), plane.normal());
        assert_eq!(t, 2.0);
    }

    #[test]
    fn test_plane_parallel_ray() {
        let plane = floor();
        for origin in [DVec3::ZERO, DVec3::new(5.0, -2.0, 1.0), DVec3::new(0.0, 100.0, -3.0)] {
            assert_eq!(intersect_plane(origin, DVec3::X, plane.point(), plane.normal()), NO_HIT);
            assert_eq!(intersect_plane(origin, DVec3::Z, plane.point(), plane.normal()), NO_HIT);
        }
    }

    #[test]
    fn test_plane_behind_origin() {
        let plane = floor();
        assert_eq!(intersect_plane(DVec3::ZERO, DVec3::Y, plane.point(), plane.normal()), NO_HIT);
    }

    #[test]
    fn test_geometry_intersect_wraps_sentinel() {
        let sphere = Geometry::from(light_sphere());
        let plane = Geometry::from(floor());

        let down = Ray::new(DVec3::ZERO, -DVec3::Y);
        assert_eq!(plane.intersect(&down), Some(2.0));
        assert_eq!(sphere.intersect(&down), None);
    }

    #[test]
    fn test_normal_at() {
        let sphere = Geometry::from(light_sphere());
        let n = sphere.normal_at(DVec3::new(-3.0, 2.0, 10.0));
        assert!((n - DVec3::Y).length() < 1e-6);
        assert_eq!(Geometry::from(floor()).normal_at(DVec3::ZERO), DVec3::Y);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            Sphere::new(DVec3::ZERO, 0.0, Material::default(), Color::ZERO),
            Err(ValidationError::OutOfRange { field: "radius", .. })
        ));
        assert!(matches!(
            Sphere::new(DVec3::new(f64::INFINITY, 0.0, 0.0), 1.0, Material::default(), Color::ZERO),
            Err(ValidationError::NonFinite { field: "position" })
        ));
        assert!(matches!(
            Sphere::new(DVec3::ZERO, 1.0, Material::default(), Color::new(1.0, -1.0, 0.0)),
            Err(ValidationError::OutOfRange { field: "Le", .. })
        ));
        assert!(matches!(
            Plane::new(DVec3::ZERO, DVec3::ZERO, Material::default(), Color::ZERO),
            Err(ValidationError::Degenerate { field: "normal", .. })
        ));
        assert!(matches!(
            Plane::new(DVec3::ZERO, DVec3::new(0.0, f64::NAN, 0.0), Material::default(), Color::ZERO),
            Err(ValidationError::NonFinite { field: "normal" })
        ));
    }

    #[test]
    fn test_is_light() {
        assert!(Geometry::from(light_sphere()).is_light());
        assert!(!Geometry::from(floor()).is_light());
    }

    #[test]
    fn test_record_layout() {
        let sphere: [f64; SPHERE_STRIDE] = bytemuck::cast(light_sphere().record());
        assert_eq!(sphere, [-3.0, 0.0, 10.0, 0.0, 0.0, 0.0, 1.0, 20.0, 15.0, 15.0, 2.0]);

        let plane: [f64; PLANE_STRIDE] = bytemuck::cast(floor().record());
        assert_eq!(&plane[0..3], &[0.0, -2.0, 0.0]);
        assert_eq!(&plane[10..13], &[0.0, 1.0, 0.0]);
    }
}

//! Ready-made scenes.

use glint_math::DVec3;

use crate::{Camera, Color, Geometry, Material, Plane, Scene, Sphere, ValidationResult};

/// Warm key light, a white diffuse sphere, a dim cyan fill light and a
/// four-sided room (floor, back wall, two side walls).
pub fn showcase() -> ValidationResult<Scene> {
    let white = Material::diffuse(Color::ONE)?;

    let objects: Vec<Geometry> = vec![
        Sphere::new(DVec3::new(-3.0, 0.0, 10.0), 2.0, Material::black(), Color::new(20.0, 15.0, 15.0))?.into(),
        Sphere::new(DVec3::new(3.0, 0.0, 10.0), 2.0, white, Color::ZERO)?.into(),
        Sphere::new(DVec3::new(3.0, 6.0, 10.0), 2.0, Material::black(), Color::new(0.0, 1.0, 0.5))?.into(),
        Plane::new(DVec3::new(0.0, -2.0, 0.0), DVec3::Y, white, Color::ZERO)?.into(),
        Plane::new(DVec3::new(0.0, 0.0, 20.0), -DVec3::Z, white, Color::ZERO)?.into(),
        Plane::new(DVec3::new(10.0, 0.0, 0.0), -DVec3::X, white, Color::ZERO)?.into(),
        Plane::new(DVec3::new(-10.0, 0.0, 0.0), DVec3::X, white, Color::ZERO)?.into(),
    ];

    Scene::new(Camera::default(), objects)
}

/// A huge red-tinted sphere light overhead, a blue ground sphere and a small
/// green sphere.
pub fn ceiling_light() -> ValidationResult<Scene> {
    let objects: Vec<Geometry> = vec![
        Sphere::new(
            DVec3::new(0.0, 100.0, 0.0),
            90.0,
            Material::diffuse(Color::new(0.7, 0.0, 0.0))?,
            Color::splat(0.7),
        )?
        .into(),
        Sphere::new(
            DVec3::new(0.0, -10.0, 0.0),
            9.5,
            Material::diffuse(Color::new(0.0, 0.0, 0.7))?,
            Color::ZERO,
        )?
        .into(),
        Sphere::new(
            DVec3::new(-1.0, 1.0, 2.0),
            1.0,
            Material::diffuse(Color::new(0.0, 0.7, 0.0))?,
            Color::ZERO,
        )?
        .into(),
    ];

    Scene::new(Camera::default(), objects)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showcase() {
        let scene = showcase().unwrap();
        assert_eq!(scene.sphere_count(), 3);
        assert_eq!(scene.plane_count(), 4);
        assert_eq!(scene.objects().iter().filter(|o| o.is_light()).count(), 2);
    }

    #[test]
    fn test_ceiling_light() {
        let scene = ceiling_light().unwrap();
        assert_eq!(scene.sphere_count(), 3);
        assert_eq!(scene.plane_count(), 0);
        assert!(scene.objects()[0].is_light());
    }
}

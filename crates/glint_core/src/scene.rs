//! Scene: a camera plus an ordered, non-empty primitive list.
//!
//! The scene keeps a packed [`PrimitiveBuffer`] in sync with its primitives.
//! Mutation takes `&mut self`, so a rebuild can never overlap a render that
//! borrows the buffer.

use crate::buffer::PrimitiveBuffer;
use crate::camera::{Camera, ViewBasis};
use crate::error::{ValidationError, ValidationResult};
use crate::geometry::Geometry;

/// A complete renderable scene.
#[derive(Debug, Clone)]
pub struct Scene {
    camera: Camera,
    objects: Vec<Geometry>,
    buffer: PrimitiveBuffer,
}

impl Scene {
    /// Create a scene. Fails if `objects` is empty.
    pub fn new(camera: Camera, objects: Vec<Geometry>) -> ValidationResult<Self> {
        if objects.is_empty() {
            return Err(ValidationError::EmptyScene);
        }

        let buffer = pack_objects(&objects);
        Ok(Self {
            camera,
            objects,
            buffer,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Primitives in insertion order.
    pub fn objects(&self) -> &[Geometry] {
        &self.objects
    }

    /// Add a primitive and rebuild the packed buffer.
    pub fn add(&mut self, object: impl Into<Geometry>) {
        self.objects.push(object.into());
        self.rebuild();
    }

    /// Remove the primitive at `index` and rebuild the packed buffer.
    ///
    /// The last primitive cannot be removed.
    pub fn remove(&mut self, index: usize) -> ValidationResult<Geometry> {
        if index >= self.objects.len() {
            return Err(ValidationError::NoSuchPrimitive {
                index,
                len: self.objects.len(),
            });
        }
        if self.objects.len() == 1 {
            return Err(ValidationError::EmptyScene);
        }

        let removed = self.objects.remove(index);
        self.rebuild();
        Ok(removed)
    }

    /// Replace the whole primitive list.
    pub fn set_objects(&mut self, objects: Vec<Geometry>) -> ValidationResult<()> {
        if objects.is_empty() {
            return Err(ValidationError::EmptyScene);
        }
        self.objects = objects;
        self.rebuild();
        Ok(())
    }

    pub fn sphere_count(&self) -> usize {
        self.buffer.sphere_count()
    }

    pub fn plane_count(&self) -> usize {
        self.buffer.plane_count()
    }

    /// Packed primitives, spheres first.
    pub fn buffer(&self) -> &PrimitiveBuffer {
        &self.buffer
    }

    /// Camera basis for an image of `width` x `height` pixels.
    pub fn view_basis(&self, width: u32, height: u32) -> ViewBasis {
        self.camera.view_basis(width, height)
    }

    fn rebuild(&mut self) {
        self.buffer = pack_objects(&self.objects);
    }
}

/// Pack spheres then planes, each in list order.
fn pack_objects(objects: &[Geometry]) -> PrimitiveBuffer {
    let spheres: Vec<_> = objects
        .iter()
        .filter_map(|object| match object {
            Geometry::Sphere(s) => Some(s.record()),
            Geometry::Plane(_) => None,
        })
        .collect();
    let planes: Vec<_> = objects
        .iter()
        .filter_map(|object| match object {
            Geometry::Plane(p) => Some(p.record()),
            Geometry::Sphere(_) => None,
        })
        .collect();

    log::debug!("Packed scene: {} spheres, {} planes", spheres.len(), planes.len());

    PrimitiveBuffer::from_records(&spheres, &planes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Material, Plane, Sphere};
    use glint_math::DVec3;

    fn sphere(x: f64) -> Geometry {
        Sphere::new(DVec3::new(x, 0.0, 5.0), 1.0, Material::default(), Color::ZERO)
            .unwrap()
            .into()
    }

    fn plane(y: f64) -> Geometry {
        Plane::new(DVec3::new(0.0, y, 0.0), DVec3::Y, Material::default(), Color::ZERO)
            .unwrap()
            .into()
    }

    #[test]
    fn test_empty_scene_rejected() {
        assert_eq!(
            Scene::new(Camera::default(), Vec::new()).unwrap_err(),
            ValidationError::EmptyScene
        );
    }

    #[test]
    fn test_spheres_packed_before_planes() {
        let scene = Scene::new(
            Camera::default(),
            vec![plane(-1.0), sphere(1.0), plane(-2.0), sphere(2.0)],
        )
        .unwrap();

        assert_eq!(scene.sphere_count(), 2);
        assert_eq!(scene.plane_count(), 2);

        let buffer = scene.buffer();
        assert_eq!(buffer.spheres()[0].position[0], 1.0);
        assert_eq!(buffer.spheres()[1].position[0], 2.0);
        assert_eq!(buffer.planes()[0].position[1], -1.0);
        assert_eq!(buffer.planes()[1].position[1], -2.0);

        // Insertion order is preserved on the object list
        assert!(matches!(scene.objects()[0], Geometry::Plane(_)));
    }

    #[test]
    fn test_add_and_remove_rebuild_buffer() {
        let mut scene = Scene::new(Camera::default(), vec![sphere(0.0)]).unwrap();
        assert_eq!(scene.buffer().as_slice().len(), 11);

        scene.add(plane(-2.0));
        assert_eq!(scene.plane_count(), 1);
        assert_eq!(scene.buffer().as_slice().len(), 11 + 13);

        let removed = scene.remove(0).unwrap();
        assert!(matches!(removed, Geometry::Sphere(_)));
        assert_eq!(scene.sphere_count(), 0);
        assert_eq!(scene.buffer().as_slice().len(), 13);

        // The last primitive stays
        assert_eq!(scene.remove(0).unwrap_err(), ValidationError::EmptyScene);
        assert_eq!(
            scene.remove(3).unwrap_err(),
            ValidationError::NoSuchPrimitive { index: 3, len: 1 }
        );
    }

    #[test]
    fn test_set_objects() {
        let mut scene = Scene::new(Camera::default(), vec![sphere(0.0)]).unwrap();
        scene.set_objects(vec![plane(0.0), plane(1.0)]).unwrap();
        assert_eq!(scene.sphere_count(), 0);
        assert_eq!(scene.plane_count(), 2);
        assert!(scene.set_objects(Vec::new()).is_err());
        assert_eq!(scene.plane_count(), 2);
    }

    #[test]
    fn test_camera_moves_view_basis() {
        let mut scene = Scene::new(Camera::default(), vec![sphere(0.0)]).unwrap();
        scene.camera_mut().translate(0.0, 1.0, 0.0).unwrap();
        assert_eq!(scene.view_basis(4, 4).origin, DVec3::Y);
    }
}

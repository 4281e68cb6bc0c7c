//! Field-of-view camera and the screen basis handed to the integrator.

use glint_math::DVec3;

use crate::error::{finite_f64, finite_vec3, non_zero_vec3, out_of_range, ValidationError, ValidationResult};

/// Camera origin plus the three vectors that map NDC to ray directions.
///
/// A ray through NDC `(x, y)` has direction
/// `normalize(z_ndc + x * x_ndc + y * y_ndc)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    pub origin: DVec3,
    pub x_ndc: DVec3,
    pub y_ndc: DVec3,
    pub z_ndc: DVec3,
}

impl ViewBasis {
    /// Direction through the given NDC coordinates.
    #[inline]
    pub fn direction(&self, x_offset: f64, y_offset: f64) -> DVec3 {
        (self.z_ndc + x_offset * self.x_ndc + y_offset * self.y_ndc).normalize()
    }
}

/// Pinhole camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: DVec3,
    direction: DVec3,
    up: DVec3,
    fov: f64, // Vertical field of view in degrees
}

impl Camera {
    /// Create a new camera.
    ///
    /// `direction` and `up` must be non-zero and not parallel; `fov` is in
    /// degrees and must lie in `(0, 180)`.
    pub fn new(position: DVec3, direction: DVec3, up: DVec3, fov: f64) -> ValidationResult<Self> {
        let position = finite_vec3("position", position)?;
        let direction = non_zero_vec3("direction", direction)?;
        let up = non_zero_vec3("up", up)?;

        if direction.normalize().cross(up.normalize()).length_squared() < 1e-8 {
            return Err(ValidationError::Degenerate {
                field: "up",
                reason: "parallel to direction",
            });
        }

        let fov = finite_f64("fov", fov)?;
        if fov <= 0.0 || fov >= 180.0 {
            return Err(out_of_range("fov", fov, "(0, 180) degrees"));
        }

        Ok(Self {
            position,
            direction,
            up,
            fov,
        })
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    pub fn fov(&self) -> f64 {
        self.fov
    }

    /// Offset the camera position by `(dx, dy, dz)`.
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) -> ValidationResult<()> {
        let delta = finite_vec3("translation", DVec3::new(dx, dy, dz))?;
        self.position = finite_vec3("position", self.position + delta)?;
        Ok(())
    }

    /// Screen basis for the given aspect ratio (width / height).
    ///
    /// Left-handed: with `direction = +z` and `up = +y`, `x_ndc` points along
    /// `+x`.
    pub fn basis(&self, aspect_ratio: f64) -> ViewBasis {
        let y_scale = (self.fov.to_radians() / 2.0).tan();
        let x_scale = y_scale * aspect_ratio;

        let z_ndc = self.direction;
        let x_ndc = self.up.cross(z_ndc).normalize() * x_scale;
        let y_ndc = z_ndc.cross(x_ndc).normalize() * y_scale;

        ViewBasis {
            origin: self.position,
            x_ndc,
            y_ndc,
            z_ndc,
        }
    }

    /// Screen basis for an image of `width` x `height` pixels.
    pub fn view_basis(&self, width: u32, height: u32) -> ViewBasis {
        self.basis(width as f64 / height as f64)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            direction: DVec3::Z,
            up: DVec3::Y,
            fov: 60.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_basis() {
        let basis = Camera::default().view_basis(800, 600);
        let y_scale = 30.0_f64.to_radians().tan();

        assert_eq!(basis.origin, DVec3::ZERO);
        assert_eq!(basis.z_ndc, DVec3::Z);
        assert!((basis.x_ndc - DVec3::X * y_scale * (4.0 / 3.0)).length() < 1e-5);
        assert!((basis.y_ndc - DVec3::Y * y_scale).length() < 1e-5);
    }

    #[test]
    fn test_basis_center_direction() {
        let camera = Camera::new(DVec3::ONE, DVec3::new(1.0, 0.0, 1.0), DVec3::Y, 45.0).unwrap();
        let basis = camera.view_basis(100, 100);

        let center = basis.direction(0.0, 0.0);
        assert!((center - DVec3::new(1.0, 0.0, 1.0).normalize()).length() < 1e-6);

        // x and y axes stay orthogonal to the view direction
        assert!(basis.x_ndc.dot(basis.z_ndc).abs() < 1e-5);
        assert!(basis.y_ndc.dot(basis.z_ndc).abs() < 1e-5);
        assert!(basis.x_ndc.dot(basis.y_ndc).abs() < 1e-5);
    }

    #[test]
    fn test_translate() {
        let mut camera = Camera::default();
        camera.translate(1.0, -2.0, 0.5).unwrap();
        camera.translate(1.0, 0.0, 0.0).unwrap();
        assert_eq!(camera.position(), DVec3::new(2.0, -2.0, 0.5));

        let err = camera.translate(f64::NAN, 0.0, 0.0).unwrap_err();
        assert_eq!(err, ValidationError::NonFinite { field: "translation" });
        // Failed moves leave the camera untouched
        assert_eq!(camera.position(), DVec3::new(2.0, -2.0, 0.5));
    }

    #[test]
    fn test_translate_overflow_rejected() {
        let mut camera = Camera::new(DVec3::new(f64::MAX, 0.0, 0.0), DVec3::Z, DVec3::Y, 60.0).unwrap();
        let err = camera.translate(f64::MAX, 0.0, 0.0).unwrap_err();
        assert_eq!(err, ValidationError::NonFinite { field: "position" });
        assert_eq!(camera.position(), DVec3::new(f64::MAX, 0.0, 0.0));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            Camera::new(DVec3::ZERO, DVec3::Z, DVec3::Y, 0.0),
            Err(ValidationError::OutOfRange { field: "fov", .. })
        ));
        assert!(matches!(
            Camera::new(DVec3::ZERO, DVec3::Z, DVec3::Y, 180.0),
            Err(ValidationError::OutOfRange { field: "fov", .. })
        ));
        assert!(matches!(
            Camera::new(DVec3::ZERO, DVec3::Z, DVec3::Z * 2.0, 60.0),
            Err(ValidationError::Degenerate { field: "up", .. })
        ));
        assert!(matches!(
            Camera::new(DVec3::ZERO, DVec3::ZERO, DVec3::Y, 60.0),
            Err(ValidationError::Degenerate { field: "direction", .. })
        ));
        assert!(matches!(
            Camera::new(DVec3::new(f64::NAN, 0.0, 0.0), DVec3::Z, DVec3::Y, 60.0),
            Err(ValidationError::NonFinite { field: "position" })
        ));
    }
}

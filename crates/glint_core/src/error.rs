//! Construction-time validation errors.

use glint_math::DVec3;
use thiserror::Error;

/// Errors raised while building cameras, primitives, scenes and configs.
///
/// All checks run before rendering starts, so there is no runtime error path
/// in the integrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("{field} = {value} is out of range, expected {expected}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("{field} is degenerate: {reason}")]
    Degenerate {
        field: &'static str,
        reason: &'static str,
    },

    #[error("scene must contain at least one primitive")]
    EmptyScene,

    #[error("primitive index {index} out of bounds for scene of {len}")]
    NoSuchPrimitive { index: usize, len: usize },

    #[error(
        "primitive buffer holds {len} values, expected {expected} for {spheres} spheres and {planes} planes"
    )]
    BufferLayout {
        len: usize,
        expected: usize,
        spheres: usize,
        planes: usize,
    },
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reject vectors with NaN or infinite components.
pub(crate) fn finite_vec3(field: &'static str, v: DVec3) -> ValidationResult<DVec3> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

/// Reject NaN or infinite scalars.
pub(crate) fn finite_f64(field: &'static str, value: f64) -> ValidationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

/// Reject vectors too short to normalize.
pub(crate) fn non_zero_vec3(field: &'static str, v: DVec3) -> ValidationResult<DVec3> {
    let v = finite_vec3(field, v)?;
    if v.length_squared() > f64::EPSILON {
        Ok(v)
    } else {
        Err(ValidationError::Degenerate {
            field,
            reason: "zero length",
        })
    }
}

pub(crate) fn out_of_range(field: &'static str, value: f64, expected: &'static str) -> ValidationError {
    ValidationError::OutOfRange {
        field,
        value,
        expected,
    }
}

// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod ray;
mod vector;
pub use ray::Ray;
pub use vector::{is_close, Vec3Ext};

/// Tolerance used to reject self-intersections and near-parallel hits.
pub const EPSILON: f64 = 1e-6;

//! Glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over the packed primitive buffer built by
//! `glint_core::Scene`:
//! - Jittered anti-aliasing with a running per-pixel mean
//! - Cosine-weighted and Phong-lobe importance sampling
//! - Russian roulette path termination
//! - Bucket dispatch across threads with rayon

mod bucket;
mod config;
mod integrator;
mod renderer;
mod sampling;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use config::{RenderConfig, MAX_BOUNCES, MAX_SAMPLES_PER_PIXEL};
pub use integrator::{closest_hit, running_average, FrameInputs, Hit, PathIntegrator, PathOutcome, PathSample};
pub use renderer::{render, ImageBuffer};
pub use sampling::{gen_f64, pixel_rng, sample_cosine_power, LocalFrame};

/// Re-export the scene types the renderer consumes
pub use glint_core::{Color, PrimitiveBuffer, Scene, ViewBasis};
pub use glint_math::{Ray, DVec3};

//! Render configuration.

use glint_core::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

use crate::bucket::DEFAULT_BUCKET_SIZE;

/// Upper bound on anti-aliasing samples per pixel.
pub const MAX_SAMPLES_PER_PIXEL: u32 = 1280;

/// Upper bound on bounces per path.
pub const MAX_BOUNCES: u32 = 16;

/// Settings fixed for the duration of a frame.
///
/// Missing fields fall back to the defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Jittered samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum bounces after the primary hit
    pub max_bounces: u32,
    /// Probability of terminating a path at each non-emissive hit
    pub russian_roulette: f64,
    /// Weight surviving paths by 1 / (1 - russian_roulette)
    pub roulette_compensation: bool,
    /// Frame seed; each pixel derives its own stream from it
    pub seed: u64,
    /// Edge length of the square buckets dispatched to worker threads
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            samples_per_pixel: 4,
            max_bounces: 3,
            russian_roulette: 0.1,
            roulette_compensation: false,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_bounces: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_bounces = max_bounces;
        self
    }

    /// Set the Russian roulette probability and compensation policy.
    pub fn with_roulette(mut self, probability: f64, compensation: bool) -> Self {
        self.russian_roulette = probability;
        self.roulette_compensation = compensation;
        self
    }

    /// Set the frame seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.width == 0 {
            return Err(out_of_range("width", self.width as f64, "width > 0"));
        }
        if self.height == 0 {
            return Err(out_of_range("height", self.height as f64, "height > 0"));
        }
        if self.samples_per_pixel == 0 || self.samples_per_pixel > MAX_SAMPLES_PER_PIXEL {
            return Err(out_of_range(
                "samples_per_pixel",
                self.samples_per_pixel as f64,
                "1..=1280",
            ));
        }
        if self.max_bounces > MAX_BOUNCES {
            return Err(out_of_range("max_bounces", self.max_bounces as f64, "0..=16"));
        }
        let p = self.russian_roulette;
        if !p.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "russian_roulette",
            });
        }
        if p <= 0.0 || p >= 1.0 {
            return Err(out_of_range("russian_roulette", p, "(0, 1)"));
        }
        if self.bucket_size == 0 {
            return Err(out_of_range("bucket_size", 0.0, "bucket_size > 0"));
        }
        Ok(())
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

fn out_of_range(field: &'static str, value: f64, expected: &'static str) -> ValidationError {
    ValidationError::OutOfRange { field, value, expected }
}

//! Frame rendering: bucket dispatch and the accumulated image.

use std::time::Instant;

use glint_core::{Color, Scene, ValidationResult};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::integrator::{FrameInputs, PathIntegrator};
use crate::RenderConfig;

/// Linear radiance image, row-major with row 0 at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create an image filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (row, chunk) in result.pixels.chunks(bucket.width as usize).enumerate() {
            let start = self.index(bucket.x, bucket.y + row as u32);
            self.pixels[start..start + chunk.len()].copy_from_slice(chunk);
        }
    }

    /// Average radiance over all pixels.
    pub fn mean(&self) -> Color {
        if self.pixels.is_empty() {
            return Color::ZERO;
        }
        self.pixels.iter().copied().sum::<Color>() / self.pixels.len() as f64
    }
}

/// Render a full frame of `scene`.
///
/// The config is validated first; after that rendering cannot fail. The
/// scene is only read, so the output depends on nothing but the scene, the
/// config and its seed.
pub fn render(scene: &Scene, config: &RenderConfig) -> ValidationResult<ImageBuffer> {
    let integrator = PathIntegrator::new(config)?;
    let frame = FrameInputs::new(scene, config.width, config.height);
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);

    log::info!(
        "Rendering {}x{} @ {} spp, {} bounces in {} buckets",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_bounces,
        buckets.len()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, &integrator, &frame, config.seed)))
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Frame finished in {:.2?}", start.elapsed());
    Ok(image)
}

//! Bucket-based tile rendering.
//!
//! The image is split into square tiles that rayon renders independently.
//! Pixel rows are stored bottom-up: `y = 0` is the bottom row of the frame.

use glint_core::Color;

use crate::integrator::{FrameInputs, PathIntegrator};
use crate::sampling::pixel_rng;

/// Default bucket edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// A rectangular region of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of the bucket's first column
    pub x: u32,
    /// Y coordinate of the bucket's first row
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Tile an image into buckets, ordered center first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let mut buckets = Vec::new();

    for y in (0..height).step_by(size as usize) {
        for x in (0..width).step_by(size as usize) {
            let bw = size.min(width - x);
            let bh = size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
        }
    }

    sort_spiral(&mut buckets, width, height);
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Order buckets by squared distance of their centers from the image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let distance = |b: &Bucket| {
        let dx = b.x as f64 + b.width as f64 / 2.0 - cx;
        let dy = b.y as f64 + b.height as f64 / 2.0 - cy;
        dx * dx + dy * dy
    };

    // Stable, so equidistant buckets keep row-major order
    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render one bucket, returning its pixels in row-major order.
///
/// Each pixel draws from its own stream derived from `seed`, so the result
/// does not depend on bucket size or scheduling.
pub fn render_bucket(bucket: &Bucket, integrator: &PathIntegrator, frame: &FrameInputs<'_>, seed: u64) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count());

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let x = bucket.x + local_x;
            let y = bucket.y + local_y;
            let mut rng = pixel_rng(seed, x, y);
            pixels.push(integrator.render_pixel(x, y, frame, &mut rng));
        }
    }

    pixels
}

/// Pixels produced for a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Row-major within the bucket
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderConfig;
    use glint_core::presets;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4);

        let total: usize = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4);

        let total: usize = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total, 100 * 70);
        assert!(buckets.iter().all(|b| b.x + b.width <= 100 && b.y + b.height <= 70));
    }

    #[test]
    fn test_pixel_count_does_not_wrap() {
        let bucket = Bucket::new(0, 0, 70_000, 70_000, 0);
        assert_eq!(bucket.pixel_count(), 4_900_000_000);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9);
        assert_eq!((buckets[0].x, buckets[0].y), (64, 64));
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_bucket_covers_every_pixel_once() {
        let buckets = generate_buckets(37, 23, 8);
        let mut seen = vec![0u8; 37 * 23];
        for b in &buckets {
            for y in b.y..b.y + b.height {
                for x in b.x..b.x + b.width {
                    seen[(y * 37 + x) as usize] += 1;
                }
            }
        }
        assert!(seen.iter().all(|&n| n == 1));
    }

    #[test]
    fn test_render_bucket_matches_pixels() {
        let scene = presets::showcase().unwrap();
        let config = RenderConfig::default().with_resolution(16, 12).with_quality(2, 2).with_seed(11);
        let integrator = PathIntegrator::new(&config).unwrap();
        let frame = FrameInputs::new(&scene, config.width, config.height);

        let bucket = Bucket::new(4, 2, 3, 2, 0);
        let pixels = render_bucket(&bucket, &integrator, &frame, config.seed);
        assert_eq!(pixels.len(), 6);

        let mut rng = pixel_rng(11, 5, 3);
        assert_eq!(pixels[4], integrator.render_pixel(5, 3, &frame, &mut rng));
    }
}

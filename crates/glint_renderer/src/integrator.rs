//! Per-pixel Monte Carlo integrator.
//!
//! Every invocation reads the view basis and the packed primitive buffer
//! immutably and draws all randomness from the `RngCore` it is handed, so
//! pixels can be evaluated in any order on any thread.

use glint_core::{
    intersect_plane, intersect_sphere, Color, Material, PrimitiveBuffer, Scene, ValidationResult, ViewBasis,
};
use glint_math::{Ray, DVec3, Vec3Ext, EPSILON};
use rand::RngCore;

use crate::sampling::{gen_f64, sample_cosine_power, LocalFrame};
use crate::RenderConfig;

/// Everything the integrator reads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub basis: ViewBasis,
    pub primitives: &'a PrimitiveBuffer,
}

impl<'a> FrameInputs<'a> {
    /// Borrow a scene's buffer and compute its basis for `width` x `height`.
    pub fn new(scene: &'a Scene, width: u32, height: u32) -> Self {
        Self {
            basis: scene.view_basis(width, height),
            primitives: scene.buffer(),
        }
    }
}

/// Nearest intersection found by [`closest_hit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub t: f64,
    pub normal: DVec3,
    pub material: Material,
    pub emission: Color,
}

/// Brute-force nearest hit: spheres in buffer order, then planes.
///
/// Only a strictly smaller `t` replaces the current hit, so the first
/// primitive found wins ties.
pub fn closest_hit(ray: &Ray, primitives: &PrimitiveBuffer) -> Option<Hit> {
    let mut closest: Option<Hit> = None;
    let mut closest_t = f64::INFINITY;

    for sphere in primitives.spheres() {
        let center = sphere.center();
        let t = intersect_sphere(ray.origin, ray.direction, center, sphere.radius);
        if t > 0.0 && t < closest_t {
            closest_t = t;
            closest = Some(Hit {
                t,
                normal: (ray.at(t) - center).normalize(),
                material: sphere.material(),
                emission: sphere.emission(),
            });
        }
    }

    for plane in primitives.planes() {
        let t = intersect_plane(ray.origin, ray.direction, plane.point(), plane.normal());
        if t > 0.0 && t < closest_t {
            closest_t = t;
            closest = Some(Hit {
                t,
                normal: plane.normal(),
                material: plane.material(),
                emission: plane.emission(),
            });
        }
    }

    closest
}

/// Fold sample number `index` (zero-based) into a running mean.
#[inline]
pub fn running_average(mean: Color, sample: Color, index: u32) -> Color {
    let n = index as f64;
    mean * (n / (n + 1.0)) + sample * (1.0 / (n + 1.0))
}

/// How a traced path ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOutcome {
    /// The ray left the scene
    Escaped,
    /// The ray reached an emitter
    HitLight,
    /// Russian roulette killed the path
    Roulette,
    /// The sampled direction had zero density
    Absorbed,
    /// The bounce budget ran out before reaching a light
    BounceLimit,
}

/// Radiance carried by one path plus how it ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub radiance: Color,
    pub outcome: PathOutcome,
    /// Surfaces hit before the path ended
    pub depth: u32,
}

impl PathSample {
    fn dark(outcome: PathOutcome, depth: u32) -> Self {
        Self {
            radiance: Color::ZERO,
            outcome,
            depth,
        }
    }
}

/// The path tracing kernel.
#[derive(Debug, Clone)]
pub struct PathIntegrator {
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    max_bounces: u32,
    russian_roulette: f64,
    survival_weight: f64,
}

impl PathIntegrator {
    /// Build a kernel, rejecting configs that fail [`RenderConfig::validate`].
    pub fn new(config: &RenderConfig) -> ValidationResult<Self> {
        config.validate()?;

        let survival_weight = if config.roulette_compensation {
            1.0 / (1.0 - config.russian_roulette)
        } else {
            1.0
        };

        Ok(Self {
            width: config.width,
            height: config.height,
            samples_per_pixel: config.samples_per_pixel,
            max_bounces: config.max_bounces,
            russian_roulette: config.russian_roulette,
            survival_weight,
        })
    }

    /// Estimate the color of pixel `(i, j)`, with `j = 0` the bottom row.
    pub fn render_pixel(&self, i: u32, j: u32, frame: &FrameInputs<'_>, rng: &mut dyn RngCore) -> Color {
        let x_step = 2.0 / self.width as f64;
        let y_step = 2.0 / self.height as f64;
        let mut pixel_color = Color::ZERO;

        for sample in 0..self.samples_per_pixel {
            let x_jitter = gen_f64(rng) * x_step;
            let y_jitter = gen_f64(rng) * y_step;

            let x_offset = -1.0 + i as f64 * x_step + x_jitter;
            let y_offset = -1.0 + j as f64 * y_step + y_jitter;

            let ray = Ray::new(frame.basis.origin, frame.basis.direction(x_offset, y_offset));
            let path = self.trace_path(ray, frame.primitives, rng);

            pixel_color = running_average(pixel_color, path.radiance, sample);
        }

        pixel_color
    }

    /// Follow one path through at most `max_bounces + 1` surface hits.
    pub fn trace_path(&self, mut ray: Ray, primitives: &PrimitiveBuffer, rng: &mut dyn RngCore) -> PathSample {
        let mut throughput = Color::ONE;

        for depth in 0..=self.max_bounces {
            let Some(hit) = closest_hit(&ray, primitives) else {
                return PathSample::dark(PathOutcome::Escaped, depth);
            };

            if hit.emission.any_positive() {
                return PathSample {
                    radiance: hit.emission * throughput,
                    outcome: PathOutcome::HitLight,
                    depth: depth + 1,
                };
            }

            if gen_f64(rng) < self.russian_roulette {
                return PathSample::dark(PathOutcome::Roulette, depth + 1);
            }
            throughput *= self.survival_weight;

            let normal = hit.normal;
            let origin = ray.at(hit.t) + normal * EPSILON;

            let omega_o = -ray.direction;
            let reflected = 2.0 * omega_o.dot(normal) * normal - omega_o;

            let material = hit.material;
            let local = sample_cosine_power(gen_f64(rng), gen_f64(rng), material.alpha());
            let frame = LocalFrame::around(material.lobe_axis(normal, reflected), rng);
            let direction = frame.to_world(local);

            let brdf = material.evaluate(reflected, direction);
            let cosine = direction.dot(normal).max(0.0);
            let pdf = material.pdf(normal, reflected, direction);
            if !(pdf > 0.0 && pdf.is_finite()) {
                return PathSample::dark(PathOutcome::Absorbed, depth + 1);
            }

            throughput *= brdf * (cosine / pdf);
            ray = Ray::new(origin, direction);
        }

        PathSample::dark(PathOutcome::BounceLimit, self.max_bounces + 1)
    }
}

//! Headless Glint renderer.
//!
//! Builds a preset scene, renders one frame and logs image statistics.
//! Settings come from defaults, an optional JSON config file and then
//! command-line overrides, in that order.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glint_core::{presets, Scene};
use glint_renderer::{render, RenderConfig};

#[derive(Parser, Debug)]
#[command(
    name = "glint",
    version,
    about = "Monte Carlo path tracer for spheres and planes",
    after_help = "EXAMPLES:\n  \
                  glint --scene showcase --spp 64 --bounces 5\n  \
                  glint --config render.json --seed 3\n  \
                  RUST_LOG=debug glint --scene ceiling-light"
)]
struct Cli {
    /// Scene preset to render
    #[arg(short, long, value_enum, default_value_t = ScenePreset::Showcase)]
    scene: ScenePreset,

    /// JSON file with render settings; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Samples per pixel (1-1280)
    #[arg(long)]
    spp: Option<u32>,

    /// Maximum bounces after the primary hit (0-16)
    #[arg(long)]
    bounces: Option<u32>,

    /// Russian roulette termination probability, strictly between 0 and 1
    #[arg(long)]
    roulette: Option<f64>,

    /// Weight surviving paths by 1 / (1 - roulette)
    #[arg(long)]
    compensate: bool,

    /// Frame seed
    #[arg(long)]
    seed: Option<u64>,

    /// Move the camera by DX DY DZ before rendering
    #[arg(long, num_args = 3, value_names = ["DX", "DY", "DZ"], allow_negative_numbers = true)]
    offset: Option<Vec<f64>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ScenePreset {
    /// Two lights, a white sphere and a four-walled room
    Showcase,
    /// One huge overhead light above two spheres
    CeilingLight,
}

impl ScenePreset {
    fn build(self) -> Result<Scene> {
        let scene = match self {
            ScenePreset::Showcase => presets::showcase(),
            ScenePreset::CeilingLight => presets::ceiling_light(),
        };
        scene.with_context(|| format!("failed to build {:?} scene", self))
    }
}

fn load_config(path: &Path) -> Result<RenderConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config = serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    log::info!("Loaded render config from {}", path.display());
    Ok(config)
}

impl Cli {
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RenderConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(spp) = self.spp {
            config.samples_per_pixel = spp;
        }
        if let Some(bounces) = self.bounces {
            config.max_bounces = bounces;
        }
        if let Some(p) = self.roulette {
            config.russian_roulette = p;
        }
        if self.compensate {
            config.roulette_compensation = true;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.validate().context("invalid render settings")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.render_config()?;

    let mut scene = cli.scene.build()?;
    if let Some(offset) = &cli.offset {
        if let [dx, dy, dz] = offset[..] {
            scene
                .camera_mut()
                .translate(dx, dy, dz)
                .context("invalid camera offset")?;
        }
    }

    log::info!(
        "Scene {:?}: {} spheres, {} planes",
        cli.scene,
        scene.sphere_count(),
        scene.plane_count()
    );

    let image = render(&scene, &config)?;

    let mean = image.mean();
    let peak = image
        .pixels
        .iter()
        .fold(0.0f64, |acc, p| acc.max(p.max_element()));
    let black = image.pixels.iter().filter(|p| p.max_element() <= 0.0).count();

    log::info!("Mean radiance: ({:.4}, {:.4}, {:.4})", mean.x, mean.y, mean.z);
    log::info!("Peak channel: {:.4}", peak);
    log::info!(
        "Black pixels: {} of {} ({:.1}%)",
        black,
        image.pixels.len(),
        100.0 * black as f64 / image.pixels.len() as f64
    );

    Ok(())
}

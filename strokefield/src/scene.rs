//! Effect setup shared by the commands that drive frames

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use strokefield_core::render::RenderSurface;
use strokefield_core::{
    ControlPanel, ControlParam, FrameDriver, FrameReport, OrbitController, ParticleField,
};
use strokefield_mask::{MaskId, MaskLoader, MaskSet};

use crate::config::{FieldConfig, PaletteChoice};

/// Inputs and overrides common to every frame-driving command
#[derive(Args, Debug, Clone)]
pub struct SceneArgs {
    /// Start mask image (shown at transition 0)
    pub start: PathBuf,

    /// End mask image (shown at transition 1)
    pub end: PathBuf,

    /// Configuration file (.yaml, .yml or .json)
    #[arg(short, long, env = "STROKEFIELD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of particles
    #[arg(short = 'n', long)]
    pub particles: Option<usize>,

    /// RNG seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Preset palette index
    #[arg(long)]
    pub preset: Option<usize>,

    /// Frames to produce
    #[arg(short, long)]
    pub frames: Option<u64>,

    /// Initial transition weight
    #[arg(short, long)]
    pub transition: Option<f32>,

    /// Sweep the transition from 0 to 1 across all frames
    #[arg(long, conflicts_with = "transition")]
    pub sweep: bool,

    /// Trigger the pulse at this frame index
    #[arg(long)]
    pub pulse_at: Option<u64>,

    /// Sample masks as they finish loading instead of waiting for both
    #[arg(long)]
    pub stream_masks: bool,
}

impl SceneArgs {
    /// Load the config file (if any) and apply command-line overrides
    pub fn resolve_config(&self) -> Result<FieldConfig> {
        let mut config = match &self.config {
            Some(path) => FieldConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => FieldConfig::default(),
        };

        if let Some(particles) = self.particles {
            config.particles = particles;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(preset) = self.preset {
            config.palette = PaletteChoice::Preset(preset);
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(transition) = self.transition {
            config.controls.transition = ControlParam::Transition.clamp(transition);
        }
        Ok(config)
    }
}

/// A running effect: driver, controls and masks
pub struct Scene {
    pub config: FieldConfig,
    driver: FrameDriver<OrbitController>,
    pub panel: ControlPanel,
    masks: MaskSet,
    sweep: bool,
    pulse_at: Option<u64>,
}

impl Scene {
    /// Generate particles, load masks and start the driver on `surface`
    pub fn build<S>(config: FieldConfig, args: &SceneArgs, surface: &mut S) -> Result<Self>
    where
        S: RenderSurface + ?Sized,
    {
        let mut rng = config.rng();
        let palette = config.palette(&mut rng).context("Invalid palette")?;
        let field = ParticleField::generate(config.particles, &palette, &mut rng);
        let masks = load_masks(&args.start, &args.end, args.stream_masks)?;

        let mut driver = FrameDriver::with_controller(field, config.camera(), config.orbit())
            .with_clear_color(config.clear_color().context("Invalid clear color")?)
            .with_clock_step(config.clock_step);
        driver
            .start(config.viewport().context("Invalid viewport")?, surface)
            .context("Failed to start frame driver")?;

        info!(
            "Scene ready: {} particles, {}x{}, {} frames",
            config.particles, config.width, config.height, config.frames
        );

        Ok(Self {
            panel: ControlPanel::new(config.controls, config.pulse),
            driver,
            masks,
            sweep: args.sweep,
            pulse_at: args.pulse_at,
            config,
        })
    }

    /// Produce the next frame on `surface`
    pub fn tick<S>(&mut self, surface: &mut S) -> Result<FrameReport>
    where
        S: RenderSurface + ?Sized,
    {
        if let Some(error) = self.masks.poll().into_iter().next() {
            return Err(error).context("Failed to load mask");
        }

        let frame = self.driver.frame();
        if self.sweep {
            let last = self.config.frames.saturating_sub(1).max(1);
            self.panel
                .set(ControlParam::Transition, (frame as f32 / last as f32).min(1.0));
        }
        if self.pulse_at == Some(frame) {
            info!("Pulse at frame {}: {:?}", frame, self.panel.run());
        }

        let snapshot = self.masks.snapshot();
        let report = self
            .driver
            .tick(&mut self.panel, &snapshot, self.config.frame_time(), surface)?;
        Ok(report)
    }
}

fn load_masks(start: &Path, end: &Path, stream: bool) -> Result<MaskSet> {
    let mut masks = MaskSet::new();
    for (id, path) in [(MaskId::Start, start), (MaskId::End, end)] {
        let loader = MaskLoader::spawn(id, path)
            .with_context(|| format!("Failed to start loading {} mask", id))?;
        if stream {
            masks.attach(loader);
        } else {
            let image = loader
                .wait()
                .with_context(|| format!("Failed to load {} mask {}", id, path.display()))?;
            masks.upload(id, image);
        }
    }
    Ok(masks)
}

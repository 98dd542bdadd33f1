//! Render frames to PNG on the CPU surface

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use image::RgbaImage;
use log::info;
use strokefield_core::render::CpuSurface;

use crate::scene::{Scene, SceneArgs};
use crate::utils::create_progress_bar;

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Output PNG path
    #[arg(short, long, default_value = "strokefield.png")]
    pub output: PathBuf,

    /// Also write every Nth frame as `<stem>_<frame>.png`
    #[arg(long, value_name = "N")]
    pub every: Option<u64>,

    /// Override output width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Override output height in pixels
    #[arg(long)]
    pub height: Option<u32>,
}

pub fn execute(args: RenderArgs, quiet: bool) -> Result<()> {
    if args.every == Some(0) {
        bail!("--every must be at least 1");
    }

    let mut config = args.scene.resolve_config()?;
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    let viewport = config.viewport().context("Invalid output size")?;
    let mut surface = CpuSurface::new(viewport);
    let mut scene = Scene::build(config, &args.scene, &mut surface)?;

    let frames = scene.config.frames.max(1);
    let pb = create_progress_bar(frames, "Rendering", quiet);
    let mut last = None;

    for _ in 0..frames {
        let report = scene.tick(&mut surface)?;
        if args.every.is_some_and(|every| report.frame % every == 0) {
            save_frame(&surface, &numbered_path(&args.output, report.frame))?;
        }
        pb.inc(1);
        last = Some(report);
    }
    pb.finish_and_clear();

    save_frame(&surface, &args.output)?;
    if let Some(report) = last {
        info!(
            "Final frame {}: {}/{} visible, mean alpha {:.3}",
            report.frame,
            report.stats.visible,
            report.stats.instances,
            report.stats.mean_alpha()
        );
    }
    if !quiet {
        println!("Wrote {}", args.output.display());
    }
    Ok(())
}

fn save_frame(surface: &CpuSurface, path: &Path) -> Result<()> {
    let image = RgbaImage::from_raw(surface.width(), surface.height(), surface.to_rgba8())
        .context("Framebuffer size does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn numbered_path(output: &Path, frame: u64) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    let extension = output
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");
    output.with_file_name(format!("{stem}_{frame:05}.{extension}"))
}

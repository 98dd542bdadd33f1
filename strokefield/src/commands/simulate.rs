//! Drive frames without rasterizing and report visibility statistics

use anyhow::{Result, bail};
use clap::Args;
use serde::Serialize;
use strokefield_core::render::NullSurface;

use crate::scene::{Scene, SceneArgs};
use crate::utils::{add_table_row, create_progress_bar, create_table};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Report every Nth frame
    #[arg(long, default_value = "10", value_name = "N")]
    pub sample_every: u64,

    /// Print samples as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// One reported frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSample {
    pub frame: u64,
    pub time: f32,
    pub transition: f32,
    pub curve: f32,
    pub thickness: f32,
    pub speed: f32,
    pub visible: usize,
    pub instances: usize,
    pub mean_alpha: f64,
}

pub fn execute(args: SimulateArgs, quiet: bool) -> Result<()> {
    if args.sample_every == 0 {
        bail!("--sample-every must be at least 1");
    }

    let config = args.scene.resolve_config()?;
    let mut surface = NullSurface::default();
    let mut scene = Scene::build(config, &args.scene, &mut surface)?;

    let frames = scene.config.frames.max(1);
    let pb = create_progress_bar(frames, "Simulating", quiet || args.json);
    let mut samples = Vec::new();

    for _ in 0..frames {
        let report = scene.tick(&mut surface)?;
        let last = report.frame + 1 == frames;
        if report.frame % args.sample_every == 0 || last {
            let controls = scene.panel.state();
            samples.push(FrameSample {
                frame: report.frame,
                time: report.time,
                transition: report.uniforms.transition,
                curve: report.uniforms.curve,
                thickness: report.uniforms.line_thickness,
                speed: controls.speed,
                visible: report.stats.visible,
                instances: report.stats.instances,
                mean_alpha: report.stats.mean_alpha(),
            });
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
        return Ok(());
    }

    let mut table = create_table(&[
        "Frame",
        "Time",
        "Transition",
        "Curve",
        "Thickness",
        "Speed",
        "Visible",
        "Mean alpha",
    ]);
    for s in &samples {
        add_table_row(
            &mut table,
            vec![
                s.frame.to_string(),
                format!("{:.3}", s.time),
                format!("{:.3}", s.transition),
                format!("{:.3}", s.curve),
                format!("{:.4}", s.thickness),
                format!("{:.3}", s.speed),
                format!("{}/{}", s.visible, s.instances),
                format!("{:.4}", s.mean_alpha),
            ],
        );
    }
    table.printstd();
    Ok(())
}

//! Mask image inspection

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use glam::Vec2;
use strokefield_mask::{MASK_THRESHOLD, MaskImage};

use crate::utils::{add_table_row, create_table};

#[derive(Subcommand, Debug)]
pub enum MaskCommands {
    /// Display dimensions and coverage of a mask image
    Info {
        /// Path to the image file
        file: PathBuf,

        /// Also sample the mask on an N x N grid
        #[arg(long, value_name = "N")]
        grid: Option<u32>,
    },
}

pub fn execute(command: MaskCommands) -> Result<()> {
    match command {
        MaskCommands::Info { file, grid } => info(&file, grid),
    }
}

fn info(file: &Path, grid: Option<u32>) -> Result<()> {
    let mask = MaskImage::load(file)
        .with_context(|| format!("Failed to load mask {}", file.display()))?;

    println!("Mask: {}", file.display());
    let mut table = create_table(&["Property", "Value"]);
    add_table_row(&mut table, vec!["Width".into(), mask.width().to_string()]);
    add_table_row(&mut table, vec!["Height".into(), mask.height().to_string()]);
    add_table_row(
        &mut table,
        vec![
            "Coverage".into(),
            format!("{:.2}%", mask.coverage() * 100.0),
        ],
    );
    add_table_row(
        &mut table,
        vec![
            "Center sample".into(),
            format!("{:.3}", mask.sample(Vec2::splat(0.5))),
        ],
    );
    table.printstd();

    if let Some(n) = grid.filter(|&n| n > 0) {
        println!();
        // Top row first, matching the image as displayed
        for row in (0..n).rev() {
            let line: String = (0..n)
                .map(|col| {
                    let coord = Vec2::new(
                        (col as f32 + 0.5) / n as f32,
                        (row as f32 + 0.5) / n as f32,
                    );
                    if mask.sample(coord) >= MASK_THRESHOLD {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            println!("{line}");
        }
    }
    Ok(())
}

//! List the preset palettes

use anyhow::Result;
use clap::Args;
use strokefield_core::palette::{PRESET_PALETTES, PaletteSource, PresetPalette};

use crate::utils::{add_table_row, create_table};

#[derive(Args, Debug)]
pub struct PalettesArgs {
    /// Show one preset with normalized RGB values
    #[arg(long)]
    pub index: Option<usize>,
}

pub fn execute(args: PalettesArgs) -> Result<()> {
    match args.index {
        Some(index) => show_preset(index),
        None => {
            list_presets();
            Ok(())
        }
    }
}

fn list_presets() {
    let mut table = create_table(&["Index", "Colors"]);
    for (index, colors) in PRESET_PALETTES.iter().enumerate() {
        add_table_row(&mut table, vec![index.to_string(), colors.join(" ")]);
    }
    table.printstd();
}

fn show_preset(index: usize) -> Result<()> {
    let preset = PresetPalette::new(index)?;
    let hex = PRESET_PALETTES[preset.index()];

    println!("Palette {}", preset.index());
    let mut table = create_table(&["Slot", "Hex", "R", "G", "B"]);
    for (slot, (color, hex)) in preset.palette().colors().iter().zip(hex).enumerate() {
        add_table_row(
            &mut table,
            vec![
                slot.to_string(),
                hex.to_string(),
                format!("{:.3}", color.x),
                format!("{:.3}", color.y),
                format!("{:.3}", color.z),
            ],
        );
    }
    table.printstd();
    Ok(())
}

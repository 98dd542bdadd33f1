//! Root CLI structure for strokefield

use clap::{Parser, Subcommand};

use crate::commands::{
    config::ConfigArgs, mask::MaskCommands, palettes::PalettesArgs, render::RenderArgs,
    simulate::SimulateArgs,
};

#[derive(Parser)]
#[command(name = "strokefield")]
#[command(about = "Stroke-particle cross-dissolve between two mask images", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render frames to PNG
    Render(RenderArgs),

    /// Run frames headlessly and report visibility statistics
    Simulate(SimulateArgs),

    /// List preset palettes
    Palettes(PalettesArgs),

    /// Mask image operations
    Mask {
        #[command(subcommand)]
        command: MaskCommands,
    },

    /// Print the default configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

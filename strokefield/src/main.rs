//! Main entry point for the strokefield CLI

mod cli;
mod commands;
mod config;
mod scene;
mod utils;

use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::{Generator, generate};
use std::io;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logger; RUST_LOG still wins when set
    let default_level = match (cli.verbose, cli.quiet) {
        (0, true) => "error",
        (0, false) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Execute command
    match cli.command {
        Commands::Render(args) => commands::render::execute(args, cli.quiet),
        Commands::Simulate(args) => commands::simulate::execute(args, cli.quiet),
        Commands::Palettes(args) => commands::palettes::execute(args),
        Commands::Mask { command } => commands::mask::execute(command),
        Commands::Config(args) => commands::config::execute(args),
        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

fn print_completions<G: Generator>(shell: G, cmd: &mut clap::Command) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, &mut io::stdout());
}

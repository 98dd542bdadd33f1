//! Print the default configuration

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::config::FieldConfig;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(long, default_value = "yaml")]
    pub format: ConfigFormat,
}

pub fn execute(args: ConfigArgs) -> Result<()> {
    let config = FieldConfig::default();
    let text = match args.format {
        ConfigFormat::Yaml => config.to_yaml()?,
        ConfigFormat::Json => config.to_json()?,
    };
    println!("{}", text.trim_end());
    Ok(())
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tilelapse_core::pipeline::config::TilelapseConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Save to file instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ConfigArgs) -> Result<()> {
    let toml_str = toml::to_string_pretty(&TilelapseConfig::default())?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}

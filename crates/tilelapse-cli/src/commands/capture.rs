use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tilelapse_core::pipeline::run_capture;

use crate::progress::BarReporter;
use crate::summary::{print_capture_header, print_capture_report};

#[derive(Args)]
pub struct CaptureArgs {
    /// Snapshot root directory (overrides the config)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Parallel tile downloads (overrides the config)
    #[arg(short, long)]
    pub workers: Option<usize>,
}

pub fn run(args: &CaptureArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(ref dir) = args.output_dir {
        config.capture.output_dir = dir.clone();
    }
    if let Some(workers) = args.workers {
        config.capture.workers = workers;
    }

    let now = config.local_now()?;
    print_capture_header(&config, now);

    let report = run_capture(&config, now, Arc::new(BarReporter::new()))?;
    print_capture_report(&report);
    Ok(())
}

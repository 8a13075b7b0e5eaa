use std::path::Path;

use anyhow::Result;
use clap::Args;
use tilelapse_core::source::{validate_date_key, FrameSource};

use crate::summary::print_snapshot_list;

#[derive(Args)]
pub struct ListArgs {
    /// Day to list as YYYYMMDD (default: today in the configured offset)
    #[arg(short, long)]
    pub date: Option<String>,
}

pub fn run(args: &ListArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let date_key = match args.date {
        Some(ref date) => date.clone(),
        None => config.local_now()?.format("%Y%m%d").to_string(),
    };
    validate_date_key(&date_key)?;

    let source = FrameSource::new(&config.capture.output_dir, &config.capture.snapshot_prefix);
    let snapshots = source.list_day(&date_key)?;
    print_snapshot_list(&source.day_dir(&date_key), &snapshots);
    Ok(())
}

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tilelapse_core::deliver::{DeliveryAdapter, NoDelivery, TelegramDelivery};
use tilelapse_core::pipeline::config::TilelapseConfig;
use tilelapse_core::pipeline::run_timelapse;

use crate::progress::BarReporter;
use crate::summary::{print_timelapse_header, print_timelapse_report};

#[derive(Args)]
pub struct TimelapseArgs {
    /// Day to encode as YYYYMMDD (default: yesterday in the configured offset)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Output frame rate (overrides the config)
    #[arg(long)]
    pub fps: Option<u32>,

    /// Skip delivery even when it is enabled in the config
    #[arg(long)]
    pub no_deliver: bool,
}

pub fn run(args: &TimelapseArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(fps) = args.fps {
        config.timelapse.fps = fps;
    }
    if args.no_deliver {
        config.delivery.enabled = false;
    }
    config.validate()?;

    let date_key = match args.date {
        Some(ref date) => date.clone(),
        None => TilelapseConfig::previous_day_key(config.local_now()?),
    };
    print_timelapse_header(&config, &date_key);

    let delivery: Box<dyn DeliveryAdapter> = if config.delivery.enabled {
        Box::new(TelegramDelivery::from_env()?)
    } else {
        Box::new(NoDelivery)
    };

    let report = run_timelapse(
        &config,
        &date_key,
        delivery.as_ref(),
        Arc::new(BarReporter::new()),
    )?;
    print_timelapse_report(&report);
    Ok(())
}

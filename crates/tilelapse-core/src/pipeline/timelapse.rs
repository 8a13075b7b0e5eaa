use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::compose::{compose_snapshot, CompositionPolicy};
use crate::consts::COMPOSE_BATCH_SIZE;
use crate::deliver::{DeliveryAdapter, DeliveryOutcome};
use crate::encode::{EncodeConfig, VideoFormat, VideoSink};
use crate::error::{Result, TilelapseError};
use crate::io::latest::replace_latest;
use crate::outcome::{BatchSummary, UnitOutcome};
use crate::source::{validate_date_key, FrameSource, Snapshot};

use super::config::TilelapseConfig;
use super::types::{EncodeSummary, PipelineStage, ProgressReporter, TimelapseReport};

/// Build the timelapse for one day and hand it to `delivery`.
///
/// Writes MP4 through ffmpeg, or an animated GIF when ffmpeg is missing.
pub fn run_timelapse(
    config: &TilelapseConfig,
    date_key: &str,
    delivery: &dyn DeliveryAdapter,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<TimelapseReport> {
    let format = VideoFormat::detect();
    run_timelapse_as(
        config,
        date_key,
        format,
        |cfg| format.open(cfg),
        delivery,
        reporter,
    )
}

/// MP4 timelapse run with a caller-supplied video sink factory.
pub fn run_timelapse_with<F>(
    config: &TilelapseConfig,
    date_key: &str,
    open_sink: F,
    delivery: &dyn DeliveryAdapter,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<TimelapseReport>
where
    F: FnOnce(EncodeConfig) -> Result<Box<dyn VideoSink>>,
{
    run_timelapse_as(
        config,
        date_key,
        VideoFormat::Mp4,
        open_sink,
        delivery,
        reporter,
    )
}

/// Timelapse run writing `format`-named outputs through `open_sink`.
///
/// The sink writes to a staging file next to the output, which is renamed
/// into place once the encode succeeds. A failed encode removes the staging
/// file and leaves both the previous output and the latest copy untouched.
pub fn run_timelapse_as<F>(
    config: &TilelapseConfig,
    date_key: &str,
    format: VideoFormat,
    open_sink: F,
    delivery: &dyn DeliveryAdapter,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<TimelapseReport>
where
    F: FnOnce(EncodeConfig) -> Result<Box<dyn VideoSink>>,
{
    validate_date_key(date_key)?;
    let settings = &config.timelapse;

    reporter.begin_stage(PipelineStage::Listing, None);
    let source = FrameSource::new(&config.capture.output_dir, &config.capture.snapshot_prefix);
    let snapshots = source.list_day(date_key)?;
    reporter.finish_stage();

    if snapshots.is_empty() {
        return Err(TilelapseError::NoSnapshots {
            dir: source.day_dir(date_key),
        });
    }

    let (width, height) = settings.canvas_size(&snapshots)?;
    let policy = settings.policy(width, height);
    let output_path = settings.video_path_as(date_key, format);
    let staging_path = staging_path(&output_path);
    let encode_cfg = EncodeConfig::new(&staging_path, width, height, settings.fps)
        .with_codec(settings.codec.clone());
    encode_cfg.validate()?;

    info!(
        date = date_key,
        snapshots = snapshots.len(),
        width,
        height,
        fps = settings.fps,
        format = %format,
        "Building timelapse"
    );

    let sink = open_sink(encode_cfg)?;
    let encode = match encode_snapshots(&snapshots, &policy, sink, &reporter) {
        Ok(summary) => summary,
        Err(e) => {
            discard_partial(&staging_path);
            return Err(e);
        }
    };
    if let Err(e) = promote(&staging_path, &output_path) {
        discard_partial(&staging_path);
        return Err(e);
    }

    let latest_path = settings.latest_path_as(format);
    reporter.begin_stage(PipelineStage::Publishing, None);
    replace_latest(&output_path, &latest_path)?;
    reporter.finish_stage();

    let delivery = if config.delivery.enabled {
        reporter.begin_stage(PipelineStage::Delivering, None);
        let outcome = delivery.deliver(&output_path, &config.delivery.caption(date_key));
        reporter.finish_stage();
        outcome
    } else {
        DeliveryOutcome::Skipped("delivery disabled".into())
    };
    match &delivery {
        DeliveryOutcome::Failed(reason) => warn!(reason = %reason, "Delivery failed"),
        outcome => info!(outcome = %outcome, "Delivery finished"),
    }

    Ok(TimelapseReport {
        date_key: date_key.to_string(),
        snapshots: snapshots.len(),
        canvas: (width, height),
        format,
        encode,
        output_path,
        latest_path,
        delivery,
    })
}

/// Compose `snapshots` in parallel batches and write them, in order, to `sink`.
///
/// Snapshots that cannot be read or composed are skipped and counted. A
/// sink write error aborts the run. The sink is closed exactly once on
/// every path.
pub fn encode_snapshots(
    snapshots: &[Snapshot],
    policy: &CompositionPolicy,
    mut sink: Box<dyn VideoSink>,
    reporter: &Arc<dyn ProgressReporter>,
) -> Result<EncodeSummary> {
    reporter.begin_stage(PipelineStage::Encoding, Some(snapshots.len()));

    let mut outcomes = Vec::with_capacity(snapshots.len());
    let written = write_batches(snapshots, policy, sink.as_mut(), &mut outcomes, reporter);
    let frames_written = sink.frames_written();
    let closed = sink.close();
    reporter.finish_stage();

    if let Err(e) = written {
        if let Err(close_err) = closed {
            warn!(error = %close_err, "Encoder close failed after a write error");
        }
        return Err(e);
    }
    let frames = BatchSummary::from_outcomes(&outcomes);
    if frames_written == 0 {
        if let Err(e) = closed {
            debug!(error = %e, "Encoder close failed after zero frames");
        }
        return Err(TilelapseError::NoFramesWritten {
            skipped: frames.failed,
        });
    }
    closed?;

    info!(written = frames_written, frames = %frames, "Frames encoded");
    Ok(EncodeSummary {
        outcomes,
        frames,
        frames_written,
    })
}

fn write_batches(
    snapshots: &[Snapshot],
    policy: &CompositionPolicy,
    sink: &mut dyn VideoSink,
    outcomes: &mut Vec<UnitOutcome>,
    reporter: &Arc<dyn ProgressReporter>,
) -> Result<()> {
    for (batch_index, batch) in snapshots.chunks(COMPOSE_BATCH_SIZE).enumerate() {
        let first_position = batch_index * COMPOSE_BATCH_SIZE + 1;
        let composed: Vec<_> = batch
            .par_iter()
            .enumerate()
            .map(|(i, snapshot)| compose_snapshot(snapshot, first_position + i, policy))
            .collect();

        for (snapshot, frame) in batch.iter().zip(composed) {
            match frame {
                Ok(frame) => {
                    sink.write_frame(&frame.frame)?;
                    outcomes.push(UnitOutcome::Success);
                }
                Err(e) => {
                    warn!(file = %snapshot.file_name, error = %e, "Skipping unreadable snapshot");
                    outcomes.push(UnitOutcome::Failed(e.to_string()));
                }
            }
            reporter.advance(outcomes.len());
        }
    }
    Ok(())
}

/// `timelapse_20250101.mp4` stages as `timelapse_20250101.partial.mp4`, so
/// ffmpeg still picks the muxer from the extension.
fn staging_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match output.extension() {
        Some(ext) => output.with_file_name(format!("{stem}.partial.{}", ext.to_string_lossy())),
        None => output.with_file_name(format!("{stem}.partial")),
    }
}

fn promote(staging: &Path, output: &Path) -> Result<()> {
    if output.exists() {
        fs::remove_file(output)?;
    }
    fs::rename(staging, output)?;
    debug!(path = %output.display(), "Moved encoded video into place");
    Ok(())
}

fn discard_partial(path: &Path) {
    if path.exists() {
        match fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "Removed partial video"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove partial video"),
        }
    }
}

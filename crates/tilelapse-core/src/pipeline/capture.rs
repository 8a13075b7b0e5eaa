use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::consts::SNAPSHOT_EXTENSION;
use crate::error::{Result, TilelapseError};
use crate::fetch::{Backoff, HttpClient, ReqwestClient, Sleeper, ThreadSleeper, TileFetcher};
use crate::io::image_io::save_png;
use crate::io::latest::replace_latest;
use crate::mosaic::{assemble, fetched_count};
use crate::outcome::UnitOutcome;
use crate::source::SnapshotStamp;

use super::config::TilelapseConfig;
use super::types::{CaptureReport, PipelineStage, ProgressReporter};

/// Run one capture cycle against the configured tile server.
///
/// `now` is the local capture time; it names the snapshot and its day directory.
pub fn run_capture(
    config: &TilelapseConfig,
    now: NaiveDateTime,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<CaptureReport> {
    let client = ReqwestClient::new(config.capture.request_timeout(), &config.capture.user_agent)?;
    capture_with_client(
        config,
        Arc::new(client),
        Arc::new(ThreadSleeper),
        now,
        reporter,
    )
}

/// Capture cycle with an injected HTTP client and sleeper.
///
/// Fails with [`TilelapseError::NoTilesFetched`] before touching the disk
/// when every tile of the grid is absent.
pub fn capture_with_client(
    config: &TilelapseConfig,
    client: Arc<dyn HttpClient>,
    sleeper: Arc<dyn Sleeper>,
    now: NaiveDateTime,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<CaptureReport> {
    let capture = &config.capture;
    capture.validate()?;
    let grid = capture.grid()?;
    let total = grid.cell_count();

    info!(
        columns = grid.columns(),
        rows = grid.rows(),
        tiles = total,
        workers = capture.workers,
        "Starting capture"
    );

    let fetcher = TileFetcher::new(
        client,
        capture.url_template.clone(),
        Backoff::new(capture.max_retries),
    )
    .with_sleeper(sleeper);

    reporter.begin_stage(PipelineStage::Fetching, Some(total));
    let results =
        fetcher.fetch_all_with_progress(&grid, capture.workers, |done| reporter.advance(done))?;
    reporter.finish_stage();

    let fetched = fetched_count(&results);
    if fetched == 0 {
        warn!(total, "No tiles fetched, skipping snapshot");
        return Err(TilelapseError::NoTilesFetched { total });
    }
    info!(fetched, total, "Tiles fetched");

    reporter.begin_stage(PipelineStage::Assembling, None);
    let assembly = assemble(&grid, &results, capture.background())?;
    reporter.finish_stage();

    let decode_failures: Vec<_> = assembly
        .outcomes
        .iter()
        .zip(grid.coordinates())
        .filter_map(|(outcome, &coord)| match outcome {
            UnitOutcome::Failed(reason) => Some((coord, reason.clone())),
            _ => None,
        })
        .collect();

    let stamp = SnapshotStamp::from_datetime(&now);
    let snapshot_path = capture
        .day_dir(stamp.date())
        .join(stamp.file_name(&capture.snapshot_prefix, SNAPSHOT_EXTENSION));
    let latest_path = capture.latest_path();

    reporter.begin_stage(PipelineStage::Saving, None);
    save_png(&assembly.image, &snapshot_path)?;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Publishing, None);
    replace_latest(&snapshot_path, &latest_path)?;
    reporter.finish_stage();

    info!(
        path = %snapshot_path.display(),
        tiles = %assembly.summary,
        "Snapshot saved"
    );

    Ok(CaptureReport {
        tiles: assembly.summary,
        decode_failures,
        canvas: assembly.image.dimensions(),
        snapshot_path,
        latest_path,
    })
}

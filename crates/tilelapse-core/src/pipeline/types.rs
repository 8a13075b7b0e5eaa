use std::path::PathBuf;

use crate::deliver::DeliveryOutcome;
use crate::encode::VideoFormat;
use crate::mosaic::TileCoordinate;
use crate::outcome::{BatchSummary, UnitOutcome};

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Fetching,
    Assembling,
    Saving,
    Listing,
    Encoding,
    Publishing,
    Delivering,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetching => write!(f, "Fetching tiles"),
            Self::Assembling => write!(f, "Assembling mosaic"),
            Self::Saving => write!(f, "Saving snapshot"),
            Self::Listing => write!(f, "Listing snapshots"),
            Self::Encoding => write!(f, "Encoding frames"),
            Self::Publishing => write!(f, "Updating latest"),
            Self::Delivering => write!(f, "Delivering video"),
        }
    }
}

/// Thread-safe progress reporting for the pipelines.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items
    /// in this stage (tiles, frames), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// `items_done` work items of the current stage have completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// What one capture cycle produced.
#[derive(Clone, Debug)]
pub struct CaptureReport {
    /// Per-tile outcomes folded into counts.
    pub tiles: BatchSummary,
    /// Tiles that arrived but could not be decoded.
    pub decode_failures: Vec<(TileCoordinate, String)>,
    pub canvas: (u32, u32),
    pub snapshot_path: PathBuf,
    pub latest_path: PathBuf,
}

/// Frame-level result of streaming snapshots into a video sink.
#[derive(Clone, Debug, Default)]
pub struct EncodeSummary {
    /// One entry per input snapshot, in encode order.
    pub outcomes: Vec<UnitOutcome>,
    pub frames: BatchSummary,
    pub frames_written: usize,
}

/// What one timelapse run produced.
#[derive(Clone, Debug)]
pub struct TimelapseReport {
    pub date_key: String,
    pub snapshots: usize,
    pub canvas: (u32, u32),
    pub format: VideoFormat,
    pub encode: EncodeSummary,
    pub output_path: PathBuf,
    pub latest_path: PathBuf,
    pub delivery: DeliveryOutcome,
}

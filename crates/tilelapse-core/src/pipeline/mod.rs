pub mod config;
mod capture;
mod timelapse;
mod types;

pub use capture::{capture_with_client, run_capture};
pub use timelapse::{encode_snapshots, run_timelapse, run_timelapse_as, run_timelapse_with};
pub use types::{
    CaptureReport, EncodeSummary, NoOpReporter, PipelineStage, ProgressReporter, TimelapseReport,
};

//! Snapshot naming and per-day discovery.

mod day;
mod naming;

pub use day::{derive_canvas_size, sort_snapshots, validate_date_key, FrameSource, Snapshot};
pub use naming::SnapshotStamp;

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, info, warn};

use crate::consts::SNAPSHOT_EXTENSION;
use crate::error::{Result, TilelapseError};

use super::naming::SnapshotStamp;

/// One persisted mosaic on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub path: PathBuf,
    pub file_name: String,
    /// `None` when the name does not follow the snapshot pattern.
    pub stamp: Option<SnapshotStamp>,
    /// Timestamp key, or the raw file name when the stamp is missing.
    pub sort_key: String,
}

impl Snapshot {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stamp = SnapshotStamp::parse_file_name(&file_name);
        let sort_key = stamp
            .as_ref()
            .map_or_else(|| file_name.clone(), SnapshotStamp::sort_key);

        Self {
            path,
            file_name,
            stamp,
            sort_key,
        }
    }

    /// Human-readable timestamp, or `Frame N` for a 1-based `position`
    /// when the name carries no stamp.
    pub fn label(&self, position: usize) -> String {
        match &self.stamp {
            Some(stamp) => stamp.display(),
            None => format!("Frame {position}"),
        }
    }
}

/// Order by timestamp key; equal keys fall back to file name.
pub fn sort_snapshots(snapshots: &mut [Snapshot]) {
    snapshots.sort_by(|a, b| {
        a.sort_key
            .cmp(&b.sort_key)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });
}

pub fn validate_date_key(date_key: &str) -> Result<()> {
    if date_key.len() == 8 && date_key.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(TilelapseError::config(format!(
            "Date must be YYYYMMDD, got '{date_key}'"
        )))
    }
}

/// Discovers snapshots stored as `<root>/<YYYYMMDD>/<prefix>_*.<ext>`.
#[derive(Clone, Debug)]
pub struct FrameSource {
    root: PathBuf,
    prefix: String,
    extension: String,
}

impl FrameSource {
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
            extension: SNAPSHOT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn day_dir(&self, date_key: &str) -> PathBuf {
        self.root.join(date_key)
    }

    /// All snapshots for `date_key`, oldest first. A missing day directory
    /// yields an empty list.
    pub fn list_day(&self, date_key: &str) -> Result<Vec<Snapshot>> {
        validate_date_key(date_key)?;
        let dir = self.day_dir(date_key);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "Day directory does not exist");
            return Ok(Vec::new());
        }

        let dir_str = dir.to_str().ok_or_else(|| {
            TilelapseError::config(format!("Non UTF-8 path: {}", dir.display()))
        })?;
        let pattern = format!(
            "{}/{}_*.{}",
            Pattern::escape(dir_str),
            Pattern::escape(&self.prefix),
            Pattern::escape(&self.extension)
        );

        let entries = glob::glob(&pattern)
            .map_err(|e| TilelapseError::config(format!("Invalid snapshot pattern: {e}")))?;

        let mut snapshots = Vec::new();
        for entry in entries {
            let path = entry.map_err(glob::GlobError::into_error)?;
            if path.is_file() {
                snapshots.push(Snapshot::from_path(path));
            }
        }
        sort_snapshots(&mut snapshots);

        let malformed = snapshots.iter().filter(|s| s.stamp.is_none()).count();
        if malformed > 0 {
            warn!(malformed, "Snapshots without a timestamp are ordered by file name");
        }
        info!(date = date_key, count = snapshots.len(), "Listed snapshots");
        Ok(snapshots)
    }
}

/// Canvas size from the most recent readable snapshot, scaled and floored.
pub fn derive_canvas_size(snapshots: &[Snapshot], scale: f64) -> Result<(u32, u32)> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(TilelapseError::config(format!(
            "Scale must be a positive number, got {scale}"
        )));
    }

    for snapshot in snapshots.iter().rev() {
        match image::image_dimensions(&snapshot.path) {
            Ok((w, h)) => {
                let width = scaled(w, scale);
                let height = scaled(h, scale);
                info!(
                    source = %snapshot.file_name,
                    native_width = w,
                    native_height = h,
                    width,
                    height,
                    "Derived canvas size"
                );
                return Ok((width, height));
            }
            Err(e) => {
                warn!(file = %snapshot.file_name, error = %e, "Cannot read snapshot size");
            }
        }
    }

    let dir = snapshots
        .first()
        .and_then(|s| s.path.parent())
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Err(TilelapseError::NoSnapshots { dir })
}

fn scaled(extent: u32, scale: f64) -> u32 {
    ((f64::from(extent) * scale).floor() as u32).max(1)
}

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::encode::ensure_parent_dir;
use crate::error::Result;

/// Point `latest` at a copy of `source` by removing the old copy, then copying.
///
/// Not atomic: a crash between the two steps leaves `latest` missing or
/// stale, but never half-written from a failed run.
pub fn replace_latest(source: &Path, latest: &Path) -> Result<()> {
    ensure_parent_dir(latest)?;
    if latest.exists() {
        fs::remove_file(latest)?;
    }
    fs::copy(source, latest)?;
    debug!(source = %source.display(), latest = %latest.display(), "Updated latest copy");
    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::constants::EXPORT_FILENAME;
use crate::timeline::snapshot::{SnapshotError, TimelineSnapshot};

/// Default export location inside `dir`.
pub fn export_path(dir: &Path) -> PathBuf {
    dir.join(EXPORT_FILENAME)
}

/// Writes `snapshot` as pretty-printed JSON, replacing any existing file.
pub fn write_snapshot(path: &Path, snapshot: &TimelineSnapshot) -> Result<(), SnapshotError> {
    let json = snapshot.to_json_pretty()?;
    fs::write(path, json).map_err(|source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Exported {} segments to {}",
        snapshot.timeline_data.len(),
        path.display()
    );
    Ok(())
}

/// Reads the raw document text. Parsing is left to the session so a bad
/// document leaves it untouched.
pub fn read_document(path: &Path) -> Result<String, SnapshotError> {
    fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_snapshot(path: &Path) -> Result<TimelineSnapshot, SnapshotError> {
    TimelineSnapshot::from_json(&read_document(path)?)
}

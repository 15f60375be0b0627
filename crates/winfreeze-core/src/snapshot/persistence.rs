//! Snapshot file persistence
//!
//! Snapshots are stored as a pretty-printed JSON array, written atomically
//! through a temp file and rename.

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::SnapshotError;
use super::types::WindowSnapshot;

const SNAPSHOT_FILE_NAME: &str = "windows.json";

/// Default snapshot location: `~/.winfreeze/windows.json`.
///
/// Falls back to the temp directory if the home directory cannot be determined.
pub fn default_snapshot_path() -> PathBuf {
    let base = match dirs::home_dir() {
        Some(home) => home.join(".winfreeze"),
        None => {
            tracing::warn!(
                event = "core.snapshot.home_dir_missing",
                message = "Could not find home directory, using temp directory"
            );
            std::env::temp_dir().join(".winfreeze")
        }
    };
    base.join(SNAPSHOT_FILE_NAME)
}

pub fn to_json(snapshots: &[WindowSnapshot]) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(snapshots).map_err(|e| SnapshotError::SaveFailed {
        message: format!("Failed to serialize snapshots: {}", e),
    })
}

pub fn from_json(content: &str, path: &Path) -> Result<Vec<WindowSnapshot>, SnapshotError> {
    serde_json::from_str(content).map_err(|e| SnapshotError::ParseFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        tracing::warn!(
            event = "core.snapshot.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
            message = "Failed to clean up temp file after operation error"
        );
    }
}

/// Save snapshots to `path`, creating the parent directory if needed.
pub fn save_snapshots(path: &Path, snapshots: &[WindowSnapshot]) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| SnapshotError::SaveFailed {
            message: format!("Failed to create directory ({}): {}", parent.display(), e),
        })?;
    }

    let json = to_json(snapshots)?;
    let temp_file = path.with_extension("json.tmp");

    if let Err(e) = fs::write(&temp_file, &json) {
        cleanup_temp_file(&temp_file, &e);
        return Err(SnapshotError::SaveFailed {
            message: format!("Failed to write snapshot file ({}): {}", temp_file.display(), e),
        });
    }

    if let Err(e) = fs::rename(&temp_file, path) {
        cleanup_temp_file(&temp_file, &e);
        return Err(SnapshotError::SaveFailed {
            message: format!("Failed to move snapshot file into place ({}): {}", path.display(), e),
        });
    }

    tracing::info!(
        event = "core.snapshot.saved",
        path = %path.display(),
        count = snapshots.len()
    );

    Ok(())
}

/// Load snapshots from `path`.
///
/// Any problem with the file is an error; there is no partial recovery.
pub fn load_snapshots(path: &Path) -> Result<Vec<WindowSnapshot>, SnapshotError> {
    if !path.exists() {
        return Err(SnapshotError::NotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| {
        tracing::error!(
            event = "core.snapshot.load_failed",
            path = %path.display(),
            error = %e
        );
        SnapshotError::ReadFailed {
            path: path.display().to_string(),
            source: e,
        }
    })?;

    let snapshots = from_json(&content, path).inspect_err(|e| {
        tracing::error!(
            event = "core.snapshot.json_parse_failed",
            path = %path.display(),
            error = %e
        );
    })?;

    tracing::info!(
        event = "core.snapshot.loaded",
        path = %path.display(),
        count = snapshots.len()
    );

    Ok(snapshots)
}

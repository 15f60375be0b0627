use crate::errors::FreezeError;
use crate::snapshot::SnapshotError;
use crate::window::WindowError;

/// Failures that abort a restore before any window is touched.
///
/// Per-window problems (unmatched, skipped, unconverged) are reported in the
/// [`RestoreReport`](super::RestoreReport) instead.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("Cannot restore windows: {source}")]
    Enumeration {
        #[from]
        source: WindowError,
    },

    #[error(transparent)]
    Snapshot {
        #[from]
        source: SnapshotError,
    },
}

impl FreezeError for RestoreError {
    fn error_code(&self) -> &'static str {
        match self {
            RestoreError::Enumeration { .. } => "RESTORE_ENUMERATION_FAILED",
            RestoreError::Snapshot { source } => source.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            RestoreError::Enumeration { source } => source.is_user_error(),
            RestoreError::Snapshot { source } => source.is_user_error(),
        }
    }
}

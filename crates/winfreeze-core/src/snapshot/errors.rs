use crate::errors::FreezeError;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot file not found: '{path}'")]
    NotFound { path: String },

    #[error("Failed to read snapshot file '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot file '{path}' is malformed: {message}")]
    ParseFailed { path: String, message: String },

    #[error("Failed to save snapshot: {message}")]
    SaveFailed { message: String },
}

impl FreezeError for SnapshotError {
    fn error_code(&self) -> &'static str {
        match self {
            SnapshotError::NotFound { .. } => "SNAPSHOT_NOT_FOUND",
            SnapshotError::ReadFailed { .. } => "SNAPSHOT_READ_FAILED",
            SnapshotError::ParseFailed { .. } => "SNAPSHOT_PARSE_FAILED",
            SnapshotError::SaveFailed { .. } => "SNAPSHOT_SAVE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            SnapshotError::NotFound { .. } | SnapshotError::ParseFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_not_found_error() {
        let error = SnapshotError::NotFound {
            path: "/tmp/windows.json".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Snapshot file not found: '/tmp/windows.json'"
        );
        assert_eq!(error.error_code(), "SNAPSHOT_NOT_FOUND");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_read_failed_keeps_source() {
        let error = SnapshotError::ReadFailed {
            path: "/tmp/windows.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(error.source().is_some());
        assert!(!error.is_user_error());
    }
}

use crate::errors::FreezeError;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Failed to enumerate on-screen windows: {message}")]
    EnumerationFailed { message: String },

    #[error(
        "Accessibility permission required: enable in System Settings > Privacy & Security > Accessibility"
    )]
    AccessibilityPermissionDenied,

    #[error("Cannot access windows for PID {pid}: {message}")]
    ControllableWindowsUnavailable { pid: i32, message: String },

    #[error("Failed to read window {attribute}: {message}")]
    AttributeReadFailed {
        attribute: &'static str,
        message: String,
    },

    #[error("Failed to set window {attribute}: {message}")]
    AttributeWriteFailed {
        attribute: &'static str,
        message: String,
    },

    #[error("Window control is only supported on macOS")]
    UnsupportedPlatform,
}

impl FreezeError for WindowError {
    fn error_code(&self) -> &'static str {
        match self {
            WindowError::EnumerationFailed { .. } => "WINDOW_ENUMERATION_FAILED",
            WindowError::AccessibilityPermissionDenied => "WINDOW_ACCESSIBILITY_DENIED",
            WindowError::ControllableWindowsUnavailable { .. } => "WINDOW_AX_UNAVAILABLE",
            WindowError::AttributeReadFailed { .. } => "WINDOW_ATTRIBUTE_READ_FAILED",
            WindowError::AttributeWriteFailed { .. } => "WINDOW_ATTRIBUTE_WRITE_FAILED",
            WindowError::UnsupportedPlatform => "WINDOW_UNSUPPORTED_PLATFORM",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            WindowError::AccessibilityPermissionDenied | WindowError::UnsupportedPlatform
        )
    }
}

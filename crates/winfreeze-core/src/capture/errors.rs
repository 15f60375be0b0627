use crate::errors::FreezeError;
use crate::window::WindowError;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Cannot capture windows: {source}")]
    Enumeration {
        #[from]
        source: WindowError,
    },
}

impl FreezeError for CaptureError {
    fn error_code(&self) -> &'static str {
        match self {
            CaptureError::Enumeration { .. } => "CAPTURE_ENUMERATION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            CaptureError::Enumeration { source } => source.is_user_error(),
        }
    }
}

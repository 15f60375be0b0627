pub mod errors;
pub mod handler;
pub mod types;

pub use errors::CaptureError;
pub use handler::capture;
pub use types::{CaptureOptions, TitleSource};

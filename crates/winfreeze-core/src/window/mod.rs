//! Window enumeration and control.
//!
//! [`WindowSource`] is the boundary between the capture/restore engines and
//! the host windowing system. On macOS, [`NativeWindowSource`] is backed by
//! the CoreGraphics window list and the Accessibility API; elsewhere it fails
//! with [`WindowError::UnsupportedPlatform`].

pub mod errors;
#[cfg(target_os = "macos")]
mod macos;
pub mod traits;
pub mod types;
#[cfg(not(target_os = "macos"))]
mod unsupported;

pub use errors::WindowError;
pub use traits::{WindowHandle, WindowSource};
pub use types::{STANDARD_WINDOW_LAYER, ScreenWindow};

#[cfg(target_os = "macos")]
pub use macos::{AxWindow, MacWindowSource as NativeWindowSource};
#[cfg(not(target_os = "macos"))]
pub use unsupported::UnsupportedWindowSource as NativeWindowSource;

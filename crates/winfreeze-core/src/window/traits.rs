//! Window backend trait definitions.

use super::errors::WindowError;
use super::types::ScreenWindow;
use crate::geometry::{Point, Rect, Size};

/// A controllable window belonging to one process.
///
/// Handles are only valid for the pass that fetched them and must not be
/// kept across passes.
pub trait WindowHandle {
    /// Window title, if the window exposes one.
    fn title(&self) -> Option<String>;

    fn position(&self) -> Result<Point, WindowError>;

    fn size(&self) -> Result<Size, WindowError>;

    fn set_position(&self, position: Point) -> Result<(), WindowError>;

    fn set_size(&self, size: Size) -> Result<(), WindowError>;

    /// Current frame, or `None` when either attribute is unreadable.
    fn frame(&self) -> Option<Rect> {
        let position = self.position().ok()?;
        let size = self.size().ok()?;
        Some(Rect::new(position, size))
    }
}

/// Source of both window views.
///
/// The coarse view lists every on-screen window; the fine view lists the
/// controllable handles of one process. The two share no identifiers.
pub trait WindowSource {
    type Handle: WindowHandle;

    /// Snapshot-in-time list of visible windows across all processes.
    fn list_on_screen_windows(&self) -> Result<Vec<ScreenWindow>, WindowError>;

    /// Controllable windows of the process `pid`, in the order the process
    /// reports them.
    fn list_controllable_windows(&self, pid: i32) -> Result<Vec<Self::Handle>, WindowError>;
}

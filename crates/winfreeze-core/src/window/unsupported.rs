use super::errors::WindowError;
use super::traits::{WindowHandle, WindowSource};
use super::types::ScreenWindow;
use crate::geometry::{Point, Size};

/// Placeholder source for hosts without a supported window backend.
#[derive(Debug)]
pub struct UnsupportedWindowSource {
    _private: (),
}

impl UnsupportedWindowSource {
    pub fn new() -> Result<Self, WindowError> {
        Err(WindowError::UnsupportedPlatform)
    }
}

/// Uninhabited: an unsupported source never yields handles.
#[derive(Debug)]
pub enum NoWindow {}

impl WindowHandle for NoWindow {
    fn title(&self) -> Option<String> {
        match *self {}
    }

    fn position(&self) -> Result<Point, WindowError> {
        match *self {}
    }

    fn size(&self) -> Result<Size, WindowError> {
        match *self {}
    }

    fn set_position(&self, _position: Point) -> Result<(), WindowError> {
        match *self {}
    }

    fn set_size(&self, _size: Size) -> Result<(), WindowError> {
        match *self {}
    }
}

impl WindowSource for UnsupportedWindowSource {
    type Handle = NoWindow;

    fn list_on_screen_windows(&self) -> Result<Vec<ScreenWindow>, WindowError> {
        Err(WindowError::UnsupportedPlatform)
    }

    fn list_controllable_windows(&self, _pid: i32) -> Result<Vec<NoWindow>, WindowError> {
        Err(WindowError::UnsupportedPlatform)
    }
}

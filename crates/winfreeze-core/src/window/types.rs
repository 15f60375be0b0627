use serde::Serialize;

use crate::geometry::Rect;

/// Window layer of regular application windows. Menu bar, dock and
/// overlays sit on other layers.
pub const STANDARD_WINDOW_LAYER: i32 = 0;

/// One entry of the system-wide on-screen window list.
///
/// Every field is optional because the window server may omit any of them;
/// consumers decide which fields they require.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScreenWindow {
    /// Window server identifier. Not stable across sessions.
    pub window_id: Option<u32>,
    pub pid: Option<i32>,
    pub app_name: Option<String>,
    pub bounds: Option<Rect>,
    pub layer: Option<i32>,
    /// Window list title. Often empty without screen recording permission.
    pub name: Option<String>,
}

impl ScreenWindow {
    /// A complete entry with every required field present.
    pub fn new(
        window_id: u32,
        pid: i32,
        app_name: impl Into<String>,
        bounds: Rect,
        layer: i32,
    ) -> Self {
        Self {
            window_id: Some(window_id),
            pid: Some(pid),
            app_name: Some(app_name.into()),
            bounds: Some(bounds),
            layer: Some(layer),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_standard_layer(&self) -> bool {
        self.layer == Some(STANDARD_WINDOW_LAYER)
    }

    /// Whether this entry carries the given `(window_id, pid)` identity.
    pub fn has_identity(&self, window_id: u32, pid: i32) -> bool {
        self.window_id == Some(window_id) && self.pid == Some(pid)
    }
}

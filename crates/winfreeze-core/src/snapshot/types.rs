use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// One window as recorded at capture time.
///
/// The serialized key names and their order are part of the file format:
///
/// ```json
/// {
///   "appName": "Editor",
///   "windowId": 7,
///   "pid": 100,
///   "position": [10.0, 20.0],
///   "size": [800.0, 600.0],
///   "title": "main.rs"
/// }
/// ```
///
/// `title` is omitted when absent; an explicit `null` also reads as absent.
/// `(window_id, pid)` is unique at capture time but only a hint of identity
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    app_name: String,
    window_id: u32,
    pid: i32,
    position: Point,
    size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

impl WindowSnapshot {
    pub fn new(
        app_name: impl Into<String>,
        window_id: u32,
        pid: i32,
        position: Point,
        size: Size,
        title: Option<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            window_id,
            pid,
            position,
            size,
            title,
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn window_id(&self) -> u32 {
        self.window_id
    }

    pub fn pid(&self) -> i32 {
        self.pid
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn frame(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

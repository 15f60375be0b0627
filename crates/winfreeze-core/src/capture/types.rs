use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where captured window titles come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSource {
    /// Title of the geometrically closest Accessibility window of the owner.
    #[default]
    Accessibility,
    /// Name reported by the system window list itself.
    WindowList,
    /// Never record titles.
    None,
}

impl TitleSource {
    pub const VALUES: [&'static str; 3] = ["accessibility", "window_list", "none"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TitleSource::Accessibility => "accessibility",
            TitleSource::WindowList => "window_list",
            TitleSource::None => "none",
        }
    }
}

impl fmt::Display for TitleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TitleSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accessibility" => Ok(TitleSource::Accessibility),
            "window_list" => Ok(TitleSource::WindowList),
            "none" => Ok(TitleSource::None),
            other => Err(format!(
                "Unknown title source '{}'. Expected one of: {}",
                other,
                Self::VALUES.join(", ")
            )),
        }
    }
}

/// Options for a capture pass.
#[derive(Debug, Clone, Default)]
pub struct CaptureOptions {
    pub title_source: TitleSource,
}

impl CaptureOptions {
    pub fn new(title_source: TitleSource) -> Self {
        Self { title_source }
    }
}

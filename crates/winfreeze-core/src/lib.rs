//! winfreeze-core: Core library for capturing and restoring window geometry
//!
//! This library snapshots the position, size and title of every regular
//! on-screen window, persists the snapshot as JSON, and later re-associates
//! each record with a live window and drives it back to its recorded
//! geometry. It is used by the `winfreeze` CLI.
//!
//! # Main Entry Points
//!
//! - [`capture`] - Snapshot the current on-screen windows
//! - [`restore`] - Reconcile snapshots and reposition matched windows
//! - [`snapshot`] - Snapshot record and JSON persistence
//! - [`config`] - Configuration management
//! - [`window`] - Window enumeration and control backends

pub mod capture;
pub mod config;
pub mod errors;
pub mod events;
pub mod geometry;
pub mod logging;
pub mod reconcile;
pub mod reposition;
pub mod restore;
pub mod snapshot;
pub mod window;

#[cfg(test)]
mod test_support;

// Re-export commonly used types at crate root for convenience
pub use capture::{CaptureError, CaptureOptions, TitleSource};
pub use config::FreezeConfig;
pub use errors::{ConfigError, FreezeError, FreezeResult};
pub use geometry::{Point, Rect, Size};
pub use reconcile::MatchTier;
pub use reposition::{Clock, RepositionOptions, SystemClock};
pub use restore::{OutcomeStatus, RestoreError, RestoreReport, WindowOutcome};
pub use snapshot::{SnapshotError, WindowSnapshot};
pub use window::{NativeWindowSource, ScreenWindow, WindowError, WindowHandle, WindowSource};

// Re-export handler functions as the primary API
pub use capture::capture;
pub use restore::{reconcile_and_reposition, restore_from_file};

// Re-export logging initialization
pub use logging::init_logging;

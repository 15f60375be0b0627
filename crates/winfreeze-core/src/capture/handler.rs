use tracing::{debug, info, warn};

use super::errors::CaptureError;
use super::types::{CaptureOptions, TitleSource};
use crate::geometry::{Rect, closest};
use crate::snapshot::WindowSnapshot;
use crate::window::{ScreenWindow, WindowHandle, WindowSource};

/// Capture every regular application window currently on screen.
///
/// Entries missing an id, pid, app name, bounds or layer are dropped, as are
/// entries off the standard layer (menu bar, dock, overlays). Snapshots are
/// returned in window list order. Failing to obtain the window list aborts
/// the capture with no partial output.
pub fn capture<S: WindowSource>(
    source: &S,
    options: &CaptureOptions,
) -> Result<Vec<WindowSnapshot>, CaptureError> {
    info!(
        event = "core.capture.started",
        title_source = %options.title_source
    );

    let windows = source.list_on_screen_windows().inspect_err(|e| {
        warn!(event = "core.capture.enumeration_failed", error = %e);
    })?;

    let mut incomplete_count = 0;
    let mut off_layer_count = 0;
    let mut snapshots = Vec::new();

    for window in &windows {
        let (Some(window_id), Some(pid), Some(app_name), Some(bounds), Some(_)) = (
            window.window_id,
            window.pid,
            window.app_name.as_deref(),
            window.bounds,
            window.layer,
        ) else {
            incomplete_count += 1;
            continue;
        };

        if !window.is_standard_layer() {
            off_layer_count += 1;
            continue;
        }

        let title = resolve_title(source, options.title_source, window, pid, &bounds);

        info!(
            event = "core.capture.window_saved",
            app_name = app_name,
            window_id = window_id,
            pid = pid,
            x = bounds.origin.x,
            y = bounds.origin.y
        );

        snapshots.push(WindowSnapshot::new(
            app_name,
            window_id,
            pid,
            bounds.origin,
            bounds.size,
            title,
        ));
    }

    if incomplete_count > 0 {
        debug!(
            event = "core.capture.incomplete_entries_skipped",
            count = incomplete_count
        );
    }

    info!(
        event = "core.capture.completed",
        count = snapshots.len(),
        off_layer_count = off_layer_count,
        incomplete_count = incomplete_count
    );

    Ok(snapshots)
}

fn resolve_title<S: WindowSource>(
    source: &S,
    title_source: TitleSource,
    window: &ScreenWindow,
    pid: i32,
    bounds: &Rect,
) -> Option<String> {
    match title_source {
        TitleSource::Accessibility => accessibility_title(source, pid, bounds),
        TitleSource::WindowList => window.name.clone().filter(|name| !name.is_empty()),
        TitleSource::None => None,
    }
}

/// Title of the controllable window of `pid` closest to `bounds`.
///
/// Best effort: an unavailable process or an empty title yields `None`.
fn accessibility_title<S: WindowSource>(source: &S, pid: i32, bounds: &Rect) -> Option<String> {
    let handles = match source.list_controllable_windows(pid) {
        Ok(handles) => handles,
        Err(e) => {
            debug!(
                event = "core.capture.title_lookup_failed",
                pid = pid,
                error = %e
            );
            return None;
        }
    };

    let best = closest(bounds, handles, |h| h.frame())?;
    best.item.title().filter(|title| !title.is_empty())
}

//! Matching cascade: re-associate a snapshot with one live window handle.
//!
//! Tiers run in a fixed order and the first hit wins:
//!
//! 1. **Id**: the snapshot's `(window_id, pid)` is still in the window list.
//!    The window list and the controllable handles share no identifiers, so
//!    the listed entry's current frame is used as an anchor and the handle
//!    closest to it is chosen. No proximity threshold is applied.
//! 2. **Title**: first handle whose non-empty title equals the snapshot's.
//! 3. **Geometry**: handle closest to the snapshot's recorded frame.

use tracing::debug;

use super::types::{MatchResult, MatchTier};
use crate::geometry::{Rect, closest};
use crate::snapshot::WindowSnapshot;
use crate::window::{ScreenWindow, WindowHandle};

/// Reconcile one snapshot against the current window list and the
/// controllable handles of its owning process.
pub fn reconcile<H: WindowHandle>(
    snapshot: &WindowSnapshot,
    screen: &[ScreenWindow],
    handles: Vec<H>,
) -> MatchResult<H> {
    let found = match_by_id(snapshot, screen, &handles)
        .map(|index| (MatchTier::ById, index))
        .or_else(|| match_by_title(snapshot, &handles).map(|index| (MatchTier::ByTitle, index)))
        .or_else(|| {
            match_by_geometry(snapshot, &handles).map(|index| (MatchTier::ByGeometry, index))
        });

    let Some((tier, index)) = found else {
        debug!(
            event = "core.reconcile.unmatched",
            app_name = snapshot.app_name(),
            pid = snapshot.pid(),
            candidates = handles.len()
        );
        return MatchResult::unmatched();
    };

    debug!(
        event = "core.reconcile.matched",
        app_name = snapshot.app_name(),
        pid = snapshot.pid(),
        tier = %tier,
        index = index
    );

    match handles.into_iter().nth(index) {
        Some(handle) => MatchResult::matched(tier, handle),
        None => MatchResult::unmatched(),
    }
}

/// Anchor frame of the snapshot's window if its identity is still listed.
pub fn find_anchor(snapshot: &WindowSnapshot, screen: &[ScreenWindow]) -> Option<Rect> {
    screen
        .iter()
        .filter(|w| w.has_identity(snapshot.window_id(), snapshot.pid()))
        .find_map(|w| w.bounds)
}

/// Index of the handle closest to the anchor of the snapshot's identity.
pub fn match_by_id<H: WindowHandle>(
    snapshot: &WindowSnapshot,
    screen: &[ScreenWindow],
    handles: &[H],
) -> Option<usize> {
    let anchor = find_anchor(snapshot, screen)?;
    closest_index(&anchor, handles)
}

/// Index of the first handle whose title equals the snapshot's, exactly.
///
/// Never matches when the snapshot has no title or an empty one.
pub fn match_by_title<H: WindowHandle>(snapshot: &WindowSnapshot, handles: &[H]) -> Option<usize> {
    let saved = snapshot.title().filter(|t| !t.is_empty())?;
    handles.iter().position(|handle| {
        handle
            .title()
            .is_some_and(|current| !current.is_empty() && current == saved)
    })
}

/// Index of the handle closest to the snapshot's recorded frame.
pub fn match_by_geometry<H: WindowHandle>(
    snapshot: &WindowSnapshot,
    handles: &[H],
) -> Option<usize> {
    closest_index(&snapshot.frame(), handles)
}

fn closest_index<H: WindowHandle>(target: &Rect, handles: &[H]) -> Option<usize> {
    closest(target, handles.iter().enumerate(), |(_, h)| h.frame()).map(|best| best.item.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::test_support::FakeWindow;

    fn snapshot(title: Option<&str>) -> WindowSnapshot {
        WindowSnapshot::new(
            "Editor",
            7,
            100,
            Point::new(10.0, 20.0),
            Size::new(800.0, 600.0),
            title.map(str::to_string),
        )
    }

    fn listed(window_id: u32, pid: i32, frame: Rect) -> ScreenWindow {
        ScreenWindow::new(window_id, pid, "Editor", frame, 0)
    }

    #[test]
    fn test_id_tier_uses_anchor_not_recorded_frame() {
        // The window moved after capture; the anchor is where it is now.
        let screen = vec![listed(7, 100, Rect::from_xywh(600.0, 400.0, 800.0, 600.0))];
        let handles = vec![
            FakeWindow::at(10.0, 20.0, 800.0, 600.0),
            FakeWindow::at(601.0, 399.0, 800.0, 600.0),
        ];

        let result = reconcile(&snapshot(None), &screen, handles.clone());

        assert_eq!(result.tier(), MatchTier::ById);
        assert!(result.handle().unwrap().same_window(&handles[1]));
    }

    #[test]
    fn test_id_requires_matching_pid() {
        let screen = vec![listed(7, 999, Rect::from_xywh(600.0, 400.0, 800.0, 600.0))];
        assert!(find_anchor(&snapshot(None), &screen).is_none());
    }

    #[test]
    fn test_id_beats_title() {
        let screen = vec![listed(7, 100, Rect::from_xywh(0.0, 0.0, 300.0, 300.0))];
        let handles = vec![
            FakeWindow::at(900.0, 900.0, 800.0, 600.0).titled("main.rs"),
            FakeWindow::at(0.0, 0.0, 300.0, 300.0).titled("scratch"),
        ];

        let result = reconcile(&snapshot(Some("main.rs")), &screen, handles.clone());

        assert_eq!(result.tier(), MatchTier::ById);
        assert!(result.handle().unwrap().same_window(&handles[1]));
    }

    #[test]
    fn test_id_accepts_poor_anchor_proximity() {
        let screen = vec![listed(7, 100, Rect::from_xywh(0.0, 0.0, 10.0, 10.0))];
        let handles = vec![FakeWindow::at(5000.0, 5000.0, 2000.0, 2000.0).titled("main.rs")];

        let result = reconcile(&snapshot(None), &screen, handles);
        assert_eq!(result.tier(), MatchTier::ById);
    }

    #[test]
    fn test_id_without_readable_handles_falls_through_to_title() {
        let screen = vec![listed(7, 100, Rect::from_xywh(0.0, 0.0, 300.0, 300.0))];
        let handles = vec![FakeWindow::at(0.0, 0.0, 300.0, 300.0).titled("main.rs").unreadable()];

        let result = reconcile(&snapshot(Some("main.rs")), &screen, handles);
        assert_eq!(result.tier(), MatchTier::ByTitle);
    }

    #[test]
    fn test_listed_entry_without_bounds_is_not_an_anchor() {
        let screen = vec![ScreenWindow {
            bounds: None,
            ..listed(7, 100, Rect::default())
        }];
        assert!(find_anchor(&snapshot(None), &screen).is_none());
    }

    #[test]
    fn test_title_tier_first_exact_match_wins() {
        let handles = vec![
            FakeWindow::at(0.0, 0.0, 1.0, 1.0).titled("MAIN.RS"),
            FakeWindow::at(0.0, 0.0, 2.0, 2.0).titled("main.rs"),
            FakeWindow::at(10.0, 20.0, 800.0, 600.0).titled("main.rs"),
        ];

        let result = reconcile(&snapshot(Some("main.rs")), &[], handles.clone());

        assert_eq!(result.tier(), MatchTier::ByTitle);
        assert!(result.handle().unwrap().same_window(&handles[1]));
    }

    #[test]
    fn test_title_tier_is_case_sensitive() {
        let handles = vec![FakeWindow::at(0.0, 0.0, 1.0, 1.0).titled("Main.rs")];
        assert_eq!(match_by_title(&snapshot(Some("main.rs")), &handles), None);
    }

    #[test]
    fn test_empty_snapshot_title_skips_title_tier() {
        let handles = vec![FakeWindow::at(0.0, 0.0, 1.0, 1.0).titled("")];
        assert_eq!(match_by_title(&snapshot(Some("")), &handles), None);
        assert_eq!(match_by_title(&snapshot(None), &handles), None);
    }

    #[test]
    fn test_geometry_fallback_picks_closest() {
        let handles = vec![
            FakeWindow::at(400.0, 400.0, 800.0, 600.0).titled("a"),
            FakeWindow::at(12.0, 18.0, 800.0, 600.0).titled("b"),
        ];

        let result = reconcile(&snapshot(Some("gone")), &[], handles.clone());

        assert_eq!(result.tier(), MatchTier::ByGeometry);
        assert!(result.handle().unwrap().same_window(&handles[1]));
    }

    #[test]
    fn test_geometry_ties_keep_first_handle() {
        let handles = vec![
            FakeWindow::at(13.0, 20.0, 800.0, 600.0),
            FakeWindow::at(7.0, 20.0, 800.0, 600.0),
        ];
        assert_eq!(match_by_geometry(&snapshot(None), &handles), Some(0));
    }

    #[test]
    fn test_no_handles_is_unmatched() {
        let result = reconcile::<FakeWindow>(&snapshot(Some("main.rs")), &[], Vec::new());
        assert_eq!(result.tier(), MatchTier::Unmatched);
        assert!(!result.is_matched());
    }

    #[test]
    fn test_only_unreadable_handles_is_unmatched() {
        let handles = vec![FakeWindow::at(10.0, 20.0, 800.0, 600.0).unreadable()];
        let result = reconcile(&snapshot(None), &[], handles);
        assert_eq!(result.tier(), MatchTier::Unmatched);
    }
}

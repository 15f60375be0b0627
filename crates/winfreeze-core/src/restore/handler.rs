use std::path::Path;

use tracing::{info, warn};

use super::errors::RestoreError;
use super::types::{OutcomeStatus, RestoreReport, WindowOutcome};
use crate::reconcile::reconcile;
use crate::reposition::{Clock, RepositionOptions, RepositionTask, TaskStatus, reposition};
use crate::snapshot::{WindowSnapshot, load_snapshots};
use crate::window::WindowSource;

/// Reconcile every snapshot against the live window set, then drive all
/// matched windows back to their recorded geometry in one batch.
///
/// Only a failing on-screen window list aborts. A process whose controllable
/// windows cannot be listed yields [`OutcomeStatus::Skipped`] for its
/// snapshots; snapshots with no live counterpart yield
/// [`OutcomeStatus::Unmatched`]. The report holds one outcome per snapshot,
/// in input order.
pub fn reconcile_and_reposition<S: WindowSource, C: Clock>(
    source: &S,
    clock: &C,
    snapshots: &[WindowSnapshot],
    options: &RepositionOptions,
) -> Result<RestoreReport, RestoreError> {
    info!(event = "core.restore.started", count = snapshots.len());

    let screen = source.list_on_screen_windows().inspect_err(|e| {
        warn!(event = "core.restore.enumeration_failed", error = %e);
    })?;

    let mut statuses: Vec<Option<OutcomeStatus>> = vec![None; snapshots.len()];
    let mut tasks = Vec::new();

    for (key, snapshot) in snapshots.iter().enumerate() {
        let handles = match source.list_controllable_windows(snapshot.pid()) {
            Ok(handles) => handles,
            Err(e) => {
                warn!(
                    event = "core.restore.window_skipped",
                    app_name = snapshot.app_name(),
                    pid = snapshot.pid(),
                    error = %e
                );
                statuses[key] = Some(OutcomeStatus::Skipped {
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match reconcile(snapshot, &screen, handles).into_parts() {
            (tier, Some(handle)) => {
                tasks.push(RepositionTask::new(key, snapshot, handle, tier));
            }
            (_, None) => {
                warn!(
                    event = "core.restore.window_unmatched",
                    app_name = snapshot.app_name(),
                    window_id = snapshot.window_id(),
                    pid = snapshot.pid(),
                    title = ?snapshot.title()
                );
                statuses[key] = Some(OutcomeStatus::Unmatched);
            }
        }
    }

    info!(
        event = "core.restore.reconcile_completed",
        matched = tasks.len(),
        total = snapshots.len()
    );

    let summary = reposition(tasks, clock, options);

    for outcome in summary.outcomes {
        statuses[outcome.key] = Some(match outcome.status {
            TaskStatus::Converged { attempts } => OutcomeStatus::Converged {
                tier: outcome.tier,
                attempts,
            },
            TaskStatus::Unconverged { last_position } => OutcomeStatus::Unconverged {
                tier: outcome.tier,
                last_position,
            },
        });
    }

    let outcomes: Vec<WindowOutcome> = snapshots
        .iter()
        .zip(statuses)
        .map(|(snapshot, status)| {
            WindowOutcome::new(snapshot, status.unwrap_or(OutcomeStatus::Unmatched))
        })
        .collect();

    let report = RestoreReport {
        outcomes,
        attempts: summary.attempts,
        elapsed: summary.elapsed,
    };

    info!(
        event = "core.restore.completed",
        converged = report.converged_count(),
        total = report.outcomes.len(),
        attempts = report.attempts,
        elapsed_ms = report.elapsed.as_millis() as u64
    );

    Ok(report)
}

/// Load a snapshot file and restore it. A missing or malformed file aborts
/// before any window is enumerated.
pub fn restore_from_file<S: WindowSource, C: Clock>(
    source: &S,
    clock: &C,
    path: &Path,
    options: &RepositionOptions,
) -> Result<RestoreReport, RestoreError> {
    let snapshots = load_snapshots(path)?;
    reconcile_and_reposition(source, clock, &snapshots, options)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::capture::{CaptureOptions, capture};
    use crate::geometry::{Point, Rect, Size};
    use crate::reconcile::MatchTier;
    use crate::snapshot::save_snapshots;
    use crate::test_support::{FakeClock, FakeWindow, FakeWindowSource};
    use crate::window::ScreenWindow;

    fn snapshot(window_id: u32, pid: i32, x: f64, y: f64, title: Option<&str>) -> WindowSnapshot {
        WindowSnapshot::new(
            "Editor",
            window_id,
            pid,
            Point::new(x, y),
            Size::new(800.0, 600.0),
            title.map(str::to_string),
        )
    }

    #[test]
    fn test_capture_then_restore_converges_in_one_attempt() {
        let left = FakeWindow::at(0.0, 0.0, 800.0, 600.0).titled("left");
        let right = FakeWindow::at(900.0, 0.0, 800.0, 600.0).titled("right");
        let source = FakeWindowSource::new()
            .with_screen_window(ScreenWindow::new(
                1,
                100,
                "Editor",
                Rect::from_xywh(0.0, 0.0, 800.0, 600.0),
                0,
            ))
            .with_screen_window(ScreenWindow::new(
                2,
                100,
                "Editor",
                Rect::from_xywh(900.0, 0.0, 800.0, 600.0),
                0,
            ))
            .with_process(100, vec![left.clone(), right.clone()]);
        let clock = FakeClock::new();

        let snapshots = capture(&source, &CaptureOptions::default()).unwrap();
        let report =
            reconcile_and_reposition(&source, &clock, &snapshots, &RepositionOptions::default())
                .unwrap();

        assert!(report.is_complete());
        assert_eq!(report.attempts, 1);
        assert_eq!(report.converged_count(), 2);
        assert_eq!(
            report.outcomes[0].status,
            OutcomeStatus::Converged {
                tier: MatchTier::ById,
                attempts: 1
            }
        );
        assert_eq!(left.current_position(), Point::new(0.0, 0.0));
        assert_eq!(right.current_position(), Point::new(900.0, 0.0));
    }

    #[test]
    fn test_moved_window_is_restored_by_title() {
        let window = FakeWindow::at(300.0, 300.0, 400.0, 400.0).titled("notes");
        let source = FakeWindowSource::new().with_process(100, vec![window.clone()]);
        let clock = FakeClock::new();
        let snapshots = vec![snapshot(9, 100, 10.0, 20.0, Some("notes"))];

        let report =
            reconcile_and_reposition(&source, &clock, &snapshots, &RepositionOptions::default())
                .unwrap();

        assert_eq!(
            report.outcomes[0].status,
            OutcomeStatus::Converged {
                tier: MatchTier::ByTitle,
                attempts: 1
            }
        );
        assert_eq!(window.current_position(), Point::new(10.0, 20.0));
        assert_eq!(window.current_size(), Size::new(800.0, 600.0));
    }

    #[test]
    fn test_unmatched_snapshot_does_not_block_batch() {
        let window = FakeWindow::at(0.0, 0.0, 800.0, 600.0);
        let source = FakeWindowSource::new().with_process(100, vec![window.clone()]);
        let clock = FakeClock::new();
        let snapshots = vec![
            snapshot(1, 200, 0.0, 0.0, None),
            snapshot(2, 100, 50.0, 60.0, None),
        ];

        let report =
            reconcile_and_reposition(&source, &clock, &snapshots, &RepositionOptions::default())
                .unwrap();

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[0].pid, 200);
        assert_eq!(report.outcomes[0].status, OutcomeStatus::Unmatched);
        assert_eq!(report.outcomes[1].pid, 100);
        assert!(report.outcomes[1].is_converged());
        assert!(!report.is_complete());
    }

    #[test]
    fn test_failing_process_is_skipped() {
        let window = FakeWindow::at(0.0, 0.0, 800.0, 600.0);
        let source = FakeWindowSource::new()
            .with_failing_pid(300)
            .with_process(100, vec![window]);
        let clock = FakeClock::new();
        let snapshots = vec![
            snapshot(1, 300, 0.0, 0.0, None),
            snapshot(2, 100, 0.0, 0.0, None),
        ];

        let report =
            reconcile_and_reposition(&source, &clock, &snapshots, &RepositionOptions::default())
                .unwrap();

        let OutcomeStatus::Skipped { reason } = &report.outcomes[0].status else {
            panic!("expected skipped outcome");
        };
        assert!(reason.contains("300"));
        assert!(report.outcomes[1].is_converged());
    }

    #[test]
    fn test_window_list_failure_aborts_restore() {
        let source = FakeWindowSource::new().with_screen_unavailable();
        let clock = FakeClock::new();
        let snapshots = vec![snapshot(1, 100, 0.0, 0.0, None)];

        let result =
            reconcile_and_reposition(&source, &clock, &snapshots, &RepositionOptions::default());

        assert!(matches!(result, Err(RestoreError::Enumeration { .. })));
        assert_eq!(source.ax_calls(), 0);
    }

    #[test]
    fn test_stuck_window_reported_unconverged_with_tier() {
        let window = FakeWindow::at(400.0, 400.0, 800.0, 600.0).frozen();
        let source = FakeWindowSource::new().with_process(100, vec![window]);
        let clock = FakeClock::new();
        let snapshots = vec![snapshot(1, 100, 0.0, 0.0, None)];

        let report =
            reconcile_and_reposition(&source, &clock, &snapshots, &RepositionOptions::default())
                .unwrap();

        assert_eq!(
            report.outcomes[0].status,
            OutcomeStatus::Unconverged {
                tier: MatchTier::ByGeometry,
                last_position: Some(Point::new(400.0, 400.0)),
            }
        );
        assert_eq!(report.attempts, 40);
        assert!(report.elapsed >= Duration::from_secs(10));
    }

    #[test]
    fn test_empty_snapshot_list() {
        let source = FakeWindowSource::new();
        let clock = FakeClock::new();

        let report =
            reconcile_and_reposition(&source, &clock, &[], &RepositionOptions::default()).unwrap();

        assert!(report.outcomes.is_empty());
        assert_eq!(report.attempts, 0);
        assert_eq!(clock.sleeps(), 0);
    }

    #[test]
    fn test_restore_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("windows.json");
        save_snapshots(&path, &[snapshot(1, 100, 25.0, 35.0, None)]).unwrap();

        let window = FakeWindow::at(0.0, 0.0, 800.0, 600.0);
        let source = FakeWindowSource::new().with_process(100, vec![window.clone()]);
        let clock = FakeClock::new();

        let report =
            restore_from_file(&source, &clock, &path, &RepositionOptions::default()).unwrap();

        assert!(report.is_complete());
        assert_eq!(window.current_position(), Point::new(25.0, 35.0));
    }

    #[test]
    fn test_restore_from_missing_file_fails_before_enumeration() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeWindowSource::new().with_screen_unavailable();
        let clock = FakeClock::new();

        let result = restore_from_file(
            &source,
            &clock,
            &dir.path().join("missing.json"),
            &RepositionOptions::default(),
        );

        assert!(matches!(result, Err(RestoreError::Snapshot { .. })));
    }
}

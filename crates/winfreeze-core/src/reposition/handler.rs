use tracing::{debug, info, warn};

use super::clock::Clock;
use super::types::{
    RepositionOptions, RepositionSummary, RepositionTask, TaskOutcome, TaskStatus,
};
use crate::geometry::{Point, within_tolerance};
use crate::window::WindowHandle;

struct Pending<'a, H> {
    task: RepositionTask<'a, H>,
    last_position: Option<Point>,
}

/// Apply target geometry to every task until each is observed in place or
/// the time budget runs out.
///
/// Each attempt writes position then size to every remaining task, sleeps
/// once for `retry_interval`, then re-reads positions. A task leaves the
/// working set only when both axes are within `tolerance`; write failures
/// and unreadable positions keep it for the next attempt. Nothing is rolled
/// back on timeout.
pub fn reposition<H: WindowHandle, C: Clock>(
    tasks: Vec<RepositionTask<'_, H>>,
    clock: &C,
    options: &RepositionOptions,
) -> RepositionSummary {
    let start = clock.now();
    let mut pending: Vec<Pending<'_, H>> = tasks
        .into_iter()
        .map(|task| Pending {
            task,
            last_position: None,
        })
        .collect();
    let mut outcomes = Vec::with_capacity(pending.len());
    let mut attempts = 0;

    info!(
        event = "core.reposition.started",
        count = pending.len(),
        timeout_ms = options.timeout.as_millis() as u64,
        retry_interval_ms = options.retry_interval.as_millis() as u64
    );

    while !pending.is_empty() && clock.now().duration_since(start) < options.timeout {
        attempts += 1;
        info!(
            event = "core.reposition.attempt_started",
            attempt = attempts,
            remaining = pending.len()
        );

        for entry in &pending {
            apply_target(&entry.task);
        }

        clock.sleep(options.retry_interval);

        let mut remaining = Vec::with_capacity(pending.len());
        for mut entry in pending {
            match entry.task.handle.position() {
                Ok(current)
                    if within_tolerance(current, entry.task.target_position, options.tolerance) =>
                {
                    info!(
                        event = "core.reposition.window_converged",
                        app_name = entry.task.snapshot.app_name(),
                        pid = entry.task.snapshot.pid(),
                        attempt = attempts
                    );
                    outcomes.push(TaskOutcome {
                        key: entry.task.key,
                        tier: entry.task.tier,
                        status: TaskStatus::Converged { attempts },
                    });
                }
                Ok(current) => {
                    debug!(
                        event = "core.reposition.window_off_target",
                        app_name = entry.task.snapshot.app_name(),
                        x = current.x,
                        y = current.y,
                        target_x = entry.task.target_position.x,
                        target_y = entry.task.target_position.y
                    );
                    entry.last_position = Some(current);
                    remaining.push(entry);
                }
                Err(e) => {
                    debug!(
                        event = "core.reposition.position_unreadable",
                        app_name = entry.task.snapshot.app_name(),
                        error = %e
                    );
                    remaining.push(entry);
                }
            }
        }
        pending = remaining;
    }

    let elapsed = clock.now().duration_since(start);

    if pending.is_empty() {
        info!(
            event = "core.reposition.completed",
            attempts = attempts,
            elapsed_ms = elapsed.as_millis() as u64
        );
    } else {
        warn!(
            event = "core.reposition.timed_out",
            unconverged = pending.len(),
            attempts = attempts,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    outcomes.extend(pending.into_iter().map(|entry| {
        warn!(
            event = "core.reposition.window_unconverged",
            app_name = entry.task.snapshot.app_name(),
            pid = entry.task.snapshot.pid(),
            title = ?entry.task.snapshot.title()
        );
        TaskOutcome {
            key: entry.task.key,
            tier: entry.task.tier,
            status: TaskStatus::Unconverged {
                last_position: entry.last_position,
            },
        }
    }));

    RepositionSummary {
        outcomes,
        attempts,
        elapsed,
    }
}

/// Write position, then size. A rejected position skips the size write for
/// this attempt.
fn apply_target<H: WindowHandle>(task: &RepositionTask<'_, H>) {
    if let Err(e) = task.handle.set_position(task.target_position) {
        warn!(
            event = "core.reposition.set_position_failed",
            app_name = task.snapshot.app_name(),
            pid = task.snapshot.pid(),
            error = %e
        );
        return;
    }

    if let Err(e) = task.handle.set_size(task.target_size) {
        warn!(
            event = "core.reposition.set_size_failed",
            app_name = task.snapshot.app_name(),
            pid = task.snapshot.pid(),
            error = %e
        );
    }
}

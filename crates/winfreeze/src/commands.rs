use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info, warn};

use winfreeze_core::capture::{CaptureOptions, TitleSource, capture};
use winfreeze_core::config::FreezeConfig;
use winfreeze_core::events;
use winfreeze_core::reposition::{RepositionOptions, SystemClock};
use winfreeze_core::restore::{RestoreReport, reconcile_and_reposition};
use winfreeze_core::snapshot::{load_snapshots, save_snapshots};
use winfreeze_core::window::{NativeWindowSource, WindowSource};

use crate::table;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("capture", sub_matches)) => handle_capture_command(sub_matches),
        Some(("restore", sub_matches)) => handle_restore_command(sub_matches),
        Some(("list", sub_matches)) => handle_list_command(sub_matches),
        Some(("show", sub_matches)) => handle_show_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

/// Load the user config, reporting failures on stderr.
fn load_config() -> Result<FreezeConfig, Box<dyn std::error::Error>> {
    FreezeConfig::load_hierarchy().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        error!(event = "cli.config_load_failed", error = %e);
        events::log_app_error(&e);
        e.into()
    })
}

/// Positional FILE argument, else the configured or default snapshot path.
fn snapshot_path(matches: &ArgMatches, config: &FreezeConfig) -> PathBuf {
    matches
        .get_one::<String>("file")
        .map(PathBuf::from)
        .unwrap_or_else(|| config.storage.snapshot_path())
}

fn native_source() -> Result<NativeWindowSource, Box<dyn std::error::Error>> {
    NativeWindowSource::new().map_err(|e| {
        eprintln!("Cannot access windows: {}", e);
        error!(event = "cli.window_source_failed", error = %e);
        events::log_app_error(&e);
        e.into()
    })
}

fn handle_capture_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let path = snapshot_path(matches, &config);
    let json_output = matches.get_flag("json");

    let title_source = match matches.get_one::<String>("title-source") {
        Some(value) => value.parse::<TitleSource>()?,
        None => config.capture.title_source,
    };

    info!(
        event = "cli.capture_started",
        path = %path.display(),
        title_source = %title_source,
        json_output = json_output
    );

    let source = native_source()?;
    let snapshots = match capture(&source, &CaptureOptions::new(title_source)) {
        Ok(snapshots) => snapshots,
        Err(e) => {
            eprintln!("Failed to capture windows: {}", e);
            error!(event = "cli.capture_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    if let Err(e) = save_snapshots(&path, &snapshots) {
        eprintln!("Failed to save snapshot: {}", e);
        error!(event = "cli.capture_save_failed", error = %e);
        events::log_app_error(&e);
        return Err(e.into());
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    } else if snapshots.is_empty() {
        println!("No windows to save. Wrote empty snapshot to {}", path.display());
    } else {
        println!("Saved {} windows to {}", snapshots.len(), path.display());
        table::print_snapshots_table(&snapshots);
    }

    info!(
        event = "cli.capture_completed",
        count = snapshots.len(),
        path = %path.display()
    );
    Ok(())
}

fn handle_restore_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let path = snapshot_path(matches, &config);
    let json_output = matches.get_flag("json");
    let options = restore_options(matches, &config)?;

    info!(
        event = "cli.restore_started",
        path = %path.display(),
        timeout_ms = options.timeout.as_millis() as u64,
        retry_interval_ms = options.retry_interval.as_millis() as u64,
        tolerance = options.tolerance
    );

    let snapshots = match load_snapshots(&path) {
        Ok(snapshots) => snapshots,
        Err(e) => {
            eprintln!("Failed to load snapshot: {}", e);
            error!(event = "cli.restore_load_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let source = native_source()?;
    let report = match reconcile_and_reposition(&source, &SystemClock, &snapshots, &options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Failed to restore windows: {}", e);
            error!(event = "cli.restore_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else if report.outcomes.is_empty() {
        println!("Snapshot {} contains no windows.", path.display());
    } else {
        table::print_outcomes_table(&report.outcomes);
        println!(
            "Restored {}/{} windows in {} attempts ({} ms)",
            report.converged_count(),
            report.outcomes.len(),
            report.attempts,
            report.elapsed.as_millis()
        );
    }

    let failed = report.failures().count();
    if failed > 0 {
        warn!(
            event = "cli.restore_incomplete",
            failed = failed,
            total = report.outcomes.len()
        );
        return Err(format!(
            "{} of {} windows were not restored",
            failed,
            report.outcomes.len()
        )
        .into());
    }

    info!(
        event = "cli.restore_completed",
        count = report.outcomes.len(),
        attempts = report.attempts
    );
    Ok(())
}

/// Config values overridden by any command-line flags.
fn restore_options(
    matches: &ArgMatches,
    config: &FreezeConfig,
) -> Result<RepositionOptions, Box<dyn std::error::Error>> {
    let mut restore = config.restore.clone();
    if let Some(timeout_ms) = matches.get_one::<u64>("timeout-ms") {
        restore.timeout_ms = *timeout_ms;
    }
    if let Some(interval_ms) = matches.get_one::<u64>("interval-ms") {
        restore.retry_interval_ms = *interval_ms;
    }
    if let Some(tolerance) = matches.get_one::<f64>("tolerance") {
        if !tolerance.is_finite() || *tolerance < 0.0 {
            eprintln!(
                "Invalid --tolerance '{}': expected a finite number >= 0",
                tolerance
            );
            return Err(format!("Invalid tolerance: {}", tolerance).into());
        }
        restore.tolerance = *tolerance;
    }
    Ok(restore.to_options())
}

fn report_json(report: &RestoreReport) -> serde_json::Value {
    serde_json::json!({
        "complete": report.is_complete(),
        "attempts": report.attempts,
        "elapsedMs": report.elapsed.as_millis() as u64,
        "windows": report.outcomes,
    })
}

fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_started", json_output = json_output);

    let source = native_source()?;
    let windows = match source.list_on_screen_windows() {
        Ok(windows) => windows,
        Err(e) => {
            eprintln!("Failed to list windows: {}", e);
            error!(event = "cli.list_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let standard: Vec<_> = windows
        .into_iter()
        .filter(|w| w.is_standard_layer())
        .collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&standard)?);
    } else if standard.is_empty() {
        println!("No application windows on screen.");
    } else {
        println!("On-screen windows:");
        table::print_screen_windows_table(&standard);
    }

    info!(event = "cli.list_completed", count = standard.len());
    Ok(())
}

fn handle_show_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let path = snapshot_path(matches, &config);
    let json_output = matches.get_flag("json");

    info!(
        event = "cli.show_started",
        path = %path.display(),
        json_output = json_output
    );

    let snapshots = match load_snapshots(&path) {
        Ok(snapshots) => snapshots,
        Err(e) => {
            eprintln!("Failed to load snapshot: {}", e);
            error!(event = "cli.show_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    } else if snapshots.is_empty() {
        println!("Snapshot {} contains no windows.", path.display());
    } else {
        println!("Saved windows ({}):", path.display());
        table::print_snapshots_table(&snapshots);
    }

    info!(event = "cli.show_completed", count = snapshots.len());
    Ok(())
}

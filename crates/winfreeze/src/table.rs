use winfreeze_core::restore::{OutcomeStatus, WindowOutcome};
use winfreeze_core::snapshot::WindowSnapshot;
use winfreeze_core::window::ScreenWindow;

/// Box-drawn table with fixed column widths.
pub struct TableFormatter {
    widths: Vec<usize>,
}

impl TableFormatter {
    /// Column widths are the widest of the header and every cell, clamped to
    /// `max_width`.
    pub fn new(headers: &[&str], rows: &[Vec<String>], max_width: usize) -> Self {
        let widths = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
                    .clamp(1, max_width)
            })
            .collect();

        Self { widths }
    }

    pub fn render(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
        let mut lines = Vec::with_capacity(rows.len() + 4);
        lines.push(self.border('┌', '┬', '┐'));
        lines.push(self.row(headers.iter().copied()));
        lines.push(self.border('├', '┼', '┤'));
        for row in rows {
            lines.push(self.row(row.iter().map(String::as_str)));
        }
        lines.push(self.border('└', '┴', '┘'));
        lines
    }

    pub fn print_table(&self, headers: &[&str], rows: &[Vec<String>]) {
        for line in self.render(headers, rows) {
            println!("{}", line);
        }
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(&middle.to_string()), right)
    }

    fn row<'a>(&self, cells: impl Iterator<Item = &'a str>) -> String {
        let cells: Vec<String> = cells
            .zip(&self.widths)
            .map(|(cell, width)| format!(" {} ", truncate(cell, *width)))
            .collect();
        format!("│{}│", cells.join("│"))
    }
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) to safely handle UTF-8 strings
/// including emoji and multi-byte characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}

const MAX_COLUMN_WIDTH: usize = 40;

fn format_pair(a: f64, b: f64) -> String {
    format!("{:.0},{:.0}", a, b)
}

pub fn print_snapshots_table(snapshots: &[WindowSnapshot]) {
    let headers = ["App", "Window", "PID", "Position", "Size", "Title"];
    let rows: Vec<Vec<String>> = snapshots
        .iter()
        .map(|s| {
            vec![
                s.app_name().to_string(),
                s.window_id().to_string(),
                s.pid().to_string(),
                format_pair(s.position().x, s.position().y),
                format!("{:.0}x{:.0}", s.size().width, s.size().height),
                s.title().unwrap_or("").to_string(),
            ]
        })
        .collect();

    TableFormatter::new(&headers, &rows, MAX_COLUMN_WIDTH).print_table(&headers, &rows);
}

pub fn print_screen_windows_table(windows: &[ScreenWindow]) {
    let headers = ["App", "Window", "PID", "Position", "Size", "Name"];
    let rows: Vec<Vec<String>> = windows
        .iter()
        .map(|w| {
            let (position, size) = match w.bounds {
                Some(b) => (
                    format_pair(b.origin.x, b.origin.y),
                    format!("{:.0}x{:.0}", b.size.width, b.size.height),
                ),
                None => ("-".to_string(), "-".to_string()),
            };
            vec![
                w.app_name.clone().unwrap_or_else(|| "-".to_string()),
                w.window_id.map_or("-".to_string(), |id| id.to_string()),
                w.pid.map_or("-".to_string(), |pid| pid.to_string()),
                position,
                size,
                w.name.clone().unwrap_or_default(),
            ]
        })
        .collect();

    TableFormatter::new(&headers, &rows, MAX_COLUMN_WIDTH).print_table(&headers, &rows);
}

pub fn print_outcomes_table(outcomes: &[WindowOutcome]) {
    let headers = ["App", "PID", "Title", "Match", "Result", "Detail"];
    let rows: Vec<Vec<String>> = outcomes
        .iter()
        .map(|o| {
            vec![
                o.app_name.clone(),
                o.pid.to_string(),
                o.title.clone().unwrap_or_default(),
                o.status.tier().map_or("-".to_string(), |t| t.to_string()),
                o.status.label().to_string(),
                outcome_detail(&o.status),
            ]
        })
        .collect();

    TableFormatter::new(&headers, &rows, MAX_COLUMN_WIDTH).print_table(&headers, &rows);
}

fn outcome_detail(status: &OutcomeStatus) -> String {
    match status {
        OutcomeStatus::Converged { attempts, .. } => format!("after {} attempts", attempts),
        OutcomeStatus::Unconverged {
            last_position: Some(p),
            ..
        } => format!("stuck at {}", format_pair(p.x, p.y)),
        OutcomeStatus::Unconverged {
            last_position: None,
            ..
        } => "position unreadable".to_string(),
        OutcomeStatus::Unmatched => "no live window".to_string(),
        OutcomeStatus::Skipped { reason } => reason.clone(),
    }
}

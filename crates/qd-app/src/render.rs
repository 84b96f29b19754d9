//! Text rendering of store snapshots

use std::fmt::Write;
use qd_core::{ChartKind, QueryState, ResultPayload};

/// Width of the longest bar
const BAR_WIDTH: usize = 40;

/// Render the result area: error, empty placeholder or the chart plus summary
pub fn render_results(state: &QueryState) -> String {
    if let Some(error) = &state.error {
        return format!("Error: {}\n", error);
    }

    let (Some(results), Some(kind)) = (&state.results, state.effective_chart()) else {
        return "No results yet. Try asking a question about your data.\n".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "== {} [{}] ==", results.title, kind);
    out.push_str(&render_chart(results, kind));
    let _ = writeln!(out, "\nKey insights: {}", results.summary);
    out
}

/// Render rows as the given chart kind
pub fn render_chart(results: &ResultPayload, kind: ChartKind) -> String {
    match kind {
        ChartKind::Table => render_table(results),
        ChartKind::Pie => render_shares(results),
        ChartKind::Bar | ChartKind::Line => render_bars(results, if kind == ChartKind::Line { '*' } else { '#' }),
    }
}

fn label_width(results: &ResultPayload) -> usize {
    results.rows.iter().map(|row| row.label().len()).max().unwrap_or(0)
}

fn render_table(results: &ResultPayload) -> String {
    let Some(first) = results.rows.first() else {
        return String::new();
    };

    let width = label_width(results).max(first.key.column().len());
    let mut out = String::new();
    let _ = writeln!(out, "{:<width$} | {}", first.key.column(), results.y_axis, width = width);
    let _ = writeln!(out, "{}-+-{}", "-".repeat(width), "-".repeat(results.y_axis.len().max(5)));
    for row in &results.rows {
        let _ = writeln!(out, "{:<width$} | {}", row.label(), results.format_value(row.value), width = width);
    }
    out
}

fn render_bars(results: &ResultPayload, mark: char) -> String {
    let max = results.max_value().max(1) as usize;
    let width = label_width(results);
    let mut out = String::new();
    for row in &results.rows {
        let len = row.value as usize * BAR_WIDTH / max;
        let bar: String = std::iter::repeat(mark).take(len).collect();
        let _ = writeln!(out, "{:<width$} | {} {}", row.label(), bar, results.format_value(row.value), width = width);
    }
    out
}

fn render_shares(results: &ResultPayload) -> String {
    let total = results.total();
    let width = label_width(results);
    let mut out = String::new();
    for row in &results.rows {
        let share = if total == 0 { 0.0 } else { f64::from(row.value) * 100.0 / total as f64 };
        let _ = writeln!(out, "{:<width$} | {:5.1}%", row.label(), share, width = width);
    }
    out
}

/// Render the history list, most recent first, with 1-based positions
pub fn render_history(state: &QueryState) -> String {
    if state.history.is_empty() {
        return "No queries yet.\n".to_string();
    }

    let mut out = String::new();
    for (i, record) in state.history.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} ({})",
            i + 1,
            record.query,
            record.timestamp.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
        );
    }
    out
}

pub fn render_suggestions(state: &QueryState) -> String {
    let mut out = String::new();
    for (i, suggestion) in state.suggestions.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, suggestion);
    }
    out
}
